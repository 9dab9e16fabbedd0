use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Failed to read deck {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid deck: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Deck has no reveal panels")]
    Empty,

    #[error("Element id `{0}` is used more than once")]
    DuplicateElement(String),

    #[error("Deck contains an empty element id")]
    EmptyId,

    #[error("Element `{0}` in terminal-hidden is not a reveal panel")]
    NotARevealPanel(String),

    #[error("Element `{0}` is not declared on the page")]
    MissingElement(String),

    #[error("Unknown preset: {0}. Must be 'final-poster' or 'poster'.")]
    UnknownPreset(String),
}
