use anyhow::{Context, Result};

use crate::activation;
use crate::cli::PageArgs;
use crate::config::Config;
use crate::controller::{Controller, Presentation};
use crate::deck::Deck;
use crate::surface::Document;

/// Load the deck named on the command line, falling back to the configured
/// preset. A query flag in the config overrides the deck's own.
pub fn load_deck(args: &PageArgs, config: &Config) -> Result<Deck> {
    let mut deck = match &args.deck {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Deck::load_from(path).with_context(|| format!("Loading {}", path.display()))?
        }
        None => match args.preset {
            Some(preset) => preset.deck(),
            None => config.preset()?.deck(),
        },
    };
    if let Some(flag) = config.query_flag() {
        deck.query_flag = flag.to_string();
    }
    Ok(deck)
}

/// Page URL used when `--url` is absent: a local poster with the flag set.
pub fn location(args: &PageArgs, deck: &Deck) -> String {
    args.url
        .clone()
        .unwrap_or_else(|| format!("poster.html?{}", deck.query_flag))
}

/// Build the page for `deck` and run the activation check against it.
pub fn open(args: &PageArgs, deck: Deck) -> Result<Presentation<Document>> {
    let location = location(args, &deck);
    let mut root_classes = Vec::new();
    if args.mobile {
        root_classes.push(deck.exclusion_class.as_str());
    }
    let document = deck.document(&root_classes);

    let flag = deck.query_flag.clone();
    let root = deck.root.clone();
    let exclusion = deck.exclusion_class.clone();
    tracing::debug!(%location, mobile = args.mobile, "opening page");

    let presentation = Controller::activate(
        deck,
        document,
        || activation::query_flag_present(&location, &flag),
        |page: &Document| activation::root_has_class(page, &root, &exclusion),
    )?;
    Ok(presentation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Preset;

    fn args(preset: Preset) -> PageArgs {
        PageArgs {
            preset: Some(preset),
            ..PageArgs::default()
        }
    }

    #[test]
    fn test_default_location_activates() {
        let presentation = open(&args(Preset::Poster), Preset::Poster.deck()).unwrap();
        assert!(presentation.is_active());
    }

    #[test]
    fn test_url_without_flag_is_inert() {
        let mut page = args(Preset::FinalPoster);
        page.url = Some("https://example.org/poster/".to_string());
        let presentation = open(&page, Preset::FinalPoster.deck()).unwrap();
        assert!(!presentation.is_active());
    }

    #[test]
    fn test_mobile_is_inert() {
        let mut page = args(Preset::FinalPoster);
        page.mobile = true;
        let presentation = open(&page, Preset::FinalPoster.deck()).unwrap();
        assert!(!presentation.is_active());
    }

    #[test]
    fn test_config_overrides() {
        let mut config = Config::default();
        config.set("defaults.preset", "poster").unwrap();
        config.set("defaults.query_flag", "talk").unwrap();
        let deck = load_deck(&PageArgs::default(), &config).unwrap();
        assert_eq!(deck.max_state(), 4);
        assert_eq!(deck.query_flag, "talk");
        assert_eq!(location(&PageArgs::default(), &deck), "poster.html?talk");
    }

    #[test]
    fn test_open_uses_given_deck() {
        let mut deck = Preset::Poster.deck();
        deck.query_flag = "talk".to_string();
        let page = PageArgs {
            url: Some("poster.html?talk".to_string()),
            ..PageArgs::default()
        };
        let Presentation::Active(controller) = open(&page, deck).unwrap() else {
            panic!("expected presentation mode");
        };
        assert_eq!(controller.deck().query_flag, "talk");
        assert_eq!(controller.max_state(), 4);
    }

    #[test]
    fn test_missing_deck_file() {
        let page = PageArgs {
            deck: Some("does-not-exist.yaml".into()),
            ..PageArgs::default()
        };
        let err = load_deck(&page, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
