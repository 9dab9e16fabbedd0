use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::DeckError;
use crate::keymap::{Keymap, KeymapKind};
use crate::surface::{Display, Document, Surface};

/// How a reveal overlay is switched on and off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RevealStyle {
    /// Toggle a class on the overlay
    Class { name: String },
    /// Toggle the `display` property between `none` and `shown`
    Display { shown: Display },
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self::Class {
            name: "pres_visible".to_string(),
        }
    }
}

impl RevealStyle {
    pub fn show(&self, surface: &mut impl Surface, id: &str) {
        match self {
            Self::Class { name } => surface.add_class(id, name),
            Self::Display { shown } => surface.set_display(id, *shown),
        }
    }

    pub fn hide(&self, surface: &mut impl Surface, id: &str) {
        match self {
            Self::Class { name } => surface.remove_class(id, name),
            Self::Display { .. } => surface.set_display(id, Display::None),
        }
    }

    pub fn is_shown(&self, surface: &impl Surface, id: &str) -> bool {
        match self {
            Self::Class { name } => surface.has_class(id, name),
            Self::Display { .. } => surface.display(id) != Display::None,
        }
    }
}

/// What the overlays do once the deck's last state is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalReveal {
    #[default]
    HideAll,
    ShowAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPanel {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RevealPanel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// One entry of the state-indexed scene table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Base,
    Reveal(usize),
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Ten overlays, digit jumps, class toggles
    FinalPoster,
    /// Three overlays, arrows only, online-version panel
    Poster,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FinalPoster => "final-poster",
            Self::Poster => "poster",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DeckError> {
        match name {
            "final-poster" => Ok(Self::FinalPoster),
            "poster" => Ok(Self::Poster),
            _ => Err(DeckError::UnknownPreset(name.to_string())),
        }
    }

    pub fn all() -> &'static [Preset] {
        &[Preset::FinalPoster, Preset::Poster]
    }

    pub fn deck(&self) -> Deck {
        match self {
            Self::FinalPoster => Deck {
                title: Some("Final poster".to_string()),
                reveals: (1..=9)
                    .map(|i| RevealPanel::new(format!("state{i}")))
                    .collect(),
                terminal_hidden: vec!["state9".to_string()],
                ..Deck::default()
            },
            Self::Poster => Deck {
                title: Some("Poster".to_string()),
                reveal_style: RevealStyle::Display {
                    shown: Display::Flex,
                },
                reveals: (1..=3)
                    .map(|i| RevealPanel::new(format!("state{i}")))
                    .collect(),
                terminal: TerminalReveal::ShowAll,
                secondary: Some("online-version".to_string()),
                keymap: KeymapKind::Arrows,
                ignore_ctrl: false,
                ..Deck::default()
            },
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Describes one poster page: its elements, how they are toggled, and the
/// keys bound to it. The scene table has `reveals.len() + 2` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default = "default_root")]
    pub root: String,

    #[serde(default = "default_marker_class")]
    pub marker_class: String,

    #[serde(default = "default_exclusion_class")]
    pub exclusion_class: String,

    #[serde(default = "default_query_flag")]
    pub query_flag: String,

    #[serde(default = "default_base")]
    pub base: String,

    #[serde(default)]
    pub reveal_style: RevealStyle,

    pub reveals: Vec<RevealPanel>,

    #[serde(default)]
    pub terminal: TerminalReveal,

    /// Reveals forced to `display: block` while presenting and to
    /// `display: none` in the terminal state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terminal_hidden: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,

    #[serde(default)]
    pub keymap: KeymapKind,

    #[serde(default = "default_true")]
    pub ignore_ctrl: bool,
}

fn default_root() -> String {
    "html".to_string()
}

fn default_marker_class() -> String {
    "presentation".to_string()
}

fn default_exclusion_class() -> String {
    "mobile".to_string()
}

fn default_query_flag() -> String {
    "pres".to_string()
}

fn default_base() -> String {
    "state0".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            title: None,
            root: default_root(),
            marker_class: default_marker_class(),
            exclusion_class: default_exclusion_class(),
            query_flag: default_query_flag(),
            base: default_base(),
            reveal_style: RevealStyle::default(),
            reveals: Vec::new(),
            terminal: TerminalReveal::default(),
            terminal_hidden: Vec::new(),
            secondary: None,
            keymap: KeymapKind::default(),
            ignore_ctrl: true,
        }
    }
}

impl Deck {
    pub fn from_yaml(contents: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_yaml::from_str(contents)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn load_from(path: &Path) -> Result<Self, DeckError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.reveals.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut seen = HashSet::new();
        for id in self.element_ids() {
            if id.is_empty() {
                return Err(DeckError::EmptyId);
            }
            if !seen.insert(id) {
                return Err(DeckError::DuplicateElement(id.to_string()));
            }
        }
        if let Some(id) = self
            .terminal_hidden
            .iter()
            .find(|id| !self.reveals.iter().any(|r| &r.id == *id))
        {
            return Err(DeckError::NotARevealPanel(id.clone()));
        }
        Ok(())
    }

    /// Root first, then the base, the reveals and the secondary panel.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.root.as_str())
            .chain(std::iter::once(self.base.as_str()))
            .chain(self.reveals.iter().map(|r| r.id.as_str()))
            .chain(self.secondary.as_deref())
    }

    /// The terminal state's index.
    pub fn max_state(&self) -> usize {
        self.reveals.len() + 1
    }

    pub fn scenes(&self) -> Vec<Scene> {
        let mut scenes = Vec::with_capacity(self.max_state() + 1);
        scenes.push(Scene::Base);
        scenes.extend((0..self.reveals.len()).map(Scene::Reveal));
        scenes.push(Scene::Terminal);
        scenes
    }

    pub fn keymap(&self) -> Keymap {
        Keymap::new(self.keymap, self.ignore_ctrl)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("posterdeck")
    }

    /// Build a page holding every element the deck names.
    pub fn document(&self, root_classes: &[&str]) -> Document {
        let mut doc = Document::new();
        for id in self.element_ids() {
            doc.declare(id);
        }
        for class in root_classes {
            doc.add_class(&self.root, class);
        }
        for reveal in &self.reveals {
            self.reveal_style.hide(&mut doc, &reveal.id);
        }
        if let Some(secondary) = &self.secondary {
            doc.set_display(secondary, Display::None);
        }
        doc
    }
}
