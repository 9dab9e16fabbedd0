use std::collections::{BTreeMap, BTreeSet};

/// CSS `visibility` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// CSS `display` of an element. `Unset` means the stylesheet decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    #[default]
    Unset,
    None,
    Block,
    Flex,
}

/// The page operations the presentation controller relies on.
///
/// Every method addresses an element by id. Implementations may assume the
/// id exists; callers check with [`Surface::contains`] up front.
pub trait Surface {
    fn contains(&self, id: &str) -> bool;
    fn set_visibility(&mut self, id: &str, visibility: Visibility);
    fn set_display(&mut self, id: &str, display: Display);
    fn add_class(&mut self, id: &str, class: &str);
    fn remove_class(&mut self, id: &str, class: &str);
    fn has_class(&self, id: &str, class: &str) -> bool;
    fn visibility(&self, id: &str) -> Visibility;
    fn display(&self, id: &str) -> Display;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub visibility: Visibility,
    pub display: Display,
    pub classes: BTreeSet<String>,
}

/// In-memory element tree, keyed by element id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an element. Re-declaring an id keeps the existing element.
    pub fn declare(&mut self, id: impl Into<String>) -> &mut Element {
        self.elements.entry(id.into()).or_default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl Surface for Document {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_visibility(&mut self, id: &str, visibility: Visibility) {
        if let Some(el) = self.elements.get_mut(id) {
            el.visibility = visibility;
        }
    }

    fn set_display(&mut self, id: &str, display: Display) {
        if let Some(el) = self.elements.get_mut(id) {
            el.display = display;
        }
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.classes.remove(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn visibility(&self, id: &str) -> Visibility {
        self.elements
            .get(id)
            .map(|el| el.visibility)
            .unwrap_or_default()
    }

    fn display(&self, id: &str) -> Display {
        self.elements.get(id).map(|el| el.display).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_toggle() {
        let mut doc = Document::new();
        doc.declare("html");
        doc.add_class("html", "presentation");
        assert!(doc.has_class("html", "presentation"));
        doc.remove_class("html", "presentation");
        assert!(!doc.has_class("html", "presentation"));
    }

    #[test]
    fn test_undeclared_element_is_ignored() {
        let mut doc = Document::new();
        doc.set_display("missing", Display::Flex);
        doc.add_class("missing", "x");
        assert!(!doc.contains("missing"));
        assert!(!doc.has_class("missing", "x"));
    }

    #[test]
    fn test_declare_keeps_existing() {
        let mut doc = Document::new();
        doc.declare("state0").visibility = Visibility::Hidden;
        doc.declare("state0");
        assert_eq!(doc.visibility("state0"), Visibility::Hidden);
        assert_eq!(doc.len(), 1);
    }
}
