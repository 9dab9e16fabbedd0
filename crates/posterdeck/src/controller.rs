use crate::deck::{Deck, Scene, TerminalReveal};
use crate::error::DeckError;
use crate::keymap::{Command, KeyEvent, Keymap};
use crate::surface::{Display, Surface, Visibility};

/// Result of [`Controller::activate`].
pub enum Presentation<S> {
    /// Presentation mode is on; key events go to the controller.
    Active(Controller<S>),
    /// Presentation mode is off; the page is left in normal document flow.
    Inert { deck: Deck, surface: S },
}

impl<S> Presentation<S> {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Owns the presentation state and the page it is rendered onto.
pub struct Controller<S> {
    deck: Deck,
    scenes: Vec<Scene>,
    keymap: Keymap,
    surface: S,
    state: usize,
}

impl<S: Surface> Controller<S> {
    /// Bind `deck` to `surface` without rendering. Fails if the deck is
    /// malformed or the page lacks an element the deck names.
    pub fn new(deck: Deck, surface: S) -> Result<Self, DeckError> {
        deck.validate()?;
        if let Some(missing) = deck.element_ids().find(|id| !surface.contains(id)) {
            return Err(DeckError::MissingElement(missing.to_string()));
        }
        Ok(Self {
            scenes: deck.scenes(),
            keymap: deck.keymap(),
            deck,
            surface,
            state: 0,
        })
    }

    /// Enter presentation mode if `activation` holds and `exclusion` does
    /// not. Otherwise strip the marker class and hand the page back.
    ///
    /// Only presentation mode needs the slide elements; an inert page just
    /// needs the root.
    pub fn activate<A, E>(
        deck: Deck,
        mut surface: S,
        activation: A,
        exclusion: E,
    ) -> Result<Presentation<S>, DeckError>
    where
        A: FnOnce() -> bool,
        E: FnOnce(&S) -> bool,
    {
        deck.validate()?;

        if activation() && !exclusion(&surface) {
            let mut controller = Self::new(deck, surface)?;
            tracing::info!(title = controller.deck.display_title(), "presentation mode on");
            controller
                .surface
                .add_class(&controller.deck.root, &controller.deck.marker_class);
            controller.state = 0;
            controller.render();
            Ok(Presentation::Active(controller))
        } else {
            if !surface.contains(&deck.root) {
                return Err(DeckError::MissingElement(deck.root.clone()));
            }
            surface.remove_class(&deck.root, &deck.marker_class);
            Ok(Presentation::Inert { deck, surface })
        }
    }

    pub fn state(&self) -> usize {
        self.state
    }

    pub fn max_state(&self) -> usize {
        self.deck.max_state()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn advance(&mut self) {
        self.state = (self.state + 1).min(self.max_state());
        self.render();
    }

    pub fn retreat(&mut self) {
        self.state = self.state.saturating_sub(1);
        self.render();
    }

    /// Set the state directly. The value is not clamped.
    pub fn jump_to(&mut self, n: usize) {
        self.state = n;
        self.render();
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
            Command::JumpTo(n) => self.jump_to(n),
        }
    }

    /// Resolve a key-release event and apply it. Unmapped keys do nothing.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<Command> {
        let command = self.keymap.resolve(event)?;
        self.apply(command);
        Some(command)
    }

    /// Bring the page in line with the current state.
    pub fn render(&mut self) {
        tracing::info!(state = self.state, "applying state {}", self.state);

        let deck = &self.deck;
        let surface = &mut self.surface;

        for id in &deck.terminal_hidden {
            surface.set_display(id, Display::Block);
        }
        surface.set_visibility(&deck.base, Visibility::Visible);
        for reveal in &deck.reveals {
            deck.reveal_style.hide(surface, &reveal.id);
        }
        if let Some(secondary) = &deck.secondary {
            surface.set_display(secondary, Display::None);
        }
        surface.add_class(&deck.root, &deck.marker_class);

        match self.scenes.get(self.state) {
            Some(Scene::Base) => {}
            Some(Scene::Reveal(i)) => {
                deck.reveal_style.show(surface, &deck.reveals[*i].id);
                surface.set_visibility(&deck.base, Visibility::Hidden);
            }
            Some(Scene::Terminal) => {
                surface.remove_class(&deck.root, &deck.marker_class);
                surface.set_visibility(&deck.base, Visibility::Hidden);
                for id in &deck.terminal_hidden {
                    surface.set_display(id, Display::None);
                }
                if deck.terminal == TerminalReveal::ShowAll {
                    for reveal in &deck.reveals {
                        deck.reveal_style.show(surface, &reveal.id);
                    }
                }
                if let Some(secondary) = &deck.secondary {
                    surface.set_display(secondary, Display::Block);
                }
            }
            None => {
                tracing::warn!(
                    state = self.state,
                    max_state = deck.max_state(),
                    "state has no scene, showing the base poster"
                );
            }
        }
    }

    /// Slide indices currently shown on the page. Index 0 is the base poster.
    pub fn visible_slides(&self) -> Vec<usize> {
        let deck = &self.deck;
        let base = (self.surface.visibility(&deck.base) == Visibility::Visible).then_some(0);
        let reveals = deck
            .reveals
            .iter()
            .enumerate()
            .filter(|(_, r)| deck.reveal_style.is_shown(&self.surface, &r.id))
            .map(|(i, _)| i + 1);
        base.into_iter().chain(reveals).collect()
    }

    pub fn is_presenting(&self) -> bool {
        self.surface
            .has_class(&self.deck.root, &self.deck.marker_class)
    }

    pub fn secondary_shown(&self) -> bool {
        self.deck
            .secondary
            .as_deref()
            .is_some_and(|id| self.surface.display(id) != Display::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Preset;
    use crate::surface::Document;

    fn active(preset: Preset) -> Controller<Document> {
        let deck = preset.deck();
        let doc = deck.document(&[]);
        match Controller::activate(deck, doc, || true, |_| false).unwrap() {
            Presentation::Active(controller) => controller,
            Presentation::Inert { .. } => panic!("expected presentation mode"),
        }
    }

    fn press(controller: &mut Controller<Document>, key: &str) {
        controller.handle_key(&KeyEvent::new(key));
    }

    #[test]
    fn test_starts_on_base_poster() {
        let controller = active(Preset::FinalPoster);
        assert_eq!(controller.state(), 0);
        assert_eq!(controller.visible_slides(), vec![0]);
        assert!(controller.is_presenting());
    }

    #[test]
    fn test_arrow_right_reveals_first_overlay() {
        let mut controller = active(Preset::FinalPoster);
        press(&mut controller, "ArrowRight");
        assert_eq!(controller.state(), 1);
        assert_eq!(controller.visible_slides(), vec![1]);
        assert_eq!(
            controller.surface().visibility("state0"),
            Visibility::Hidden
        );
        assert!(controller.surface().has_class("state1", "pres_visible"));
        assert!(controller.is_presenting());
    }

    #[test]
    fn test_terminal_state_exits_presentation() {
        let mut controller = active(Preset::FinalPoster);
        controller.jump_to(10);
        assert!(!controller.is_presenting());
        assert!(controller.visible_slides().is_empty());
        assert_eq!(
            controller.surface().visibility("state0"),
            Visibility::Hidden
        );
    }

    #[test]
    fn test_retreat_clamps_at_zero() {
        let mut controller = active(Preset::FinalPoster);
        press(&mut controller, "ArrowLeft");
        assert_eq!(controller.state(), 0);
        assert_eq!(controller.visible_slides(), vec![0]);
    }

    #[test]
    fn test_advance_clamps_at_max() {
        let mut controller = active(Preset::FinalPoster);
        controller.jump_to(9);
        press(&mut controller, "ArrowRight");
        press(&mut controller, "ArrowRight");
        assert_eq!(controller.state(), 10);
    }

    #[test]
    fn test_digit_jumps_directly() {
        let mut controller = active(Preset::FinalPoster);
        press(&mut controller, "ArrowRight");
        press(&mut controller, "5");
        assert_eq!(controller.state(), 5);
        assert_eq!(controller.visible_slides(), vec![5]);

        press(&mut controller, "0");
        assert_eq!(controller.state(), 10);
        press(&mut controller, "`");
        assert_eq!(controller.state(), 0);
        assert!(controller.is_presenting());
    }

    #[test]
    fn test_bounds_hold_for_arrow_sequences() {
        let mut controller = active(Preset::Poster);
        let keys = [
            "ArrowLeft",
            "ArrowRight",
            "ArrowRight",
            "ArrowRight",
            "ArrowRight",
            "ArrowRight",
            "ArrowRight",
            "ArrowLeft",
            "ArrowLeft",
            "ArrowLeft",
            "ArrowLeft",
            "ArrowLeft",
            "ArrowLeft",
        ];
        for (i, key) in keys.iter().cycle().take(200).enumerate() {
            press(&mut controller, key);
            assert!(
                controller.state() <= controller.max_state(),
                "state {} out of range after {} presses",
                controller.state(),
                i + 1
            );
        }
    }

    #[test]
    fn test_jump_is_not_clamped() {
        let mut controller = active(Preset::Poster);
        controller.jump_to(10);
        assert_eq!(controller.state(), 10);
        // No scene for 10 in a four-state deck: the reset view remains
        assert_eq!(controller.visible_slides(), vec![0]);
        assert!(controller.is_presenting());

        controller.advance();
        assert_eq!(controller.state(), 4);
    }

    #[test]
    fn test_retreat_from_unclamped_state() {
        let mut controller = active(Preset::FinalPoster);
        controller.jump_to(15);
        controller.retreat();
        assert_eq!(controller.state(), 14);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut controller = active(Preset::FinalPoster);
        for state in 0..=11 {
            controller.jump_to(state);
            let first = controller.surface().clone();
            controller.render();
            assert_eq!(&first, controller.surface(), "state {state}");
        }
    }

    #[test]
    fn test_render_depends_only_on_state() {
        let mut a = active(Preset::FinalPoster);
        let mut b = active(Preset::FinalPoster);
        for key in ["3", "ArrowRight", "ArrowRight", "ArrowLeft"] {
            press(&mut a, key);
        }
        b.jump_to(4);
        assert_eq!(a.state(), b.state());
        assert_eq!(a.surface(), b.surface());
    }

    #[test]
    fn test_poster_terminal_shows_everything() {
        let mut controller = active(Preset::Poster);
        assert!(!controller.secondary_shown());
        for _ in 0..4 {
            press(&mut controller, "ArrowRight");
        }
        assert_eq!(controller.state(), 4);
        assert!(!controller.is_presenting());
        assert_eq!(controller.visible_slides(), vec![1, 2, 3]);
        assert_eq!(controller.surface().display("state2"), Display::Flex);
        assert!(controller.secondary_shown());

        press(&mut controller, "ArrowLeft");
        assert_eq!(controller.visible_slides(), vec![3]);
        assert!(!controller.secondary_shown());
        assert!(controller.is_presenting());
    }

    #[test]
    fn test_poster_ignores_digits() {
        let mut controller = active(Preset::Poster);
        assert_eq!(controller.handle_key(&KeyEvent::new("3")), None);
        assert_eq!(controller.state(), 0);
    }

    #[test]
    fn test_ctrl_keys_ignored() {
        let mut controller = active(Preset::FinalPoster);
        let event = KeyEvent::new("ArrowRight").with_ctrl(true);
        assert_eq!(controller.handle_key(&event), None);
        assert_eq!(controller.state(), 0);
    }

    #[test]
    fn test_inert_without_flag() {
        let deck = Preset::FinalPoster.deck();
        let mut doc = deck.document(&[]);
        doc.add_class("html", "presentation");
        let result = Controller::activate(deck, doc, || false, |_| false).unwrap();
        let Presentation::Inert { surface: doc, .. } = result else {
            panic!("expected inert presentation");
        };
        assert!(!doc.has_class("html", "presentation"));
        assert_eq!(doc.visibility("state0"), Visibility::Visible);
    }

    #[test]
    fn test_inert_page_needs_only_root() {
        let mut doc = Document::new();
        doc.declare("html");
        doc.add_class("html", "presentation");
        let result =
            Controller::activate(Preset::FinalPoster.deck(), doc, || false, |_| false).unwrap();
        let Presentation::Inert { deck, surface } = result else {
            panic!("expected inert presentation");
        };
        assert_eq!(deck.max_state(), 10);
        assert!(!surface.has_class("html", "presentation"));
        assert!(!surface.contains("state0"));
    }

    #[test]
    fn test_mobile_page_needs_only_root() {
        let mut doc = Document::new();
        doc.declare("html");
        doc.add_class("html", "mobile");
        let result = Controller::activate(Preset::Poster.deck(), doc, || true, |page: &Document| {
            page.has_class("html", "mobile")
        });
        assert!(matches!(result, Ok(Presentation::Inert { .. })));
    }

    #[test]
    fn test_inert_page_without_root() {
        let result = Controller::activate(
            Preset::FinalPoster.deck(),
            Document::new(),
            || false,
            |_| false,
        );
        assert!(matches!(
            result,
            Err(DeckError::MissingElement(id)) if id == "html"
        ));
    }

    #[test]
    fn test_presenting_page_needs_every_element() {
        let mut doc = Document::new();
        doc.declare("html");
        doc.declare("state0");
        let result = Controller::activate(Preset::FinalPoster.deck(), doc, || true, |_| false);
        assert!(matches!(
            result,
            Err(DeckError::MissingElement(id)) if id == "state1"
        ));
    }

    #[test]
    fn test_terminal_hidden_panel_leaves_document_flow() {
        let mut controller = active(Preset::FinalPoster);
        assert_eq!(controller.surface().display("state9"), Display::Block);

        controller.jump_to(9);
        assert_eq!(controller.surface().display("state9"), Display::Block);
        assert_eq!(controller.visible_slides(), vec![9]);

        controller.jump_to(10);
        assert_eq!(controller.surface().display("state9"), Display::None);
        assert!(controller.visible_slides().is_empty());

        controller.retreat();
        assert_eq!(controller.surface().display("state9"), Display::Block);
        assert_eq!(controller.surface().display("state8"), Display::Unset);
    }

    #[test]
    fn test_inert_on_mobile() {
        let deck = Preset::FinalPoster.deck();
        let doc = deck.document(&["mobile", "presentation"]);
        let result = Controller::activate(deck, doc, || true, |page: &Document| {
            page.has_class("html", "mobile")
        })
        .unwrap();
        assert!(!result.is_active());
        if let Presentation::Inert { surface: doc, .. } = result {
            assert!(doc.has_class("html", "mobile"));
            assert!(!doc.has_class("html", "presentation"));
        }
    }

    #[test]
    fn test_missing_element() {
        let deck = Preset::FinalPoster.deck();
        let mut doc = Document::new();
        doc.declare("html");
        doc.declare("state0");
        let result = Controller::new(deck, doc);
        assert!(matches!(
            result,
            Err(DeckError::MissingElement(id)) if id == "state1"
        ));
    }
}
