use eframe::egui::Color32;

/// Colors for the page. Presentation mode and normal document flow each
/// get their own theme, selected by the marker class on the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub poster_background: Color32,
    pub panel_background: Color32,
    pub title_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn presentation() -> Self {
        Self {
            name: "presentation".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            poster_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            panel_background: Color32::from_rgb(0x26, 0x32, 0x44),
            title_size: 64.0,
            body_size: 32.0,
        }
    }

    pub fn document() -> Self {
        Self {
            name: "document".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            poster_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            panel_background: Color32::from_rgb(0xE4, 0xEC, 0xF5),
            title_size: 48.0,
            body_size: 24.0,
        }
    }

    pub fn for_page(presenting: bool) -> Self {
        if presenting {
            Self::presentation()
        } else {
            Self::document()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_page() {
        assert_eq!(Theme::for_page(true).name, "presentation");
        assert_eq!(Theme::for_page(false).name, "document");
    }

    #[test]
    fn test_with_opacity() {
        let c = Theme::with_opacity(Color32::from_rgb(10, 20, 30), 0.0);
        assert_eq!(c.a(), 0);
    }
}
