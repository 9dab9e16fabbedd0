use eframe::egui;
use std::time::Instant;

use crate::cli::PageArgs;
use crate::config::Config;
use crate::controller::Presentation;
use crate::deck::Deck;
use crate::keymap::KeyEvent;
use crate::page;
use crate::surface::{Display, Document, Surface, Visibility};
use crate::theme::Theme;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

struct PosterApp {
    presentation: Presentation<Document>,
    toast: Option<Toast>,
}

impl PosterApp {
    fn new(presentation: Presentation<Document>) -> Self {
        Self {
            presentation,
            toast: None,
        }
    }

    fn deck(&self) -> &Deck {
        match &self.presentation {
            Presentation::Active(controller) => controller.deck(),
            Presentation::Inert { deck, .. } => deck,
        }
    }

    fn document(&self) -> &Document {
        match &self.presentation {
            Presentation::Active(controller) => controller.surface(),
            Presentation::Inert { surface, .. } => surface,
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        let Presentation::Active(controller) = &mut self.presentation else {
            return;
        };
        if controller.handle_key(event).is_some() {
            let message = if controller.is_presenting() {
                format!("State {} / {}", controller.state(), controller.max_state())
            } else {
                "Presentation finished".to_string()
            };
            self.toast = Some(Toast::new(message));
        }
    }

    fn draw_page(&self, ui: &egui::Ui, rect: egui::Rect) {
        let doc = self.document();
        let deck = self.deck();
        let theme = Theme::for_page(doc.has_class(&deck.root, &deck.marker_class));
        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, theme.background);

        let content = rect.shrink(40.0);
        let secondary_shown = deck
            .secondary
            .as_deref()
            .is_some_and(|id| doc.display(id) != Display::None);
        let (content, banner) = if secondary_shown {
            let split = content.bottom() - 80.0;
            (
                content.with_max_y(split - 20.0),
                Some(content.with_min_y(split)),
            )
        } else {
            (content, None)
        };

        if doc.visibility(&deck.base) == Visibility::Visible {
            painter.rect_filled(content, 12.0, theme.poster_background);
            painter.text(
                content.center(),
                egui::Align2::CENTER_CENTER,
                deck.display_title(),
                egui::FontId::proportional(theme.title_size),
                theme.heading_color,
            );
        }

        let shown: Vec<&str> = deck
            .reveals
            .iter()
            .filter(|r| deck.reveal_style.is_shown(doc, &r.id))
            .map(|r| r.display_label())
            .collect();
        for (panel, label) in panel_rects(content, shown.len()).into_iter().zip(shown) {
            painter.rect_filled(panel, 12.0, theme.panel_background);
            painter.text(
                panel.center(),
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(theme.body_size),
                theme.foreground,
            );
        }

        if let Some(banner) = banner {
            painter.rect_filled(banner, 8.0, theme.accent);
            painter.text(
                banner.center(),
                egui::Align2::CENTER_CENTER,
                "Online version",
                egui::FontId::proportional(theme.body_size * 0.75),
                egui::Color32::WHITE,
            );
        }

        if let Some(toast) = &self.toast {
            let opacity = toast.opacity();
            if opacity > 0.0 {
                let color = Theme::with_opacity(theme.foreground, opacity * 0.9);
                let bg = Theme::with_opacity(theme.poster_background, opacity * 0.85);
                let galley = painter.layout_no_wrap(
                    toast.message.clone(),
                    egui::FontId::proportional(18.0),
                    color,
                );
                let padding = 12.0;
                let toast_rect = egui::Rect::from_min_size(
                    egui::pos2(
                        rect.center().x - galley.rect.width() / 2.0 - padding,
                        rect.bottom() - galley.rect.height() - padding * 2.0 - 24.0,
                    ),
                    galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
                );
                painter.rect_filled(toast_rect, 8.0, bg);
                painter.galley(toast_rect.min + egui::vec2(padding, padding), galley, color);
            }
        }
    }
}

/// Split `area` into `count` equal columns with a gap between them.
fn panel_rects(area: egui::Rect, count: usize) -> Vec<egui::Rect> {
    if count == 0 {
        return Vec::new();
    }
    let gap = 20.0;
    let width = (area.width() - gap * (count - 1) as f32) / count as f32;
    (0..count)
        .map(|i| {
            let left = area.left() + i as f32 * (width + gap);
            egui::Rect::from_min_size(egui::pos2(left, area.top()), egui::vec2(width, area.height()))
        })
        .collect()
}

/// The `KeyboardEvent.key` spelling of an egui key.
fn dom_key_name(key: egui::Key) -> &'static str {
    match key {
        egui::Key::ArrowRight => "ArrowRight",
        egui::Key::ArrowLeft => "ArrowLeft",
        egui::Key::ArrowUp => "ArrowUp",
        egui::Key::ArrowDown => "ArrowDown",
        egui::Key::Backtick => "`",
        egui::Key::Num0 => "0",
        egui::Key::Num1 => "1",
        egui::Key::Num2 => "2",
        egui::Key::Num3 => "3",
        egui::Key::Num4 => "4",
        egui::Key::Num5 => "5",
        egui::Key::Num6 => "6",
        egui::Key::Num7 => "7",
        egui::Key::Num8 => "8",
        egui::Key::Num9 => "9",
        other => other.name(),
    }
}

impl eframe::App for PosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut released: Vec<KeyEvent> = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }
            for event in &i.events {
                if let egui::Event::Key {
                    key,
                    pressed: false,
                    modifiers,
                    ..
                } = event
                {
                    released.push(KeyEvent::new(dom_key_name(*key)).with_ctrl(modifiers.ctrl));
                }
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        for event in &released {
            self.handle_key(event);
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.draw_page(ui, rect);
            });

        if self.toast.is_some() {
            ctx.request_repaint();
        }
    }
}

pub fn run(args: &PageArgs, windowed: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let deck = page::load_deck(args, &config)?;
    let title = format!("posterdeck \u{2014} {}", deck.display_title());
    let presentation = page::open(args, deck)?;
    if !presentation.is_active() {
        tracing::info!("query flag absent or mobile page, showing the document view");
    }

    let windowed = windowed || config.windowed();

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PosterApp::new(presentation)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
