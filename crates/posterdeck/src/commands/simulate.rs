use anyhow::Result;
use colored::Colorize;

use crate::cli::PageArgs;
use crate::config::Config;
use crate::controller::{Controller, Presentation};
use crate::keymap::KeyEvent;
use crate::page;
use crate::surface::Document;

pub fn run(args: &PageArgs, keys: &[String], ctrl: bool) -> Result<()> {
    let config = Config::load_or_default();
    let deck = page::load_deck(args, &config)?;
    let mut controller = match page::open(args, deck)? {
        Presentation::Active(controller) => controller,
        Presentation::Inert { .. } => {
            println!(
                "{} presentation mode is off for this page, keys are ignored",
                "inert:".yellow().bold()
            );
            return Ok(());
        }
    };

    println!("{}", status_line("start", &controller));
    for key in keys {
        let event = KeyEvent::new(key.as_str()).with_ctrl(ctrl);
        let label = if controller.handle_key(&event).is_some() {
            key.normal()
        } else {
            key.dimmed()
        };
        println!("{}", status_line(&label.to_string(), &controller));
    }
    Ok(())
}

fn status_line(label: &str, controller: &Controller<Document>) -> String {
    let slides = controller
        .visible_slides()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mode = if controller.is_presenting() {
        "presenting".green()
    } else {
        "document".cyan()
    };
    let secondary = if controller.secondary_shown() {
        " +secondary"
    } else {
        ""
    };
    format!(
        "{label:>12}  state {:>2}/{}  {mode}  slides [{slides}]{secondary}",
        controller.state(),
        controller.max_state(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Preset;

    #[test]
    fn test_status_line() {
        colored::control::set_override(false);
        let deck = Preset::Poster.deck();
        let doc = deck.document(&[]);
        let Ok(Presentation::Active(mut controller)) =
            Controller::activate(deck, doc, || true, |_| false)
        else {
            panic!("expected presentation mode");
        };
        assert_eq!(
            status_line("start", &controller),
            "       start  state  0/4  presenting  slides [0]"
        );
        controller.jump_to(4);
        assert_eq!(
            status_line("0", &controller),
            "           0  state  4/4  document  slides [1,2,3] +secondary"
        );
    }
}
