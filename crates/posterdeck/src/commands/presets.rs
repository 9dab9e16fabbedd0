use colored::Colorize;

use crate::deck::{Preset, RevealStyle, TerminalReveal};

pub fn run() {
    for preset in Preset::all() {
        let deck = preset.deck();
        let style = match &deck.reveal_style {
            RevealStyle::Class { name } => format!("class {name}"),
            RevealStyle::Display { shown } => format!("display {shown:?}").to_lowercase(),
        };
        let terminal = match deck.terminal {
            TerminalReveal::HideAll => "hide all",
            TerminalReveal::ShowAll => "show all",
        };
        println!("{}", preset.name().bold());
        println!("  states:    0..={}", deck.max_state());
        println!("  reveals:   {style}");
        println!("  terminal:  {terminal}");
        if !deck.terminal_hidden.is_empty() {
            println!("  hidden at end: {}", deck.terminal_hidden.join(", "));
        }
        if let Some(secondary) = &deck.secondary {
            println!("  secondary: {secondary}");
        }
        println!("  keymap:    {:?}", deck.keymap);
    }
}
