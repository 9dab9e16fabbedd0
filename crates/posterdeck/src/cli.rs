use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::deck::Preset;

#[derive(Parser)]
#[command(name = "posterdeck")]
#[command(author, version, about)]
#[command(long_about = "Keyboard-driven presentation mode for academic posters.\n\n\
    Arrow keys step through the poster's reveal panels, number keys jump to one.\n\n\
    Examples:\n  \
    posterdeck                                Present the final-poster preset\n  \
    posterdeck deck.yaml --windowed           Present a deck in a window\n  \
    posterdeck --url 'poster.html'            Open without the ?pres flag (inert)\n  \
    posterdeck simulate --keys ArrowRight,5   Replay keys without a window")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Which deck to load and how the page is opened.
#[derive(Args, Clone, Default)]
pub struct PageArgs {
    /// Deck description (YAML). Defaults to a built-in preset
    pub deck: Option<PathBuf>,

    /// Built-in deck to use when no file is given
    #[arg(long, value_enum, conflicts_with = "deck")]
    pub preset: Option<Preset>,

    /// Page URL; presentation mode needs the query flag in it
    #[arg(long)]
    pub url: Option<String>,

    /// Mark the page as a mobile viewport
    #[arg(long)]
    pub mobile: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay key presses against a deck and print each state
    Simulate {
        #[command(flatten)]
        page: PageArgs,

        /// Comma-separated key names, e.g. ArrowRight,ArrowLeft,5,`
        #[arg(long, value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Hold Ctrl for every key
        #[arg(long)]
        ctrl: bool,
    },

    /// List the built-in decks
    Presets,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.preset, defaults.windowed, defaults.query_flag)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Simulate { page, keys, ctrl }) => {
                crate::commands::simulate::run(&page, &keys, ctrl)
            }
            Some(Commands::Presets) => {
                crate::commands::presets::run();
                Ok(())
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("posterdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => crate::app::run(&self.page, self.windowed),
        }
    }
}
