mod activation;
mod app;
mod cli;
mod commands;
mod config;
mod controller;
mod deck;
mod error;
mod keymap;
mod page;
mod surface;
mod theme;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
