use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();
    println!("{} {}", "Config file:".bold(), path.display());
    println!();
    println!("  preset:     {}", config.preset()?);
    println!("  windowed:   {}", config.windowed());
    println!(
        "  query_flag: {}",
        config.query_flag().unwrap_or("(from deck)")
    );
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!("{} {key} = {value}", "Set".green().bold());
    tracing::info!("wrote {}", path.display());
    Ok(())
}
