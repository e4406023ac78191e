//! `config` commands: inspect and persist the default output directory

use crate::config::{ConfigManager, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Persist the default output directory
    #[command(name = "set-output")]
    SetOutput(SetOutputArgs),

    /// Remove config.toml and return to built-in defaults
    Reset,
}

#[derive(Args, Debug)]
pub struct SetOutputArgs {
    /// Directory category files are written to
    pub dir: PathBuf,
}

pub async fn show() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_config()?;

    println!("\n{}", "Configuration:".bold());
    println!("{}", "─".repeat(60));
    println!("  Config file:  {}", config_manager.config_file().display());

    match &config.output_dir {
        Some(dir) => println!("  Output dir:   {}", dir.display()),
        None => println!(
            "  Output dir:   {} {}",
            DEFAULT_OUTPUT_DIR,
            "(default)".dimmed()
        ),
    }

    if config.log_level.is_empty() {
        println!("  Log level:    {}", "(off)".dimmed());
    } else {
        println!("  Log level:    {}", config.log_level);
    }

    Ok(())
}

pub async fn set_output(args: SetOutputArgs) -> Result<()> {
    let config_manager = ConfigManager::new()?;
    config_manager.set_output_dir(&args.dir)?;

    println!(
        "{} Default output directory set to {}",
        "✓".green(),
        args.dir.display().to_string().bold()
    );
    Ok(())
}

pub async fn reset() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    config_manager.reset()?;

    println!("{} Configuration reset to defaults", "✓".green());
    Ok(())
}
