use baseline_split::cmd;
use baseline_split::config::ConfigManager;
use baseline_split::error;
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser, Debug)]
#[command(
    name = "baseline-split",
    about = "Split Intune security baselines into per-application policies",
    version,
    long_about = "Download a published Intune security baseline template and split its\n\
                  Settings Catalog settings into one JSON policy per application or category.\n\
                  Ships with the Microsoft 365 Apps and Microsoft Edge v128 baselines."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download a baseline and split it into category files
    Split(cmd::split::SplitArgs),

    /// List built-in baselines and their categories
    List(cmd::list::ListArgs),

    /// Show or change persisted settings
    #[command(subcommand)]
    Config(cmd::config::ConfigCommands),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> error::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if let Some(level) = log_level(cli.verbose) {
        tracing_subscriber::fmt()
            .with_env_filter(format!("baseline_split={}", level))
            .init();
    }

    match cli.command {
        Commands::Split(args) => cmd::split::split(args).await?,
        Commands::List(args) => cmd::list::list(args).await?,
        Commands::Config(config_cmd) => match config_cmd {
            cmd::config::ConfigCommands::Show => cmd::config::show().await?,
            cmd::config::ConfigCommands::SetOutput(args) => cmd::config::set_output(args).await?,
            cmd::config::ConfigCommands::Reset => cmd::config::reset().await?,
        },
    }

    Ok(())
}

/// `--verbose` wins; otherwise use `log_level` from config.toml if set
fn log_level(verbose: bool) -> Option<String> {
    if verbose {
        return Some("debug".to_string());
    }

    // A broken config file must not block `config reset`
    ConfigManager::new()
        .and_then(|manager| manager.load_config())
        .ok()
        .map(|config| config.log_level)
        .filter(|level| !level.is_empty())
}
