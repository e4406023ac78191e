//! `split` command: download a baseline and write one file per category

use crate::baseline::{self, SplitOptions, SplitReport};
use crate::cmd::progress;
use crate::config::ConfigManager;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::templates::{self, BaselineProfile};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Baseline to split: m365, edge or all
    #[arg(default_value = "all")]
    pub baseline: String,

    /// Output directory (default: config.toml `output_dir`, then ./IntuneBaselines)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Split a template already on disk instead of downloading it
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Report category counts without writing category files
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn split(args: SplitArgs) -> Result<()> {
    let profiles = templates::select_profiles(&args.baseline)?;

    if args.from_file.is_some() && profiles.len() > 1 {
        return Err(Error::ConfigError(
            "--from-file needs a single baseline (m365 or edge), not 'all'".into(),
        ));
    }

    let config_manager = ConfigManager::new()?;
    let output_dir = config_manager.resolve_output_dir(args.output.as_deref())?;
    let options = SplitOptions {
        dry_run: args.dry_run,
    };

    let fetcher = Fetcher::new()?;

    for profile in &profiles {
        println!(
            "\n{} {} baseline...",
            "Splitting".cyan().bold(),
            profile.display_name
        );

        let template_path = match &args.from_file {
            Some(path) => path.clone(),
            None => download(&fetcher, profile, &output_dir).await?,
        };

        let report = baseline::split_template(profile, &template_path, &output_dir, &options)?;
        print_report(&report, args.dry_run);
    }

    if args.dry_run {
        println!("\n{} Dry run, no category files written", "!".yellow());
    } else {
        println!(
            "\n{} Output written to {}",
            "→".cyan(),
            output_dir.display().to_string().bold()
        );
    }

    Ok(())
}

async fn download(fetcher: &Fetcher, profile: &BaselineProfile, output_dir: &Path) -> Result<PathBuf> {
    let spinner = progress::create_spinner(&format!("Downloading {}", profile.template_file_name));

    match baseline::fetch_template(fetcher, profile, output_dir).await {
        Ok(path) => {
            progress::finish_spinner_success(
                &spinner,
                &format!("Downloaded {}", path.display()),
            );
            Ok(path)
        }
        Err(e) => {
            progress::finish_spinner_error(&spinner, "Template download failed");
            Err(e)
        }
    }
}

fn print_report(report: &SplitReport, dry_run: bool) {
    println!(
        "  {}: {} settings in {}",
        report.baseline.bold(),
        report.total_settings.to_string().bold(),
        report.template_path.display()
    );

    for category in &report.categories {
        let count = if category.matched == 0 {
            category.matched.to_string().yellow()
        } else {
            category.matched.to_string().green()
        };
        let marker = if dry_run { "○".dimmed() } else { "✓".green() };

        println!(
            "  {} {:<40} {:>4} settings  {}",
            marker,
            category.category,
            count,
            category.path.display().to_string().dimmed()
        );
    }

    if report.unmatched > 0 {
        println!(
            "  {} {} settings matched no category",
            "!".yellow(),
            report.unmatched
        );
    }
}
