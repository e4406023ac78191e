//! `list` command: show the built-in baselines and their categories

use crate::error::Result;
use crate::templates;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show the regular expression behind each category
    #[arg(short, long)]
    pub patterns: bool,
}

pub async fn list(args: ListArgs) -> Result<()> {
    println!("\n{}", "Available Baselines:".bold());
    println!("{}", "─".repeat(60));

    for profile in templates::all_profiles() {
        println!(
            "\n{} {} ({})",
            "●".green(),
            profile.display_name.bold(),
            profile.key.cyan()
        );
        println!("  Source:    {}", profile.source_url.dimmed());
        println!("  Template:  {}", profile.template_file_name);
        if profile.apply_known_defect_fixups {
            println!("  Fixups:    {}", "children / template reference".yellow());
        }

        for rule in &profile.rules {
            if args.patterns {
                println!("    {:<40} {}", rule.name, rule.pattern.dimmed());
            } else {
                println!("    {}", rule.name);
            }
        }
    }

    println!(
        "\n{} Run {} to split a baseline",
        "→".cyan(),
        "baseline-split split <m365|edge|all>".bold()
    );

    Ok(())
}
