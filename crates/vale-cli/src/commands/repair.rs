//! Repair command - insert spaces into concatenated amount-in-words text.

use clap::Args;
use console::style;

use vale_core::TextRepairer;

use super::config::load_config;

/// Arguments for the repair command.
#[derive(Args)]
pub struct RepairArgs {
    /// Text to repair (one result line per argument)
    #[arg(required = true)]
    text: Vec<String>,

    /// Override the configured pass cap
    #[arg(long)]
    max_passes: Option<usize>,

    /// Show pass count and convergence
    #[arg(long)]
    show_passes: bool,
}

pub async fn run(args: RepairArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let max_passes = args
        .max_passes
        .unwrap_or(config.extraction.repair_max_passes);
    let repairer = TextRepairer::spanish().with_max_passes(max_passes);

    for text in &args.text {
        let repair = repairer.repair_traced(text);
        println!("{}", repair.text);

        if args.show_passes {
            let status = if repair.converged {
                style("converged").green()
            } else {
                style("pass cap reached").yellow()
            };
            eprintln!("  {} passes, {}", repair.passes, status);
        }
    }

    Ok(())
}
