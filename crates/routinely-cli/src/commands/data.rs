//! Export, share and clear commands for CLI.

use std::path::PathBuf;

use clap::Subcommand;
use routinely_core::{share_text, ExportDocument};

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write all routine data to a JSON file
    Export {
        /// Output path (defaults to routine-data-<timestamp>.json)
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Print the routine as shareable text
    Share,
    /// Delete all steps and the completion history, and reset the wake-up time
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> CliResult {
    let mut ctx = Context::open()?;

    match action {
        DataAction::Export { out, stdout } => {
            let doc = ExportDocument::from_store(&ctx.store);
            let json = doc.to_json_pretty()?;
            if stdout {
                println!("{json}");
            } else {
                let path = out.unwrap_or_else(|| PathBuf::from(doc.default_filename()));
                std::fs::write(&path, json)?;
                println!("Exported to {}", path.display());
            }
        }
        DataAction::Share => println!("{}", share_text(&ctx.store)),
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear all data without --yes".into());
            }
            ctx.store.clear_all(&ctx.config.planner.default_wakeup);
            println!("All routine data cleared");
        }
    }

    ctx.finish()
}
