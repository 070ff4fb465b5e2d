//! Routine template commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use routinely_core::{Event, Template};

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List the built-in templates
    List,
    /// Replace the whole routine with a template
    Apply {
        /// Template name (health, productivity, meditation, sport)
        name: String,
    },
}

pub fn run(action: TemplateAction) -> CliResult {
    match action {
        TemplateAction::List => {
            for template in Template::ALL {
                let steps: Vec<String> = template.steps().into_iter().map(|s| s.name).collect();
                println!(
                    "{:<13} {:>3}min  {}",
                    template.name(),
                    template.total_minutes(),
                    steps.join(", ")
                );
            }
            Ok(())
        }
        TemplateAction::Apply { name } => {
            let template: Template = name.parse()?;
            let mut ctx = Context::open()?;
            let ids = ctx.store.replace_all(template.steps())?;
            ctx.notifier().notify_event(&Event::TemplateApplied {
                template: template.name().to_string(),
                step_count: ids.len(),
                at: Utc::now(),
            });
            println!("Applied '{template}' ({} steps)", ids.len());
            ctx.finish()
        }
    }
}
