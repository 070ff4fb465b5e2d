//! Routine step commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use routinely_core::routine::normalize_duration;
use routinely_core::{Event, StepId};

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum StepAction {
    /// Append a step to the routine
    Add {
        /// Step name
        name: String,
        /// Duration in minutes (defaults to planner.default_duration_min)
        #[arg(long, short, allow_negative_numbers = true)]
        duration: Option<i64>,
        /// Display icon (defaults to planner.default_icon)
        #[arg(long, short)]
        icon: Option<String>,
    },
    /// List steps in routine order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a step
    Remove {
        /// Step ID
        id: StepId,
    },
    /// Toggle a step's completed flag
    Toggle {
        /// Step ID
        id: StepId,
    },
    /// Swap the positions of two steps
    Swap { dragged: StepId, target: StepId },
    /// Uncheck every step for a new morning
    ResetProgress,
}

pub fn run(action: StepAction) -> CliResult {
    let mut ctx = Context::open()?;

    match action {
        StepAction::Add {
            name,
            duration,
            icon,
        } => {
            let minutes = duration
                .map(|d| normalize_duration(Some(d)))
                .unwrap_or(ctx.config.planner.default_duration_min);
            let icon = icon.unwrap_or_else(|| ctx.config.planner.default_icon.clone());
            let id = ctx.store.add_step(&name, minutes, &icon)?;
            ctx.notifier().notify_event(&Event::StepAdded {
                step_id: id,
                step_name: name.trim().to_string(),
                at: Utc::now(),
            });
            println!("{id}");
        }
        StepAction::List { json } => {
            if json {
                print_json(&ctx.store.steps())?;
            } else if ctx.store.steps().is_empty() {
                println!("No routines yet. Use 'step add' or 'template apply'.");
            } else {
                for (i, step) in ctx.store.steps().iter().enumerate() {
                    let mark = if step.completed { "x" } else { " " };
                    println!(
                        "{:>2}. [{mark}] {} {} ({}min)  id={}",
                        i + 1,
                        step.icon,
                        step.name,
                        step.duration_min,
                        step.id
                    );
                }
            }
        }
        StepAction::Remove { id } => {
            if ctx.store.remove_step(id) {
                println!("Removed {id}");
            } else {
                println!("No step with id {id}");
            }
        }
        StepAction::Toggle { id } => match ctx.store.toggle_completed(id) {
            Some(true) => println!("{id} completed"),
            Some(false) => println!("{id} not completed"),
            None => println!("No step with id {id}"),
        },
        StepAction::Swap { dragged, target } => {
            if ctx.store.reorder(dragged, target) {
                println!("Swapped {dragged} and {target}");
            } else {
                println!("Nothing to swap");
            }
        }
        StepAction::ResetProgress => {
            ctx.store.reset_progress();
            println!("All steps unchecked");
        }
    }

    ctx.finish()
}
