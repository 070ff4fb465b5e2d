//! Step countdown for CLI.
//!
//! The timer session lives only as long as this process. A tokio interval
//! plays the role of the one-second tick source; Ctrl-C pauses and exits.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use routinely_core::timer::format_clock;
use routinely_core::{Event, Notifier, RoutineStore, StepId, TimerEngine, TimerState};

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Count down steps in routine order, printing events as JSON lines
    Run {
        /// Step to start with (defaults to the first incomplete step)
        #[arg(long)]
        step: Option<StepId>,
        /// Stop after the first step instead of continuing with the next one
        #[arg(long)]
        once: bool,
        /// Milliseconds per simulated second
        #[arg(long, default_value = "1000", hide = true)]
        tick_ms: u64,
    },
}

pub fn run(action: TimerAction) -> CliResult {
    match action {
        TimerAction::Run {
            step,
            once,
            tick_ms,
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_countdown(step, once, tick_ms.max(1)))
        }
    }
}

fn emit(event: &Event, notifier: &dyn Notifier) -> CliResult {
    println!("{}", serde_json::to_string(event)?);
    notifier.notify_event(event);
    Ok(())
}

fn render_clock(engine: &TimerEngine, store: &RoutineStore) {
    if let Some(step) = engine.current_step(store) {
        eprint!(
            "\r{} {}  {}   ",
            step.icon,
            step.name,
            format_clock(engine.remaining_secs(store))
        );
        let _ = std::io::stderr().flush();
    }
}

async fn run_countdown(step: Option<StepId>, once: bool, tick_ms: u64) -> CliResult {
    tracing::debug!(?step, once, tick_ms, "timer run");
    let mut ctx = Context::open()?;
    let notifier = ctx.notifier();
    let mut engine = TimerEngine::new();

    let first = match step {
        Some(id) => engine.select_step(Some(id), &ctx.store),
        None => engine.advance_to_next(&ctx.store),
    };
    emit(&first, notifier.as_ref())?;
    if engine.state(&ctx.store) == TimerState::Idle {
        if let Some(id) = step {
            return Err(format!("no step with id {id}").into());
        }
        return ctx.finish();
    }

    if let Some(started) = engine.start(&ctx.store)? {
        emit(&started, notifier.as_ref())?;
    }

    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for event in engine.tick(&mut ctx.store) {
                    eprintln!();
                    emit(&event, notifier.as_ref())?;
                }
                if engine.is_running(&ctx.store) {
                    render_clock(&engine, &ctx.store);
                    continue;
                }
                if once || engine.state(&ctx.store) != TimerState::Ready {
                    break;
                }
                if let Some(started) = engine.start(&ctx.store)? {
                    emit(&started, notifier.as_ref())?;
                }
            }
            _ = &mut ctrl_c => {
                eprintln!();
                if let Some(paused) = engine.pause(&ctx.store) {
                    emit(&paused, notifier.as_ref())?;
                }
                break;
            }
        }
    }

    ctx.finish()
}
