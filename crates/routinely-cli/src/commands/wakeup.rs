use clap::Subcommand;

use super::{CliResult, Context};

#[derive(Subcommand)]
pub enum WakeupAction {
    /// Print the wake-up time
    Show,
    /// Set the wake-up time (HH:MM)
    Set { time: String },
}

pub fn run(action: WakeupAction) -> CliResult {
    let mut ctx = Context::open()?;

    match action {
        WakeupAction::Show => println!("{}", ctx.store.wakeup_time()),
        WakeupAction::Set { time } => {
            ctx.store.set_wakeup_time(time.trim());
            println!("Wake-up time set to {}", ctx.store.wakeup_time());
        }
    }

    ctx.finish()
}
