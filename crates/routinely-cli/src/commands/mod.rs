pub mod calendar;
pub mod config;
pub mod data;
pub mod progress;
pub mod step;
pub mod template;
pub mod timer;
pub mod wakeup;

use std::error::Error;

use routinely_core::storage::{Config, Database, KvGateway};
use routinely_core::{LogNotifier, Notifier, NullNotifier, RoutineStore};
use serde::Serialize;

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

/// Store and configuration for one CLI invocation.
pub struct Context {
    pub store: RoutineStore,
    pub config: Config,
}

impl Context {
    pub fn open() -> CliResult<Self> {
        let config = Config::load()?;
        let db = Database::open()?;
        Ok(Self {
            store: RoutineStore::open_with_wakeup(
                KvGateway::new(db),
                &config.planner.default_wakeup,
            ),
            config,
        })
    }

    pub fn notifier(&self) -> Box<dyn Notifier> {
        if self.config.notifications.enabled {
            Box::new(LogNotifier)
        } else {
            Box::new(NullNotifier)
        }
    }

    /// Fail the command if any save went wrong, so changes are never lost silently.
    pub fn finish(mut self) -> CliResult {
        match self.store.take_persistence_error() {
            Some(e) => Err(format!("changes were not saved: {e}").into()),
            None => Ok(()),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
