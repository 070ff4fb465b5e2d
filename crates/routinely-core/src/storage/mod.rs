mod config;
pub mod database;
mod snapshot;

pub use config::{CalendarConfig, Config, NotificationsConfig, PlannerConfig};
pub use database::{Database, KvGateway};
pub use snapshot::{MemoryGateway, PersistenceGateway, Snapshot, DEFAULT_WAKEUP, SNAPSHOT_KEY};

use std::path::PathBuf;

/// Returns `~/.config/routinely[-dev]/` based on ROUTINELY_ENV.
///
/// Set ROUTINELY_ENV=dev to use development data directory.
/// ROUTINELY_HOME replaces the whole path when set.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("ROUTINELY_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ROUTINELY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("routinely-dev")
            } else {
                base_dir.join("routinely")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
