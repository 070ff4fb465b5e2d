//! Data export and the plain-text share card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::routine::RoutineStore;
use crate::storage::Snapshot;

/// Full snapshot plus the moment it was exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    pub fn from_store(store: &RoutineStore) -> Self {
        Self::at(store, Utc::now())
    }

    pub fn at(store: &RoutineStore, exported_at: DateTime<Utc>) -> Self {
        Self {
            snapshot: store.snapshot(),
            exported_at,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `routine-data-<epoch ms>.json`
    pub fn default_filename(&self) -> String {
        format!("routine-data-{}.json", self.exported_at.timestamp_millis())
    }
}

/// Text version of the share card: one line per step, then totals.
pub fn share_text(store: &RoutineStore) -> String {
    let mut out = String::from("My Morning Routine:\n\n");
    for step in store.steps() {
        let icon = if step.icon.is_empty() { "•" } else { step.icon.as_str() };
        out.push_str(&format!("{icon} {} ({}min)\n", step.name, step.duration_min));
    }
    let summary = store.progress_summary();
    out.push_str(&format!("\nTotal: {}min\n", summary.total_minutes));
    out.push_str(&format!("Wake-up: {}", store.wakeup_time()));
    out
}
