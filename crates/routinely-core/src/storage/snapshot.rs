//! Persisted snapshot of the routine store and the gateway seam.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::calendar::CompletedDates;
use crate::error::PersistenceError;
use crate::routine::RoutineStep;

/// Wake-up time used when nothing has been saved yet.
pub const DEFAULT_WAKEUP: &str = "06:00";

/// Key under which the snapshot document is stored.
pub const SNAPSHOT_KEY: &str = "routineData";

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub routines: Vec<RoutineStep>,
    #[serde(default = "default_wakeup")]
    pub wakeup_time: String,
    #[serde(default)]
    pub completed_dates: CompletedDates,
}

fn default_wakeup() -> String {
    DEFAULT_WAKEUP.to_string()
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            routines: Vec::new(),
            wakeup_time: default_wakeup(),
            completed_dates: CompletedDates::default(),
        }
    }
}

impl Snapshot {
    /// Decode a stored document. An empty wake-up time is treated as unset.
    pub fn from_json(document: &str) -> Result<Self, PersistenceError> {
        let mut snapshot: Snapshot =
            serde_json::from_str(document).map_err(PersistenceError::Decode)?;
        if snapshot.wakeup_time.trim().is_empty() {
            snapshot.wakeup_time = default_wakeup();
        }
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::Encode)
    }
}

/// Local key-value storage for the snapshot document.
///
/// Implementors only move raw documents; encoding lives in the provided
/// `load`/`save` methods so every backend agrees on the format.
pub trait PersistenceGateway {
    /// Raw stored document, or `None` when nothing was saved yet.
    fn read_document(&self) -> Result<Option<String>, PersistenceError>;

    fn write_document(&mut self, document: &str) -> Result<(), PersistenceError>;

    /// Load the stored snapshot. `Ok(None)` means first run.
    fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        match self.read_document()? {
            Some(doc) => Snapshot::from_json(&doc).map(Some),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let doc = snapshot.to_json()?;
        self.write_document(&doc)
    }
}

/// In-memory gateway.
///
/// Clones share the same document, so a caller can keep a handle and
/// inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.into()))),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn read_document(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.document())
    }

    fn write_document(&mut self, document: &str) -> Result<(), PersistenceError> {
        *self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(document.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_browser_document_shape() {
        let doc = r#"{
            "routines": [
                {"id": 1700000000000, "name": "Drink water", "duration": 5, "icon": "💧", "completed": true},
                {"id": 1700000000001, "name": "Stretch", "duration": "", "icon": "🌱", "completed": false}
            ],
            "wakeupTime": "05:30",
            "completedDates": {"2024-01-02": true}
        }"#;
        let snapshot = Snapshot::from_json(doc).unwrap();
        assert_eq!(snapshot.routines.len(), 2);
        assert_eq!(snapshot.routines[1].duration_min, 15);
        assert_eq!(snapshot.wakeup_time, "05:30");
        assert_eq!(snapshot.completed_dates.len(), 1);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, Snapshot::default());

        let snapshot = Snapshot::from_json(r#"{"wakeupTime": ""}"#).unwrap();
        assert_eq!(snapshot.wakeup_time, DEFAULT_WAKEUP);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            Snapshot::from_json("{not json"),
            Err(PersistenceError::Decode(_))
        ));
    }

    #[test]
    fn memory_gateway_clones_share_document() {
        let gateway = MemoryGateway::new();
        let mut writer = gateway.clone();
        assert!(gateway.load().unwrap().is_none());

        writer.save(&Snapshot::default()).unwrap();
        let loaded = gateway.load().unwrap().unwrap();
        assert_eq!(loaded.wakeup_time, DEFAULT_WAKEUP);
    }
}
