//! The routine store.
//!
//! Owns the ordered step list, the wake-up time and the completion history.
//! Every mutation is applied in memory first and then saved through the
//! [`PersistenceGateway`]; a failed save never undoes the mutation.

use std::fmt;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::step::{normalize_duration, ProgressSummary, RoutineStep, StepDraft, StepId};
use crate::calendar::{CalendarAggregator, CompletedDates};
use crate::error::{PersistenceError, ValidationError};
use crate::storage::{MemoryGateway, PersistenceGateway, Snapshot, DEFAULT_WAKEUP};

pub struct RoutineStore {
    steps: Vec<RoutineStep>,
    wakeup_time: String,
    completed_dates: CompletedDates,
    /// Highest id handed out so far, including ids restored from storage.
    last_issued_id: u64,
    gateway: Box<dyn PersistenceGateway>,
    persistence_error: Option<PersistenceError>,
}

impl fmt::Debug for RoutineStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutineStore")
            .field("steps", &self.steps)
            .field("wakeup_time", &self.wakeup_time)
            .field("completed_dates", &self.completed_dates)
            .field("last_issued_id", &self.last_issued_id)
            .finish_non_exhaustive()
    }
}

impl RoutineStore {
    /// Restore the store from `gateway`.
    ///
    /// A missing snapshot starts empty. An unreadable or malformed one is
    /// logged and replaced by defaults, since there is nothing to repair it from.
    pub fn open(gateway: impl PersistenceGateway + 'static) -> Self {
        Self::open_with_wakeup(gateway, DEFAULT_WAKEUP)
    }

    /// Like [`open`](Self::open), but a fresh store starts with `default_wakeup`.
    pub fn open_with_wakeup(
        gateway: impl PersistenceGateway + 'static,
        default_wakeup: &str,
    ) -> Self {
        let fresh = || Snapshot {
            wakeup_time: default_wakeup.to_string(),
            ..Snapshot::default()
        };
        let snapshot = match gateway.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => fresh(),
            Err(e) => {
                warn!(error = %e, "stored routine data is unusable, starting from defaults");
                fresh()
            }
        };
        Self::from_snapshot(snapshot, Box::new(gateway))
    }

    /// A store backed by a fresh [`MemoryGateway`].
    pub fn in_memory() -> Self {
        Self::open(MemoryGateway::new())
    }

    fn from_snapshot(snapshot: Snapshot, gateway: Box<dyn PersistenceGateway>) -> Self {
        let last_issued_id = snapshot.routines.iter().map(|s| s.id.0).max().unwrap_or(0);
        Self {
            steps: snapshot.routines,
            wakeup_time: snapshot.wakeup_time,
            completed_dates: snapshot.completed_dates,
            last_issued_id,
            gateway,
            persistence_error: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn steps(&self) -> &[RoutineStep] {
        &self.steps
    }

    pub fn step(&self, id: StepId) -> Option<&RoutineStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.position(id).is_some()
    }

    /// First step in list order that is not completed yet.
    pub fn first_incomplete(&self) -> Option<&RoutineStep> {
        self.steps.iter().find(|s| !s.completed)
    }

    pub fn wakeup_time(&self) -> &str {
        &self.wakeup_time
    }

    pub fn completed_dates(&self) -> &CompletedDates {
        &self.completed_dates
    }

    pub fn calendar(&self) -> CalendarAggregator<'_> {
        CalendarAggregator::new(&self.completed_dates)
    }

    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary::from_steps(&self.steps)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            routines: self.steps.clone(),
            wakeup_time: self.wakeup_time.clone(),
            completed_dates: self.completed_dates.clone(),
        }
    }

    /// The most recent save failure, cleared by this call.
    pub fn take_persistence_error(&mut self) -> Option<PersistenceError> {
        self.persistence_error.take()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a new step and return its id.
    ///
    /// A zero duration falls back to the default of 15 minutes.
    pub fn add_step(
        &mut self,
        name: &str,
        duration_min: u32,
        icon: &str,
    ) -> Result<StepId, ValidationError> {
        let name = validated_name(name)?;
        let id = self.issue_id();
        self.steps.push(RoutineStep {
            id,
            name: name.to_string(),
            duration_min: normalize_duration(Some(i64::from(duration_min))),
            icon: icon.to_string(),
            completed: false,
        });
        debug!(%id, name, "step added");
        self.persist();
        Ok(id)
    }

    /// Remove a step. Returns false when `id` is unknown.
    pub fn remove_step(&mut self, id: StepId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.steps.remove(index);
        debug!(%id, "step removed");
        self.persist();
        true
    }

    /// Flip a step's completion flag and return the new value.
    pub fn toggle_completed(&mut self, id: StepId) -> Option<bool> {
        let step = self.steps.iter_mut().find(|s| s.id == id)?;
        step.completed = !step.completed;
        let completed = step.completed;
        debug!(%id, completed, "step toggled");
        self.persist();
        Some(completed)
    }

    /// Mark a step completed. Returns false when `id` is unknown.
    pub fn mark_completed(&mut self, id: StepId) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        step.completed = true;
        info!(%id, name = %step.name, "step completed");
        self.persist();
        true
    }

    /// Exchange the positions of two steps.
    ///
    /// Returns false, changing nothing, when either id is unknown or both
    /// are the same.
    pub fn reorder(&mut self, dragged: StepId, target: StepId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };
        self.steps.swap(from, to);
        debug!(%dragged, %target, "steps swapped");
        self.persist();
        true
    }

    /// Discard the list and install `drafts` with fresh ids, all incomplete.
    ///
    /// Either every draft is installed or, on a validation failure, none is.
    pub fn replace_all(&mut self, drafts: Vec<StepDraft>) -> Result<Vec<StepId>, ValidationError> {
        for draft in &drafts {
            validated_name(&draft.name)?;
        }
        let steps: Vec<RoutineStep> = drafts
            .into_iter()
            .map(|draft| RoutineStep {
                id: self.issue_id(),
                name: draft.name.trim().to_string(),
                duration_min: normalize_duration(Some(i64::from(draft.duration_min))),
                icon: draft.icon,
                completed: false,
            })
            .collect();
        let ids = steps.iter().map(|s| s.id).collect();
        self.steps = steps;
        debug!(count = self.steps.len(), "routine list replaced");
        self.persist();
        Ok(ids)
    }

    /// Store the wake-up time as given. No format check is applied.
    pub fn set_wakeup_time(&mut self, value: impl Into<String>) {
        self.wakeup_time = value.into();
        debug!(wakeup_time = %self.wakeup_time, "wake-up time set");
        self.persist();
    }

    /// Mark or unmark a calendar day as completed.
    pub fn toggle_date_completion(&mut self, date: NaiveDate, completed: bool) {
        let changed = self.completed_dates.set(date, completed);
        debug!(%date, completed, changed, "calendar day updated");
        self.persist();
    }

    /// Uncheck every step, keeping the list itself.
    pub fn reset_progress(&mut self) {
        for step in &mut self.steps {
            step.completed = false;
        }
        debug!("step progress reset");
        self.persist();
    }

    /// Drop all steps and the completion history, and put the wake-up time
    /// back to `default_wakeup`.
    pub fn clear_all(&mut self, default_wakeup: &str) {
        self.steps.clear();
        self.wakeup_time = default_wakeup.to_string();
        self.completed_dates.clear();
        info!("all routine data cleared");
        self.persist();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn position(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Millisecond timestamp, bumped past every id issued before.
    fn issue_id(&mut self) -> StepId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last_issued_id.saturating_add(1));
        self.last_issued_id = id;
        StepId(id)
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.gateway.save(&snapshot) {
            warn!(error = %e, "failed to save routine data");
            self.persistence_error = Some(e);
        }
    }
}

fn validated_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed)
}
