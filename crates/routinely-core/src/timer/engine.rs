//! Step timer implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads or clocks - the caller invokes `tick()` once per
//! elapsed second while the engine reports `is_running(&store)`. Stopping the
//! tick source is therefore just a matter of the caller observing that
//! the engine left `Running`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Ready -> Running <-> Paused
//!                    |
//!                 Expired -> Ready (next incomplete step) | Idle
//! ```
//!
//! The engine only remembers the *id* of the selected step and looks it up
//! in the [`RoutineStore`] on every command, so a step deleted from the list
//! can never be timed or completed afterwards.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.select_step(Some(id), &store);
//! engine.start(&store)?;
//! // Once per second:
//! let events = engine.tick(&mut store);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::events::Event;
use crate::routine::{RoutineStep, RoutineStore, StepId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No step selected.
    Idle,
    /// Step selected with its full duration loaded.
    Ready,
    Running,
    Paused,
    /// Countdown hit zero. Only held while completion is being handled.
    Expired,
}

/// Single-instance countdown over the routine's steps.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    selected: Option<StepId>,
    remaining_secs: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            selected: None,
            remaining_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current state. Reads as `Idle` once the selected step is gone from
    /// `store`, even before the next command clears it.
    pub fn state(&self, store: &RoutineStore) -> TimerState {
        if self.is_dangling(store) {
            TimerState::Idle
        } else {
            self.state
        }
    }

    pub fn selected(&self, store: &RoutineStore) -> Option<StepId> {
        self.selected.filter(|id| store.contains(*id))
    }

    pub fn remaining_secs(&self, store: &RoutineStore) -> u64 {
        if self.is_dangling(store) {
            0
        } else {
            self.remaining_secs
        }
    }

    pub fn is_running(&self, store: &RoutineStore) -> bool {
        self.state(store) == TimerState::Running
    }

    /// The selected step, re-resolved against `store`.
    pub fn current_step<'s>(&self, store: &'s RoutineStore) -> Option<&'s RoutineStep> {
        self.selected.and_then(|id| store.step(id))
    }

    /// Drop the selection if its step no longer exists.
    ///
    /// Returns `SelectionCleared` when that happened.
    pub fn resolve(&mut self, store: &RoutineStore) -> Option<Event> {
        let id = self.selected?;
        if store.contains(id) {
            return None;
        }
        tracing::debug!(%id, "selected step disappeared, timer cleared");
        Some(self.clear())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&mut self, store: &RoutineStore) -> Event {
        self.resolve(store);
        let step = self.current_step(store);
        Event::StateSnapshot {
            state: self.state,
            step_id: self.selected,
            step_name: step.map(|s| s.name.clone()),
            remaining_secs: self.remaining_secs,
            running: self.state == TimerState::Running,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select a step (or nothing) and load its full duration.
    ///
    /// Always stops a running countdown first.
    pub fn select_step(&mut self, id: Option<StepId>, store: &RoutineStore) -> Event {
        match id.and_then(|id| store.step(id)) {
            Some(step) => {
                self.state = TimerState::Ready;
                self.selected = Some(step.id);
                self.remaining_secs = step.duration_secs();
                Event::StepSelected {
                    step_id: step.id,
                    step_name: step.name.clone(),
                    duration_secs: self.remaining_secs,
                    at: Utc::now(),
                }
            }
            None => self.clear(),
        }
    }

    /// Start or resume the countdown.
    ///
    /// `Ok(None)` when already running.
    ///
    /// # Errors
    /// [`TimerError::NoStepSelected`] when nothing is selected; no state changes.
    pub fn start(&mut self, store: &RoutineStore) -> Result<Option<Event>, TimerError> {
        self.resolve(store);
        match self.state {
            TimerState::Idle => Err(TimerError::NoStepSelected),
            TimerState::Running => Ok(None),
            TimerState::Ready | TimerState::Paused | TimerState::Expired => {
                let step_id = self.selected.ok_or(TimerError::NoStepSelected)?;
                self.state = TimerState::Running;
                Ok(Some(Event::TimerStarted {
                    step_id,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                }))
            }
        }
    }

    pub fn pause(&mut self, store: &RoutineStore) -> Option<Event> {
        self.resolve(store);
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            step_id: self.selected?,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and restore the selected step's full duration.
    pub fn reset(&mut self, store: &RoutineStore) -> Event {
        self.resolve(store);
        match self.current_step(store).map(RoutineStep::duration_secs) {
            Some(secs) => {
                self.state = TimerState::Ready;
                self.remaining_secs = secs;
            }
            None => {
                self.state = TimerState::Idle;
                self.remaining_secs = 0;
            }
        }
        Event::TimerReset {
            step_id: self.selected,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Call once per elapsed second.
    ///
    /// Returns the events produced; empty while not running. On expiry the
    /// step is marked completed in `store` and the engine moves on to the
    /// next incomplete step.
    pub fn tick(&mut self, store: &mut RoutineStore) -> Vec<Event> {
        if let Some(cleared) = self.resolve(store) {
            return vec![cleared];
        }
        if self.state != TimerState::Running {
            return Vec::new();
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return Vec::new();
        }
        self.expire(store)
    }

    /// Select the first incomplete step in list order, or go idle and
    /// report that everything is done.
    pub fn advance_to_next(&mut self, store: &RoutineStore) -> Event {
        match store.first_incomplete().map(|s| s.id) {
            Some(next) => self.select_step(Some(next), store),
            None => {
                self.clear();
                tracing::info!("all routine steps completed");
                Event::AllRoutinesComplete { at: Utc::now() }
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self, store: &mut RoutineStore) -> Vec<Event> {
        self.state = TimerState::Expired;
        let mut events = Vec::with_capacity(2);
        if let Some(step) = self.current_step(store) {
            let (step_id, step_name) = (step.id, step.name.clone());
            store.mark_completed(step_id);
            events.push(Event::StepCompleted {
                step_id,
                step_name,
                at: Utc::now(),
            });
        }
        events.push(self.advance_to_next(store));
        events
    }

    fn is_dangling(&self, store: &RoutineStore) -> bool {
        self.selected.is_some_and(|id| !store.contains(id))
    }

    fn clear(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.selected = None;
        self.remaining_secs = 0;
        Event::SelectionCleared { at: Utc::now() }
    }
}

/// Render seconds as `MM:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
