use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::routine::StepId;
use crate::timer::TimerState;

/// Every timer command and routine milestone produces an Event.
/// The view layer renders them; notifiers turn some into messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StepSelected {
        step_id: StepId,
        step_name: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// The selection was dropped, either on request or because the step
    /// disappeared from the routine list.
    SelectionCleared {
        at: DateTime<Utc>,
    },
    TimerStarted {
        step_id: StepId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        step_id: StepId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        step_id: Option<StepId>,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and the step was marked completed.
    StepCompleted {
        step_id: StepId,
        step_name: String,
        at: DateTime<Utc>,
    },
    /// No incomplete step is left to advance to.
    AllRoutinesComplete {
        at: DateTime<Utc>,
    },
    StepAdded {
        step_id: StepId,
        step_name: String,
        at: DateTime<Utc>,
    },
    TemplateApplied {
        template: String,
        step_count: usize,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        step_id: Option<StepId>,
        step_name: Option<String>,
        remaining_secs: u64,
        running: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Plain-text message for a notification, if this event warrants one.
    pub fn notification_text(&self) -> Option<String> {
        match self {
            Event::StepCompleted { step_name, .. } => Some(format!("{step_name} completed!")),
            Event::AllRoutinesComplete { .. } => Some("All routines completed!".to_string()),
            Event::StepAdded { step_name, .. } => Some(format!("Added - {step_name}")),
            Event::TemplateApplied { template, .. } => {
                Some(format!("{template} routines applied!"))
            }
            _ => None,
        }
    }
}
