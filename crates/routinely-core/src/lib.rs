//! # Routinely Core Library
//!
//! This library provides the core logic for Routinely, a morning-routine
//! planner. All operations are available through the `routinely` CLI, which
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Routine Store**: ordered steps, wake-up time and completion history;
//!   every mutation is saved through a [`PersistenceGateway`]
//! - **Timer Engine**: a single countdown over the current step that the
//!   caller drives with `tick()` once per second
//! - **Calendar**: weekly counts and streaks derived from completed dates
//! - **Templates**: built-in step lists that replace the routine wholesale
//!
//! ## Key Components
//!
//! - [`RoutineStore`]: owner of all persisted state
//! - [`TimerEngine`]: step countdown state machine
//! - [`CalendarAggregator`]: read-only history projections
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod events;
pub mod export;
pub mod notify;
pub mod routine;
pub mod storage;
pub mod templates;
pub mod timer;

pub use calendar::{CalendarAggregator, CompletedDates, WeekStart};
pub use error::{ConfigError, CoreError, PersistenceError, TimerError, ValidationError};
pub use events::Event;
pub use export::{share_text, ExportDocument};
pub use notify::{LogNotifier, Notifier, NullNotifier};
pub use routine::{ProgressSummary, RoutineStep, RoutineStore, StepDraft, StepId};
pub use storage::{Config, Database, KvGateway, MemoryGateway, PersistenceGateway, Snapshot};
pub use templates::{apply_template, Template};
pub use timer::{TimerEngine, TimerState};
