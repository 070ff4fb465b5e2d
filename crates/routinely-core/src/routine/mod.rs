mod step;
mod store;

pub use step::{
    normalize_duration, ProgressSummary, RoutineStep, StepDraft, StepId, DEFAULT_DURATION_MIN,
};
pub use store::RoutineStore;
