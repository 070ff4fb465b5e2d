mod engine;

pub use engine::{format_clock, TimerEngine, TimerState};
