use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Duration used when a step's minutes are missing or cannot be parsed.
pub const DEFAULT_DURATION_MIN: u32 = 15;

/// Identifier of a routine step.
///
/// Issued by the store at creation time and never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StepId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(StepId)
    }
}

/// One item of the morning routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: StepId,
    pub name: String,
    /// Duration in minutes.
    #[serde(
        rename = "duration",
        default = "default_duration",
        deserialize_with = "lenient_duration"
    )]
    pub duration_min: u32,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub completed: bool,
}

impl RoutineStep {
    /// Full countdown length in seconds.
    pub fn duration_secs(&self) -> u64 {
        u64::from(self.duration_min).saturating_mul(60)
    }
}

/// A step that has not been given an id yet.
///
/// Templates produce drafts; the store turns them into [`RoutineStep`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDraft {
    pub name: String,
    pub duration_min: u32,
    pub icon: String,
}

impl StepDraft {
    pub fn new(name: impl Into<String>, duration_min: u32, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_min,
            icon: icon.into(),
        }
    }
}

/// Aggregate progress over the current routine list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: usize,
    pub total_minutes: u64,
    /// Rounded completion percentage, 0..=100.
    pub percent: u8,
}

impl ProgressSummary {
    pub fn from_steps(steps: &[RoutineStep]) -> Self {
        let total = steps.len();
        let completed = steps.iter().filter(|s| s.completed).count();
        let total_minutes = steps.iter().map(|s| u64::from(s.duration_min)).sum();
        Self {
            total,
            completed,
            total_minutes,
            percent: rounded_percent(completed, total),
        }
    }
}

/// `round(part / whole * 100)` with halves rounded up; 0 when `whole == 0`.
fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// Coerce a user-supplied minute count, falling back to the default.
pub fn normalize_duration(minutes: Option<i64>) -> u32 {
    match minutes {
        Some(m) if m > 0 => u32::try_from(m).unwrap_or(u32::MAX),
        _ => DEFAULT_DURATION_MIN,
    }
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MIN
}

/// Accepts numbers or numeric strings; anything else becomes the default.
fn lenient_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let minutes = match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(normalize_duration(minutes))
}
