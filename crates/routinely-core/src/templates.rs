//! Built-in routine templates.
//!
//! A template is a fixed, ordered list of steps that can replace the whole
//! routine in one go via [`RoutineStore::replace_all`](crate::RoutineStore::replace_all).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::routine::StepDraft;

/// The available templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Health,
    Productivity,
    Meditation,
    Sport,
}

/// `(name, minutes, icon)`
type Entry = (&'static str, u32, &'static str);

const HEALTH: &[Entry] = &[
    ("Drink water", 5, "💧"),
    ("Exercise", 30, "🏃"),
    ("Shower", 20, "🚿"),
    ("Breakfast", 20, "🍳"),
    ("Get ready", 15, "👔"),
];

const PRODUCTIVITY: &[Entry] = &[
    ("Wake up", 5, "☀️"),
    ("Drink water", 5, "💧"),
    ("Meditation", 10, "🧘"),
    ("Breakfast", 20, "🍳"),
    ("Check schedule", 10, "📅"),
    ("Start work", 10, "💼"),
];

const MEDITATION: &[Entry] = &[
    ("Wake up", 5, "☀️"),
    ("Drink water", 5, "💧"),
    ("Meditation", 20, "🧘"),
    ("Journal", 10, "✍️"),
    ("Tea time", 10, "☕"),
];

const SPORT: &[Entry] = &[
    ("Stretch", 10, "🌱"),
    ("Running", 30, "🏃"),
    ("Shower", 20, "🚿"),
    ("Breakfast", 20, "🍳"),
    ("Get ready", 10, "👔"),
];

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Health,
        Template::Productivity,
        Template::Meditation,
        Template::Sport,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Template::Health => "health",
            Template::Productivity => "productivity",
            Template::Meditation => "meditation",
            Template::Sport => "sport",
        }
    }

    fn entries(&self) -> &'static [Entry] {
        match self {
            Template::Health => HEALTH,
            Template::Productivity => PRODUCTIVITY,
            Template::Meditation => MEDITATION,
            Template::Sport => SPORT,
        }
    }

    /// Fresh drafts for this template, in routine order.
    pub fn steps(&self) -> Vec<StepDraft> {
        self.entries()
            .iter()
            .map(|&(name, minutes, icon)| StepDraft::new(name, minutes, icon))
            .collect()
    }

    pub fn total_minutes(&self) -> u32 {
        self.entries().iter().map(|&(_, minutes, _)| minutes).sum()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Template::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| CoreError::not_found("template", s))
    }
}

/// Look a template up by name and return its steps.
pub fn apply_template(name: &str) -> Result<Vec<StepDraft>, CoreError> {
    name.parse::<Template>().map(|t| t.steps())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoutineStore;

    #[test]
    fn every_template_has_steps() {
        for template in Template::ALL {
            let steps = template.steps();
            assert!(!steps.is_empty(), "{template} is empty");
            assert!(steps.iter().all(|s| !s.name.is_empty() && s.duration_min > 0));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!("Sport".parse::<Template>().unwrap(), Template::Sport);
        assert_eq!(" health ".parse::<Template>().unwrap(), Template::Health);
    }

    #[test]
    fn unknown_template_is_not_found() {
        assert!(matches!(
            apply_template("yoga"),
            Err(CoreError::NotFound { kind: "template", .. })
        ));
    }

    #[test]
    fn health_template_populates_store() {
        let mut store = RoutineStore::in_memory();
        store.add_step("Existing", 10, "").unwrap();
        store.replace_all(apply_template("health").unwrap()).unwrap();

        let summary = store.progress_summary();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.completed, 0);
        assert_eq!(summary.total_minutes, u64::from(Template::Health.total_minutes()));
        assert_eq!(store.steps()[0].name, "Drink water");
    }
}
