//! Completion history keyed by local calendar date.
//!
//! Only completed days are stored. Clearing a day removes its key, so a
//! `false` marker never exists in memory or in a saved snapshot.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Format of a date key, e.g. `2024-01-03`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date key.
pub fn parse_date_key(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_KEY_FORMAT).map_err(|_| {
        ValidationError::InvalidDateKey {
            value: value.to_string(),
        }
    })
}

/// Render a date as its key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Today's date in the user's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Set of calendar dates on which the routine was marked completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedDates {
    dates: BTreeSet<NaiveDate>,
}

impl CompletedDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Mark or unmark `date`. Returns true when the set changed.
    pub fn set(&mut self, date: NaiveDate, completed: bool) -> bool {
        if completed {
            self.dates.insert(date)
        } else {
            self.dates.remove(&date)
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }
}

impl FromIterator<NaiveDate> for CompletedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Serialize for CompletedDates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<String, bool> = self.dates.iter().map(|d| (date_key(*d), true)).collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CompletedDates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut dates = BTreeSet::new();
        for (key, marker) in raw {
            if marker != serde_json::Value::Bool(true) {
                continue;
            }
            match parse_date_key(&key) {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(_) => tracing::warn!(key = %key, "dropping malformed completion date"),
            }
        }
        Ok(Self { dates })
    }
}
