//! Read-only projections over the completion history.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::CompletedDates;

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// One cell of a rendered week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Weekly totals and streaks derived from [`CompletedDates`].
///
/// Holds a borrow only; it owns no state and never mutates the history.
#[derive(Debug, Clone, Copy)]
pub struct CalendarAggregator<'a> {
    dates: &'a CompletedDates,
}

impl<'a> CalendarAggregator<'a> {
    pub fn new(dates: &'a CompletedDates) -> Self {
        Self { dates }
    }

    /// Completed days among the 7 consecutive dates starting at `week_start`.
    pub fn weekly_completion_count(&self, week_start: NaiveDate) -> u8 {
        week_dates(week_start)
            .filter(|d| self.dates.contains(*d))
            .count() as u8
    }

    /// Consecutive completed days ending at `today` (inclusive).
    ///
    /// Zero when `today` itself is not completed.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut cursor = Some(today);
        while let Some(day) = cursor {
            if !self.dates.contains(day) {
                break;
            }
            streak += 1;
            cursor = day.pred_opt();
        }
        streak
    }

    pub fn week_view(&self, week_start: NaiveDate) -> Vec<DayStatus> {
        week_dates(week_start)
            .map(|date| DayStatus {
                date,
                completed: self.dates.contains(date),
            })
            .collect()
    }
}

/// First day of the week that contains `date`.
pub fn week_start_of(date: NaiveDate, start: WeekStart) -> NaiveDate {
    let offset = match start {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(i64::from(offset))
}

/// Move a week start by whole weeks (negative goes back).
pub fn shift_week(week_start: NaiveDate, weeks: i32) -> NaiveDate {
    week_start + Duration::weeks(i64::from(weeks))
}

fn week_dates(week_start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    week_start.iter_days().take(7)
}
