mod aggregator;
mod dates;

pub use aggregator::{shift_week, week_start_of, CalendarAggregator, DayStatus, WeekStart};
pub use dates::{date_key, parse_date_key, today, CompletedDates, DATE_KEY_FORMAT};
