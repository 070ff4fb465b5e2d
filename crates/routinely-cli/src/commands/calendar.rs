//! Completion calendar commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use routinely_core::calendar::{self, date_key, parse_date_key, shift_week, week_start_of};
use serde::Serialize;

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Mark a day as completed (defaults to today)
    Mark {
        /// Date as YYYY-MM-DD
        date: Option<String>,
    },
    /// Clear a day's completion mark (defaults to today)
    Unmark {
        /// Date as YYYY-MM-DD
        date: Option<String>,
    },
    /// Show a week with its completion count and the current streak
    Week {
        /// Weeks relative to the current one (-1 = previous week)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the current streak in days
    Streak,
}

#[derive(Serialize)]
struct WeekReport {
    week_start: NaiveDate,
    completed_days: u8,
    streak: u32,
    days: Vec<calendar::DayStatus>,
}

fn resolve_date(date: Option<String>) -> CliResult<NaiveDate> {
    match date {
        Some(value) => Ok(parse_date_key(&value)?),
        None => Ok(calendar::today()),
    }
}

pub fn run(action: CalendarAction) -> CliResult {
    let mut ctx = Context::open()?;

    match action {
        CalendarAction::Mark { date } => {
            let date = resolve_date(date)?;
            ctx.store.toggle_date_completion(date, true);
            println!("{} marked completed", date_key(date));
        }
        CalendarAction::Unmark { date } => {
            let date = resolve_date(date)?;
            ctx.store.toggle_date_completion(date, false);
            println!("{} cleared", date_key(date));
        }
        CalendarAction::Week { offset, json } => {
            let today = calendar::today();
            let week_start = shift_week(
                week_start_of(today, ctx.config.calendar.week_starts_on),
                offset,
            );
            let agg = ctx.store.calendar();
            let report = WeekReport {
                week_start,
                completed_days: agg.weekly_completion_count(week_start),
                streak: agg.current_streak(today),
                days: agg.week_view(week_start),
            };
            if json {
                print_json(&report)?;
            } else {
                for day in &report.days {
                    let mark = if day.completed { "x" } else { " " };
                    println!("[{mark}] {} {}", day.date.format("%a"), date_key(day.date));
                }
                println!("This week: {}/7 days", report.completed_days);
                println!("Streak: {} days", report.streak);
            }
        }
        CalendarAction::Streak => {
            println!("{}", ctx.store.calendar().current_streak(calendar::today()));
        }
    }

    ctx.finish()
}
