use crate::dates::{date_key, days_in_month, display_date, month_key, shift_months};
use crate::models::{Session, Stats};
use crate::stats::streak_summary;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub day: u32,
    pub logged: bool,
    pub streak: bool,
    pub today: bool,
}

#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub month: String,
    pub label: String,
    pub previous: String,
    pub next: String,
    /// Empty cells before the 1st in a Sunday-first week.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
    pub summary: String,
    pub highlights: Vec<String>,
}

/// Lays out `first_of_month` as a calendar grid, marking logged days and
/// members of the current streak.
pub fn build_month(
    first_of_month: NaiveDate,
    today: NaiveDate,
    sessions: &[Session],
    stats: &Stats,
) -> CalendarMonth {
    let logged: HashSet<NaiveDate> = sessions.iter().filter_map(Session::practice_date).collect();
    let streak: HashSet<NaiveDate> = stats.streak_dates.iter().copied().collect();

    let days = (0..days_in_month(first_of_month))
        .map(|offset| {
            let date = first_of_month + Duration::days(i64::from(offset));
            CalendarDay {
                date: date_key(date),
                day: date.day(),
                logged: logged.contains(&date),
                streak: streak.contains(&date),
                today: date == today,
            }
        })
        .collect();

    CalendarMonth {
        month: month_key(first_of_month),
        label: first_of_month.format("%B %Y").to_string(),
        previous: month_key(shift_months(first_of_month, -1)),
        next: month_key(shift_months(first_of_month, 1)),
        leading_blanks: first_of_month.weekday().num_days_from_sunday(),
        days,
        summary: streak_summary(stats),
        highlights: stats.streak_dates.iter().copied().map(display_date).collect(),
    }
}
