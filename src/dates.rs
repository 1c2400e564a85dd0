use chrono::{Datelike, Duration, Months, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored `YYYY-MM-DD` value into a calendar date.
///
/// Only the canonical zero-padded form is accepted, so a date and its key
/// are interchangeable. Empty and malformed values yield `None`; no
/// time-of-day or timezone is ever attached.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .filter(|date| date_key(*date) == trimmed)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whole calendar days from `earlier` to `later` (negative when reversed).
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parses a `YYYY-MM` month key into the first day of that month.
pub fn parse_month_key(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn shift_months(first_of_month: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first_of_month.checked_add_months(months)
    } else {
        first_of_month.checked_sub_months(months)
    };
    shifted.unwrap_or(first_of_month)
}

pub fn days_in_month(first_of_month: NaiveDate) -> u32 {
    let next = shift_months(first_of_month, 1);
    if next == first_of_month {
        return 31;
    }
    (next - Duration::days(1)).day()
}

/// Short human label, e.g. `Jan 5, 2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Display label for a stored date string; unparseable values are shown as-is.
pub fn display_date_str(raw: &str) -> String {
    parse_date(raw)
        .map(display_date)
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parse_date_rejects_empty_and_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date(" 2024-02-29 "), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn parse_date_requires_canonical_form() {
        assert_eq!(parse_date("2024-1-5"), None);
        assert_eq!(parse_date("2024-01-5"), None);
        assert_eq!(parse_date("+2024-01-05"), None);
        assert_eq!(parse_date("2024-01-05"), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn days_between_crosses_month_and_year() {
        assert_eq!(days_between(ymd(2023, 12, 31), ymd(2024, 1, 1)), 1);
        assert_eq!(days_between(ymd(2024, 2, 28), ymd(2024, 3, 1)), 2);
        assert_eq!(days_between(ymd(2024, 3, 1), ymd(2024, 2, 28)), -2);
    }

    #[test]
    fn month_helpers() {
        let march = ymd(2024, 3, 1);
        assert_eq!(month_start(ymd(2024, 3, 17)), march);
        assert_eq!(parse_month_key("2024-03"), Some(march));
        assert_eq!(parse_month_key("2024-13"), None);
        assert_eq!(parse_month_key("march"), None);
        assert_eq!(month_key(march), "2024-03");
        assert_eq!(shift_months(march, -3), ymd(2023, 12, 1));
        assert_eq!(shift_months(march, 10), ymd(2025, 1, 1));
        assert_eq!(days_in_month(ymd(2024, 2, 1)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 1)), 28);
        assert_eq!(days_in_month(ymd(2024, 12, 1)), 31);
    }

    #[test]
    fn display_formats() {
        assert_eq!(display_date(ymd(2024, 1, 5)), "Jan 5, 2024");
        assert_eq!(display_date_str("2024-11-20"), "Nov 20, 2024");
        assert_eq!(display_date_str("someday"), "someday");
    }
}
