use crate::dates::{days_between, month_start};
use crate::models::{Motivation, Session, Stats};
use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeSet;

const CELEBRATION_STREAK: usize = 5;
const CONSISTENT_MONTH: usize = 4;

/// Streak and consistency figures as of the local calendar date.
pub fn compute_stats(sessions: &[Session]) -> Stats {
    compute_stats_at(Local::now().date_naive(), sessions)
}

/// Derives streak and consistency figures as seen on `today`.
///
/// Sessions sharing a date count once for streaks and the monthly tally but
/// every record counts toward `total_sessions`. Records whose date is empty
/// or malformed are left out of all date-based figures.
pub fn compute_stats_at(today: NaiveDate, sessions: &[Session]) -> Stats {
    if sessions.is_empty() {
        return Stats::default();
    }

    let dates = distinct_dates(sessions);
    let longest_streak_dates = longest_run(&dates);
    let streak_dates = current_run(today, &dates);

    Stats {
        total_sessions: sessions.len(),
        total_bullseyes: sessions
            .iter()
            .fold(0u64, |sum, session| sum.saturating_add(session.bullseyes)),
        monthly_sessions: count_in_month(today, &dates),
        current_streak: streak_dates.len(),
        longest_streak: longest_streak_dates.len(),
        streak_dates,
        longest_streak_dates,
    }
}

pub fn motivation_message(stats: &Stats) -> Motivation {
    let (title, message) = if stats.current_streak >= CELEBRATION_STREAK {
        (
            format!("🔥 {}-day streak on fire!", stats.current_streak),
            "Keep the momentum going. Lock in a focused drill today to extend it.",
        )
    } else if stats.total_sessions == 0 {
        (
            "Let’s get that first arrow in the log".to_string(),
            "Log your first session to unlock streak tracking and trend insights.",
        )
    } else if stats.monthly_sessions < CONSISTENT_MONTH {
        (
            "Time to schedule the next range trip".to_string(),
            "You are only a couple of reps away from establishing consistency this month.",
        )
    } else {
        (
            "Stack another purposeful session".to_string(),
            "Pick a focus area for today (form, accuracy, or mindset) and write down one insight afterwards.",
        )
    };

    Motivation {
        title,
        message: message.to_string(),
    }
}

pub fn streak_message(stats: &Stats) -> String {
    match stats.current_streak {
        0 => "Let's light the fuse on a new streak!".to_string(),
        1 | 2 => {
            "A couple more days locks in the habit. Schedule your next practice now.".to_string()
        }
        days => format!("Amazing work: {days} days straight. Keep going!"),
    }
}

pub fn streak_summary(stats: &Stats) -> String {
    if stats.current_streak == 0 {
        return "No active streak yet. Log two sessions back-to-back to start one!".to_string();
    }
    format!(
        "Current streak: {}. Longest streak: {}.",
        day_count(stats.current_streak),
        day_count(stats.longest_streak)
    )
}

pub fn day_count(days: usize) -> String {
    format!("{days} day{}", if days == 1 { "" } else { "s" })
}

pub fn session_count(sessions: usize) -> String {
    format!("{sessions} session{}", if sessions == 1 { "" } else { "s" })
}

fn distinct_dates(sessions: &[Session]) -> Vec<NaiveDate> {
    sessions
        .iter()
        .filter_map(Session::practice_date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Longest run of consecutive days in ascending `dates`.
fn longest_run(dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut longest: Vec<NaiveDate> = Vec::new();
    let mut run: Vec<NaiveDate> = Vec::new();

    for &date in dates {
        match run.last() {
            Some(&previous) if days_between(previous, date) == 1 => run.push(date),
            _ => {
                run.clear();
                run.push(date);
            }
        }

        // Strictly greater: an equal-length later run never replaces the first.
        if run.len() > longest.len() {
            longest = run.clone();
        }
    }

    longest
}

/// Run of consecutive days ending at the latest date, provided that date is
/// today or yesterday. Returned ascending.
fn current_run(today: NaiveDate, dates: &[NaiveDate]) -> Vec<NaiveDate> {
    let Some(&latest) = dates.last() else {
        return Vec::new();
    };
    if days_between(latest, today) > 1 {
        return Vec::new();
    }

    let mut run = vec![latest];
    let mut previous = latest;
    for &date in dates.iter().rev().skip(1) {
        if days_between(date, previous) != 1 {
            break;
        }
        run.push(date);
        previous = date;
    }

    run.reverse();
    run
}

fn count_in_month(today: NaiveDate, dates: &[NaiveDate]) -> usize {
    let start = month_start(today);
    dates
        .iter()
        .filter(|date| **date >= start && date.month() == today.month())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn session(date: &str) -> Session {
        Session {
            date: date.to_string(),
            ..Session::default()
        }
    }

    fn sessions(dates: &[&str]) -> Vec<Session> {
        dates.iter().map(|date| session(date)).collect()
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats = compute_stats_at(ymd(2024, 1, 3), &[]);
        assert_eq!(stats, Stats::default());
        assert!(stats.streak_dates.is_empty());
        assert!(stats.longest_streak_dates.is_empty());
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let stats = compute_stats_at(
            ymd(2024, 1, 3),
            &sessions(&["2024-01-01", "2024-01-02", "2024-01-03"]),
        );
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(
            stats.streak_dates,
            vec![ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 1, 3)]
        );
    }

    #[test]
    fn gap_breaks_both_streaks() {
        let stats = compute_stats_at(ymd(2024, 1, 5), &sessions(&["2024-01-01", "2024-01-03"]));
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.current_streak, 0);
        assert!(stats.streak_dates.is_empty());
    }

    #[test]
    fn yesterday_keeps_streak_alive() {
        let today = ymd(2024, 6, 10);
        let stats = compute_stats_at(today, &sessions(&["2024-06-09"]));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.streak_dates, vec![ymd(2024, 6, 9)]);

        let stats = compute_stats_at(today, &sessions(&["2024-06-08"]));
        assert_eq!(stats.current_streak, 0);
    }

    #[test]
    fn current_streak_walks_back_through_month_boundary() {
        let stats = compute_stats_at(
            ymd(2024, 3, 2),
            &sessions(&["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]),
        );
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.streak_dates.first(), Some(&ymd(2024, 2, 27)));
        assert_eq!(stats.streak_dates.last(), Some(&ymd(2024, 3, 1)));
    }

    #[test]
    fn unordered_input_is_sorted_first() {
        let stats = compute_stats_at(
            ymd(2024, 1, 3),
            &sessions(&["2024-01-03", "2024-01-01", "2024-01-02"]),
        );
        assert_eq!(stats.current_streak, 3);
        assert_eq!(
            stats.longest_streak_dates,
            vec![ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 1, 3)]
        );
    }

    #[test]
    fn longest_streak_tie_keeps_first_run() {
        let stats = compute_stats_at(
            ymd(2024, 5, 1),
            &sessions(&[
                "2024-01-01",
                "2024-01-02",
                "2024-01-10",
                "2024-01-11",
                "2024-01-20",
            ]),
        );
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(
            stats.longest_streak_dates,
            vec![ymd(2024, 1, 1), ymd(2024, 1, 2)]
        );
    }

    #[test]
    fn longer_later_run_replaces_earlier() {
        let stats = compute_stats_at(
            ymd(2024, 5, 1),
            &sessions(&[
                "2024-01-01",
                "2024-01-02",
                "2024-02-01",
                "2024-02-02",
                "2024-02-03",
            ]),
        );
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.longest_streak_dates[0], ymd(2024, 2, 1));
    }

    #[test]
    fn duplicate_dates_count_once_for_streaks_but_not_totals() {
        let mut input = sessions(&["2024-01-02", "2024-01-03"]);
        input.push(Session {
            date: "2024-01-03".to_string(),
            bullseyes: 4,
            ..Session::default()
        });
        let stats = compute_stats_at(ymd(2024, 1, 3), &input);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_bullseyes, 4);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.monthly_sessions, 2);
    }

    #[test]
    fn malformed_dates_are_ignored_for_date_figures() {
        let input = sessions(&["", "not-a-date", "2024-01-03"]);
        let stats = compute_stats_at(ymd(2024, 1, 3), &input);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.monthly_sessions, 1);
    }

    #[test]
    fn only_undated_sessions_still_count_totals() {
        let stats = compute_stats_at(ymd(2024, 1, 3), &sessions(&["", " "]));
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 0);
    }

    #[test]
    fn monthly_count_uses_current_calendar_month() {
        let input = sessions(&[
            "2023-12-31",
            "2024-01-01",
            "2024-01-15",
            "2024-01-31",
            "2024-02-01",
        ]);
        let stats = compute_stats_at(ymd(2024, 1, 20), &input);
        assert_eq!(stats.monthly_sessions, 3);
    }

    #[test]
    fn monthly_count_excludes_same_month_of_previous_year() {
        let stats = compute_stats_at(ymd(2024, 1, 20), &sessions(&["2023-01-05", "2024-01-05"]));
        assert_eq!(stats.monthly_sessions, 1);
    }

    #[test]
    fn future_dated_latest_session_starts_the_streak() {
        let stats = compute_stats_at(ymd(2024, 1, 3), &sessions(&["2024-01-04", "2024-01-05"]));
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn totals_sum_bullseyes() {
        let input = vec![
            Session {
                date: "2024-01-01".to_string(),
                bullseyes: 9,
                ..Session::default()
            },
            Session {
                date: "2024-01-05".to_string(),
                bullseyes: 6,
                ..Session::default()
            },
            session("2024-01-07"),
        ];
        let stats = compute_stats_at(ymd(2024, 1, 7), &input);
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_bullseyes, 15);
    }

    #[test]
    fn invariants_hold_across_histories() {
        let today = ymd(2024, 4, 10);
        let histories: Vec<Vec<NaiveDate>> = vec![
            vec![],
            vec![today],
            (0..12).map(|offset| today - Duration::days(offset)).collect(),
            (0..30).step_by(2).map(|offset| today - Duration::days(offset)).collect(),
            [40, 39, 38, 37, 36, 20, 3, 2, 1]
                .iter()
                .map(|offset| today - Duration::days(*offset))
                .collect(),
        ];

        for history in histories {
            let input: Vec<Session> = history
                .iter()
                .map(|date| Session {
                    date: crate::dates::date_key(*date),
                    bullseyes: 2,
                    ..Session::default()
                })
                .collect();
            let stats = compute_stats_at(today, &input);

            assert_eq!(stats.total_sessions, input.len());
            assert_eq!(stats.total_bullseyes, 2 * input.len() as u64);
            assert!(stats.longest_streak >= stats.current_streak);
            assert_eq!(stats.longest_streak, stats.longest_streak_dates.len());
            assert_eq!(stats.current_streak, stats.streak_dates.len());
            for pair in stats.longest_streak_dates.windows(2) {
                assert_eq!(days_between(pair[0], pair[1]), 1);
            }
            for pair in stats.streak_dates.windows(2) {
                assert_eq!(days_between(pair[0], pair[1]), 1);
            }
            assert_eq!(stats, compute_stats_at(today, &input));
        }
    }

    #[test]
    fn no_sessions_prompts_first_session() {
        let stats = Stats {
            monthly_sessions: 7,
            ..Stats::default()
        };
        let motivation = motivation_message(&stats);
        assert_eq!(motivation.title, "Let’s get that first arrow in the log");
    }

    #[test]
    fn long_streak_beats_other_rules() {
        let stats = Stats {
            current_streak: 5,
            total_sessions: 10,
            monthly_sessions: 2,
            ..Stats::default()
        };
        let motivation = motivation_message(&stats);
        assert_eq!(motivation.title, "🔥 5-day streak on fire!");
    }

    #[test]
    fn sparse_month_gets_consistency_nudge() {
        let stats = Stats {
            current_streak: 4,
            total_sessions: 10,
            monthly_sessions: 3,
            ..Stats::default()
        };
        assert_eq!(
            motivation_message(&stats).title,
            "Time to schedule the next range trip"
        );

        let stats = Stats {
            monthly_sessions: 4,
            ..stats
        };
        assert_eq!(
            motivation_message(&stats).title,
            "Stack another purposeful session"
        );
    }

    #[test]
    fn streak_texts() {
        let mut stats = Stats::default();
        assert_eq!(streak_message(&stats), "Let's light the fuse on a new streak!");
        assert!(streak_summary(&stats).starts_with("No active streak yet"));

        stats.current_streak = 1;
        stats.longest_streak = 4;
        assert!(streak_message(&stats).starts_with("A couple more days"));
        assert_eq!(
            streak_summary(&stats),
            "Current streak: 1 day. Longest streak: 4 days."
        );

        stats.current_streak = 3;
        assert_eq!(
            streak_message(&stats),
            "Amazing work: 3 days straight. Keep going!"
        );
    }

    #[test]
    fn pluralized_counts() {
        assert_eq!(day_count(0), "0 days");
        assert_eq!(session_count(1), "1 session");
        assert_eq!(session_count(2), "2 sessions");
    }
}
