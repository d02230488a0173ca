//! Date helpers for streaks and weekly reports.
//!
//! Timestamps are stored as RFC 3339 UTC strings, so study days are UTC days.

use chrono::{Duration, NaiveDate, Utc};

/// Current study day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date as YYYY-MM-DD for SQL `date()` comparisons.
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The `days` days ending at `end` (inclusive), oldest first.
pub fn trailing_days(end: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| end - Duration::days(offset as i64))
        .collect()
}

/// Length of the run of consecutive days ending at `today`.
///
/// A day without activity yet does not break the streak: the run may end
/// yesterday instead. `active_days` must be sorted newest first.
pub fn streak_length(active_days: &[NaiveDate], today: NaiveDate) -> usize {
    let mut expected = today;
    let mut streak = 0;

    for &day in active_days {
        if day > expected {
            continue;
        }
        if day == expected {
            streak += 1;
        } else if streak == 0 && day == expected - Duration::days(1) {
            streak = 1;
            expected = day;
        } else {
            break;
        }
        expected = expected - Duration::days(1);
    }

    streak
}
