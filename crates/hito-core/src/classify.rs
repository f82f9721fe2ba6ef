//! Temporal status classifier.
//!
//! Maps `(deadline date, deadline time, lifecycle status, last completion,
//! today)` to a [`DisplayStatus`]. Pure: `today` is injected and the result is
//! never cached, since it changes as days pass without any data change.
//!
//! ```text
//! Finalizado ─┬─ completion > deadline instant ─→ completed_late
//!             └─ otherwise (incl. no record)   ─→ completed_on_time
//! Nuevo ──────┬─ deadline < today  ─→ overdue
//!             ├─ deadline == today ─→ due_today
//!             └─ deadline > today  ─→ pending_on_time
//! ```

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::calendar::deadline_instant;
use crate::enums::{DisplayStatus, LifecycleStatus};

/// Classify a milestone instance.
///
/// `last_completion` and the deadline are compared as UTC wall-clock values.
/// A completion exactly at the deadline instant is on time.
#[must_use]
pub fn classify(
    deadline_date: Option<NaiveDate>,
    deadline_time: Option<NaiveTime>,
    status: LifecycleStatus,
    last_completion: Option<NaiveDateTime>,
    today: NaiveDate,
) -> DisplayStatus {
    let Some(deadline_date) = deadline_date else {
        return DisplayStatus::NoDate;
    };

    match status {
        LifecycleStatus::Completed => match last_completion {
            Some(done) if done > deadline_instant(deadline_date, deadline_time) => {
                DisplayStatus::CompletedLate
            }
            _ => DisplayStatus::CompletedOnTime,
        },
        LifecycleStatus::Open => match deadline_date.cmp(&today) {
            Ordering::Less => DisplayStatus::Overdue,
            Ordering::Equal => DisplayStatus::DueToday,
            Ordering::Greater => DisplayStatus::PendingOnTime,
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[rstest]
    #[case("2025-03-09", DisplayStatus::Overdue)]
    #[case("2025-03-10", DisplayStatus::DueToday)]
    #[case("2025-03-11", DisplayStatus::PendingOnTime)]
    fn open_instances_follow_calendar_day(#[case] deadline: &str, #[case] expected: DisplayStatus) {
        let today = date("2025-03-10");
        for t in [None, Some(time("00:00")), Some(time("08:30"))] {
            let status = classify(Some(date(deadline)), t, LifecycleStatus::Open, None, today);
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn open_instance_ignores_stale_completion() {
        let status = classify(
            Some(date("2025-03-01")),
            None,
            LifecycleStatus::Open,
            Some(at("2025-02-01T10:00:00")),
            date("2025-03-10"),
        );
        assert_eq!(status, DisplayStatus::Overdue);
    }

    #[test]
    fn completed_without_record_is_on_time() {
        let status = classify(
            Some(date("2020-01-01")),
            Some(time("09:00")),
            LifecycleStatus::Completed,
            None,
            date("2025-03-10"),
        );
        assert_eq!(status, DisplayStatus::CompletedOnTime);
    }

    #[test]
    fn completion_at_deadline_instant_is_on_time() {
        let status = classify(
            Some(date("2025-03-10")),
            Some(time("09:00")),
            LifecycleStatus::Completed,
            Some(at("2025-03-10T09:00:00")),
            date("2025-03-20"),
        );
        assert_eq!(status, DisplayStatus::CompletedOnTime);
    }

    #[test]
    fn completion_one_second_after_explicit_time_is_late() {
        let status = classify(
            Some(date("2025-03-10")),
            Some(time("09:00")),
            LifecycleStatus::Completed,
            Some(at("2025-03-10T09:00:01")),
            date("2025-03-20"),
        );
        assert_eq!(status, DisplayStatus::CompletedLate);
    }

    #[test]
    fn completion_past_implicit_end_of_day_is_late() {
        let status = classify(
            Some(date("2025-03-10")),
            None,
            LifecycleStatus::Completed,
            Some(at("2025-03-10T23:59:01")),
            date("2025-03-20"),
        );
        assert_eq!(status, DisplayStatus::CompletedLate);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("00:00"))]
    fn same_day_completion_without_time_is_on_time(#[case] deadline_time: Option<&str>) {
        let status = classify(
            Some(date("2025-03-10")),
            deadline_time.map(time),
            LifecycleStatus::Completed,
            Some(at("2025-03-10T18:30:00")),
            date("2025-03-20"),
        );
        assert_eq!(status, DisplayStatus::CompletedOnTime);
    }

    #[test]
    fn completion_on_next_day_is_late() {
        let status = classify(
            Some(date("2025-03-10")),
            None,
            LifecycleStatus::Completed,
            Some(at("2025-03-11T00:00:00")),
            date("2025-03-20"),
        );
        assert_eq!(status, DisplayStatus::CompletedLate);
    }

    #[test]
    fn missing_deadline_is_sentinel() {
        for status in [LifecycleStatus::Open, LifecycleStatus::Completed] {
            assert_eq!(
                classify(None, None, status, None, date("2025-03-10")),
                DisplayStatus::NoDate
            );
        }
    }
}
