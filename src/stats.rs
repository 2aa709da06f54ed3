use crate::models::{Plan, Progress, SummaryResponse, WeeklyCount};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

pub const WEEK_COUNT: usize = 6;

pub fn build_summary(plans: &[Plan]) -> SummaryResponse {
    build_summary_at(Local::now().naive_local(), plans)
}

pub fn build_summary_at(now: NaiveDateTime, plans: &[Plan]) -> SummaryResponse {
    SummaryResponse {
        weeks: weekly_completions(plans, now),
        progress: progress(plans),
    }
}

/// Completions per Monday-aligned week for the last `WEEK_COUNT` weeks,
/// oldest first. The current week's bucket ends at `now`.
///
/// A plan is counted only when it is completed and carries a parseable
/// completion date inside one of the buckets; everything else is skipped.
pub fn weekly_completions(plans: &[Plan], now: NaiveDateTime) -> Vec<WeeklyCount> {
    let current = week_start(now.date());
    let starts: Vec<NaiveDateTime> = (0..WEEK_COUNT)
        .rev()
        .map(|offset| (current - Duration::weeks(offset as i64)).and_time(NaiveTime::MIN))
        .collect();

    let mut counts: Vec<WeeklyCount> = starts
        .iter()
        .map(|start| WeeklyCount {
            label: week_label(start.date()),
            week_start: start.date(),
            count: 0,
        })
        .collect();

    for plan in plans {
        if !plan.completed {
            continue;
        }
        let Some(raw) = plan.completed_date.as_deref() else {
            continue;
        };
        let Some(completed_at) = parse_completed_at(raw) else {
            debug!(plan = %plan.id, completed_date = raw, "skipping unparseable completion date");
            continue;
        };

        for (index, start) in starts.iter().enumerate() {
            let end = starts.get(index + 1).copied().unwrap_or(now);
            if completed_at >= *start && completed_at < end {
                counts[index].count += 1;
                break;
            }
        }
    }

    counts
}

pub fn progress(plans: &[Plan]) -> Progress {
    let total = plans.len();
    let completed = plans.iter().filter(|plan| plan.completed).count();
    let percent = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };

    Progress {
        total,
        completed,
        percent,
    }
}

/// Accepts a bare date (local midnight), a naive date-time or an RFC 3339
/// timestamp, which is shifted into local time.
pub fn parse_completed_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
