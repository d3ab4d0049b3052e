/// Volume, momentum and effort-split analytics
///
/// All functions are total over well-formed input: empty trackers or history
/// produce zero volumes, 0% momentum and an empty split rather than errors.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{HistoryLog, Tracker};

/// Sum of all live counts for the current day
pub fn today_volume(trackers: &[Tracker]) -> u64 {
    trackers.iter().map(|t| u64::from(t.count)).sum()
}

/// Total volume over an inclusive `window_days`-day window ending today.
///
/// Today's live counts are included even though the day is not archived yet;
/// archived records contribute when their date falls in
/// `[today - (window_days - 1), today)`.
pub fn rolling_volume(
    trackers: &[Tracker],
    history: &HistoryLog,
    window_days: u32,
    today: NaiveDate,
) -> u64 {
    let split_date = today - Duration::days(i64::from(window_days) - 1);

    let archived: u64 = history
        .records()
        .iter()
        .filter(|r| r.date >= split_date && r.date < today)
        .map(|r| r.total_volume)
        .sum();

    today_volume(trackers) + archived
}

/// Seven-day volume window ending today
pub fn seven_day_volume(trackers: &[Tracker], history: &HistoryLog, today: NaiveDate) -> u64 {
    rolling_volume(trackers, history, 7, today)
}

/// Fourteen-day volume window ending today
pub fn fourteen_day_volume(trackers: &[Tracker], history: &HistoryLog, today: NaiveDate) -> u64 {
    rolling_volume(trackers, history, 14, today)
}

/// Thirty-day volume window ending today
pub fn thirty_day_volume(trackers: &[Tracker], history: &HistoryLog, today: NaiveDate) -> u64 {
    rolling_volume(trackers, history, 30, today)
}

/// Day-over-day volume change as a signed, unclamped percentage.
///
/// A zero-volume yesterday (absent record included) collapses to 100% when
/// anything was done today and 0% otherwise, avoiding the division entirely.
pub fn momentum(trackers: &[Tracker], history: &HistoryLog, today: NaiveDate) -> f64 {
    let today_total = today_volume(trackers);

    let yesterday = today - Duration::days(1);
    let yesterday_total = history.find(yesterday).map(|r| r.total_volume).unwrap_or(0);

    if yesterday_total == 0 {
        return if today_total > 0 { 100.0 } else { 0.0 };
    }

    (today_total as f64 - yesterday_total as f64) / yesterday_total as f64 * 100.0
}

/// One tracker's share of today's total volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffortShare {
    pub name: String,
    pub count: u32,
    /// Independently rounded; shares need not sum to exactly 100
    pub percentage: u32,
}

/// Per-tracker share of today's volume, sorted descending by percentage.
///
/// Ties keep the trackers' relative input order (stable sort). An idle day
/// returns an empty split.
pub fn effort_split(trackers: &[Tracker]) -> Vec<EffortShare> {
    let total = today_volume(trackers);
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<EffortShare> = trackers
        .iter()
        .map(|t| EffortShare {
            name: t.name.clone(),
            count: t.count,
            percentage: (f64::from(t.count) / total as f64 * 100.0).round() as u32,
        })
        .collect();

    shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    shares
}
