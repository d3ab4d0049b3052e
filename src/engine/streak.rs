/// Streak calculation over the perfect-day ledger
///
/// A day is "perfect" when every goal that applied to it was met: for the
/// live day that means every active tracker reached its goal, for archived
/// days that every snapshot in the record did. Days absent from the ledger
/// count as not perfect, which is how gaps from skipped days break streaks.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{HistoryLog, Tracker};

/// Current and best consecutive-day streaks of fully-met goals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    /// Consecutive perfect days ending today or yesterday
    pub current: u32,
    /// Longest run of perfect days ever observed
    pub best: u32,
}

impl StreakSummary {
    /// Compute both streaks from the live trackers and the history ledger.
    pub fn compute(trackers: &[Tracker], history: &HistoryLog, today: NaiveDate) -> Self {
        let perfect_dates = collect_perfect_dates(trackers, history, today);

        // Current streak: an unfinished today doesn't break the run, it just
        // doesn't count yet, so start the backward walk from yesterday.
        let mut current = 0u32;
        let mut check_date = today;
        if !perfect_dates.contains(&check_date) {
            check_date = check_date - Duration::days(1);
        }
        while perfect_dates.contains(&check_date) {
            current += 1;
            check_date = check_date - Duration::days(1);
        }

        // Best streak: scan ascending, a gap other than exactly one day
        // restarts the run.
        let mut best = 0u32;
        let mut run = 0u32;
        let mut prev: Option<NaiveDate> = None;
        for &date in &perfect_dates {
            run = match prev {
                Some(prev_date) if date - prev_date == Duration::days(1) => run + 1,
                _ => 1,
            };
            best = best.max(run);
            prev = Some(date);
        }

        // An in-progress streak may not be materialized in history yet
        Self {
            current,
            best: best.max(current),
        }
    }
}

/// Whether the live day is perfect: at least one active tracker and every
/// active tracker at or past its goal. Zero active trackers is never perfect.
pub fn today_is_perfect(trackers: &[Tracker]) -> bool {
    let active: Vec<&Tracker> = trackers.iter().filter(|t| t.is_active).collect();
    !active.is_empty() && active.iter().all(|t| t.meets_goal())
}

fn collect_perfect_dates(
    trackers: &[Tracker],
    history: &HistoryLog,
    today: NaiveDate,
) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();

    if today_is_perfect(trackers) {
        dates.insert(today);
    }

    for record in history.records() {
        if record.is_perfect() {
            dates.insert(record.date);
        }
    }

    dates
}
