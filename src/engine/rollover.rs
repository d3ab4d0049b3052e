/// Day-boundary rollover
///
/// When the app observes a new calendar day, the previous day's live counts
/// are archived into the history ledger and every counter is reset. The
/// archived record is keyed by the day the counts belong to, and upserting by
/// date makes a repeated reconciliation overwrite rather than duplicate.

use chrono::NaiveDate;

use crate::domain::{HistoryLog, HistoryRecord, Tracker};

/// Outcome of a day-boundary reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The recorded active date is still today; nothing to archive
    NoChange,
    /// A boundary was crossed: prior-day counts were archived and the live
    /// counters reset
    Rolled {
        trackers: Vec<Tracker>,
        history: HistoryLog,
        active_date: NaiveDate,
    },
}

/// Check for a crossed day boundary and archive the prior day if so.
///
/// `last_active` is the day the live counts belong to, `None` on the very
/// first run. Exactly one snapshot is archived per reconciliation even when
/// several days elapsed while the app was closed; intermediate days stay
/// absent from the ledger rather than being synthesized as zero records.
pub fn reconcile(
    trackers: &[Tracker],
    last_active: Option<NaiveDate>,
    history: &HistoryLog,
    today: NaiveDate,
) -> Reconciliation {
    if last_active == Some(today) {
        return Reconciliation::NoChange;
    }

    // First run has no active date on record; the snapshot lands under
    // today's key and converges via upsert once the day rolls over normally.
    let archive_date = last_active.unwrap_or(today);
    let record = HistoryRecord::capture(archive_date, trackers);

    let mut new_history = history.clone();
    new_history.upsert(record);

    let new_trackers = trackers
        .iter()
        .map(|t| {
            let mut reset = t.clone();
            reset.reset_count();
            reset
        })
        .collect();

    Reconciliation::Rolled {
        trackers: new_trackers,
        history: new_history,
        active_date: today,
    }
}
