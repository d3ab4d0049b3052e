/// Explicit state container for live trackers and archived history
///
/// The container owns the tracker set, the history ledger and the last-active
/// date marker. Every mutation funnels through its methods; the engine and
/// analytics modules only ever see borrowed views, and day-boundary archival
/// happens exclusively via `reconcile_day`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HistoryLog, HistoryRecord, Tracker, TrackerId};
use crate::engine::{reconcile, Reconciliation};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    trackers: Vec<Tracker>,
    history: HistoryLog,
    last_active: Option<NaiveDate>,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from separately persisted parts
    pub fn from_parts(
        trackers: Vec<Tracker>,
        history: HistoryLog,
        last_active: Option<NaiveDate>,
    ) -> Self {
        Self {
            trackers,
            history,
            last_active,
        }
    }

    pub fn trackers(&self) -> &[Tracker] {
        &self.trackers
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The calendar day the live counts belong to; `None` before first use
    pub fn last_active(&self) -> Option<NaiveDate> {
        self.last_active
    }

    /// Create a tracker; new trackers sort after existing ones.
    pub fn add_tracker(&mut self, name: &str, daily_goal: u32) -> Result<TrackerId, DomainError> {
        let tracker = Tracker::new(
            name.trim().to_string(),
            daily_goal,
            self.trackers.len() as u32,
        )?;
        let id = tracker.id;
        self.trackers.push(tracker);
        Ok(id)
    }

    pub fn find_tracker(&self, id: TrackerId) -> Option<&Tracker> {
        self.trackers.iter().find(|t| t.id == id)
    }

    /// Look a tracker up by display name, preferring an exact match and
    /// falling back to a case-insensitive one.
    pub fn find_by_name(&self, name: &str) -> Option<&Tracker> {
        self.trackers
            .iter()
            .find(|t| t.name == name)
            .or_else(|| {
                self.trackers
                    .iter()
                    .find(|t| t.name.eq_ignore_ascii_case(name))
            })
    }

    /// Bump a tracker's count. Returns the new count.
    pub fn increment(&mut self, id: TrackerId, by: u32) -> Result<u32, DomainError> {
        let tracker = self.tracker_mut(id)?;
        tracker.increment(by);
        Ok(tracker.count)
    }

    /// Lower a tracker's count, clamped at zero. Returns the new count.
    pub fn decrement(&mut self, id: TrackerId, by: u32) -> Result<u32, DomainError> {
        let tracker = self.tracker_mut(id)?;
        tracker.decrement(by);
        Ok(tracker.count)
    }

    pub fn rename_tracker(&mut self, id: TrackerId, name: &str) -> Result<(), DomainError> {
        self.tracker_mut(id)?.rename(name.trim().to_string())
    }

    pub fn set_goal(&mut self, id: TrackerId, daily_goal: u32) -> Result<(), DomainError> {
        self.tracker_mut(id)?.set_goal(daily_goal)
    }

    /// Pause or resume a tracker. Paused trackers keep their counts and
    /// history but stop counting toward perfect days.
    pub fn set_active(&mut self, id: TrackerId, is_active: bool) -> Result<(), DomainError> {
        self.tracker_mut(id)?.is_active = is_active;
        Ok(())
    }

    /// Delete a tracker. History snapshots are copies and stay intact.
    pub fn delete_tracker(&mut self, id: TrackerId) -> Result<(), DomainError> {
        let before = self.trackers.len();
        self.trackers.retain(|t| t.id != id);
        if self.trackers.len() == before {
            return Err(DomainError::TrackerNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Apply the rollover engine for `today`. Returns whether a day boundary
    /// was crossed; calling again on the same day is a no-op.
    pub fn reconcile_day(&mut self, today: NaiveDate) -> bool {
        match reconcile(&self.trackers, self.last_active, &self.history, today) {
            Reconciliation::NoChange => false,
            Reconciliation::Rolled {
                trackers,
                history,
                active_date,
            } => {
                tracing::info!(
                    "Archived {} and reset {} trackers",
                    self.last_active
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "first run".to_string()),
                    trackers.len()
                );
                self.trackers = trackers;
                self.history = history;
                self.last_active = Some(active_date);
                true
            }
        }
    }

    /// Manual edit path: insert or replace one day's archived record
    pub fn upsert_history(&mut self, record: HistoryRecord) {
        self.history.upsert(record);
    }

    /// Manual edit path: drop one day's archived record
    pub fn delete_history(&mut self, date: NaiveDate) -> bool {
        self.history.delete(date)
    }

    fn tracker_mut(&mut self, id: TrackerId) -> Result<&mut Tracker, DomainError> {
        self.trackers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::TrackerNotFound(id.to_string()))
    }
}
