/// History ledger: immutable per-day snapshots of tracker progress
///
/// Each archived day is a HistoryRecord keyed by its calendar date. Snapshot
/// details copy the tracker name and goal by value, so renaming or deleting a
/// tracker later never rewrites history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Tracker;

/// Point-in-time copy of one tracker inside an archived day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub tracker_name: String,
    pub count: u32,
    pub goal: u32,
}

impl TrackerSnapshot {
    /// Snapshot a live tracker by value
    pub fn of(tracker: &Tracker) -> Self {
        Self {
            tracker_name: tracker.name.clone(),
            count: tracker.count,
            goal: tracker.daily_goal,
        }
    }

    pub fn meets_goal(&self) -> bool {
        self.count >= self.goal
    }
}

/// An archived calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Calendar day, unique within the log
    pub date: NaiveDate,
    /// Sum of all tracker counts recorded for that day
    pub total_volume: u64,
    /// One snapshot per tracker that existed at archival time
    pub details: Vec<TrackerSnapshot>,
}

impl HistoryRecord {
    /// Snapshot the full live tracker set for a day.
    ///
    /// Captures every tracker, active or not; activity only matters for
    /// perfect-day evaluation.
    pub fn capture(date: NaiveDate, trackers: &[Tracker]) -> Self {
        let total_volume = trackers.iter().map(|t| u64::from(t.count)).sum();
        let details = trackers.iter().map(TrackerSnapshot::of).collect();

        Self {
            date,
            total_volume,
            details,
        }
    }

    /// Build a record from already-edited details, recomputing the volume.
    /// This is the manual edit path; the rollover engine uses `capture`.
    pub fn from_details(date: NaiveDate, details: Vec<TrackerSnapshot>) -> Self {
        let total_volume = details.iter().map(|d| u64::from(d.count)).sum();
        Self {
            date,
            total_volume,
            details,
        }
    }

    /// A day is perfect when it has at least one snapshot and every snapshot
    /// met its goal. An empty day is never perfect.
    pub fn is_perfect(&self) -> bool {
        !self.details.is_empty() && self.details.iter().all(TrackerSnapshot::meets_goal)
    }
}

/// The ordered collection of archived days
///
/// Insertion order carries no meaning; consumers sort by date as needed.
/// Date uniqueness is enforced by upsert semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record for the same date
    pub fn upsert(&mut self, record: HistoryRecord) {
        match self.records.iter_mut().find(|r| r.date == record.date) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Remove the record for a date. Returns whether one existed.
    pub fn delete(&mut self, date: NaiveDate) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.date != date);
        self.records.len() != before
    }

    pub fn find(&self, date: NaiveDate) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Records in ascending date order
    pub fn sorted(&self) -> Vec<&HistoryRecord> {
        let mut sorted: Vec<&HistoryRecord> = self.records.iter().collect();
        sorted.sort_by_key(|r| r.date);
        sorted
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
