/// Public library interface for the Momentum tracker
///
/// This module exports the progress ledger engine (rollover, streaks,
/// analytics), the state container, and the MomentumApp facade that ties the
/// state to the persistent blob store.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

// Internal modules
mod domain;
mod engine;
mod export;
mod notify;
mod state;
mod storage;

// Re-export public modules and types
pub use domain::calendar;
pub use domain::{DomainError, HistoryLog, HistoryRecord, Tracker, TrackerId, TrackerSnapshot};
pub use engine::streak::today_is_perfect;
pub use engine::{analytics, reconcile, EffortShare, Reconciliation, StreakSummary};
pub use export::history_to_csv;
pub use notify::{LogScheduler, ReminderScheduler};
pub use state::TrackerState;
pub use storage::{keys, load_json_or_default, save_json, BlobStore, SqliteStore, StorageError};

/// Errors that can occur at the application boundary
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application facade owning the persisted state
///
/// Loads tracker state from the blob store on open (leniently, so malformed
/// blobs degrade to empty collections), reconciles the day boundary, and
/// writes back after every mutation. Callers are expected to serialize
/// mutations; the upsert-by-date archival makes an accidental double
/// reconciliation overwrite rather than duplicate.
pub struct MomentumApp {
    store: SqliteStore,
    state: TrackerState,
}

impl MomentumApp {
    /// Open the app against a database path and roll the day over if needed
    pub async fn open(db_path: PathBuf) -> Result<Self, AppError> {
        tracing::info!("Opening tracker database: {:?}", db_path);
        let store = SqliteStore::open(db_path)?;
        Self::with_store(store).await
    }

    /// Open the app over an existing store (useful for tests)
    pub async fn with_store(store: SqliteStore) -> Result<Self, AppError> {
        let trackers: Vec<Tracker> =
            storage::load_json_or_default(&store, keys::TRACKERS).await?;
        let history: HistoryLog = storage::load_json_or_default(&store, keys::HISTORY).await?;
        let last_active: Option<NaiveDate> =
            storage::load_json_or_default(&store, keys::LAST_ACTIVE_DATE).await?;

        let state = TrackerState::from_parts(trackers, history, last_active);
        let mut app = Self { store, state };

        app.reconcile(calendar::today()).await?;
        Ok(app)
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Apply the rollover engine for the given day and persist on change.
    /// Returns whether a day boundary was crossed.
    pub async fn reconcile(&mut self, today: NaiveDate) -> Result<bool, AppError> {
        if !self.state.reconcile_day(today) {
            return Ok(false);
        }
        self.persist_all().await?;
        Ok(true)
    }

    pub async fn add_tracker(&mut self, name: &str, daily_goal: u32) -> Result<TrackerId, AppError> {
        let id = self.state.add_tracker(name, daily_goal)?;
        self.persist_trackers().await?;
        Ok(id)
    }

    pub async fn increment(&mut self, id: TrackerId, by: u32) -> Result<u32, AppError> {
        let count = self.state.increment(id, by)?;
        self.persist_trackers().await?;
        Ok(count)
    }

    pub async fn decrement(&mut self, id: TrackerId, by: u32) -> Result<u32, AppError> {
        let count = self.state.decrement(id, by)?;
        self.persist_trackers().await?;
        Ok(count)
    }

    pub async fn rename_tracker(&mut self, id: TrackerId, name: &str) -> Result<(), AppError> {
        self.state.rename_tracker(id, name)?;
        self.persist_trackers().await?;
        Ok(())
    }

    pub async fn set_goal(&mut self, id: TrackerId, daily_goal: u32) -> Result<(), AppError> {
        self.state.set_goal(id, daily_goal)?;
        self.persist_trackers().await?;
        Ok(())
    }

    pub async fn set_active(&mut self, id: TrackerId, is_active: bool) -> Result<(), AppError> {
        self.state.set_active(id, is_active)?;
        self.persist_trackers().await?;
        Ok(())
    }

    pub async fn delete_tracker(&mut self, id: TrackerId) -> Result<(), AppError> {
        self.state.delete_tracker(id)?;
        self.persist_trackers().await?;
        Ok(())
    }

    /// Manual edit path: insert or replace one day's archived record
    pub async fn upsert_history(&mut self, record: HistoryRecord) -> Result<(), AppError> {
        self.state.upsert_history(record);
        self.persist_history().await?;
        Ok(())
    }

    /// Manual edit path: drop one day's archived record
    pub async fn delete_history(&mut self, date: NaiveDate) -> Result<bool, AppError> {
        let removed = self.state.delete_history(date);
        if removed {
            self.persist_history().await?;
        }
        Ok(removed)
    }

    /// Install or clear the daily reminder preference
    pub async fn set_reminder(
        &self,
        time: Option<NaiveTime>,
        scheduler: &dyn ReminderScheduler,
    ) -> Result<(), AppError> {
        scheduler.cancel_all();
        match time {
            Some(time) => {
                scheduler.schedule_daily(time);
                storage::save_json(&self.store, keys::REMINDER_TIME, &time).await?;
            }
            None => {
                self.store.delete(keys::REMINDER_TIME).await?;
            }
        }
        Ok(())
    }

    /// The stored reminder preference, if any
    pub async fn reminder_time(&self) -> Result<Option<NaiveTime>, AppError> {
        let time: Option<NaiveTime> =
            storage::load_json_or_default(&self.store, keys::REMINDER_TIME).await?;
        Ok(time)
    }

    /// Wipe every persisted blob and reset the in-memory state
    pub async fn reset(&mut self) -> Result<(), AppError> {
        self.store.clear().await?;
        self.state = TrackerState::new();
        Ok(())
    }

    async fn persist_trackers(&self) -> Result<(), AppError> {
        storage::save_json(&self.store, keys::TRACKERS, &self.state.trackers()).await?;
        Ok(())
    }

    async fn persist_history(&self) -> Result<(), AppError> {
        storage::save_json(&self.store, keys::HISTORY, self.state.history()).await?;
        Ok(())
    }

    async fn persist_all(&self) -> Result<(), AppError> {
        self.persist_trackers().await?;
        self.persist_history().await?;
        storage::save_json(&self.store, keys::LAST_ACTIVE_DATE, &self.state.last_active())
            .await?;
        Ok(())
    }
}
