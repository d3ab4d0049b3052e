/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Tracker, HistoryRecord, HistoryLog)
/// and the calendar-key utilities, along with their validation rules.

pub mod calendar;
pub mod history;
pub mod tracker;

// Re-export public types for easy access
pub use history::*;
pub use tracker::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid tracker name: {0}")]
    InvalidName(String),

    #[error("Invalid daily goal: {0}")]
    InvalidGoal(String),

    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    #[error("Tracker not found: {0}")]
    TrackerNotFound(String),
}
