/// Tracker entity and related functionality
///
/// A tracker is a live, mutable counter with a daily goal. Counts accumulate
/// through the current day and are reset by the rollover engine at day
/// boundaries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a tracker
///
/// A wrapper around UUID so tracker ids cannot be confused with other
/// string-typed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackerId(pub Uuid);

impl TrackerId {
    /// Generate a new random tracker ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a tracker ID from a string (useful when loading persisted data)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for TrackerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrackerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named counter the user bumps through the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    /// Unique identifier, assigned at creation, immutable
    pub id: TrackerId,
    /// Display label
    pub name: String,
    /// Current-day progress; reset to 0 at each day boundary
    pub count: u32,
    /// Positive daily target
    pub daily_goal: u32,
    /// Display ordering only, not used by the engine
    pub sort_order: u32,
    /// Inactive trackers are kept but never count toward a perfect day
    pub is_active: bool,
}

impl Tracker {
    /// Create a new tracker with validation
    pub fn new(name: String, daily_goal: u32, sort_order: u32) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_goal(daily_goal)?;

        Ok(Self {
            id: TrackerId::new(),
            name,
            count: 0,
            daily_goal,
            sort_order,
            is_active: true,
        })
    }

    /// Create a tracker from existing data (used when loading persisted state)
    pub fn from_existing(
        id: TrackerId,
        name: String,
        count: u32,
        daily_goal: u32,
        sort_order: u32,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            name,
            count,
            daily_goal,
            sort_order,
            is_active,
        }
    }

    /// Bump the counter. Counts have no upper bound.
    pub fn increment(&mut self, by: u32) {
        self.count = self.count.saturating_add(by);
    }

    /// Lower the counter, clamped at zero.
    pub fn decrement(&mut self, by: u32) {
        self.count = self.count.saturating_sub(by);
    }

    /// Reset the counter for a new day
    pub fn reset_count(&mut self) {
        self.count = 0;
    }

    /// Whether today's count has reached the daily goal
    pub fn meets_goal(&self) -> bool {
        self.count >= self.daily_goal
    }

    /// Rename the tracker with validation
    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        Self::validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Change the daily goal with validation
    pub fn set_goal(&mut self, daily_goal: u32) -> Result<(), DomainError> {
        Self::validate_goal(daily_goal)?;
        self.daily_goal = daily_goal;
        Ok(())
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidName(
                "Tracker name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidName(
                "Tracker name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_goal(daily_goal: u32) -> Result<(), DomainError> {
        if daily_goal == 0 {
            return Err(DomainError::InvalidGoal(
                "Daily goal must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
