/// Progress ledger engine: rollover, streaks and analytics
///
/// All three components are pure, synchronous computations over borrowed
/// state. They never touch the clock themselves; callers pass today's date in
/// from the calendar utility.

pub mod analytics;
pub mod rollover;
pub mod streak;

pub use analytics::EffortShare;
pub use rollover::{reconcile, Reconciliation};
pub use streak::StreakSummary;
