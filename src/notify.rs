/// Daily reminder collaborator
///
/// Scheduling is owned by the surrounding platform; the engine never calls
/// this. Settings logic cancels any existing schedule before installing a new
/// one so a changed time never leaves a duplicate behind.

use chrono::NaiveTime;

pub trait ReminderScheduler {
    /// Schedule a repeating daily reminder at the given local time
    fn schedule_daily(&self, time: NaiveTime);

    /// Cancel every scheduled reminder
    fn cancel_all(&self);
}

/// Scheduler that only records requests in the log. Stands in where no
/// platform notification service is attached, such as the CLI.
#[derive(Debug, Default)]
pub struct LogScheduler;

impl ReminderScheduler for LogScheduler {
    fn schedule_daily(&self, time: NaiveTime) {
        tracing::info!("Daily reminder scheduled for {}", time.format("%H:%M"));
    }

    fn cancel_all(&self) {
        tracing::info!("All scheduled reminders cancelled");
    }
}
