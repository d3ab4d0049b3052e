/// Command handlers for the Momentum tracker CLI
///
/// Each handler runs against an already-opened MomentumApp, so the day
/// boundary has been reconciled before any command executes. Output goes to
/// stdout; logs go to stderr.

use std::error::Error;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;

use momentum_tracker::{
    analytics, calendar, history_to_csv, today_is_perfect, HistoryRecord, LogScheduler,
    MomentumApp, StreakSummary, TrackerId, TrackerSnapshot,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new tracker with a daily goal
    Add {
        name: String,
        /// Daily target count (must be at least 1)
        goal: u32,
    },
    /// List trackers with today's progress
    List,
    /// Increment a tracker's count
    Inc {
        name: String,
        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Decrement a tracker's count (never below zero)
    Dec {
        name: String,
        #[arg(long, default_value_t = 1)]
        by: u32,
    },
    /// Pause a tracker so it stops counting toward perfect days
    Pause { name: String },
    /// Resume a paused tracker
    Resume { name: String },
    /// Change a tracker's daily goal
    Goal { name: String, goal: u32 },
    /// Rename a tracker (archived snapshots keep the old name)
    Rename { name: String, new_name: String },
    /// Delete a tracker (history snapshots are kept)
    Remove { name: String },
    /// Show today's progress and streaks
    Status,
    /// Show volume, momentum and effort-split analytics
    Stats {
        /// Rolling window in days
        #[arg(long, default_value_t = 7)]
        window: u32,
    },
    /// Show archived history records
    History {
        /// Only show the most recent N days
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Manually edit one day's archived record
    EditHistory {
        /// Day to edit (YYYY-MM-DD)
        date: String,
        #[command(subcommand)]
        action: EditHistoryAction,
    },
    /// Export the full history as CSV
    Export {
        /// Output file (defaults to MomentumData.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set or clear the daily reminder time
    Reminder {
        /// Reminder time as HH:MM
        time: Option<String>,
        /// Clear the reminder
        #[arg(long)]
        off: bool,
    },
    /// Delete ALL trackers and history
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum EditHistoryAction {
    /// Insert or update one tracker's snapshot for that day
    Set {
        name: String,
        count: u32,
        /// Goal to record; defaults to the snapshot's or tracker's goal
        #[arg(long)]
        goal: Option<u32>,
    },
    /// Remove the day's record entirely
    Clear,
}

pub async fn run(app: &mut MomentumApp, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add { name, goal } => {
            app.add_tracker(&name, goal).await?;
            println!("Added tracker \"{}\" with daily goal {}", name.trim(), goal);
        }
        Command::List => list(app),
        Command::Inc { name, by } => {
            let id = resolve(app, &name)?;
            let count = app.increment(id, by).await?;
            report_count(app, id, count);
        }
        Command::Dec { name, by } => {
            let id = resolve(app, &name)?;
            let count = app.decrement(id, by).await?;
            report_count(app, id, count);
        }
        Command::Pause { name } => {
            let id = resolve(app, &name)?;
            app.set_active(id, false).await?;
            println!("Paused \"{}\"", name);
        }
        Command::Resume { name } => {
            let id = resolve(app, &name)?;
            app.set_active(id, true).await?;
            println!("Resumed \"{}\"", name);
        }
        Command::Goal { name, goal } => {
            let id = resolve(app, &name)?;
            app.set_goal(id, goal).await?;
            println!("Daily goal for \"{}\" is now {}", name, goal);
        }
        Command::Rename { name, new_name } => {
            let id = resolve(app, &name)?;
            app.rename_tracker(id, &new_name).await?;
            println!("Renamed \"{}\" to \"{}\"", name, new_name.trim());
        }
        Command::Remove { name } => {
            let id = resolve(app, &name)?;
            app.delete_tracker(id).await?;
            println!("Removed \"{}\"", name);
        }
        Command::Status => status(app),
        Command::Stats { window } => stats(app, window),
        Command::History { limit } => history(app, limit),
        Command::EditHistory { date, action } => edit_history(app, &date, action).await?,
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from("MomentumData.csv"));
            let csv = history_to_csv(app.state().history());
            std::fs::write(&path, &csv)?;
            println!(
                "Exported {} history records to {}",
                app.state().history().len(),
                path.display()
            );
        }
        Command::Reminder { time, off } => reminder(app, time, off).await?,
        Command::Reset { yes } => {
            if !yes {
                println!("This deletes ALL trackers and history. Re-run with --yes to confirm.");
            } else {
                app.reset().await?;
                println!("All data cleared.");
            }
        }
    }

    Ok(())
}

fn resolve(app: &MomentumApp, name: &str) -> Result<TrackerId, Box<dyn Error>> {
    app.state()
        .find_by_name(name)
        .map(|t| t.id)
        .ok_or_else(|| format!("No tracker named \"{}\"", name).into())
}

fn report_count(app: &MomentumApp, id: TrackerId, count: u32) {
    if let Some(tracker) = app.state().find_tracker(id) {
        let goal_mark = if tracker.meets_goal() { " ✓" } else { "" };
        println!(
            "{}: {}/{}{}",
            tracker.name, count, tracker.daily_goal, goal_mark
        );
    }
}

fn list(app: &MomentumApp) {
    let mut trackers: Vec<_> = app.state().trackers().iter().collect();
    if trackers.is_empty() {
        println!("No trackers yet. Create one with `add <name> <goal>`.");
        return;
    }

    trackers.sort_by_key(|t| t.sort_order);
    for tracker in trackers {
        let state_mark = if !tracker.is_active {
            " (paused)"
        } else if tracker.meets_goal() {
            " ✓"
        } else {
            ""
        };
        println!(
            "🎯 {}: {}/{}{}",
            tracker.name, tracker.count, tracker.daily_goal, state_mark
        );
    }
}

fn status(app: &MomentumApp) {
    let state = app.state();
    let today = calendar::today();
    let streaks = StreakSummary::compute(state.trackers(), state.history(), today);

    list(app);
    println!();
    if today_is_perfect(state.trackers()) {
        println!("Today is perfect: every active goal met!");
    }
    println!(
        "🔥 Current streak: {} days | Best: {} days",
        streaks.current, streaks.best
    );
}

fn stats(app: &MomentumApp, window: u32) {
    let state = app.state();
    let today = calendar::today();
    let trackers = state.trackers();
    let history = state.history();

    println!("📊 Today's volume: {}", analytics::today_volume(trackers));
    println!(
        "📊 {}-day volume: {}",
        window,
        analytics::rolling_volume(trackers, history, window, today)
    );
    println!(
        "📊 Momentum vs yesterday: {:+.0}%",
        analytics::momentum(trackers, history, today)
    );

    let split = analytics::effort_split(trackers);
    if split.is_empty() {
        println!("No effort logged today yet.");
    } else {
        println!("Effort split:");
        for share in split {
            println!("   {:>3}% {} ({})", share.percentage, share.name, share.count);
        }
    }
}

fn history(app: &MomentumApp, limit: Option<usize>) {
    let sorted = app.state().history().sorted();
    if sorted.is_empty() {
        println!("No archived days yet.");
        return;
    }

    let start = limit.map(|n| sorted.len().saturating_sub(n)).unwrap_or(0);
    for record in &sorted[start..] {
        let perfect_mark = if record.is_perfect() { " ✓" } else { "" };
        println!(
            "{}  total {}{}",
            calendar::format_key(record.date),
            record.total_volume,
            perfect_mark
        );
        for detail in &record.details {
            println!("   {}: {}/{}", detail.tracker_name, detail.count, detail.goal);
        }
    }
}

async fn edit_history(
    app: &mut MomentumApp,
    date: &str,
    action: EditHistoryAction,
) -> Result<(), Box<dyn Error>> {
    let date: NaiveDate = calendar::parse_key(date)?;

    match action {
        EditHistoryAction::Set { name, count, goal } => {
            let mut details: Vec<TrackerSnapshot> = app
                .state()
                .history()
                .find(date)
                .map(|r| r.details.clone())
                .unwrap_or_default();

            match details.iter_mut().find(|d| d.tracker_name == name) {
                Some(detail) => {
                    detail.count = count;
                    if let Some(goal) = goal {
                        detail.goal = goal;
                    }
                }
                None => {
                    // New snapshot: take the goal from the flag or the live
                    // tracker of the same name.
                    let goal = goal
                        .or_else(|| app.state().find_by_name(&name).map(|t| t.daily_goal))
                        .ok_or_else(|| {
                            format!(
                                "No tracker named \"{}\"; pass --goal to record one anyway",
                                name
                            )
                        })?;
                    details.push(TrackerSnapshot {
                        tracker_name: name,
                        count,
                        goal,
                    });
                }
            }

            let record = HistoryRecord::from_details(date, details);
            app.upsert_history(record).await?;
            println!("Updated record for {}", calendar::format_key(date));
        }
        EditHistoryAction::Clear => {
            if app.delete_history(date).await? {
                println!("Removed record for {}", calendar::format_key(date));
            } else {
                println!("No record for {}", calendar::format_key(date));
            }
        }
    }

    Ok(())
}

async fn reminder(
    app: &MomentumApp,
    time: Option<String>,
    off: bool,
) -> Result<(), Box<dyn Error>> {
    let scheduler = LogScheduler;

    if off {
        app.set_reminder(None, &scheduler).await?;
        println!("Daily reminder cleared.");
        return Ok(());
    }

    match time {
        Some(raw) => {
            let time = NaiveTime::parse_from_str(&raw, "%H:%M")
                .map_err(|_| format!("Invalid time \"{}\"; expected HH:MM", raw))?;
            app.set_reminder(Some(time), &scheduler).await?;
            println!("Daily reminder set for {}", time.format("%H:%M"));
        }
        None => match app.reminder_time().await? {
            Some(time) => println!("Daily reminder set for {}", time.format("%H:%M")),
            None => println!("No daily reminder configured."),
        },
    }

    Ok(())
}
