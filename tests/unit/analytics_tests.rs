/// Analytics calculator: worked examples and sentinel results
use chrono::NaiveDate;
use momentum_tracker::{
    analytics, calendar, HistoryLog, HistoryRecord, Tracker, TrackerId, TrackerSnapshot,
};

fn day(key: &str) -> NaiveDate {
    calendar::parse_key(key).unwrap()
}

fn tracker(name: &str, count: u32) -> Tracker {
    Tracker::from_existing(TrackerId::new(), name.to_string(), count, 5, 0, true)
}

fn volume_record(key: &str, total: u64) -> HistoryRecord {
    HistoryRecord::from_details(
        day(key),
        vec![TrackerSnapshot {
            tracker_name: "Pushups".to_string(),
            count: total as u32,
            goal: 5,
        }],
    )
}

#[test]
fn test_rolling_volume_counts_only_window_days() {
    // window 7, today volume 2, one record 3 days ago (inside) with 10,
    // one record 10 days ago (outside) with 100 -> 12
    let today = day("2024-01-15");
    let trackers = vec![tracker("A", 2)];

    let mut history = HistoryLog::new();
    history.upsert(volume_record("2024-01-12", 10));
    history.upsert(volume_record("2024-01-05", 100));

    assert_eq!(analytics::rolling_volume(&trackers, &history, 7, today), 12);
}

#[test]
fn test_rolling_window_edges() {
    let today = day("2024-01-15");
    let trackers = vec![tracker("A", 0)];

    let mut history = HistoryLog::new();
    history.upsert(volume_record("2024-01-09", 1)); // oldest day inside a 7-day window
    history.upsert(volume_record("2024-01-08", 100)); // one day too old

    assert_eq!(analytics::rolling_volume(&trackers, &history, 7, today), 1);
}

#[test]
fn test_named_windows_agree_with_rolling_volume() {
    let today = day("2024-01-31");
    let trackers = vec![tracker("A", 3)];
    let mut history = HistoryLog::new();
    history.upsert(volume_record("2024-01-20", 10));

    assert_eq!(
        analytics::seven_day_volume(&trackers, &history, today),
        analytics::rolling_volume(&trackers, &history, 7, today)
    );
    assert_eq!(
        analytics::fourteen_day_volume(&trackers, &history, today),
        analytics::rolling_volume(&trackers, &history, 14, today)
    );
    assert_eq!(
        analytics::thirty_day_volume(&trackers, &history, today),
        analytics::rolling_volume(&trackers, &history, 30, today)
    );
}

#[test]
fn test_momentum_against_zero_and_nonzero_yesterday() {
    let today = day("2024-01-02");

    // Yesterday 0, today 4 -> 100
    let fresh = vec![tracker("A", 4)];
    assert_eq!(analytics::momentum(&fresh, &HistoryLog::new(), today), 100.0);

    // Yesterday 10, today 5 -> -50
    let mut history = HistoryLog::new();
    history.upsert(volume_record("2024-01-01", 10));
    let halved = vec![tracker("A", 5)];
    assert_eq!(analytics::momentum(&halved, &history, today), -50.0);
}

#[test]
fn test_momentum_both_days_idle() {
    let today = day("2024-01-02");
    let idle: Vec<Tracker> = Vec::new();
    assert_eq!(analytics::momentum(&idle, &HistoryLog::new(), today), 0.0);
}

#[test]
fn test_momentum_can_exceed_one_hundred() {
    let today = day("2024-01-02");
    let mut history = HistoryLog::new();
    history.upsert(volume_record("2024-01-01", 4));

    let surge = vec![tracker("A", 12)];
    assert_eq!(analytics::momentum(&surge, &history, today), 200.0);
}

#[test]
fn test_effort_split_shares_of_total() {
    // [{count:3},{count:1}] with total 4 -> [{75},{25}] in that order
    let trackers = vec![tracker("A", 3), tracker("B", 1)];
    let split = analytics::effort_split(&trackers);

    assert_eq!(split.len(), 2);
    assert_eq!(split[0].name, "A");
    assert_eq!(split[0].percentage, 75);
    assert_eq!(split[1].name, "B");
    assert_eq!(split[1].percentage, 25);
}

#[test]
fn test_effort_split_is_empty_for_idle_day() {
    let trackers = vec![tracker("A", 0), tracker("B", 0)];
    assert!(analytics::effort_split(&trackers).is_empty());
    assert!(analytics::effort_split(&[]).is_empty());
}

#[test]
fn test_effort_split_stable_on_ties() {
    let trackers = vec![
        tracker("First", 2),
        tracker("Second", 2),
        tracker("Third", 4),
    ];
    let split = analytics::effort_split(&trackers);

    assert_eq!(split[0].name, "Third");
    assert_eq!(split[1].name, "First");
    assert_eq!(split[2].name, "Second");
}

#[test]
fn test_zero_count_trackers_still_listed_when_day_has_volume() {
    let trackers = vec![tracker("A", 4), tracker("B", 0)];
    let split = analytics::effort_split(&trackers);

    assert_eq!(split.len(), 2);
    assert_eq!(split[1].name, "B");
    assert_eq!(split[1].percentage, 0);
}
