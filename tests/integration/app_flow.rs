/// Application flow tests: persistence round-trips, day rollover, export
use momentum_tracker::{
    analytics, calendar, history_to_csv, keys, BlobStore, MomentumApp, SqliteStore,
    StreakSummary,
};
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_state_survives_reopen() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();

    {
        let mut app = MomentumApp::open(db_path.clone())
            .await
            .expect("Failed to open app");
        let id = app.add_tracker("Pushups", 50).await.unwrap();
        app.increment(id, 3).await.unwrap();
    }

    // Same day, fresh process: counts and goals must round-trip
    let app = MomentumApp::open(db_path).await.expect("Failed to reopen app");
    let tracker = app.state().find_by_name("Pushups").expect("tracker persisted");
    assert_eq!(tracker.count, 3);
    assert_eq!(tracker.daily_goal, 50);
}

#[tokio::test]
async fn test_day_rollover_archives_and_resets() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut app = MomentumApp::open(temp_file.path().to_path_buf())
        .await
        .expect("Failed to open app");

    let id = app.add_tracker("Pushups", 2).await.unwrap();
    app.increment(id, 2).await.unwrap();

    let today = calendar::today();
    let tomorrow = calendar::add_days(today, 1);

    assert!(app.reconcile(tomorrow).await.unwrap());

    // Live counter reset, yesterday archived as a perfect day
    assert_eq!(app.state().find_tracker(id).unwrap().count, 0);
    let record = app.state().history().find(today).expect("archived record");
    assert_eq!(record.total_volume, 2);
    assert!(record.is_perfect());

    // Second reconcile on the same (simulated) day is a no-op
    assert!(!app.reconcile(tomorrow).await.unwrap());

    // The archived perfect day feeds the streak for the new day
    let streaks = StreakSummary::compute(app.state().trackers(), app.state().history(), tomorrow);
    assert_eq!(streaks.current, 1);
}

#[tokio::test]
async fn test_rollover_feeds_momentum() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut app = MomentumApp::open(temp_file.path().to_path_buf())
        .await
        .expect("Failed to open app");

    let id = app.add_tracker("Pushups", 5).await.unwrap();
    app.increment(id, 10).await.unwrap();

    let today = calendar::today();
    let tomorrow = calendar::add_days(today, 1);
    app.reconcile(tomorrow).await.unwrap();
    app.increment(id, 5).await.unwrap();

    // Yesterday 10, "today" 5 -> -50%
    let momentum = analytics::momentum(app.state().trackers(), app.state().history(), tomorrow);
    assert_eq!(momentum, -50.0);
}

#[tokio::test]
async fn test_export_contains_archived_rows() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut app = MomentumApp::open(temp_file.path().to_path_buf())
        .await
        .expect("Failed to open app");

    let id = app.add_tracker("Read, write", 3).await.unwrap();
    app.increment(id, 4).await.unwrap();

    let today = calendar::today();
    app.reconcile(calendar::add_days(today, 1)).await.unwrap();

    let csv = history_to_csv(app.state().history());
    assert!(csv.starts_with("Date,Name,Count\n"));
    assert!(csv.contains(&format!(
        "{},\"Read, write\",4\n",
        calendar::format_key(today)
    )));
}

#[tokio::test]
async fn test_malformed_blobs_degrade_to_empty_state() {
    let store = SqliteStore::open_in_memory().expect("Failed to open store");
    store.save(keys::TRACKERS, "{definitely not json").await.unwrap();
    store.save(keys::HISTORY, "42").await.unwrap();
    store.save(keys::LAST_ACTIVE_DATE, "\"nonsense\"").await.unwrap();

    // Malformed data must load as the first-run empty state, not an error
    let app = MomentumApp::with_store(store).await.expect("open succeeds");
    assert!(app.state().trackers().is_empty());
    assert_eq!(app.state().last_active(), Some(calendar::today()));
}

#[tokio::test]
async fn test_reset_wipes_all_data() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();

    {
        let mut app = MomentumApp::open(db_path.clone()).await.unwrap();
        let id = app.add_tracker("Pushups", 5).await.unwrap();
        app.increment(id, 3).await.unwrap();
        app.reset().await.unwrap();
        assert!(app.state().trackers().is_empty());
    }

    let app = MomentumApp::open(db_path).await.unwrap();
    assert!(app.state().trackers().is_empty());
}

#[tokio::test]
async fn test_reminder_preference_round_trip() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let app = MomentumApp::open(temp_file.path().to_path_buf())
        .await
        .unwrap();

    let scheduler = momentum_tracker::LogScheduler;
    let time = chrono::NaiveTime::from_hms_opt(8, 30, 0).unwrap();

    app.set_reminder(Some(time), &scheduler).await.unwrap();
    assert_eq!(app.reminder_time().await.unwrap(), Some(time));

    app.set_reminder(None, &scheduler).await.unwrap();
    assert_eq!(app.reminder_time().await.unwrap(), None);
}

#[tokio::test]
async fn test_manual_history_edit_round_trip() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let mut app = MomentumApp::open(temp_file.path().to_path_buf())
        .await
        .unwrap();

    let date = calendar::add_days(calendar::today(), -3);
    let record = momentum_tracker::HistoryRecord::from_details(
        date,
        vec![momentum_tracker::TrackerSnapshot {
            tracker_name: "Pushups".to_string(),
            count: 5,
            goal: 5,
        }],
    );

    app.upsert_history(record).await.unwrap();
    assert_eq!(app.state().history().find(date).unwrap().total_volume, 5);

    assert!(app.delete_history(date).await.unwrap());
    assert!(app.state().history().find(date).is_none());
    assert!(!app.delete_history(date).await.unwrap());
}
