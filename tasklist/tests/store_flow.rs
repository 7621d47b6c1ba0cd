//! End-to-end flows through the store and the interactive session

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can unwrap/panic

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveDate, Utc};
use chrono_tz::America::New_York;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tasklist::{
    Command, DueZone, Filter, Outcome, Session, SessionError, Status, TodoAction,
    TodoEnvironment, TodoReducer, TodoState, TodoView,
};
use tasklist_core::environment::Clock;
use tasklist_runtime::Store;
use tasklist_testing::{SequentialIdGenerator, test_clock};
use tokio::sync::broadcast::error::RecvError;

// ============================================================================
// Test Fixtures
// ============================================================================

/// Clock that only moves when told to
struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    fn advance(&self, by: ChronoDuration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn utc() -> DueZone {
    DueZone::Fixed(FixedOffset::east_opt(0).unwrap())
}

fn at_utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
        .and_utc()
}

fn start() -> DateTime<Utc> {
    test_clock().now()
}

fn session_with(clock: Arc<dyn Clock>, zone: DueZone) -> Session {
    let env = TodoEnvironment::new(clock, Arc::new(SequentialIdGenerator::new()));
    Session::new(env, zone)
}

fn session() -> Session {
    session_with(Arc::new(test_clock()), utc())
}

async fn run(session: &Session, line: &str) -> Outcome {
    let command = Command::parse(line).unwrap().unwrap();
    session.execute(command).await.unwrap()
}

async fn rows(session: &Session) -> Vec<TodoView> {
    let now = start();
    session
        .store()
        .state(|state| tasklist::project(state, now))
        .await
}

fn texts(rows: &[TodoView]) -> Vec<&str> {
    rows.iter().map(|row| row.text.as_str()).collect()
}

// ============================================================================
// Store
// ============================================================================

#[tokio::test]
async fn store_hosts_the_reducer() {
    let env = TodoEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new()),
    );
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);

    store
        .send(TodoAction::SetInput {
            text: "Buy milk".to_string(),
        })
        .await
        .unwrap();
    let mut handle = store.send(TodoAction::AddOrSave).await.unwrap();
    handle.wait().await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.count(), 1);
    assert_eq!(state.items[0].text, "Buy milk");
    assert_eq!(state.items[0].status, Status::Pending);
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn add_toggle_and_clear() {
    let session = session();

    run(&session, "add Buy milk").await;
    run(&session, "add Walk dog").await;
    assert_eq!(texts(&rows(&session).await), ["Buy milk", "Walk dog"]);

    run(&session, "toggle 1").await;
    let current = rows(&session).await;
    assert_eq!(current[0].status, Status::Completed);
    assert_eq!(current[0].toggle_label(), "Undo");

    run(&session, "clear").await;
    assert_eq!(texts(&rows(&session).await), ["Walk dog"]);
}

#[tokio::test]
async fn blank_add_is_ignored() {
    let session = session();

    assert_eq!(run(&session, "add    ").await, Outcome::Render);

    assert!(rows(&session).await.is_empty());
}

#[tokio::test]
async fn edit_then_save_updates_in_place() {
    let session = session();
    run(&session, "add Buy milk").await;
    run(&session, "add Walk dog").await;

    run(&session, "edit 1").await;
    let screen = session.screen().await;
    assert!(screen.contains("> Buy milk  [Save]"));

    run(&session, "save Buy oat milk").await;

    assert_eq!(texts(&rows(&session).await), ["Buy oat milk", "Walk dog"]);
    assert!(session.screen().await.contains(">   [Add]"));
}

#[tokio::test]
async fn rows_follow_the_filtered_view() {
    let session = session();
    run(&session, "add first").await;
    run(&session, "add second").await;
    run(&session, "toggle 1").await;

    run(&session, "filter pending").await;
    // Row 1 of the pending view is "second"
    run(&session, "rm 1").await;

    run(&session, "filter all").await;
    assert_eq!(texts(&rows(&session).await), ["first"]);
}

#[tokio::test]
async fn unknown_row_is_an_error() {
    let session = session();
    run(&session, "add only").await;

    let error = session.execute(Command::Toggle(2)).await.unwrap_err();

    assert!(matches!(error, SessionError::NoSuchRow(2)));
    assert_eq!(rows(&session).await[0].status, Status::Pending);
}

#[tokio::test]
async fn due_dates_are_entered_in_local_time_and_sorted() {
    let plus_two = DueZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
    let session = session_with(Arc::new(test_clock()), plus_two);
    run(&session, "add later").await;
    run(&session, "add sooner").await;

    run(&session, "due 1 2025-01-02T12:00").await;
    run(&session, "due 2 2025-01-01T04:00").await;

    let current = rows(&session).await;
    assert_eq!(texts(&current), ["sooner", "later"]);
    // 04:00 at +02:00 is 02:00 UTC
    assert_eq!(current[0].due_date, Some(at_utc(2025, 1, 1, 2, 0)));
    assert!(session.screen().await.contains("Due: 2025-01-01 04:00"));

    // Clearing "sooner" pins it in place and "later" moves back in front
    run(&session, "due 1 -").await;
    let current = rows(&session).await;
    assert_eq!(texts(&current), ["later", "sooner"]);
    assert_eq!(current[1].due_date, None);
}

#[tokio::test]
async fn past_due_items_show_overdue_before_any_sweep() {
    let session = session();
    run(&session, "add late").await;
    run(&session, "due 1 2024-12-31T23:00").await;

    let current = rows(&session).await;
    assert_eq!(current[0].status, Status::Overdue);
    assert_eq!(current[0].stored_status, Status::Pending);

    run(&session, "sweep").await;
    assert_eq!(rows(&session).await[0].stored_status, Status::Overdue);

    // Toggling an overdue item makes it pending again; its display stays overdue
    run(&session, "toggle 1").await;
    let current = rows(&session).await;
    assert_eq!(current[0].stored_status, Status::Pending);
    assert_eq!(current[0].status, Status::Overdue);
}

#[tokio::test]
async fn clearing_the_deadline_of_a_swept_item_shows_pending() {
    let session = session();
    run(&session, "add late").await;
    run(&session, "due 1 2024-12-31T23:00").await;
    run(&session, "sweep").await;
    assert_eq!(rows(&session).await[0].stored_status, Status::Overdue);

    run(&session, "due 1 -").await;

    let current = rows(&session).await;
    assert_eq!(current[0].stored_status, Status::Overdue);
    assert_eq!(current[0].status, Status::Pending);
    assert!(session.screen().await.contains("late  (Status: Pending)"));
}

#[tokio::test]
async fn sweep_flags_completed_items_that_are_past_due() {
    let session = session();
    run(&session, "add filed late").await;
    run(&session, "due 1 2024-12-31T23:00").await;
    run(&session, "toggle 1").await;
    assert_eq!(rows(&session).await[0].status, Status::Completed);

    run(&session, "sweep").await;

    let current = rows(&session).await;
    assert_eq!(current[0].stored_status, Status::Overdue);
    assert_eq!(current[0].status, Status::Overdue);
}

#[tokio::test]
async fn due_dates_follow_daylight_saving_in_a_named_zone() {
    let session = session_with(Arc::new(test_clock()), DueZone::Named(New_York));
    run(&session, "add winter").await;
    run(&session, "add summer").await;

    run(&session, "due 1 2026-12-15T09:00").await;
    run(&session, "due 2 2026-07-15T09:00").await;

    let current = rows(&session).await;
    assert_eq!(texts(&current), ["summer", "winter"]);
    // EDT is UTC-4, EST is UTC-5
    assert_eq!(current[0].due_date, Some(at_utc(2026, 7, 15, 13, 0)));
    assert_eq!(current[1].due_date, Some(at_utc(2026, 12, 15, 14, 0)));
    let screen = session.screen().await;
    assert!(screen.contains("Due: 2026-07-15 09:00"));
    assert!(screen.contains("Due: 2026-12-15 09:00"));

    // 02:30 is skipped when New York springs forward
    let skipped = Command::parse("due 1 2026-03-08T02:30").unwrap().unwrap();
    let error = session.execute(skipped).await.unwrap_err();
    assert!(matches!(error, SessionError::InvalidLocalTime(_)));
    assert_eq!(
        rows(&session).await[0].due_date,
        Some(at_utc(2026, 7, 15, 13, 0))
    );
}

#[tokio::test]
async fn json_help_and_quit() {
    let session = session();
    run(&session, "add Buy milk").await;

    let Outcome::Print(json) = run(&session, "json").await else {
        panic!("json should print");
    };
    assert!(json.contains("\"text\": \"Buy milk\""));
    assert!(json.contains("\"status\": \"Pending\""));

    assert_eq!(
        run(&session, "help").await,
        Outcome::Print(Command::HELP.to_string())
    );
    assert_eq!(run(&session, "quit").await, Outcome::Quit);
}

#[tokio::test]
async fn filter_is_remembered_across_commands() {
    let session = session();
    run(&session, "add a").await;
    run(&session, "filter completed").await;

    assert!(rows(&session).await.is_empty());
    let state_filter = session.store().state(|state| state.filter).await;
    assert_eq!(state_filter, Filter::Completed);
}

#[tokio::test]
async fn mount_flags_items_that_are_already_late() {
    let clock = Arc::new(ManualClock::new(start()));
    let session = session_with(clock.clone(), utc());
    run(&session, "add report").await;
    run(&session, "due 1 2025-01-01T01:00").await;

    clock.advance(ChronoDuration::hours(2));
    session.mount().await.unwrap();

    let stored = session.store().state(|state| state.items[0].status).await;
    assert_eq!(stored, Status::Overdue);
}

#[tokio::test]
async fn periodic_sweep_picks_up_new_deadlines() {
    let clock = Arc::new(ManualClock::new(start()));
    let env = TodoEnvironment::new(clock.clone(), Arc::new(SequentialIdGenerator::new()))
        .with_sweep_interval(Some(Duration::from_millis(10)));
    let session = Session::new(env, utc());
    let mut fed_back = session.store().subscribe_actions();
    session.mount().await.unwrap();

    run(&session, "add report").await;
    run(&session, "due 1 2025-01-01T01:00").await;
    clock.advance(ChronoDuration::hours(2));

    // Each tick is published after it is reduced, so the state already shows it
    let flagged = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            match fed_back.recv().await {
                Ok(action) => assert_eq!(action, TodoAction::SweepTick),
                Err(RecvError::Lagged(_)) => {},
                Err(RecvError::Closed) => panic!("store dropped its broadcast"),
            }
            let status = session.store().state(|state| state.items[0].status).await;
            if status == Status::Overdue {
                break;
            }
        }
    })
    .await;
    assert!(flagged.is_ok(), "periodic sweep never ran");

    // The sleeping tick is dropped rather than waited for
    session.shutdown(Duration::from_secs(1)).await.unwrap();
    assert!(session.store().is_shutting_down());
    assert!(session.execute(Command::Sweep).await.is_err());
}
