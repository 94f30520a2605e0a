use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::Connection;

use qada::db::{run_migrations, SnapshotRepo};
use qada::error::TrackerError;
use qada::models::{MakeupStrategy, NotificationStrategy, PrayerType, TimeRange, TimeUnit};
use qada::reports;
use qada::state::{Command, Outcome, Store};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Clock {
    today: NaiveDate,
}

impl Clock {
    fn run(&self, store: &mut Store, command: Command) -> Result<Outcome, TrackerError> {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        store.dispatch_at(command, self.today, now)
    }
}

fn add(prayer: PrayerType, amount: u32) -> Command {
    Command::AddMissed {
        prayer,
        amount,
        unit: TimeUnit::Days,
    }
}

fn plan(name: &str, prayers: &[PrayerType]) -> Command {
    Command::CreatePlan {
        name: name.to_string(),
        prayers: prayers.to_vec(),
        makeup_strategy: MakeupStrategy::AnyTime,
        notification_strategy: NotificationStrategy::None,
    }
}

fn created_id(outcome: Outcome) -> uuid::Uuid {
    match outcome {
        Outcome::PlanCreated { plan_id, .. } => plan_id,
        other => panic!("expected PlanCreated, got {:?}", other),
    }
}

#[test]
fn ledger_accumulates_then_clears() {
    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();

    clock.run(&mut store, add(PrayerType::Fajr, 5)).unwrap();
    clock.run(&mut store, add(PrayerType::Fajr, 3)).unwrap();
    assert_eq!(store.state().missed.count(PrayerType::Fajr), 8);
    assert_eq!(store.state().missed.records().len(), 1);

    let outcome = clock
        .run(
            &mut store,
            Command::MarkCompleted {
                prayer: PrayerType::Fajr,
                count: 10,
            },
        )
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Completed {
            prayer: PrayerType::Fajr,
            applied: 8,
            owed: 0
        }
    );
    assert!(store.state().missed.get(PrayerType::Fajr).is_none());
}

#[test]
fn weeks_expand_to_seven_prayers_each() {
    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();
    clock
        .run(
            &mut store,
            Command::AddMissed {
                prayer: PrayerType::Asr,
                amount: 2,
                unit: TimeUnit::Weeks,
            },
        )
        .unwrap();
    assert_eq!(store.state().missed.count(PrayerType::Asr), 14);
}

#[test]
fn plan_completion_clamps_to_target() {
    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();
    clock.run(&mut store, add(PrayerType::Fajr, 4)).unwrap();
    let id = created_id(clock.run(&mut store, plan("P1", &[PrayerType::Fajr])).unwrap());

    let complete = |count| Command::MarkCompletedInPlan {
        plan_id: id,
        prayer: PrayerType::Fajr,
        count,
    };
    clock.run(&mut store, complete(2)).unwrap();
    let outcome = clock.run(&mut store, complete(5)).unwrap();
    assert!(matches!(
        outcome,
        Outcome::PlanProgress {
            applied: 2,
            remaining: 0,
            satisfied: true,
            ..
        }
    ));

    let p = store.state().plans.get(id).unwrap();
    assert_eq!(p.completed_count, 4);
    assert_eq!(p.total_count, 4);
    assert!(p.target_prayers.is_empty());
    assert_eq!(p.completion_ratio(), 1.0);
    assert_eq!(reports::total_planned(store.state().plans.plans()), 4);

    // A paid-back prayer is reported differently from one never in the plan.
    assert!(matches!(
        clock.run(&mut store, complete(1)),
        Err(TrackerError::AlreadyMadeUp { .. })
    ));
    assert!(matches!(
        clock.run(
            &mut store,
            Command::MarkCompletedInPlan {
                plan_id: id,
                prayer: PrayerType::Isha,
                count: 1
            }
        ),
        Err(TrackerError::NotInPlan { .. })
    ));
}

#[test]
fn plan_snapshot_ignores_later_ledger_changes() {
    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();
    clock.run(&mut store, add(PrayerType::Maghrib, 3)).unwrap();
    let id = created_id(clock.run(&mut store, plan("M", &[PrayerType::Maghrib])).unwrap());

    clock.run(&mut store, add(PrayerType::Maghrib, 10)).unwrap();
    let p = store.state().plans.get(id).unwrap();
    assert_eq!(p.total_count, 3);
    assert_eq!(store.state().missed.count(PrayerType::Maghrib), 13);
}

#[test]
fn plan_requires_missed_prayers_for_selection() {
    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();
    assert_eq!(
        clock.run(&mut store, plan("Empty", &[PrayerType::Isha])),
        Err(TrackerError::NoMissedForSelection)
    );
    assert_eq!(
        clock.run(&mut store, plan("  ", &[PrayerType::Isha])),
        Err(TrackerError::EmptyPlanName)
    );
    assert!(store.state().plans.is_empty());
}

#[test]
fn deleting_active_plan_hands_over_to_first_remaining() {
    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();
    clock.run(&mut store, add(PrayerType::Fajr, 2)).unwrap();

    let a = created_id(clock.run(&mut store, plan("A", &[PrayerType::Fajr])).unwrap());
    let b = created_id(clock.run(&mut store, plan("B", &[PrayerType::Fajr])).unwrap());
    let c = created_id(clock.run(&mut store, plan("C", &[PrayerType::Fajr])).unwrap());
    assert_eq!(store.state().plans.active_plan_id(), Some(a));

    clock
        .run(&mut store, Command::SetActivePlan { plan_id: c })
        .unwrap();
    let outcome = clock
        .run(&mut store, Command::DeletePlan { plan_id: c })
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::PlanDeleted {
            plan_id: c,
            active: Some(a)
        }
    );

    clock.run(&mut store, Command::DeletePlan { plan_id: b }).unwrap();
    assert_eq!(store.state().plans.active_plan_id(), Some(a));

    clock.run(&mut store, Command::DeletePlan { plan_id: a }).unwrap();
    assert_eq!(store.state().plans.active_plan_id(), None);
}

#[test]
fn progress_merges_same_day_and_windows() {
    let mut store = Store::default();
    let monday = Clock { today: day(2026, 3, 9) };
    let tuesday = Clock { today: day(2026, 3, 10) };
    let record = |count| Command::RecordProgress {
        prayer: PrayerType::Isha,
        count,
    };

    monday.run(&mut store, record(3)).unwrap();
    monday.run(&mut store, record(4)).unwrap();
    tuesday.run(&mut store, record(1)).unwrap();

    let entries = store.state().progress.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(store.state().progress.count_on(day(2026, 3, 9), PrayerType::Isha), 7);

    let (daily, _) = reports::window(store.state(), TimeRange::Daily, tuesday.today);
    assert_eq!(reports::total_completed(&daily), 1);

    let (weekly, rows) = reports::window(store.state(), TimeRange::Weekly, tuesday.today);
    assert_eq!(reports::total_completed(&weekly), 8);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].date < rows[1].date);
}

#[test]
fn empty_log_has_zero_distribution() {
    let store = Store::default();
    let shares = reports::distribution(store.state().progress.entries());
    assert_eq!(shares.len(), 5);
    assert!(shares.iter().all(|s| s.count == 0 && s.percent == 0.0));
    assert_eq!(reports::summary(store.state()).most_made_up, PrayerType::Fajr);
}

#[test]
fn state_survives_a_save_and_reload() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();

    let clock = Clock { today: day(2026, 3, 10) };
    let mut store = Store::default();
    clock.run(&mut store, add(PrayerType::Dhuhr, 6)).unwrap();
    clock.run(&mut store, plan("Dhuhr", &[PrayerType::Dhuhr])).unwrap();
    clock
        .run(
            &mut store,
            Command::MakeUp {
                prayer: PrayerType::Dhuhr,
                count: 2,
            },
        )
        .unwrap();
    SnapshotRepo::save(&conn, store.state()).unwrap();

    let reloaded = SnapshotRepo::load(&conn).unwrap().unwrap();
    assert_eq!(&reloaded, store.state());
    assert_eq!(reloaded.missed.count(PrayerType::Dhuhr), 4);
    assert_eq!(
        reloaded.progress.count_on(clock.today, PrayerType::Dhuhr),
        2
    );
}
