use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::Connection;
use std::str::FromStr;

use crate::cli::args::{MissedCommands, PlanCommands};
use crate::config::AppConfig;
use crate::db::repository::SnapshotRepo;
use crate::error::TrackerError;
use crate::models::{
    parse_prayer_list, MakeupStrategy, NotificationStrategy, PrayerType, TimeRange, TimeUnit,
};
use crate::reports;
use crate::state::{Command, Outcome, Store};
use crate::utils::format::{
    days_to_clear, format_percent, pad_display, percent_bar, progress_bar, short_id,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Store plumbing ──────────────────────────────────────────────────────────

fn load_store(conn: &Connection) -> Result<Store> {
    Ok(Store::new(SnapshotRepo::load_or_default(conn)?))
}

/// Save after a successful command; print advisories instead of failing.
fn commit(
    conn: &Connection,
    store: &Store,
    result: Result<Outcome, TrackerError>,
) -> Result<Option<Outcome>> {
    match result {
        Ok(outcome) => {
            SnapshotRepo::save(conn, store.state())?;
            Ok(Some(outcome))
        }
        Err(advisory) => {
            print_advisory(&advisory);
            Ok(None)
        }
    }
}

fn print_advisory(advisory: &TrackerError) {
    println_colored!(RED, "  ✗ {}", advisory);
}

fn parse_prayer(s: &str) -> Result<PrayerType> {
    PrayerType::from_str(s)
        .map_err(|_| anyhow!("Unknown prayer '{}'. Use: fajr, dhuhr, asr, maghrib, isha", s))
}

// ─── Missed ──────────────────────────────────────────────────────────────────

pub fn handle_missed(conn: &Connection, config: &AppConfig, action: &MissedCommands) -> Result<()> {
    let mut store = load_store(conn)?;

    match action {
        MissedCommands::Add {
            prayer,
            amount,
            unit,
        } => {
            let prayer = parse_prayer(prayer)?;
            let unit = match unit {
                Some(u) => TimeUnit::from_str(u)?,
                None => config.tracker.default_time_unit,
            };
            let result = store.dispatch(Command::AddMissed {
                prayer,
                amount: *amount,
                unit,
            });
            if let Some(Outcome::MissedAdded { added, owed, .. }) = commit(conn, &store, result)? {
                println_colored!(
                    AMBER,
                    "  Added {} missed {} prayers ({} {}), {} owed",
                    added,
                    prayer,
                    amount,
                    unit.as_str(),
                    owed
                );
            }
        }
        MissedCommands::Complete { prayer, count } => {
            let prayer = parse_prayer(prayer)?;
            let count = count.unwrap_or(config.tracker.default_complete_count);
            let result = store.dispatch(Command::MakeUp { prayer, count });
            if let Some(Outcome::MadeUp { applied, owed, .. }) = commit(conn, &store, result)? {
                println_colored!(
                    GREEN,
                    "  ✓ Marked {} {} prayers as completed",
                    applied,
                    prayer
                );
                if owed == 0 {
                    println_colored!(GREEN, "  ✓ No {} prayers left to make up", prayer);
                } else {
                    println_colored!(DIM, "  {} {} still owed", owed, prayer);
                }
            }
        }
        MissedCommands::List => print_ledger(&store),
    }
    Ok(())
}

fn print_ledger(store: &Store) {
    let ledger = &store.state().missed;
    println!();
    if ledger.is_empty() {
        println_colored!(GREEN, "  ✓ No missed prayers recorded");
        println!();
        return;
    }
    println_colored!(GOLD, "  Missed Prayers");
    println!();
    for prayer in PrayerType::ALL {
        let count = ledger.count(prayer);
        if count > 0 {
            println!("  {:<10}  {:>6}", prayer.display_name(), count);
        }
    }
    println_colored!(BOLD, "  {:<10}  {:>6}", "Total", ledger.total());
    println!();
    println_colored!(
        DIM,
        "  At 1 per prayer time: ~{} days to clear",
        days_to_clear(ledger.total(), 5)
    );
    println!();
}

// ─── Plans ───────────────────────────────────────────────────────────────────

pub fn handle_plan(conn: &Connection, config: &AppConfig, action: &PlanCommands) -> Result<()> {
    let mut store = load_store(conn)?;

    match action {
        PlanCommands::Create {
            name,
            prayers,
            strategy,
            notify,
        } => {
            let prayers = parse_prayer_list(prayers)?;
            let makeup_strategy = match strategy {
                Some(s) => MakeupStrategy::from_str(s)?,
                None => config.plans.default_makeup_strategy,
            };
            let notification_strategy = match notify {
                Some(s) => NotificationStrategy::from_str(s)?,
                None => config.plans.default_notification_strategy,
            };
            let result = store.dispatch(Command::CreatePlan {
                name: name.clone(),
                prayers,
                makeup_strategy,
                notification_strategy,
            });
            if let Some(Outcome::PlanCreated {
                plan_id,
                total,
                active,
            }) = commit(conn, &store, result)?
            {
                println_colored!(
                    GREEN,
                    "  ✓ Created makeup plan: {} ({} prayers)  [{}]",
                    name.trim(),
                    total,
                    short_id(plan_id)
                );
                if active {
                    println_colored!(DIM, "  Set as your active makeup plan");
                }
            }
        }
        PlanCommands::List => print_plans(&store),
        PlanCommands::Activate { id } => {
            let result = store
                .resolve_plan(id)
                .and_then(|plan_id| store.dispatch(Command::SetActivePlan { plan_id }));
            if let Some(Outcome::PlanActivated { plan_id }) = commit(conn, &store, result)? {
                let name = plan_name(&store, plan_id);
                println_colored!(GREEN, "  ✓ {} is now your active makeup plan", name);
            }
        }
        PlanCommands::Complete {
            prayer,
            plan,
            count,
        } => {
            let prayer = parse_prayer(prayer)?;
            let result = store
                .resolve_plan_or_active(plan.as_deref())
                .and_then(|plan_id| {
                    store.dispatch(Command::MarkCompletedInPlan {
                        plan_id,
                        prayer,
                        count: *count,
                    })
                });
            if let Some(Outcome::PlanProgress {
                plan_id,
                applied,
                remaining,
                satisfied,
                ..
            }) = commit(conn, &store, result)?
            {
                println_colored!(
                    GREEN,
                    "  ✓ Marked {} {} prayer{} as completed in {}",
                    applied,
                    prayer,
                    if applied == 1 { "" } else { "s" },
                    plan_name(&store, plan_id)
                );
                if satisfied {
                    println_colored!(GOLD, "  ✓ Every prayer in this plan has been made up");
                } else if remaining > 0 {
                    println_colored!(DIM, "  {} {} left in this plan", remaining, prayer);
                }
            }
        }
        PlanCommands::Delete { id } => {
            let target = store.resolve_plan(id);
            let name = target
                .as_ref()
                .map(|plan_id| plan_name(&store, *plan_id))
                .unwrap_or_default();
            let result = target.and_then(|plan_id| store.dispatch(Command::DeletePlan { plan_id }));
            if let Some(Outcome::PlanDeleted { active, .. }) = commit(conn, &store, result)? {
                println_colored!(AMBER, "  The makeup plan {} has been deleted", name);
                match active {
                    Some(next) => {
                        println_colored!(DIM, "  Active plan: {}", plan_name(&store, next))
                    }
                    None => println_colored!(DIM, "  No plans left"),
                }
            }
        }
    }
    Ok(())
}

fn plan_name(store: &Store, plan_id: uuid::Uuid) -> String {
    store
        .state()
        .plans
        .get(plan_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| short_id(plan_id))
}

fn print_plans(store: &Store) {
    let registry = &store.state().plans;
    println!();
    if registry.is_empty() {
        println_colored!(DIM, "  No makeup plans yet. Create one with `qada plan create`.");
        println!();
        return;
    }
    println_colored!(GOLD, "  Makeup Plans");
    println!();
    let active = registry.active_plan_id();
    for plan in registry.plans() {
        let marker = if Some(plan.id) == active { "●" } else { " " };
        let bar = progress_bar(plan.completed_count as u64, plan.total_count as u64, 12);
        println!(
            "  {} {}  {}  {}  {}/{}  {}",
            marker,
            short_id(plan.id),
            pad_display(&plan.name, 20),
            bar,
            plan.completed_count,
            plan.total_count,
            format_percent(plan.completion_ratio() * 100.0)
        );
        let targets: Vec<String> = plan
            .target_prayers
            .iter()
            .map(|t| format!("{} {}", t.prayer_type, t.count))
            .collect();
        let remaining = if targets.is_empty() {
            "all made up".to_string()
        } else {
            targets.join(", ")
        };
        println_colored!(
            DIM,
            "             {}  ·  {}  ·  {}",
            remaining,
            plan.makeup_strategy.display_name(),
            plan.notification_strategy.display_name()
        );
    }
    println!();
    println_colored!(
        DIM,
        "  {} planned  ·  {} still to make up",
        reports::total_planned(registry.plans()),
        reports::total_remaining(registry.plans())
    );
    println!();
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub fn handle_progress(
    conn: &Connection,
    config: &AppConfig,
    range: Option<&str>,
    since: Option<&str>,
) -> Result<()> {
    let store = load_store(conn)?;
    let state = store.state();
    let today = Local::now().date_naive();

    let range = match (range, since) {
        (_, Some(date)) => TimeRange::Since(
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("'{}' is not a YYYY-MM-DD date", date))?,
        ),
        (Some(r), None) => TimeRange::from_str(r)?,
        (None, None) => config.display.default_range,
    };

    let summary = reports::summary(state);
    let (entries, rows) = reports::window(state, range, today);
    let window_total = reports::total_completed(&entries);

    println!();
    println_colored!(GOLD, "  Prayer Makeup Progress");
    println!();
    println_colored!(
        BOLD,
        "  Completed: {}  |  Remaining: {}  |  Plans: {}  |  Most made up: {}",
        summary.total_completed,
        summary.remaining_in_plans,
        summary.plan_count,
        summary.most_made_up
    );
    println!();

    println_colored!(GOLD, "  {} Breakdown", range.label());
    println!();
    if window_total == 0 {
        println_colored!(DIM, "  No prayers completed in this time period.");
        println!();
        return Ok(());
    }

    for share in reports::distribution(&entries) {
        println!(
            "  {:<10}  {:>5}  {}  {:>6}",
            share.prayer_type.display_name(),
            share.count,
            percent_bar(share.percent, 20),
            format_percent(share.percent)
        );
    }
    println_colored!(BOLD, "  {:<10}  {:>5}", "Total", window_total);
    println!();

    println_colored!(GOLD, "  {} History", range.label());
    println!();
    print!("  {:<12}", "Date");
    for prayer in PrayerType::ALL {
        print!("{:>9}", prayer.display_name());
    }
    println!("{:>8}", "Total");
    for row in &rows {
        print!("  {:<12}", row.date.format("%Y-%m-%d").to_string());
        for prayer in PrayerType::ALL {
            print!("{:>9}", row.count(prayer));
        }
        println!("{:>8}", row.total);
    }
    println!();
    Ok(())
}

// ─── Overview ────────────────────────────────────────────────────────────────

pub fn handle_overview(conn: &Connection) -> Result<()> {
    let store = load_store(conn)?;
    let state = store.state();
    let total_missed = state.missed.total();

    println!();
    println_colored!(GOLD, "  Prayer Makeup Tracker");
    println!();
    if total_missed > 0 {
        println_colored!(AMBER, "  You have {} missed prayers to make up.", total_missed);
    } else {
        println_colored!(GREEN, "  You don't have any missed prayers recorded yet.");
    }
    println!();

    match state.plans.active_plan() {
        Some(plan) => {
            println_colored!(BOLD, "  Active plan: {}", plan.name);
            println!(
                "  {}  {} of {} prayers completed",
                progress_bar(plan.completed_count as u64, plan.total_count as u64, 20),
                plan.completed_count,
                plan.total_count
            );
        }
        None => println_colored!(DIM, "  You don't have an active makeup plan yet."),
    }

    let today = Local::now().date_naive();
    let (entries, _) = reports::window(state, TimeRange::Daily, today);
    let done_today = reports::total_completed(&entries);
    if done_today > 0 {
        println!();
        println_colored!(GREEN, "  ✓ {} made up today", done_today);
    }
    if let Some(saved_at) = SnapshotRepo::saved_at(conn)? {
        println!();
        println_colored!(DIM, "  Last saved {} UTC", saved_at);
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection) -> Result<()> {
    let state = SnapshotRepo::load_or_default(conn)?;
    let json = serde_json::to_string_pretty(&state).context("Serializing state")?;
    println!("{}", json);
    Ok(())
}
