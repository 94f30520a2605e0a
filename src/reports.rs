//! Read-side aggregates for the progress views.
//!
//! Everything here is recomputed from the entries it is given.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{
    DailyBreakdown, MakeupPlan, PrayerShare, PrayerType, ProgressEntry, ProgressSummary, TimeRange,
};
use crate::state::AppState;

pub fn total_completed(entries: &[ProgressEntry]) -> u64 {
    entries.iter().map(|e| e.count as u64).sum()
}

pub fn completed_by_kind(entries: &[ProgressEntry], prayer: PrayerType) -> u64 {
    entries
        .iter()
        .filter(|e| e.prayer_type == prayer)
        .map(|e| e.count as u64)
        .sum()
}

pub fn total_planned(plans: &[MakeupPlan]) -> u64 {
    plans.iter().map(|p| p.total_count as u64).sum()
}

pub fn total_remaining(plans: &[MakeupPlan]) -> u64 {
    plans.iter().map(|p| p.remaining() as u64).sum()
}

/// Percentage of the completed total per prayer, in prayer order.
/// An empty total gives 0% everywhere.
pub fn distribution(entries: &[ProgressEntry]) -> Vec<PrayerShare> {
    let total = total_completed(entries);
    PrayerType::ALL
        .iter()
        .map(|&prayer_type| {
            let count = completed_by_kind(entries, prayer_type);
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            PrayerShare {
                prayer_type,
                count,
                percent,
            }
        })
        .collect()
}

/// One row per day that has entries, oldest first.
pub fn pivot_by_date(entries: &[ProgressEntry]) -> Vec<DailyBreakdown> {
    let mut rows: BTreeMap<NaiveDate, DailyBreakdown> = BTreeMap::new();
    for entry in entries {
        let row = rows
            .entry(entry.date)
            .or_insert_with(|| DailyBreakdown::new(entry.date));
        let slot = &mut row.counts[entry.prayer_type.index()];
        *slot = slot.saturating_add(entry.count);
        row.total += entry.count as u64;
    }
    rows.into_values().collect()
}

/// Prayer with the most completions. Ties go to the earlier prayer, so an
/// empty log answers Fajr.
pub fn most_made_up_kind(entries: &[ProgressEntry]) -> PrayerType {
    let mut best = PrayerType::Fajr;
    let mut best_count = 0;
    for prayer in PrayerType::ALL {
        let count = completed_by_kind(entries, prayer);
        if count > best_count {
            best = prayer;
            best_count = count;
        }
    }
    best
}

/// All-time headline numbers shown above the windowed report.
pub fn summary(state: &AppState) -> ProgressSummary {
    let entries = state.progress.entries();
    ProgressSummary {
        total_completed: total_completed(entries),
        remaining_in_plans: total_remaining(state.plans.plans()),
        plan_count: state.plans.len(),
        most_made_up: most_made_up_kind(entries),
    }
}

/// Windowed view of the log: the entries plus their per-day pivot.
pub fn window(
    state: &AppState,
    range: TimeRange,
    today: NaiveDate,
) -> (Vec<ProgressEntry>, Vec<DailyBreakdown>) {
    let entries = state.progress.query(range, today);
    let rows = pivot_by_date(&entries);
    (entries, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MakeupStrategy, MissedPrayer, NotificationStrategy};
    use crate::state::PlanRegistry;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(date: NaiveDate, prayer_type: PrayerType, count: u32) -> ProgressEntry {
        ProgressEntry {
            date,
            prayer_type,
            count,
        }
    }

    #[test]
    fn totals_by_kind() {
        let entries = vec![
            entry(d(2026, 1, 1), PrayerType::Fajr, 2),
            entry(d(2026, 1, 2), PrayerType::Fajr, 3),
            entry(d(2026, 1, 2), PrayerType::Isha, 1),
        ];
        assert_eq!(total_completed(&entries), 6);
        assert_eq!(completed_by_kind(&entries, PrayerType::Fajr), 5);
        assert_eq!(completed_by_kind(&entries, PrayerType::Asr), 0);
    }

    #[test]
    fn distribution_of_nothing_is_all_zero() {
        let shares = distribution(&[]);
        assert_eq!(shares.len(), 5);
        assert!(shares.iter().all(|s| s.percent == 0.0 && s.count == 0));
    }

    #[test]
    fn distribution_sums_to_one_hundred() {
        let entries = vec![
            entry(d(2026, 1, 1), PrayerType::Fajr, 1),
            entry(d(2026, 1, 1), PrayerType::Asr, 3),
        ];
        let shares = distribution(&entries);
        assert_eq!(shares[PrayerType::Fajr.index()].percent, 25.0);
        assert_eq!(shares[PrayerType::Asr.index()].percent, 75.0);
        let sum: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pivot_sorts_days_and_fills_gaps() {
        let entries = vec![
            entry(d(2026, 1, 3), PrayerType::Isha, 2),
            entry(d(2026, 1, 1), PrayerType::Fajr, 1),
            entry(d(2026, 1, 3), PrayerType::Dhuhr, 4),
        ];
        let rows = pivot_by_date(&entries);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, d(2026, 1, 1));
        assert_eq!(rows[0].counts, [1, 0, 0, 0, 0]);
        assert_eq!(rows[0].total, 1);
        assert_eq!(rows[1].count(PrayerType::Dhuhr), 4);
        assert_eq!(rows[1].count(PrayerType::Asr), 0);
        assert_eq!(rows[1].total, 6);
    }

    #[test]
    fn most_made_up_breaks_ties_by_prayer_order() {
        assert_eq!(most_made_up_kind(&[]), PrayerType::Fajr);
        let entries = vec![
            entry(d(2026, 1, 1), PrayerType::Isha, 3),
            entry(d(2026, 1, 1), PrayerType::Asr, 3),
            entry(d(2026, 1, 1), PrayerType::Fajr, 1),
        ];
        assert_eq!(most_made_up_kind(&entries), PrayerType::Asr);
    }

    #[test]
    fn remaining_sums_over_plans() {
        let mut registry = PlanRegistry::new();
        let a = registry.create_plan(
            "a".into(),
            vec![MissedPrayer::new(PrayerType::Fajr, 5)],
            MakeupStrategy::AnyTime,
            NotificationStrategy::None,
            Utc::now(),
        );
        registry.create_plan(
            "b".into(),
            vec![MissedPrayer::new(PrayerType::Asr, 2)],
            MakeupStrategy::AnyTime,
            NotificationStrategy::None,
            Utc::now(),
        );
        registry.mark_completed_in_plan(a, PrayerType::Fajr, 3);
        assert_eq!(total_planned(registry.plans()), 7);
        assert_eq!(total_remaining(registry.plans()), 4);
    }

    #[test]
    fn summary_is_all_time_and_window_is_not() {
        let mut state = AppState::default();
        let today = d(2026, 6, 10);
        state.progress.record(today, PrayerType::Maghrib, 2);
        state.progress.record(d(2026, 1, 1), PrayerType::Fajr, 9);

        let s = summary(&state);
        assert_eq!(s.total_completed, 11);
        assert_eq!(s.most_made_up, PrayerType::Fajr);
        assert_eq!(s.plan_count, 0);

        let (entries, rows) = window(&state, TimeRange::Weekly, today);
        assert_eq!(total_completed(&entries), 2);
        assert_eq!(most_made_up_kind(&entries), PrayerType::Maghrib);
        assert_eq!(rows.len(), 1);
    }
}
