use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{PrayerType, ProgressEntry, TimeRange};

/// Completed makeup prayers keyed by day and prayer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressLog {
    entries: Vec<ProgressEntry>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Add `count` to the (date, prayer) entry, creating it if needed.
    /// Returns that day's new count for the prayer.
    pub fn record(&mut self, date: NaiveDate, prayer: PrayerType, count: u32) -> u32 {
        if count == 0 {
            return self.count_on(date, prayer);
        }
        match self
            .entries
            .iter_mut()
            .find(|e| e.date == date && e.prayer_type == prayer)
        {
            Some(entry) => {
                entry.count = entry.count.saturating_add(count);
                entry.count
            }
            None => {
                self.entries.push(ProgressEntry {
                    date,
                    prayer_type: prayer,
                    count,
                });
                count
            }
        }
    }

    pub fn count_on(&self, date: NaiveDate, prayer: PrayerType) -> u32 {
        self.entries
            .iter()
            .find(|e| e.date == date && e.prayer_type == prayer)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Entries inside `range`, in log order.
    pub fn query(&self, range: TimeRange, today: NaiveDate) -> Vec<ProgressEntry> {
        self.entries
            .iter()
            .filter(|e| range.contains(e.date, today))
            .copied()
            .collect()
    }
}
