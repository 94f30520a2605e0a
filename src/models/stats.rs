use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PrayerType;

/// One row of the history table: every prayer's count for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    /// Indexed by `PrayerType::index`.
    pub counts: [u32; 5],
    pub total: u64,
}

impl DailyBreakdown {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            counts: [0; 5],
            total: 0,
        }
    }

    pub fn count(&self, prayer: PrayerType) -> u32 {
        self.counts[prayer.index()]
    }
}

/// A prayer's slice of the completed total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrayerShare {
    pub prayer_type: PrayerType,
    pub count: u64,
    pub percent: f64,
}

/// Headline numbers shown above the progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total_completed: u64,
    pub remaining_in_plans: u64,
    pub plan_count: usize,
    pub most_made_up: PrayerType,
}
