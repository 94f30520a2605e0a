use serde::{Deserialize, Serialize};

use crate::models::{MissedPrayer, PrayerType};

/// Outstanding missed prayers, at most one record per prayer.
///
/// Records keep the order they were first added in. A record is removed
/// as soon as its count reaches zero, so every stored count is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedLedger {
    records: Vec<MissedPrayer>,
}

impl MissedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MissedPrayer] {
        &self.records
    }

    pub fn get(&self, prayer: PrayerType) -> Option<&MissedPrayer> {
        self.records.iter().find(|r| r.prayer_type == prayer)
    }

    pub fn count(&self, prayer: PrayerType) -> u32 {
        self.get(prayer).map(|r| r.count).unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.records.iter().map(|r| r.count as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add `count` missed prayers. Zero is ignored; the count saturates
    /// instead of wrapping.
    pub fn add_missed(&mut self, prayer: PrayerType, count: u32) {
        if count == 0 {
            return;
        }
        match self.records.iter_mut().find(|r| r.prayer_type == prayer) {
            Some(record) => record.count = record.count.saturating_add(count),
            None => self.records.push(MissedPrayer::new(prayer, count)),
        }
    }

    /// Pay back up to `count` prayers and return how many were actually
    /// consumed. Unknown prayers are a no-op returning zero.
    pub fn mark_completed(&mut self, prayer: PrayerType, count: u32) -> u32 {
        let Some(idx) = self.records.iter().position(|r| r.prayer_type == prayer) else {
            return 0;
        };
        let existing = self.records[idx].count;
        let consumed = count.min(existing);
        let new_count = existing - consumed;
        if new_count == 0 {
            self.records.remove(idx);
        } else {
            self.records[idx].count = new_count;
        }
        consumed
    }

    /// Value copies of the records for `prayers`, in the given order.
    /// Prayers with nothing owed are skipped.
    pub fn snapshot(&self, prayers: &[PrayerType]) -> Vec<MissedPrayer> {
        prayers
            .iter()
            .filter_map(|p| self.get(*p).cloned())
            .collect()
    }
}
