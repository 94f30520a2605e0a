use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::PrayerType;

/// Makeup prayers completed for one prayer on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub prayer_type: PrayerType,
    pub count: u32,
}

/// Window of the progress log to report on. Every window ends today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Daily,
    /// Today and the six days before it.
    Weekly,
    /// Same day of the previous calendar month through today.
    Monthly,
    /// Same day of the previous year through today.
    Yearly,
    Since(NaiveDate),
    All,
}

impl TimeRange {
    pub const CYCLE: [TimeRange; 5] = [
        TimeRange::Daily,
        TimeRange::Weekly,
        TimeRange::Monthly,
        TimeRange::Yearly,
        TimeRange::All,
    ];

    /// First day included in the window, `None` for an open start.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeRange::Daily => Some(today),
            TimeRange::Weekly => Some(today - Duration::days(6)),
            TimeRange::Monthly => Some(
                today
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(NaiveDate::MIN),
            ),
            TimeRange::Yearly => Some(
                today
                    .checked_sub_months(Months::new(12))
                    .unwrap_or(NaiveDate::MIN),
            ),
            TimeRange::Since(date) => Some(*date),
            TimeRange::All => None,
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if date > today {
            return false;
        }
        match self.start(today) {
            Some(start) => date >= start,
            None => true,
        }
    }

    /// Next window in the dashboard's cycling order.
    pub fn next(&self) -> TimeRange {
        let pos = Self::CYCLE.iter().position(|r| r == self);
        match pos {
            Some(i) => Self::CYCLE[(i + 1) % Self::CYCLE.len()],
            None => TimeRange::Daily,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TimeRange::Daily => "Daily".to_string(),
            TimeRange::Weekly => "Weekly".to_string(),
            TimeRange::Monthly => "Monthly".to_string(),
            TimeRange::Yearly => "Yearly".to_string(),
            TimeRange::Since(date) => format!("Since {}", date.format("%Y-%m-%d")),
            TimeRange::All => "All time".to_string(),
        }
    }

    /// Stable form that `FromStr` reads back.
    pub fn as_key(&self) -> String {
        match self {
            TimeRange::Daily => "daily".to_string(),
            TimeRange::Weekly => "weekly".to_string(),
            TimeRange::Monthly => "monthly".to_string(),
            TimeRange::Yearly => "yearly".to_string(),
            TimeRange::Since(date) => date.format("%Y-%m-%d").to_string(),
            TimeRange::All => "all".to_string(),
        }
    }
}

impl std::str::FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "today" => Ok(TimeRange::Daily),
            "weekly" | "week" => Ok(TimeRange::Weekly),
            "monthly" | "month" => Ok(TimeRange::Monthly),
            "yearly" | "year" => Ok(TimeRange::Yearly),
            "all" => Ok(TimeRange::All),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(TimeRange::Since)
                .map_err(|_| anyhow::anyhow!("Unknown time range: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekly_covers_seven_days_ending_today() {
        let today = d(2026, 3, 10);
        assert!(TimeRange::Weekly.contains(d(2026, 3, 4), today));
        assert!(TimeRange::Weekly.contains(today, today));
        assert!(!TimeRange::Weekly.contains(d(2026, 3, 3), today));
    }

    #[test]
    fn monthly_uses_calendar_months() {
        let today = d(2026, 3, 31);
        assert_eq!(TimeRange::Monthly.start(today), Some(d(2026, 2, 28)));
        assert_eq!(TimeRange::Yearly.start(d(2024, 2, 29)), Some(d(2023, 2, 28)));
    }

    #[test]
    fn future_dates_are_outside_every_window() {
        let today = d(2026, 3, 10);
        assert!(!TimeRange::All.contains(d(2026, 3, 11), today));
        assert!(!TimeRange::Daily.contains(d(2026, 3, 9), today));
        assert!(TimeRange::All.contains(d(1999, 1, 1), today));
    }

    #[test]
    fn key_parses_back() {
        for range in [TimeRange::Yearly, TimeRange::All, TimeRange::Since(d(2025, 12, 1))] {
            assert_eq!(range.as_key().parse::<TimeRange>().unwrap(), range);
        }
    }

    #[test]
    fn parses_names_and_dates() {
        assert_eq!("Monthly".parse::<TimeRange>().unwrap(), TimeRange::Monthly);
        assert_eq!(
            "2026-01-02".parse::<TimeRange>().unwrap(),
            TimeRange::Since(d(2026, 1, 2))
        );
        assert!("fortnightly".parse::<TimeRange>().is_err());
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(TimeRange::All.next(), TimeRange::Daily);
        assert_eq!(TimeRange::Since(d(2026, 1, 1)).next(), TimeRange::Daily);
    }
}
