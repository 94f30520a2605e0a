use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PrayerType;

/// Outstanding missed count for one prayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedPrayer {
    pub id: Uuid,
    pub prayer_type: PrayerType,
    pub count: u32,
}

impl MissedPrayer {
    pub fn new(prayer_type: PrayerType, count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            prayer_type,
            count,
        }
    }
}

/// Unit the user estimates a missed period in.
///
/// Months and years are flat 30 and 365 day approximations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    pub fn prayers_per_unit(&self) -> u32 {
        match self {
            TimeUnit::Days => 1,
            TimeUnit::Weeks => 7,
            TimeUnit::Months => 30,
            TimeUnit::Years => 365,
        }
    }

    /// Number of prayers of one kind missed over `amount` units.
    /// `None` on overflow.
    pub fn to_prayer_count(&self, amount: u32) -> Option<u32> {
        amount.checked_mul(self.prayers_per_unit())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            "w" | "week" | "weeks" => Ok(TimeUnit::Weeks),
            "m" | "month" | "months" => Ok(TimeUnit::Months),
            "y" | "year" | "years" => Ok(TimeUnit::Years),
            _ => Err(anyhow::anyhow!("Unknown time unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_units_to_prayers() {
        assert_eq!(TimeUnit::Days.to_prayer_count(4), Some(4));
        assert_eq!(TimeUnit::Weeks.to_prayer_count(2), Some(14));
        assert_eq!(TimeUnit::Months.to_prayer_count(3), Some(90));
        assert_eq!(TimeUnit::Years.to_prayer_count(2), Some(730));
        assert_eq!(TimeUnit::Years.to_prayer_count(u32::MAX), None);
    }

    #[test]
    fn parses_unit_names() {
        assert_eq!("Weeks".parse::<TimeUnit>().unwrap(), TimeUnit::Weeks);
        assert_eq!("y".parse::<TimeUnit>().unwrap(), TimeUnit::Years);
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }
}
