use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MissedPrayer, PrayerType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MakeupStrategy {
    /// Pray one makeup alongside each current prayer.
    WithCurrentPrayer,
    /// Only make up the prayer whose time it currently is.
    SpecificPrayerOnly,
    AnyTime,
}

impl MakeupStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MakeupStrategy::WithCurrentPrayer => "with-current",
            MakeupStrategy::SpecificPrayerOnly => "specific-only",
            MakeupStrategy::AnyTime => "any-time",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MakeupStrategy::WithCurrentPrayer => "With current prayer",
            MakeupStrategy::SpecificPrayerOnly => "Specific prayer only",
            MakeupStrategy::AnyTime => "Any time",
        }
    }
}

impl std::str::FromStr for MakeupStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "with-current" | "with-current-prayer" => Ok(MakeupStrategy::WithCurrentPrayer),
            "specific-only" | "specific-prayer-only" | "specific" => {
                Ok(MakeupStrategy::SpecificPrayerOnly)
            }
            "any-time" | "anytime" | "any" => Ok(MakeupStrategy::AnyTime),
            _ => Err(anyhow::anyhow!("Unknown makeup strategy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationStrategy {
    WithEachPrayer,
    SpecificTimeDaily,
    None,
}

impl NotificationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStrategy::WithEachPrayer => "each-prayer",
            NotificationStrategy::SpecificTimeDaily => "daily",
            NotificationStrategy::None => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NotificationStrategy::WithEachPrayer => "With each prayer",
            NotificationStrategy::SpecificTimeDaily => "Specific time daily",
            NotificationStrategy::None => "No notifications",
        }
    }
}

impl std::str::FromStr for NotificationStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "each-prayer" | "with-each-prayer" => Ok(NotificationStrategy::WithEachPrayer),
            "daily" | "specific-time-daily" => Ok(NotificationStrategy::SpecificTimeDaily),
            "none" | "off" => Ok(NotificationStrategy::None),
            _ => Err(anyhow::anyhow!("Unknown notification strategy: {}", s)),
        }
    }
}

/// A named commitment to pay back a fixed set of missed prayers.
///
/// `target_prayers` are copies taken when the plan was created and shrink
/// as prayers are made up. `total_count` and `requested` never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeupPlan {
    pub id: Uuid,
    pub name: String,
    pub target_prayers: Vec<MissedPrayer>,
    pub makeup_strategy: MakeupStrategy,
    pub notification_strategy: NotificationStrategy,
    pub created_at: DateTime<Utc>,
    pub completed_count: u32,
    pub total_count: u32,
    /// Prayers the plan was created with, including ones already paid back.
    #[serde(default)]
    pub requested: Vec<PrayerType>,
}

impl MakeupPlan {
    pub fn target(&self, prayer: PrayerType) -> Option<&MissedPrayer> {
        self.target_prayers.iter().find(|t| t.prayer_type == prayer)
    }

    pub fn remaining(&self) -> u32 {
        self.total_count.saturating_sub(self.completed_count)
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.completed_count as f64 / self.total_count as f64
        }
    }

    /// Every target has been paid back. This can be true while
    /// `completed_count` is still below `total_count`.
    pub fn is_satisfied(&self) -> bool {
        self.target_prayers.is_empty()
    }

    pub fn was_requested(&self, prayer: PrayerType) -> bool {
        self.requested.contains(&prayer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_round_trip_through_their_names() {
        for s in [
            MakeupStrategy::WithCurrentPrayer,
            MakeupStrategy::SpecificPrayerOnly,
            MakeupStrategy::AnyTime,
        ] {
            assert_eq!(s.as_str().parse::<MakeupStrategy>().unwrap(), s);
        }
        for s in [
            NotificationStrategy::WithEachPrayer,
            NotificationStrategy::SpecificTimeDaily,
            NotificationStrategy::None,
        ] {
            assert_eq!(s.as_str().parse::<NotificationStrategy>().unwrap(), s);
        }
    }

    #[test]
    fn empty_plan_has_zero_ratio() {
        let plan = MakeupPlan {
            id: Uuid::new_v4(),
            name: "empty".into(),
            target_prayers: vec![],
            makeup_strategy: MakeupStrategy::AnyTime,
            notification_strategy: NotificationStrategy::None,
            created_at: Utc::now(),
            completed_count: 0,
            total_count: 0,
            requested: vec![],
        };
        assert_eq!(plan.completion_ratio(), 0.0);
        assert_eq!(plan.remaining(), 0);
        assert!(plan.is_satisfied());
    }
}
