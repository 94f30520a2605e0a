//! Advisories returned by the store when a command cannot be applied.
//!
//! None of these are faults: the state is left untouched and the caller
//! can re-issue a corrected command.

use thiserror::Error;
use uuid::Uuid;

use crate::models::PrayerType;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Count must be greater than zero")]
    ZeroCount,

    #[error("That amount is too large to record")]
    AmountTooLarge,

    #[error("Please enter a plan name")]
    EmptyPlanName,

    #[error("Please select at least one prayer type")]
    NoPrayersSelected,

    #[error("You don't have any missed prayers of the selected types")]
    NoMissedForSelection,

    #[error("You don't have any missed {0} prayers to mark as completed")]
    NothingToComplete(PrayerType),

    #[error("No plan matches '{0}'")]
    PlanNotFound(String),

    #[error("'{0}' matches more than one plan, use a longer id")]
    AmbiguousPlanId(String),

    #[error("There is no active plan")]
    NoActivePlan,

    #[error("All {prayer} prayers in '{plan}' are already made up")]
    AlreadyMadeUp { plan: String, prayer: PrayerType },

    #[error("'{plan}' does not include {prayer}")]
    NotInPlan { plan: String, prayer: PrayerType },
}

impl TrackerError {
    pub fn plan_not_found(id: Uuid) -> Self {
        TrackerError::PlanNotFound(id.to_string())
    }
}
