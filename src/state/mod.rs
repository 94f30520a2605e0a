//! In-memory tracker state and the single entry point that mutates it.
//!
//! Views never touch the slices directly: they build a [`Command`], hand
//! it to [`Store::dispatch`] and read back the [`Outcome`] or the advisory.

pub mod ledger;
pub mod progress;
pub mod registry;

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TrackerError};
use crate::models::{MakeupStrategy, NotificationStrategy, PrayerType, TimeUnit};

pub use ledger::MissedLedger;
pub use progress::ProgressLog;
pub use registry::{PlanCompletion, PlanRegistry};

/// Everything the tracker knows. This is also the persisted snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub missed: MissedLedger,
    #[serde(default)]
    pub plans: PlanRegistry,
    #[serde(default)]
    pub progress: ProgressLog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddMissed {
        prayer: PrayerType,
        amount: u32,
        unit: TimeUnit,
    },
    /// Pay back prayers in the ledger only.
    MarkCompleted { prayer: PrayerType, count: u32 },
    /// Pay back prayers in the ledger and log the same amount as progress.
    MakeUp { prayer: PrayerType, count: u32 },
    RecordProgress { prayer: PrayerType, count: u32 },
    CreatePlan {
        name: String,
        prayers: Vec<PrayerType>,
        makeup_strategy: MakeupStrategy,
        notification_strategy: NotificationStrategy,
    },
    SetActivePlan { plan_id: Uuid },
    MarkCompletedInPlan {
        plan_id: Uuid,
        prayer: PrayerType,
        count: u32,
    },
    DeletePlan { plan_id: Uuid },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    MissedAdded {
        prayer: PrayerType,
        added: u32,
        owed: u32,
    },
    Completed {
        prayer: PrayerType,
        applied: u32,
        owed: u32,
    },
    MadeUp {
        prayer: PrayerType,
        applied: u32,
        owed: u32,
    },
    ProgressRecorded {
        prayer: PrayerType,
        day_total: u32,
    },
    PlanCreated {
        plan_id: Uuid,
        total: u32,
        active: bool,
    },
    PlanActivated { plan_id: Uuid },
    PlanProgress {
        plan_id: Uuid,
        prayer: PrayerType,
        applied: u32,
        remaining: u32,
        satisfied: bool,
    },
    PlanDeleted {
        plan_id: Uuid,
        active: Option<Uuid>,
    },
}

/// Owns the state and applies commands to it one at a time.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        let now = Local::now();
        self.dispatch_at(command, now.date_naive(), now.with_timezone(&Utc))
    }

    /// Apply `command` with an explicit clock. `today` keys progress
    /// entries; `now` stamps new plans.
    pub fn dispatch_at(
        &mut self,
        command: Command,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Outcome> {
        debug!("dispatch {:?}", command);
        let result = self.apply(command, today, now);
        if let Err(advisory) = &result {
            warn!("command not applied: {}", advisory);
        }
        result
    }

    fn apply(&mut self, command: Command, today: NaiveDate, now: DateTime<Utc>) -> Result<Outcome> {
        let state = &mut self.state;
        match command {
            Command::AddMissed {
                prayer,
                amount,
                unit,
            } => {
                ensure_positive(amount)?;
                let added = unit
                    .to_prayer_count(amount)
                    .ok_or(TrackerError::AmountTooLarge)?;
                ensure_fits(state.missed.count(prayer), added)?;
                state.missed.add_missed(prayer, added);
                Ok(Outcome::MissedAdded {
                    prayer,
                    added,
                    owed: state.missed.count(prayer),
                })
            }
            Command::MarkCompleted { prayer, count } => {
                ensure_positive(count)?;
                ensure_owed(&state.missed, prayer)?;
                let applied = state.missed.mark_completed(prayer, count);
                Ok(Outcome::Completed {
                    prayer,
                    applied,
                    owed: state.missed.count(prayer),
                })
            }
            Command::MakeUp { prayer, count } => {
                ensure_positive(count)?;
                ensure_owed(&state.missed, prayer)?;
                let owed = state.missed.count(prayer);
                ensure_fits(state.progress.count_on(today, prayer), count.min(owed))?;
                let applied = state.missed.mark_completed(prayer, count);
                state.progress.record(today, prayer, applied);
                Ok(Outcome::MadeUp {
                    prayer,
                    applied,
                    owed: state.missed.count(prayer),
                })
            }
            Command::RecordProgress { prayer, count } => {
                ensure_positive(count)?;
                ensure_fits(state.progress.count_on(today, prayer), count)?;
                let day_total = state.progress.record(today, prayer, count);
                Ok(Outcome::ProgressRecorded { prayer, day_total })
            }
            Command::CreatePlan {
                name,
                prayers,
                makeup_strategy,
                notification_strategy,
            } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(TrackerError::EmptyPlanName);
                }
                if prayers.is_empty() {
                    return Err(TrackerError::NoPrayersSelected);
                }
                let targets = state.missed.snapshot(&prayers);
                if targets.is_empty() {
                    return Err(TrackerError::NoMissedForSelection);
                }
                let plan_id = state.plans.create_plan(
                    name,
                    targets,
                    makeup_strategy,
                    notification_strategy,
                    now,
                );
                let total = state
                    .plans
                    .get(plan_id)
                    .map(|p| p.total_count)
                    .unwrap_or_default();
                let active = state.plans.active_plan_id() == Some(plan_id);
                info!("created plan {} ({} prayers)", plan_id, total);
                Ok(Outcome::PlanCreated {
                    plan_id,
                    total,
                    active,
                })
            }
            Command::SetActivePlan { plan_id } => {
                if state.plans.get(plan_id).is_none() {
                    return Err(TrackerError::plan_not_found(plan_id));
                }
                state.plans.set_active(plan_id);
                Ok(Outcome::PlanActivated { plan_id })
            }
            Command::MarkCompletedInPlan {
                plan_id,
                prayer,
                count,
            } => {
                ensure_positive(count)?;
                let plan = state
                    .plans
                    .get(plan_id)
                    .ok_or_else(|| TrackerError::plan_not_found(plan_id))?;
                if plan.target(prayer).is_none() {
                    let plan_name = plan.name.clone();
                    return Err(if plan.was_requested(prayer) {
                        TrackerError::AlreadyMadeUp {
                            plan: plan_name,
                            prayer,
                        }
                    } else {
                        TrackerError::NotInPlan {
                            plan: plan_name,
                            prayer,
                        }
                    });
                }
                let done = state
                    .plans
                    .mark_completed_in_plan(plan_id, prayer, count)
                    .ok_or_else(|| TrackerError::plan_not_found(plan_id))?;
                let satisfied = state
                    .plans
                    .get(plan_id)
                    .map(|p| p.is_satisfied())
                    .unwrap_or(false);
                Ok(Outcome::PlanProgress {
                    plan_id,
                    prayer,
                    applied: done.applied,
                    remaining: done.remaining,
                    satisfied,
                })
            }
            Command::DeletePlan { plan_id } => {
                if !state.plans.delete_plan(plan_id) {
                    return Err(TrackerError::plan_not_found(plan_id));
                }
                info!("deleted plan {}", plan_id);
                Ok(Outcome::PlanDeleted {
                    plan_id,
                    active: state.plans.active_plan_id(),
                })
            }
        }
    }

    /// Resolve a full id or unique id prefix to a plan id.
    pub fn resolve_plan(&self, id_or_prefix: &str) -> Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(id_or_prefix.trim()) {
            return self
                .state
                .plans
                .get(id)
                .map(|p| p.id)
                .ok_or_else(|| TrackerError::plan_not_found(id));
        }
        match self.state.plans.find_by_prefix(id_or_prefix).as_slice() {
            [] => Err(TrackerError::PlanNotFound(id_or_prefix.to_string())),
            [plan] => Ok(plan.id),
            _ => Err(TrackerError::AmbiguousPlanId(id_or_prefix.to_string())),
        }
    }

    /// The given plan, or the active plan when `id_or_prefix` is `None`.
    pub fn resolve_plan_or_active(&self, id_or_prefix: Option<&str>) -> Result<Uuid> {
        match id_or_prefix {
            Some(s) => self.resolve_plan(s),
            None => self
                .state
                .plans
                .active_plan()
                .map(|p| p.id)
                .ok_or(TrackerError::NoActivePlan),
        }
    }
}

fn ensure_positive(count: u32) -> Result<()> {
    if count == 0 {
        Err(TrackerError::ZeroCount)
    } else {
        Ok(())
    }
}

fn ensure_fits(current: u32, added: u32) -> Result<()> {
    current
        .checked_add(added)
        .map(|_| ())
        .ok_or(TrackerError::AmountTooLarge)
}

fn ensure_owed(ledger: &MissedLedger, prayer: PrayerType) -> Result<()> {
    if ledger.get(prayer).is_none() {
        Err(TrackerError::NothingToComplete(prayer))
    } else {
        Ok(())
    }
}
