use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MakeupPlan, MakeupStrategy, MissedPrayer, NotificationStrategy, PrayerType};

/// Makeup plans in creation order plus the single active plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRegistry {
    plans: Vec<MakeupPlan>,
    active_plan_id: Option<Uuid>,
}

/// What a completion inside a plan did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanCompletion {
    pub applied: u32,
    /// Left for that prayer in the plan; zero means the entry was removed.
    pub remaining: u32,
}

/// The first plan ever added to an empty registry becomes active.
pub fn active_after_create(
    current: Option<Uuid>,
    plan_count: usize,
    created: Uuid,
) -> Option<Uuid> {
    if plan_count == 1 { Some(created) } else { current }
}

/// Deleting the active plan hands the role to the first remaining plan.
pub fn active_after_delete(
    current: Option<Uuid>,
    deleted: Uuid,
    remaining: &[MakeupPlan],
) -> Option<Uuid> {
    if current == Some(deleted) {
        remaining.first().map(|p| p.id)
    } else {
        current
    }
}

impl PlanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plans(&self) -> &[MakeupPlan] {
        &self.plans
    }

    pub fn active_plan_id(&self) -> Option<Uuid> {
        self.active_plan_id
    }

    pub fn active_plan(&self) -> Option<&MakeupPlan> {
        self.active_plan_id.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: Uuid) -> Option<&MakeupPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Add a plan and return its id. Inputs are taken as given; an empty
    /// name or target list is the caller's to reject.
    pub fn create_plan(
        &mut self,
        name: String,
        target_prayers: Vec<MissedPrayer>,
        makeup_strategy: MakeupStrategy,
        notification_strategy: NotificationStrategy,
        created_at: DateTime<Utc>,
    ) -> Uuid {
        let total_count = target_prayers
            .iter()
            .fold(0u32, |sum, t| sum.saturating_add(t.count));
        let requested: Vec<PrayerType> = target_prayers.iter().map(|t| t.prayer_type).collect();

        let plan = MakeupPlan {
            id: Uuid::new_v4(),
            name,
            target_prayers,
            makeup_strategy,
            notification_strategy,
            created_at,
            completed_count: 0,
            total_count,
            requested,
        };
        let id = plan.id;
        self.plans.push(plan);
        self.active_plan_id = active_after_create(self.active_plan_id, self.plans.len(), id);
        id
    }

    /// Point the active marker at `id` without checking it exists.
    pub fn set_active(&mut self, id: Uuid) {
        self.active_plan_id = Some(id);
    }

    /// Pay back up to `count` of `prayer` inside a plan. Returns `None`
    /// when the plan or the prayer entry does not exist.
    pub fn mark_completed_in_plan(
        &mut self,
        plan_id: Uuid,
        prayer: PrayerType,
        count: u32,
    ) -> Option<PlanCompletion> {
        let plan = self.plans.iter_mut().find(|p| p.id == plan_id)?;
        let idx = plan
            .target_prayers
            .iter()
            .position(|t| t.prayer_type == prayer)?;

        let entry_count = plan.target_prayers[idx].count;
        let applied = count.min(entry_count);
        let remaining = entry_count - applied;

        plan.completed_count = plan.completed_count.saturating_add(applied);
        if remaining == 0 {
            plan.target_prayers.remove(idx);
        } else {
            plan.target_prayers[idx].count = remaining;
        }
        Some(PlanCompletion { applied, remaining })
    }

    /// Remove a plan. Returns whether anything was removed.
    pub fn delete_plan(&mut self, id: Uuid) -> bool {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        self.active_plan_id = active_after_delete(self.active_plan_id, id, &self.plans);
        self.plans.len() != before
    }

    /// Plans whose id starts with `prefix` (case-insensitive).
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&MakeupPlan> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.plans
            .iter()
            .filter(|p| p.id.to_string().starts_with(&prefix))
            .collect()
    }
}
