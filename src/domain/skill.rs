//! Per-goal mastery tracks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GoalCategory, GoalId, SkillId};

/// A mastery track leveling independently of the profile. Loses XP
/// ("corruption") after prolonged inactivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub goal_id: GoalId,
    pub name: String,
    pub category: GoalCategory,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    /// Refreshed only by XP gain, never by passive time.
    pub last_activity: DateTime<Utc>,
}

impl Skill {
    pub fn new(
        id: SkillId,
        goal_id: GoalId,
        name: impl Into<String>,
        category: GoalCategory,
        initial_threshold: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            goal_id,
            name: name.into(),
            category,
            level: 1,
            xp: 0,
            xp_to_next_level: initial_threshold,
            last_activity: now,
        }
    }

    /// Whole days since the last XP gain.
    pub fn days_inactive(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_activity).num_days()
    }
}
