//! Generated achievements and their unlock criteria.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GoalCategory;

/// What an achievement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaKind {
    MissionsCompleted,
    LevelReached,
    GoalsCompleted,
    SkillLevelReached,
    StreakMaintained,
    MissionsInCategoryCompleted,
}

/// Criteria descriptor: kind, numeric target, optional category filter
/// (used by the skill-level and per-category mission kinds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCriteria {
    pub kind: CriteriaKind,
    pub target: u32,
    #[serde(default)]
    pub category: Option<GoalCategory>,
}

/// A generated achievement snapshot. Once unlocked, progress and the
/// unlock timestamp are frozen; the transition is one-directional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub criteria: AchievementCriteria,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}
