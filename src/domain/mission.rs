//! Epic and daily missions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DailyMissionId, EpicMissionId, GoalId, Rank};

/// User feedback captured after a completion, consumed by the next
/// content-generation request for the same chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionFeedback {
    TooEasy,
    TooHard,
    Hint(String),
}

/// The smallest actionable unit. Reward is baked in at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMission {
    pub id: DailyMissionId,
    pub name: String,
    pub description: String,
    pub xp: u32,
    pub fragments: u32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Leveling counters captured before a completion. Restoring these is
/// what makes the undo exact even when the completion crossed one or
/// more level thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
}

/// Bookkeeping for the single-level undo of the most recent completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastAward {
    pub daily_id: DailyMissionId,
    pub fragments: u32,
    pub profile_before: ProgressSnapshot,
    pub skill_before: Option<ProgressSnapshot>,
}

/// A ranked milestone within a goal, composed of an ordered sequence of
/// daily missions. Complete once every daily is complete and the count
/// reached the configured quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicMission {
    pub id: EpicMissionId,
    pub goal_id: GoalId,
    pub rank: Rank,
    pub title: String,
    pub completed: bool,
    pub daily_missions: Vec<DailyMission>,
    /// Completion timestamp anchoring the cooldown (next local midnight).
    pub last_completion: Option<DateTime<Utc>>,
    /// Undo record for the most recent completion only.
    #[serde(default)]
    pub last_award: Option<LastAward>,
    /// Feedback waiting to be folded into the next generation request.
    #[serde(default)]
    pub pending_feedback: Option<MissionFeedback>,
    /// Set while the next daily mission is awaiting (re)generation.
    /// The chain has no active daily in this state; it is valid and
    /// displayed as "generating".
    #[serde(default)]
    pub generation_pending: bool,
}

impl EpicMission {
    /// The single incomplete daily mission, if any.
    pub fn active_daily(&self) -> Option<&DailyMission> {
        self.daily_missions.iter().find(|d| !d.completed)
    }

    pub fn completed_count(&self) -> u32 {
        self.daily_missions.iter().filter(|d| d.completed).count() as u32
    }
}
