//! Tower and dungeon challenge state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChallengeId, SkillId};

/// One measurable requirement of a tower challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequirement {
    pub description: String,
    pub target: u32,
    #[serde(default)]
    pub progress: u32,
}

impl ChallengeRequirement {
    pub fn is_met(&self) -> bool {
        self.progress >= self.target
    }
}

/// A floor-scaled tower challenge. Requirement progress only counts once
/// the challenge has been accepted (ticket spent, moved to the active
/// list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerChallenge {
    pub id: ChallengeId,
    pub floor: u32,
    pub name: String,
    pub description: String,
    /// Difficulty score 1..=10, scaled by floor tier.
    pub difficulty: u8,
    pub requirements: Vec<ChallengeRequirement>,
}

impl TowerChallenge {
    pub fn is_complete(&self) -> bool {
        self.requirements.iter().all(ChallengeRequirement::is_met)
    }
}

/// Per-profile tower progression ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerProgress {
    pub floor: u32,
    pub highest_floor: u32,
    /// Challenges completed on the current floor, toward the floor quota.
    pub floor_completions: u32,
    /// Challenges generated today, toward the daily allowance.
    pub daily_generated: u32,
    /// Local day ("%Y-%m-%d") the daily counters were last reset.
    pub daily_reset_day: Option<String>,
    pub tickets: u32,
    /// While set and in the future, all tower interaction is refused.
    pub lockout_until: Option<DateTime<Utc>>,
    /// Generated, not yet accepted.
    pub available: Vec<TowerChallenge>,
    /// Accepted, counting requirement progress.
    pub active: Vec<TowerChallenge>,
}

impl TowerProgress {
    pub fn new(tickets: u32) -> Self {
        Self {
            floor: 1,
            highest_floor: 1,
            floor_completions: 0,
            daily_generated: 0,
            daily_reset_day: None,
            tickets,
            lockout_until: None,
            available: Vec::new(),
            active: Vec::new(),
        }
    }
}

/// A room-scaled dungeon challenge for one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonChallenge {
    pub id: ChallengeId,
    pub room: u32,
    pub name: String,
    pub description: String,
    /// Difficulty score 1..=10, scaled by room and skill level.
    pub difficulty: u8,
}

/// Per-skill dungeon ladder. Lives are a shared profile-wide pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonState {
    pub skill_id: SkillId,
    pub room: u32,
    pub highest_room: u32,
    pub active: Option<DungeonChallenge>,
    pub opened_at: DateTime<Utc>,
}

impl DungeonState {
    pub fn new(skill_id: SkillId, now: DateTime<Utc>) -> Self {
        Self {
            skill_id,
            room: 1,
            highest_room: 1,
            active: None,
            opened_at: now,
        }
    }
}
