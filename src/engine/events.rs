//! Events emitted by engine entry points.

use crate::domain::{
    AttributeKind, ChallengeId, DailyMissionId, EpicMissionId, SkillId,
};

/// Everything that can happen during one state transition. Entry points
/// return these so callers (UI, CLI) can present what changed without
/// diffing state.
#[derive(Debug, Clone)]
pub enum ProgressionEvent {
    XpAwarded {
        amount: u32,
        reason: String,
    },
    LevelUp {
        old_level: u32,
        new_level: u32,
        title: String,
    },
    FragmentsAwarded {
        amount: u32,
    },
    StreakExtended {
        count: u32,
    },
    SkillXpAwarded {
        skill_id: SkillId,
        amount: u32,
    },
    SkillLevelUp {
        skill_id: SkillId,
        new_level: u32,
        bonuses: Vec<AttributeKind>,
    },
    SkillDecayed {
        skill_id: SkillId,
        amount: u32,
    },
    EpicMissionCompleted {
        epic_id: EpicMissionId,
    },
    /// A new daily mission was generated and appended.
    NextMissionReady {
        epic_id: EpicMissionId,
        daily_id: DailyMissionId,
    },
    /// Generation failed; the chain sits in the retryable "generating"
    /// state. Earned rewards stayed committed.
    GenerationDeferred {
        epic_id: EpicMissionId,
    },
    AchievementUnlocked {
        id: String,
        name: String,
    },
    TowerChallengeReady {
        challenge_id: ChallengeId,
    },
    TowerChallengeCompleted {
        challenge_id: ChallengeId,
    },
    TowerFloorAdvanced {
        floor: u32,
    },
    DungeonRoomCleared {
        skill_id: SkillId,
        room: u32,
    },
}
