//! Typed generation requests.

use serde::{Deserialize, Serialize};

use crate::domain::{GoalCategory, MissionFeedback, Rank};

/// A structured request to the content generator. The variant determines
/// the expected response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GenerationRequest {
    /// The next daily mission for an epic mission chain, seeded with
    /// completion history and any pending user feedback.
    NextDailyMission {
        goal: String,
        category: GoalCategory,
        rank: Rank,
        completed: Vec<String>,
        feedback: Option<MissionFeedback>,
    },

    /// Title for a new epic mission at the given rank.
    EpicMission {
        goal: String,
        category: GoalCategory,
        rank: Rank,
    },

    /// A tower challenge scaled by floor tier.
    TowerChallenge {
        floor: u32,
        tier: u8,
        profile_level: u32,
    },

    /// A dungeon challenge scaled by room and skill level.
    DungeonChallenge {
        skill: String,
        room: u32,
        skill_level: u32,
    },

    /// A starter batch of achievements for a fresh profile.
    AchievementBatch {
        profile_level: u32,
        goals: Vec<String>,
    },

    /// Goal ideas from free-text interests.
    GoalSuggestions { interests: Vec<String> },

    /// A coarse 1..=10 complexity estimate of some mission text.
    DifficultyScore { text: String },
}

impl GenerationRequest {
    /// Stable kind tag, used for shape validation and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NextDailyMission { .. } => "next_daily_mission",
            Self::EpicMission { .. } => "epic_mission",
            Self::TowerChallenge { .. } => "tower_challenge",
            Self::DungeonChallenge { .. } => "dungeon_challenge",
            Self::AchievementBatch { .. } => "achievement_batch",
            Self::GoalSuggestions { .. } => "goal_suggestions",
            Self::DifficultyScore { .. } => "difficulty_score",
        }
    }
}
