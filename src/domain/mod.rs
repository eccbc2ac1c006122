//! Core domain types for the progression engine.

mod achievement;
mod challenge;
mod goal;
mod mission;
mod profile;
mod rank;
mod skill;

pub use achievement::{Achievement, AchievementCriteria, CriteriaKind};
pub use challenge::{
    ChallengeRequirement, DungeonChallenge, DungeonState, TowerChallenge, TowerProgress,
};
pub use goal::{Goal, GoalCategory, SmartDetail};
pub use mission::{DailyMission, EpicMission, LastAward, MissionFeedback, ProgressSnapshot};
pub use profile::{AttributeKind, Attributes, ItemInstance, Profile, StreakInfo};
pub use rank::{Rank, RANK_CHAIN};
pub use skill::Skill;

pub type GoalId = u64;
pub type EpicMissionId = u64;
pub type DailyMissionId = u64;
pub type SkillId = u64;
pub type ChallengeId = u64;
