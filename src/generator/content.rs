//! Typed generation responses, validated at the boundary.

use serde::{Deserialize, Serialize};

use super::GenerationError;
use crate::domain::{CriteriaKind, GoalCategory};

/// Requirement template inside a generated tower challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementSpec {
    pub description: String,
    pub target: u32,
}

/// Achievement template inside a generated batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: CriteriaKind,
    pub target: u32,
    pub category: Option<GoalCategory>,
}

/// Structured content returned by the generator, one variant per
/// request kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Content {
    DailyMission {
        name: String,
        description: String,
        difficulty: u8,
    },
    EpicMission {
        title: String,
    },
    TowerChallenge {
        name: String,
        description: String,
        difficulty: u8,
        requirements: Vec<RequirementSpec>,
    },
    DungeonChallenge {
        name: String,
        description: String,
        difficulty: u8,
    },
    AchievementBatch(Vec<AchievementSpec>),
    GoalSuggestions(Vec<String>),
    Difficulty(u8),
}

impl Content {
    fn kind(&self) -> &'static str {
        match self {
            Self::DailyMission { .. } => "next_daily_mission",
            Self::EpicMission { .. } => "epic_mission",
            Self::TowerChallenge { .. } => "tower_challenge",
            Self::DungeonChallenge { .. } => "dungeon_challenge",
            Self::AchievementBatch(_) => "achievement_batch",
            Self::GoalSuggestions(_) => "goal_suggestions",
            Self::Difficulty(_) => "difficulty_score",
        }
    }

    /// Check that this content matches the requested kind and satisfies
    /// the shape contract (non-empty names, difficulty 1..=10, targets
    /// at least 1).
    pub fn validate(&self, expected_kind: &str) -> Result<(), GenerationError> {
        if self.kind() != expected_kind {
            return Err(GenerationError::Shape(format!(
                "expected {expected_kind}, got {}",
                self.kind()
            )));
        }

        match self {
            Self::DailyMission {
                name, difficulty, ..
            } => {
                require_name(name)?;
                require_difficulty(*difficulty)?;
            }
            Self::EpicMission { title } => require_name(title)?,
            Self::TowerChallenge {
                name,
                difficulty,
                requirements,
                ..
            } => {
                require_name(name)?;
                require_difficulty(*difficulty)?;
                if requirements.is_empty() {
                    return Err(GenerationError::Shape(
                        "tower challenge has no requirements".into(),
                    ));
                }
                for req in requirements {
                    if req.target == 0 {
                        return Err(GenerationError::Shape(
                            "requirement target must be at least 1".into(),
                        ));
                    }
                }
            }
            Self::DungeonChallenge {
                name, difficulty, ..
            } => {
                require_name(name)?;
                require_difficulty(*difficulty)?;
            }
            Self::AchievementBatch(specs) => {
                if specs.is_empty() {
                    return Err(GenerationError::Shape("empty achievement batch".into()));
                }
                for spec in specs {
                    require_name(&spec.name)?;
                    if spec.id.is_empty() {
                        return Err(GenerationError::Shape("achievement id is empty".into()));
                    }
                    if spec.target == 0 {
                        return Err(GenerationError::Shape(
                            "achievement target must be at least 1".into(),
                        ));
                    }
                }
            }
            Self::GoalSuggestions(suggestions) => {
                if suggestions.is_empty() {
                    return Err(GenerationError::Shape("no goal suggestions".into()));
                }
            }
            Self::Difficulty(score) => require_difficulty(*score)?,
        }

        Ok(())
    }
}

fn require_name(name: &str) -> Result<(), GenerationError> {
    if name.trim().is_empty() {
        Err(GenerationError::Shape("empty name".into()))
    } else {
        Ok(())
    }
}

fn require_difficulty(score: u8) -> Result<(), GenerationError> {
    if (1..=10).contains(&score) {
        Ok(())
    } else {
        Err(GenerationError::Shape(format!(
            "difficulty {score} outside 1..=10"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mismatch_rejected() {
        let content = Content::Difficulty(5);
        assert!(content.validate("next_daily_mission").is_err());
        assert!(content.validate("difficulty_score").is_ok());
    }

    #[test]
    fn test_difficulty_range_enforced() {
        assert!(Content::Difficulty(0).validate("difficulty_score").is_err());
        assert!(Content::Difficulty(11).validate("difficulty_score").is_err());
        assert!(Content::Difficulty(10).validate("difficulty_score").is_ok());
    }

    #[test]
    fn test_empty_mission_name_rejected() {
        let content = Content::DailyMission {
            name: "  ".into(),
            description: "x".into(),
            difficulty: 3,
        };
        assert!(content.validate("next_daily_mission").is_err());
    }

    #[test]
    fn test_tower_challenge_requires_requirements() {
        let content = Content::TowerChallenge {
            name: "Trial".into(),
            description: "A trial".into(),
            difficulty: 4,
            requirements: vec![],
        };
        assert!(content.validate("tower_challenge").is_err());
    }
}
