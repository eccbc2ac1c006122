//! Goals and their categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AttributeKind, GoalId, SkillId};

/// Broad life area a goal belongs to. Drives the attribute bonuses its
/// skill grants on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Fitness,
    Learning,
    Career,
    Creativity,
    Social,
    Mindfulness,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Learning => "learning",
            Self::Career => "career",
            Self::Creativity => "creativity",
            Self::Social => "social",
            Self::Mindfulness => "mindfulness",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fitness" => Some(Self::Fitness),
            "learning" => Some(Self::Learning),
            "career" => Some(Self::Career),
            "creativity" => Some(Self::Creativity),
            "social" => Some(Self::Social),
            "mindfulness" => Some(Self::Mindfulness),
            _ => None,
        }
    }

    /// Attributes raised by one skill level-up in this category (+1 each).
    pub fn attribute_bonuses(&self) -> [AttributeKind; 2] {
        match self {
            Self::Fitness => [AttributeKind::Strength, AttributeKind::Constitution],
            Self::Learning => [AttributeKind::Intelligence, AttributeKind::Wisdom],
            Self::Career => [AttributeKind::Intelligence, AttributeKind::Charisma],
            Self::Creativity => [AttributeKind::Dexterity, AttributeKind::Intelligence],
            Self::Social => [AttributeKind::Charisma, AttributeKind::Wisdom],
            Self::Mindfulness => [AttributeKind::Wisdom, AttributeKind::Constitution],
        }
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SMART-style breakdown captured when the goal is declared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartDetail {
    #[serde(default)]
    pub specific: String,
    #[serde(default)]
    pub measurable: String,
    #[serde(default)]
    pub achievable: String,
    #[serde(default)]
    pub relevant: String,
    #[serde(default)]
    pub time_bound: String,
}

/// A long-term objective. Owns a rank-ordered chain of epic missions and
/// optionally one skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub category: GoalCategory,
    #[serde(default)]
    pub detail: SmartDetail,
    /// 1:1 link to the mastery track for this goal, if one was created.
    pub skill_id: Option<SkillId>,
    pub created_at: DateTime<Utc>,
}
