//! The player profile and its derived stats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Achievement, Rank, TowerProgress};
use crate::config::ProfileSettings;

/// One of the six profile attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Strength,
    Intelligence,
    Dexterity,
    Constitution,
    Wisdom,
    Charisma,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intelligence => "intelligence",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }
}

/// Aggregated attribute scores, fed by skill level-ups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub intelligence: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub wisdom: u32,
    pub charisma: u32,
}

impl Attributes {
    pub fn add(&mut self, kind: AttributeKind, amount: u32) {
        let slot = match kind {
            AttributeKind::Strength => &mut self.strength,
            AttributeKind::Intelligence => &mut self.intelligence,
            AttributeKind::Dexterity => &mut self.dexterity,
            AttributeKind::Constitution => &mut self.constitution,
            AttributeKind::Wisdom => &mut self.wisdom,
            AttributeKind::Charisma => &mut self.charisma,
        };
        *slot += amount;
    }

    /// Take back previously granted points, flooring at 0.
    pub fn remove(&mut self, kind: AttributeKind, amount: u32) {
        let slot = match kind {
            AttributeKind::Strength => &mut self.strength,
            AttributeKind::Intelligence => &mut self.intelligence,
            AttributeKind::Dexterity => &mut self.dexterity,
            AttributeKind::Constitution => &mut self.constitution,
            AttributeKind::Wisdom => &mut self.wisdom,
            AttributeKind::Charisma => &mut self.charisma,
        };
        *slot = slot.saturating_sub(amount);
    }

    pub fn get(&self, kind: AttributeKind) -> u32 {
        match kind {
            AttributeKind::Strength => self.strength,
            AttributeKind::Intelligence => self.intelligence,
            AttributeKind::Dexterity => self.dexterity,
            AttributeKind::Constitution => self.constitution,
            AttributeKind::Wisdom => self.wisdom,
            AttributeKind::Charisma => self.charisma,
        }
    }
}

/// Daily activity streak, tracked on local calendar days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    /// Local day ("%Y-%m-%d") of the last counted activity.
    pub last_activity_day: Option<String>,
}

/// An owned shop item instance. Purchase flows live outside the engine;
/// this is the ledger entry only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: String,
    pub name: String,
    pub acquired_at: DateTime<Utc>,
}

/// One per user. Mutated only through the engine's entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub level: u32,
    /// XP within the current level; always < `xp_to_next_level` once
    /// leveling settles.
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub attributes: Attributes,
    pub streak: StreakInfo,
    /// Soft currency earned from missions.
    pub fragments: u32,
    /// Consumable resource for force-starting dungeons.
    pub crystals: u32,
    pub hp_current: u32,
    pub dungeon_lives: u32,
    pub max_dungeon_lives: u32,
    #[serde(default)]
    pub inventory: Vec<ItemInstance>,
    pub tower: TowerProgress,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Rank is a pure function of level, never stored.
    pub fn rank(&self) -> Rank {
        Rank::for_level(self.level)
    }

    pub fn title(&self) -> &'static str {
        self.rank().title()
    }

    /// HP cap derived from constitution.
    pub fn max_hp(&self, settings: &ProfileSettings) -> u32 {
        settings.hp_base + self.attributes.constitution * settings.hp_per_constitution
    }
}
