//! Balance settings types.

use serde::{Deserialize, Serialize};

/// Profile leveling and derived-stat settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// XP threshold for the first level-up.
    #[serde(default = "default_initial_xp_to_next")]
    pub initial_xp_to_next: u32,

    /// Additive growth of the threshold per level-up. Profile leveling
    /// has no cap.
    #[serde(default = "default_xp_step")]
    pub xp_step: u32,

    /// Base HP before constitution bonuses.
    #[serde(default = "default_hp_base")]
    pub hp_base: u32,

    /// HP per point of constitution.
    #[serde(default = "default_hp_per_constitution")]
    pub hp_per_constitution: u32,

    /// Crystals a fresh profile starts with.
    #[serde(default = "default_starting_crystals")]
    pub starting_crystals: u32,
}

/// Skill leveling and decay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSettings {
    /// XP threshold for a new skill's first level-up.
    #[serde(default = "default_skill_initial_xp_to_next")]
    pub initial_xp_to_next: u32,

    /// Multiplicative growth of the threshold per level-up.
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,

    /// Hard level cap; XP beyond it is discarded.
    #[serde(default = "default_max_level")]
    pub max_level: u32,

    /// Days of inactivity before decay applies.
    #[serde(default = "default_decay_days")]
    pub decay_days: i64,

    /// Days of inactivity before the warning flag (no numeric effect).
    #[serde(default = "default_at_risk_days")]
    pub at_risk_days: i64,

    /// XP lost per decay application, floored at 0.
    #[serde(default = "default_decay_xp")]
    pub decay_xp: u32,
}

/// Mission chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionSettings {
    /// Daily missions an epic mission must accumulate (all completed)
    /// before it counts as done.
    #[serde(default = "default_daily_quota")]
    pub daily_quota: u32,
}

/// Reward formula constants. All outputs are clamped; the clamping
/// bounds are the hard contract, the rest is tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardSettings {
    #[serde(default = "default_xp_base")]
    pub xp_base: f64,
    #[serde(default = "default_xp_per_difficulty")]
    pub xp_per_difficulty: f64,
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: f64,
    #[serde(default = "default_xp_min")]
    pub xp_min: u32,
    #[serde(default = "default_xp_max")]
    pub xp_max: u32,

    #[serde(default = "default_frag_base")]
    pub frag_base: f64,
    #[serde(default = "default_frag_per_difficulty")]
    pub frag_per_difficulty: f64,
    #[serde(default = "default_frag_per_level")]
    pub frag_per_level: f64,
    #[serde(default = "default_frag_min")]
    pub frag_min: u32,
    #[serde(default = "default_frag_max")]
    pub frag_max: u32,

    #[serde(default = "default_skill_xp_base")]
    pub skill_xp_base: f64,
    #[serde(default = "default_skill_xp_per_difficulty")]
    pub skill_xp_per_difficulty: f64,
    #[serde(default = "default_skill_xp_min")]
    pub skill_xp_min: u32,
    #[serde(default = "default_skill_xp_max")]
    pub skill_xp_max: u32,

    /// Difficulty assumed when the generator cannot score a mission.
    #[serde(default = "default_fallback_difficulty")]
    pub fallback_difficulty: u8,
}

/// Tower ladder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerSettings {
    /// Challenges to complete before the floor advances.
    #[serde(default = "default_floor_quota")]
    pub floor_quota: u32,

    /// New challenges that may be generated per local day.
    #[serde(default = "default_daily_challenges")]
    pub daily_challenges: u32,

    /// Tickets restored at the daily reset; accepting spends one.
    #[serde(default = "default_ticket_cap")]
    pub ticket_cap: u32,

    /// Concurrently accepted challenge cap.
    #[serde(default = "default_max_active")]
    pub max_active: u32,

    /// Top of the tower.
    #[serde(default = "default_max_floor")]
    pub max_floor: u32,
}

/// Dungeon ladder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonSettings {
    /// Shared profile-wide pool of lives consumed by giving up.
    #[serde(default = "default_max_lives")]
    pub max_lives: u32,
}

fn default_initial_xp_to_next() -> u32 {
    100
}

fn default_xp_step() -> u32 {
    25
}

fn default_hp_base() -> u32 {
    50
}

fn default_hp_per_constitution() -> u32 {
    5
}

fn default_starting_crystals() -> u32 {
    1
}

fn default_skill_initial_xp_to_next() -> u32 {
    50
}

fn default_growth_factor() -> f64 {
    1.5
}

fn default_max_level() -> u32 {
    50
}

fn default_decay_days() -> i64 {
    14
}

fn default_at_risk_days() -> i64 {
    7
}

fn default_decay_xp() -> u32 {
    15
}

fn default_daily_quota() -> u32 {
    10
}

fn default_xp_base() -> f64 {
    15.0
}

fn default_xp_per_difficulty() -> f64 {
    3.0
}

fn default_xp_per_level() -> f64 {
    0.5
}

fn default_xp_min() -> u32 {
    5
}

fn default_xp_max() -> u32 {
    150
}

fn default_frag_base() -> f64 {
    2.0
}

fn default_frag_per_difficulty() -> f64 {
    0.6
}

fn default_frag_per_level() -> f64 {
    0.1
}

fn default_frag_min() -> u32 {
    1
}

fn default_frag_max() -> u32 {
    25
}

fn default_skill_xp_base() -> f64 {
    10.0
}

fn default_skill_xp_per_difficulty() -> f64 {
    4.0
}

fn default_skill_xp_min() -> u32 {
    5
}

fn default_skill_xp_max() -> u32 {
    100
}

fn default_fallback_difficulty() -> u8 {
    4
}

fn default_floor_quota() -> u32 {
    3
}

fn default_daily_challenges() -> u32 {
    3
}

fn default_ticket_cap() -> u32 {
    3
}

fn default_max_active() -> u32 {
    3
}

fn default_max_floor() -> u32 {
    100
}

fn default_max_lives() -> u32 {
    5
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            initial_xp_to_next: default_initial_xp_to_next(),
            xp_step: default_xp_step(),
            hp_base: default_hp_base(),
            hp_per_constitution: default_hp_per_constitution(),
            starting_crystals: default_starting_crystals(),
        }
    }
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            initial_xp_to_next: default_skill_initial_xp_to_next(),
            growth_factor: default_growth_factor(),
            max_level: default_max_level(),
            decay_days: default_decay_days(),
            at_risk_days: default_at_risk_days(),
            decay_xp: default_decay_xp(),
        }
    }
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            daily_quota: default_daily_quota(),
        }
    }
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            xp_base: default_xp_base(),
            xp_per_difficulty: default_xp_per_difficulty(),
            xp_per_level: default_xp_per_level(),
            xp_min: default_xp_min(),
            xp_max: default_xp_max(),
            frag_base: default_frag_base(),
            frag_per_difficulty: default_frag_per_difficulty(),
            frag_per_level: default_frag_per_level(),
            frag_min: default_frag_min(),
            frag_max: default_frag_max(),
            skill_xp_base: default_skill_xp_base(),
            skill_xp_per_difficulty: default_skill_xp_per_difficulty(),
            skill_xp_min: default_skill_xp_min(),
            skill_xp_max: default_skill_xp_max(),
            fallback_difficulty: default_fallback_difficulty(),
        }
    }
}

impl Default for TowerSettings {
    fn default() -> Self {
        Self {
            floor_quota: default_floor_quota(),
            daily_challenges: default_daily_challenges(),
            ticket_cap: default_ticket_cap(),
            max_active: default_max_active(),
            max_floor: default_max_floor(),
        }
    }
}

impl Default for DungeonSettings {
    fn default() -> Self {
        Self {
            max_lives: default_max_lives(),
        }
    }
}
