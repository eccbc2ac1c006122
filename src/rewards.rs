//! Reward calculator.
//!
//! Converts a 1..=10 difficulty estimate plus contextual level into
//! XP/fragment rewards. The formulas are linear and tunable; the
//! clamping bounds are the hard contract. Outputs are never zero,
//! negative, or unbounded.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RewardSettings;
use crate::generator::{generate_validated, Content, ContentGenerator, GenerationRequest};

/// A sized mission reward, baked into the mission at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub fragments: u32,
}

/// Profile-facing reward for a daily mission.
pub fn mission_reward(difficulty: u8, user_level: u32, settings: &RewardSettings) -> Reward {
    let d = f64::from(difficulty);
    let level = f64::from(user_level);

    let xp = settings.xp_base + d * settings.xp_per_difficulty + level * settings.xp_per_level;
    let fragments =
        settings.frag_base + d * settings.frag_per_difficulty + level * settings.frag_per_level;

    Reward {
        xp: clamp_round(xp, settings.xp_min, settings.xp_max),
        fragments: clamp_round(fragments, settings.frag_min, settings.frag_max),
    }
}

/// Skill-facing XP for a daily mission or dungeon clear. A level divisor
/// of `max(1, skill_level / 2)` dampens reward growth as the skill
/// matures: fast early growth, slow mastery.
pub fn skill_reward(difficulty: u8, skill_level: u32, settings: &RewardSettings) -> u32 {
    let d = f64::from(difficulty);
    let divisor = (f64::from(skill_level) / 2.0).max(1.0);
    let raw = (settings.skill_xp_base + d * settings.skill_xp_per_difficulty) / divisor;
    clamp_round(raw, settings.skill_xp_min, settings.skill_xp_max)
}

/// Ask the generator for a difficulty score. Any generation failure
/// degrades to the configured fallback; this call never propagates an
/// error and never blocks already-earned rewards.
pub async fn assess_difficulty(
    generator: &dyn ContentGenerator,
    text: &str,
    settings: &RewardSettings,
) -> u8 {
    let request = GenerationRequest::DifficultyScore {
        text: text.to_string(),
    };
    match generate_validated(generator, request).await {
        Ok(Content::Difficulty(score)) => score,
        Ok(other) => {
            warn!(kind = ?other, "difficulty request returned unexpected content, using fallback");
            settings.fallback_difficulty
        }
        Err(err) => {
            warn!(error = %err, "difficulty assessment failed, using fallback");
            settings.fallback_difficulty
        }
    }
}

fn clamp_round(value: f64, min: u32, max: u32) -> u32 {
    (value.round().max(0.0) as u32).clamp(min, max)
}
