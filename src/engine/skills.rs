//! Skill progression: XP, level caps, attribute bonuses, decay.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Engine, ProgressionEvent};
use crate::domain::{ProgressSnapshot, SkillId};
use crate::error::EngineError;

impl Engine {
    /// Add XP to a skill and settle level-ups. The threshold grows
    /// geometrically; each level-up grants +1 to the two attributes
    /// mapped from the skill's category. At the level cap, surplus XP
    /// is discarded. Refreshes `last_activity`.
    pub(super) fn award_skill_xp(
        &mut self,
        skill_id: SkillId,
        amount: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let growth = self.config.skills.growth_factor;
        let max_level = self.config.skills.max_level;

        let skill = self
            .state
            .skill_mut(skill_id)
            .ok_or_else(|| EngineError::unknown("skill", skill_id))?;

        skill.last_activity = now;
        if amount == 0 {
            return Ok(Vec::new());
        }

        skill.xp += amount;
        let mut events = vec![ProgressionEvent::SkillXpAwarded { skill_id, amount }];

        let mut levels_gained = 0u32;
        while skill.xp >= skill.xp_to_next_level && skill.level < max_level {
            skill.xp -= skill.xp_to_next_level;
            skill.level += 1;
            levels_gained += 1;
            skill.xp_to_next_level =
                ((skill.xp_to_next_level as f64) * growth).round() as u32;
        }

        // Capped: discard the surplus, keep the invariant xp < threshold.
        if skill.level >= max_level && skill.xp >= skill.xp_to_next_level {
            skill.xp = skill.xp_to_next_level.saturating_sub(1);
        }

        let new_level = skill.level;
        let category = skill.category;

        if levels_gained > 0 {
            debug!(skill_id, new_level, "skill level up");
            let bonuses = category.attribute_bonuses();
            for _ in 0..levels_gained {
                for attribute in bonuses {
                    self.state.profile.attributes.add(attribute, 1);
                }
            }
            // Constitution may have grown the HP cap; keep current in range.
            let max_hp = self.state.profile.max_hp(&self.config.profile);
            self.state.profile.hp_current = self.state.profile.hp_current.min(max_hp);

            events.push(ProgressionEvent::SkillLevelUp {
                skill_id,
                new_level,
                bonuses: bonuses.to_vec(),
            });
        }

        Ok(events)
    }

    /// Restore a skill's counters to a pre-completion snapshot, used by
    /// the single-level undo. Reversed level-ups take their +1 attribute
    /// bonuses back with them.
    pub(super) fn revert_skill_progress(&mut self, skill_id: SkillId, before: ProgressSnapshot) {
        let Some(skill) = self.state.skill_mut(skill_id) else {
            return;
        };
        let levels_reverted = skill.level.saturating_sub(before.level);
        let category = skill.category;

        skill.level = before.level;
        skill.xp = before.xp;
        skill.xp_to_next_level = before.xp_to_next_level;

        if levels_reverted > 0 {
            let bonuses = category.attribute_bonuses();
            for _ in 0..levels_reverted {
                for attribute in bonuses {
                    self.state.profile.attributes.remove(attribute, 1);
                }
            }
            // Constitution may have shrunk the HP cap back down.
            let max_hp = self.state.profile.max_hp(&self.config.profile);
            self.state.profile.hp_current = self.state.profile.hp_current.min(max_hp);
        }
    }

    /// Apply corruption to every skill left inactive past the decay
    /// threshold. XP floors at 0; the level is never reduced.
    pub fn apply_skill_decay(&mut self, now: DateTime<Utc>) -> Vec<ProgressionEvent> {
        let decay_days = self.config.skills.decay_days;
        let decay_xp = self.config.skills.decay_xp;
        let mut events = Vec::new();

        for skill in &mut self.state.skills {
            if skill.days_inactive(now) > decay_days && skill.xp > 0 {
                let lost = skill.xp.min(decay_xp);
                skill.xp -= lost;
                debug!(skill_id = skill.id, lost, "skill decayed");
                events.push(ProgressionEvent::SkillDecayed {
                    skill_id: skill.id,
                    amount: lost,
                });
            }
        }

        events
    }

    /// Skills past the at-risk threshold but not necessarily decayed
    /// yet. Warning state only; no numeric effect.
    pub fn skills_at_risk(&self, now: DateTime<Utc>) -> Vec<SkillId> {
        let at_risk_days = self.config.skills.at_risk_days;
        self.state
            .skills
            .iter()
            .filter(|s| s.days_inactive(now) > at_risk_days)
            .map(|s| s.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;
    use crate::domain::{GoalCategory, Skill};
    use crate::generator::TemplateGenerator;
    use crate::state::GameState;
    use chrono::Duration;

    fn engine_with_skill() -> (Engine, SkillId) {
        let config = BalanceConfig::default();
        let now = Utc::now();
        let mut state = GameState::new_profile("Test", &config, now);
        let skill_id = state.alloc_id();
        state.skills.push(Skill::new(
            skill_id,
            0,
            "Piano",
            GoalCategory::Creativity,
            config.skills.initial_xp_to_next,
            now,
        ));
        (
            Engine::new(state, config, Box::new(TemplateGenerator)),
            skill_id,
        )
    }

    #[test]
    fn test_skill_levelup_applies_attribute_bonuses() {
        let (mut engine, skill_id) = engine_with_skill();
        let now = Utc::now();
        // 50 clears level 1 exactly.
        let events = engine.award_skill_xp(skill_id, 50, now).unwrap();

        let skill = engine.state().skill(skill_id).unwrap();
        assert_eq!(skill.level, 2);
        assert_eq!(skill.xp, 0);
        assert_eq!(skill.xp_to_next_level, 75);

        // Creativity maps to dexterity + intelligence.
        assert_eq!(engine.state().profile.attributes.dexterity, 1);
        assert_eq!(engine.state().profile.attributes.intelligence, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressionEvent::SkillLevelUp { new_level: 2, .. })));
    }

    #[test]
    fn test_skill_level_never_exceeds_cap() {
        let mut config = BalanceConfig::default();
        config.skills.max_level = 5;
        let now = Utc::now();
        let mut state = GameState::new_profile("Test", &config, now);
        let skill_id = state.alloc_id();
        state.skills.push(Skill::new(
            skill_id,
            0,
            "Piano",
            GoalCategory::Creativity,
            config.skills.initial_xp_to_next,
            now,
        ));
        let mut engine = Engine::new(state, config, Box::new(TemplateGenerator));

        // Far more XP than the curve to level 5 holds.
        engine.award_skill_xp(skill_id, 100_000, now).unwrap();

        let skill = engine.state().skill(skill_id).unwrap();
        assert_eq!(skill.level, 5);
        assert!(skill.xp < skill.xp_to_next_level);

        // More XP at the cap is discarded, never carried.
        engine.award_skill_xp(skill_id, 100_000, now).unwrap();
        let after = engine.state().skill(skill_id).unwrap();
        assert_eq!(after.level, 5);
        assert!(after.xp < after.xp_to_next_level);
    }

    #[test]
    fn test_revert_skill_progress_reverses_levelup_bonuses() {
        let (mut engine, skill_id) = engine_with_skill();
        let now = Utc::now();
        let before = {
            let skill = engine.state().skill(skill_id).unwrap();
            ProgressSnapshot {
                level: skill.level,
                xp: skill.xp,
                xp_to_next_level: skill.xp_to_next_level,
            }
        };

        engine.award_skill_xp(skill_id, 50, now).unwrap();
        assert_eq!(engine.state().skill(skill_id).unwrap().level, 2);
        assert_eq!(engine.state().profile.attributes.dexterity, 1);

        engine.revert_skill_progress(skill_id, before);
        let skill = engine.state().skill(skill_id).unwrap();
        assert_eq!(skill.level, 1);
        assert_eq!(skill.xp, 0);
        assert_eq!(skill.xp_to_next_level, 50);
        assert_eq!(engine.state().profile.attributes.dexterity, 0);
        assert_eq!(engine.state().profile.attributes.intelligence, 0);
    }

    #[test]
    fn test_decay_after_threshold_floored_at_zero() {
        let (mut engine, skill_id) = engine_with_skill();
        let now = Utc::now();
        engine.award_skill_xp(skill_id, 20, now).unwrap();

        // Not yet past the threshold: nothing happens.
        let almost = now + Duration::days(14);
        assert!(engine.apply_skill_decay(almost).is_empty());

        let later = now + Duration::days(15);
        let events = engine.apply_skill_decay(later);
        assert_eq!(events.len(), 1);
        let skill = engine.state().skill(skill_id).unwrap();
        assert_eq!(skill.xp, 5); // 20 - 15
        assert_eq!(skill.level, 1); // level untouched

        // Second application floors at zero and never goes negative.
        let events = engine.apply_skill_decay(later);
        assert_eq!(events.len(), 1);
        assert_eq!(engine.state().skill(skill_id).unwrap().xp, 0);
        assert!(engine.apply_skill_decay(later).is_empty());
        assert_eq!(engine.state().skill(skill_id).unwrap().level, 1);
    }

    #[test]
    fn test_at_risk_is_warning_only() {
        let (mut engine, skill_id) = engine_with_skill();
        let now = Utc::now();
        engine.award_skill_xp(skill_id, 20, now).unwrap();

        let at_risk_time = now + Duration::days(8);
        assert_eq!(engine.skills_at_risk(at_risk_time), vec![skill_id]);
        // No numeric effect at the warning threshold.
        assert!(engine.apply_skill_decay(at_risk_time).is_empty());
        assert_eq!(engine.state().skill(skill_id).unwrap().xp, 20);
    }

    #[test]
    fn test_activity_refreshes_decay_clock() {
        let (mut engine, skill_id) = engine_with_skill();
        let now = Utc::now();
        engine.award_skill_xp(skill_id, 20, now).unwrap();

        let day10 = now + Duration::days(10);
        engine.award_skill_xp(skill_id, 5, day10).unwrap();

        // 15 days after creation but only 5 after last activity.
        let day15 = now + Duration::days(15);
        assert!(engine.apply_skill_decay(day15).is_empty());
    }
}
