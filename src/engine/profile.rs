//! Profile progression: XP, level-ups, streaks, currencies.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{clock, Engine, ProgressionEvent};
use crate::domain::Rank;
use crate::error::EngineError;

impl Engine {
    /// Add XP and settle level-ups. Profile leveling has no cap; the
    /// threshold grows by a fixed additive step per level.
    pub(super) fn award_profile_xp(&mut self, amount: u32, reason: &str) -> Vec<ProgressionEvent> {
        if amount == 0 {
            return Vec::new();
        }

        let step = self.config.profile.xp_step;
        let profile = &mut self.state.profile;
        let old_level = profile.level;

        profile.xp += amount;
        let mut events = vec![ProgressionEvent::XpAwarded {
            amount,
            reason: reason.to_string(),
        }];

        while profile.xp >= profile.xp_to_next_level {
            profile.xp -= profile.xp_to_next_level;
            profile.xp_to_next_level += step;
            profile.level += 1;
        }

        if profile.level > old_level {
            debug!(old_level, new_level = profile.level, "profile level up");
            // Level-up restores HP to the (possibly grown) cap.
            profile.hp_current = profile.max_hp(&self.config.profile);
            events.push(ProgressionEvent::LevelUp {
                old_level,
                new_level: profile.level,
                title: Rank::for_level(profile.level).title().to_string(),
            });
        }

        events
    }

    /// Extend the daily streak for activity at `now`. Counted once per
    /// local day; continues from yesterday, otherwise resets to 1.
    pub(super) fn update_streak(&mut self, now: DateTime<Utc>) -> Vec<ProgressionEvent> {
        let today = clock::local_day(now);
        let yesterday = clock::previous_local_day(now);
        let streak = &mut self.state.profile.streak;

        if streak.last_activity_day.as_deref() == Some(today.as_str()) {
            return Vec::new(); // Already counted
        }

        let new_count = if streak.last_activity_day.as_deref() == Some(yesterday.as_str()) {
            streak.current + 1
        } else {
            1 // Reset
        };

        streak.current = new_count;
        streak.best = streak.best.max(new_count);
        streak.last_activity_day = Some(today);

        vec![ProgressionEvent::StreakExtended { count: new_count }]
    }

    /// Spend soft currency. Purely rejects when the balance is short.
    pub fn spend_fragments(&mut self, amount: u32) -> Result<(), EngineError> {
        let profile = &mut self.state.profile;
        if profile.fragments < amount {
            return Err(EngineError::InsufficientResource {
                resource: "fragments",
            });
        }
        profile.fragments -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;
    use crate::generator::TemplateGenerator;
    use crate::state::GameState;
    use chrono::TimeZone;

    fn engine() -> Engine {
        let config = BalanceConfig::default();
        let state = GameState::new_profile("Test", &config, Utc::now());
        Engine::new(state, config, Box::new(TemplateGenerator))
    }

    #[test]
    fn test_profile_leveling_terminates_and_settles() {
        let mut engine = engine();
        // 100 + 125 + 150 = 375 clears exactly three levels.
        let events = engine.award_profile_xp(375, "test");
        let profile = &engine.state().profile;
        assert_eq!(profile.level, 4);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.xp_to_next_level, 175);
        assert!(profile.xp < profile.xp_to_next_level);
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressionEvent::LevelUp { new_level: 4, .. })));
    }

    #[test]
    fn test_no_levelup_below_threshold() {
        let mut engine = engine();
        let events = engine.award_profile_xp(20, "test");
        assert_eq!(engine.state().profile.level, 1);
        assert_eq!(engine.state().profile.xp, 20);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_repeated_awards_never_leave_xp_over_threshold() {
        let mut engine = engine();
        for _ in 0..200 {
            engine.award_profile_xp(37, "test");
            let p = &engine.state().profile;
            assert!(p.xp < p.xp_to_next_level);
        }
    }

    #[test]
    fn test_streak_extends_and_resets() {
        let mut engine = engine();
        let day1 = chrono::Local
            .with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
            .earliest()
            .unwrap()
            .to_utc();
        let day1_later = day1 + chrono::Duration::hours(5);
        let day2 = day1 + chrono::Duration::days(1);
        let day5 = day1 + chrono::Duration::days(4);

        assert_eq!(engine.update_streak(day1).len(), 1);
        assert_eq!(engine.state().profile.streak.current, 1);

        // Same day counts once.
        assert!(engine.update_streak(day1_later).is_empty());

        assert_eq!(engine.update_streak(day2).len(), 1);
        assert_eq!(engine.state().profile.streak.current, 2);

        // A gap resets to 1 but keeps the best.
        engine.update_streak(day5);
        assert_eq!(engine.state().profile.streak.current, 1);
        assert_eq!(engine.state().profile.streak.best, 2);
    }

    #[test]
    fn test_spend_fragments_guard() {
        let mut engine = engine();
        assert!(matches!(
            engine.spend_fragments(10),
            Err(EngineError::InsufficientResource { .. })
        ));
        engine.state.profile.fragments = 10;
        engine.spend_fragments(7).unwrap();
        assert_eq!(engine.state().profile.fragments, 3);
    }
}
