//! Tower challenge ladder: floors, tickets, daily quotas, lockout.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{clock, Engine, ProgressionEvent};
use crate::domain::{ChallengeId, ChallengeRequirement, TowerChallenge};
use crate::error::EngineError;
use crate::generator::{generate_validated, Content, GenerationRequest};
use crate::rewards;

/// Five difficulty tiers across the 1..=100 floor range.
pub fn tier_for_floor(floor: u32) -> u8 {
    (((floor.max(1) - 1) / 20) + 1).min(5) as u8
}

impl Engine {
    /// Generate new challenges up to the daily allowance. Each one is
    /// committed as it arrives, so a mid-batch generation failure keeps
    /// what was already produced; with nothing produced it propagates.
    pub async fn request_tower_challenges(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        self.check_tower_lockout(now)?;
        self.reset_tower_day(now);

        let daily_allowance = self.config.tower.daily_challenges;
        let mut events = Vec::new();

        while self.state.profile.tower.daily_generated < daily_allowance {
            let floor = self.state.profile.tower.floor;
            let request = GenerationRequest::TowerChallenge {
                floor,
                tier: tier_for_floor(floor),
                profile_level: self.state.profile.level,
            };

            let content = match generate_validated(self.generator.as_ref(), request).await {
                Ok(content) => content,
                Err(err) if !events.is_empty() => {
                    warn!(%err, "tower challenge batch stopped early");
                    break;
                }
                Err(err) => return Err(err.into()),
            };

            let Content::TowerChallenge {
                name,
                description,
                difficulty,
                requirements,
            } = content
            else {
                unreachable!("shape validated against request kind");
            };

            let id = self.state.alloc_id();
            let tower = &mut self.state.profile.tower;
            tower.available.push(TowerChallenge {
                id,
                floor,
                name,
                description,
                difficulty,
                requirements: requirements
                    .into_iter()
                    .map(|r| ChallengeRequirement {
                        description: r.description,
                        target: r.target,
                        progress: 0,
                    })
                    .collect(),
            });
            tower.daily_generated += 1;
            debug!(challenge_id = id, floor, "tower challenge generated");
            events.push(ProgressionEvent::TowerChallengeReady { challenge_id: id });
        }

        Ok(events)
    }

    /// Accept an available challenge: spends one ticket and moves it to
    /// the active list, where requirement progress starts counting.
    pub fn accept_tower_challenge(
        &mut self,
        challenge_id: ChallengeId,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        self.check_tower_lockout(now)?;

        let max_active = self.config.tower.max_active as usize;
        let tower = &mut self.state.profile.tower;

        let idx = tower
            .available
            .iter()
            .position(|c| c.id == challenge_id)
            .ok_or_else(|| EngineError::unknown("tower challenge", challenge_id))?;

        if tower.active.len() >= max_active {
            return Err(EngineError::InsufficientResource {
                resource: "active challenge slots",
            });
        }
        if tower.tickets == 0 {
            return Err(EngineError::InsufficientResource { resource: "tickets" });
        }

        tower.tickets -= 1;
        let challenge = tower.available.remove(idx);
        debug!(challenge_id, "tower challenge accepted");
        tower.active.push(challenge);
        Ok(())
    }

    /// Record progress on one requirement of an active challenge. When
    /// every requirement is met the challenge completes: rewards flow,
    /// the floor counter advances, and on quota the floor itself does.
    pub fn advance_tower_requirement(
        &mut self,
        challenge_id: ChallengeId,
        requirement_index: usize,
        amount: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        self.check_tower_lockout(now)?;

        let (completed, difficulty) = {
            let tower = &mut self.state.profile.tower;
            let challenge = tower
                .active
                .iter_mut()
                .find(|c| c.id == challenge_id)
                .ok_or_else(|| EngineError::unknown("tower challenge", challenge_id))?;

            let requirement = challenge
                .requirements
                .get_mut(requirement_index)
                .ok_or_else(|| {
                    EngineError::InvariantViolation(format!(
                        "challenge {challenge_id} has no requirement {requirement_index}"
                    ))
                })?;

            requirement.progress = requirement
                .progress
                .saturating_add(amount)
                .min(requirement.target);
            (challenge.is_complete(), challenge.difficulty)
        };

        let mut events = Vec::new();
        if completed {
            let tower = &mut self.state.profile.tower;
            tower.active.retain(|c| c.id != challenge_id);
            tower.floor_completions += 1;
            info!(challenge_id, "tower challenge completed");
            events.push(ProgressionEvent::TowerChallengeCompleted { challenge_id });

            let reward = rewards::mission_reward(
                difficulty,
                self.state.profile.level,
                &self.config.rewards,
            );
            events.extend(self.award_profile_xp(reward.xp, "tower challenge"));
            self.state.profile.fragments += reward.fragments;
            events.push(ProgressionEvent::FragmentsAwarded {
                amount: reward.fragments,
            });

            let quota = self.config.tower.floor_quota;
            let max_floor = self.config.tower.max_floor;
            let tower = &mut self.state.profile.tower;
            if tower.floor_completions >= quota && tower.floor < max_floor {
                tower.floor += 1;
                tower.highest_floor = tower.highest_floor.max(tower.floor);
                tower.floor_completions = 0;
                // A fresh floor comes with a fresh generation allowance.
                tower.daily_generated = 0;
                // Unaccepted challenges from the old floor are stale.
                tower.available.clear();
                info!(floor = tower.floor, "tower floor advanced");
                events.push(ProgressionEvent::TowerFloorAdvanced { floor: tower.floor });
            }

            events.extend(self.evaluate_achievements(now));
        }

        Ok(events)
    }

    /// Enter the lockout state. The defeat condition itself lives
    /// outside the engine; this just arms the timestamp gate.
    pub fn enter_tower_lockout(&mut self, until: DateTime<Utc>) {
        self.state.profile.tower.lockout_until = Some(until);
    }

    fn check_tower_lockout(&mut self, now: DateTime<Utc>) -> Result<(), EngineError> {
        if let Some(until) = self.state.profile.tower.lockout_until {
            if now < until {
                return Err(EngineError::CooldownActive { until });
            }
            self.state.profile.tower.lockout_until = None;
        }
        Ok(())
    }

    /// Reset daily counters and restore tickets on the first interaction
    /// of each local day.
    fn reset_tower_day(&mut self, now: DateTime<Utc>) {
        let today = clock::local_day(now);
        let tower = &mut self.state.profile.tower;
        if tower.daily_reset_day.as_deref() != Some(today.as_str()) {
            tower.daily_reset_day = Some(today);
            tower.daily_generated = 0;
            tower.tickets = self.config.tower.ticket_cap;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(tier_for_floor(1), 1);
        assert_eq!(tier_for_floor(20), 1);
        assert_eq!(tier_for_floor(21), 2);
        assert_eq!(tier_for_floor(60), 3);
        assert_eq!(tier_for_floor(61), 4);
        assert_eq!(tier_for_floor(100), 5);
    }
}
