//! Dungeon challenge ladders: per-skill rooms, shared lives, crystals.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{Engine, ProgressionEvent};
use crate::domain::{DungeonChallenge, DungeonState, SkillId};
use crate::error::EngineError;
use crate::generator::{generate_validated, Content, GenerationRequest};
use crate::rewards;

impl Engine {
    /// Open a skill's dungeon, e.g. on an accepted invitation. Refused
    /// if it is already open.
    pub fn open_dungeon(
        &mut self,
        skill_id: SkillId,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        if self.state.skill(skill_id).is_none() {
            return Err(EngineError::unknown("skill", skill_id));
        }
        if self.state.dungeon(skill_id).is_some() {
            return Err(EngineError::InvariantViolation(
                "dungeon is already open for this skill".into(),
            ));
        }
        self.state.dungeons.push(DungeonState::new(skill_id, now));
        info!(skill_id, "dungeon opened");
        Ok(())
    }

    /// Force-start a skill's dungeon outside the invitation flow by
    /// spending one crystal. The decrement and the open are atomic:
    /// the crystal is only consumed when the open succeeds.
    pub fn open_dungeon_with_crystal(
        &mut self,
        skill_id: SkillId,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        if self.state.profile.crystals == 0 {
            return Err(EngineError::InsufficientResource { resource: "crystals" });
        }
        self.open_dungeon(skill_id, now)?;
        self.state.profile.crystals -= 1;
        Ok(())
    }

    /// Generate a challenge for the skill's current room, scaled by the
    /// room number and the skill's level. One challenge at a time.
    pub async fn request_dungeon_challenge(
        &mut self,
        skill_id: SkillId,
        _now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let (room, skill_name, skill_level) = {
            let dungeon = self
                .state
                .dungeon(skill_id)
                .ok_or_else(|| EngineError::unknown("dungeon", skill_id))?;
            if dungeon.active.is_some() {
                return Err(EngineError::InvariantViolation(
                    "a dungeon challenge is already active".into(),
                ));
            }
            let skill = self
                .state
                .skill(skill_id)
                .ok_or_else(|| EngineError::unknown("skill", skill_id))?;
            (dungeon.room, skill.name.clone(), skill.level)
        };

        let content = generate_validated(
            self.generator.as_ref(),
            GenerationRequest::DungeonChallenge {
                skill: skill_name,
                room,
                skill_level,
            },
        )
        .await?;
        let Content::DungeonChallenge {
            name,
            description,
            difficulty,
        } = content
        else {
            unreachable!("shape validated against request kind");
        };

        let id = self.state.alloc_id();
        let dungeon = self
            .state
            .dungeon_mut(skill_id)
            .expect("dungeon existed at request build time");
        dungeon.active = Some(DungeonChallenge {
            id,
            room,
            name,
            description,
            difficulty,
        });
        debug!(skill_id, room, challenge_id = id, "dungeon challenge ready");
        Ok(Vec::new())
    }

    /// Complete the active challenge. The free-text proof is accepted
    /// unconditionally; there is no automated verification. Grants skill
    /// XP sized by the challenge difficulty and advances to the next
    /// room.
    pub async fn complete_dungeon_challenge(
        &mut self,
        skill_id: SkillId,
        proof: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let difficulty = {
            let dungeon = self
                .state
                .dungeon_mut(skill_id)
                .ok_or_else(|| EngineError::unknown("dungeon", skill_id))?;
            let challenge = dungeon.active.take().ok_or_else(|| {
                EngineError::InvariantViolation("no active dungeon challenge".into())
            })?;

            dungeon.room += 1;
            dungeon.highest_room = dungeon.highest_room.max(dungeon.room);
            challenge.difficulty
        };

        debug!(skill_id, proof_len = proof.len(), "dungeon proof accepted");

        let skill_level = self
            .state
            .skill(skill_id)
            .map(|s| s.level)
            .unwrap_or(1);
        let amount = rewards::skill_reward(difficulty, skill_level, &self.config.rewards);
        let mut events = self.award_skill_xp(skill_id, amount, now)?;

        let room = self
            .state
            .dungeon(skill_id)
            .map(|d| d.room)
            .unwrap_or_default();
        info!(skill_id, room, "dungeon room cleared");
        events.push(ProgressionEvent::DungeonRoomCleared { skill_id, room });
        events.extend(self.evaluate_achievements(now));
        Ok(events)
    }

    /// Give up on the active challenge, consuming one life from the
    /// shared profile-wide pool. At zero lives abandoning is refused:
    /// complete it or stay stuck.
    pub fn abandon_dungeon_challenge(
        &mut self,
        skill_id: SkillId,
    ) -> Result<(), EngineError> {
        if self.state.profile.dungeon_lives == 0 {
            return Err(EngineError::InsufficientResource {
                resource: "dungeon lives",
            });
        }

        let dungeon = self
            .state
            .dungeon_mut(skill_id)
            .ok_or_else(|| EngineError::unknown("dungeon", skill_id))?;
        if dungeon.active.take().is_none() {
            return Err(EngineError::InvariantViolation(
                "no active dungeon challenge".into(),
            ));
        }

        self.state.profile.dungeon_lives -= 1;
        info!(
            skill_id,
            lives = self.state.profile.dungeon_lives,
            "dungeon challenge abandoned"
        );
        Ok(())
    }
}
