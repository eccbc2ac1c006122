//! Mission hierarchy management: the Goal -> Epic Mission -> Daily
//! Mission tree, completion pipeline, cooldowns, and the single-level
//! undo.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{clock, Engine, ProgressionEvent};
use crate::domain::{
    DailyMission, DailyMissionId, EpicMission, EpicMissionId, Goal, GoalCategory, GoalId,
    LastAward, MissionFeedback, ProgressSnapshot, Rank, Skill, SmartDetail,
};
use crate::error::EngineError;
use crate::generator::{generate_validated, Content, GenerationRequest};
use crate::rewards;

impl Engine {
    /// Declare a new goal. Creates the first epic mission at rank F and
    /// bootstraps its first daily mission from the generator; when
    /// `with_skill` is set, a mastery track is attached 1:1.
    ///
    /// Generator failures never fail goal creation: the epic title falls
    /// back to a template and the daily mission is deferred to the
    /// retryable "generating" state.
    pub async fn create_goal(
        &mut self,
        name: impl Into<String>,
        category: GoalCategory,
        detail: SmartDetail,
        with_skill: bool,
        now: DateTime<Utc>,
    ) -> Result<(GoalId, Vec<ProgressionEvent>), EngineError> {
        let name = name.into();
        let goal_id = self.state.alloc_id();

        let skill_id = if with_skill {
            let skill_id = self.state.alloc_id();
            self.state.skills.push(Skill::new(
                skill_id,
                goal_id,
                name.clone(),
                category,
                self.config.skills.initial_xp_to_next,
                now,
            ));
            Some(skill_id)
        } else {
            None
        };

        self.state.goals.push(Goal {
            id: goal_id,
            name: name.clone(),
            category,
            detail,
            skill_id,
            created_at: now,
        });

        info!(goal_id, %category, "goal created");
        let events = self.spawn_epic(goal_id, Rank::F, now).await;
        Ok((goal_id, events))
    }

    /// Complete one daily mission. The pipeline: cooldown gate,
    /// commit completion and rewards, check epic completion (seeding the
    /// successor chain when done), otherwise append the next generated
    /// daily mission. Rewards always commit before the dependent
    /// generation call; only that call is deferrable.
    pub async fn complete_daily_mission(
        &mut self,
        epic_id: EpicMissionId,
        daily_id: DailyMissionId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let quota = self.config.missions.daily_quota;

        // Phase 1: validate and commit the completion itself.
        let (goal_id, rank, reward_xp, reward_fragments, mission_text, epic_done) = {
            let epic = self
                .state
                .epic_mut(epic_id)
                .ok_or_else(|| EngineError::unknown("epic mission", epic_id))?;

            if epic.completed {
                return Err(EngineError::InvariantViolation(
                    "epic mission is already complete".into(),
                ));
            }

            if let Some(last) = epic.last_completion {
                if clock::cooldown_active(last, now) {
                    return Err(EngineError::CooldownActive {
                        until: clock::next_local_midnight(last),
                    });
                }
            }

            let daily = epic
                .daily_missions
                .iter_mut()
                .find(|d| d.id == daily_id)
                .ok_or_else(|| EngineError::unknown("daily mission", daily_id))?;

            if daily.completed {
                return Err(EngineError::InvariantViolation(
                    "daily mission is already complete".into(),
                ));
            }

            daily.completed = true;
            daily.completed_at = Some(now);
            let reward_xp = daily.xp;
            let reward_fragments = daily.fragments;
            let mission_text = format!("{} {}", daily.name, daily.description);

            epic.last_completion = Some(now);

            let epic_done = epic.daily_missions.iter().all(|d| d.completed)
                && epic.daily_missions.len() as u32 >= quota;
            if epic_done {
                epic.completed = true;
            }

            (
                epic.goal_id,
                epic.rank,
                reward_xp,
                reward_fragments,
                mission_text,
                epic_done,
            )
        };

        debug!(epic_id, daily_id, reward_xp, "daily mission completed");

        // Phase 2: profile rewards. Counters are snapshotted first so the
        // undo can restore them exactly, level-ups included.
        let profile_before = ProgressSnapshot {
            level: self.state.profile.level,
            xp: self.state.profile.xp,
            xp_to_next_level: self.state.profile.xp_to_next_level,
        };
        let mut events = self.award_profile_xp(reward_xp, "daily mission");
        self.state.profile.fragments += reward_fragments;
        events.push(ProgressionEvent::FragmentsAwarded {
            amount: reward_fragments,
        });
        events.extend(self.update_streak(now));

        // Phase 3: skill reward, sized by a difficulty assessment of the
        // completed mission text. The assessment degrades to a fallback
        // score internally, so this always commits.
        let skill_id = self.state.goal(goal_id).and_then(|g| g.skill_id);
        let mut skill_before = None;
        if let Some(skill_id) = skill_id {
            let difficulty = rewards::assess_difficulty(
                self.generator.as_ref(),
                &mission_text,
                &self.config.rewards,
            )
            .await;
            skill_before = self.state.skill(skill_id).map(|s| ProgressSnapshot {
                level: s.level,
                xp: s.xp,
                xp_to_next_level: s.xp_to_next_level,
            });
            let skill_level = self.state.skill(skill_id).map(|s| s.level).unwrap_or(1);
            let skill_xp =
                rewards::skill_reward(difficulty, skill_level, &self.config.rewards);
            events.extend(self.award_skill_xp(skill_id, skill_xp, now)?);
        }

        // Record the undo window (single most recent completion only).
        if let Some(epic) = self.state.epic_mut(epic_id) {
            epic.last_award = Some(LastAward {
                daily_id,
                fragments: reward_fragments,
                profile_before,
                skill_before,
            });
        }

        // Phase 4: advance the chain. Generation failures from here on
        // are isolated; everything above stays committed.
        if epic_done {
            info!(epic_id, "epic mission completed");
            events.push(ProgressionEvent::EpicMissionCompleted { epic_id });
            if let Some(next_rank) = rank.next() {
                events.extend(self.spawn_epic(goal_id, next_rank, now).await);
            }
        } else {
            events.extend(self.generate_daily_for(epic_id, now).await);
        }

        events.extend(self.evaluate_achievements(now));
        Ok(events)
    }

    /// Reverse the most recent completion on an epic mission: reactivate
    /// the daily, delete the not-yet-completed successor generated after
    /// it, clear the cooldown, and restore the profile and skill
    /// counters to their pre-completion snapshots, reversing any
    /// level-ups and their attribute bonuses. Only one level of undo
    /// exists; reverting twice is an invariant violation, as is
    /// reverting a completion that closed the epic.
    pub fn revert_last_daily_mission(
        &mut self,
        epic_id: EpicMissionId,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let (award, skill_id) = {
            let epic = self
                .state
                .epic(epic_id)
                .ok_or_else(|| EngineError::unknown("epic mission", epic_id))?;

            if epic.completed {
                return Err(EngineError::InvariantViolation(
                    "cannot revert a completion that closed the epic mission".into(),
                ));
            }

            let award = epic.last_award.clone().ok_or_else(|| {
                EngineError::InvariantViolation("no completion to revert".into())
            })?;

            let skill_id = self
                .state
                .goal(epic.goal_id)
                .and_then(|g| g.skill_id);
            (award, skill_id)
        };

        {
            let epic = self
                .state
                .epic_mut(epic_id)
                .expect("epic checked above");

            // Drop the daily generated after the reverted completion.
            epic.daily_missions
                .retain(|d| d.completed || d.id == award.daily_id);

            let daily = epic
                .daily_missions
                .iter_mut()
                .find(|d| d.id == award.daily_id)
                .ok_or_else(|| {
                    EngineError::InvariantViolation(
                        "reverted daily mission no longer exists".into(),
                    )
                })?;
            daily.completed = false;
            daily.completed_at = None;

            epic.last_completion = None;
            epic.generation_pending = false;
            epic.last_award = None;
        }

        let profile = &mut self.state.profile;
        profile.level = award.profile_before.level;
        profile.xp = award.profile_before.xp;
        profile.xp_to_next_level = award.profile_before.xp_to_next_level;
        profile.fragments = profile.fragments.saturating_sub(award.fragments);

        if let (Some(skill_id), Some(before)) = (skill_id, award.skill_before) {
            self.revert_skill_progress(skill_id, before);
        }

        info!(epic_id, daily_id = award.daily_id, "completion reverted");
        Ok(Vec::new())
    }

    /// Capture feedback to seed the next generation request for this
    /// chain.
    pub fn record_feedback(
        &mut self,
        epic_id: EpicMissionId,
        feedback: MissionFeedback,
    ) -> Result<(), EngineError> {
        let epic = self
            .state
            .epic_mut(epic_id)
            .ok_or_else(|| EngineError::unknown("epic mission", epic_id))?;
        epic.pending_feedback = Some(feedback);
        Ok(())
    }

    /// Retry a deferred next-mission generation for a chain sitting in
    /// the "generating" state.
    pub async fn retry_generation(
        &mut self,
        epic_id: EpicMissionId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let epic = self
            .state
            .epic(epic_id)
            .ok_or_else(|| EngineError::unknown("epic mission", epic_id))?;
        if !epic.generation_pending {
            return Err(EngineError::InvariantViolation(
                "no pending generation for this epic mission".into(),
            ));
        }
        Ok(self.generate_daily_for(epic_id, now).await)
    }

    /// The visible epic mission for a goal: the lowest-rank incomplete
    /// one. Completed predecessors stay in history only.
    pub fn visible_epic_for(&self, goal_id: GoalId) -> Option<&EpicMission> {
        self.state
            .epics_for_goal(goal_id)
            .filter(|e| !e.completed)
            .min_by_key(|e| e.rank)
    }

    /// Every goal's visible epic mission, for the active list.
    pub fn active_missions(&self) -> Vec<(&Goal, &EpicMission)> {
        self.state
            .goals
            .iter()
            .filter_map(|goal| self.visible_epic_for(goal.id).map(|epic| (goal, epic)))
            .collect()
    }

    /// Delete a goal. Refused while an incomplete mission chain still
    /// references it; otherwise cascades to its epic missions, skill,
    /// and dungeon state.
    pub fn delete_goal(&mut self, goal_id: GoalId) -> Result<(), EngineError> {
        if self.state.goal(goal_id).is_none() {
            return Err(EngineError::unknown("goal", goal_id));
        }

        let has_active_chain = self
            .state
            .epics_for_goal(goal_id)
            .any(|e| !e.completed);
        if has_active_chain {
            return Err(EngineError::InvariantViolation(
                "goal still has an active mission chain".into(),
            ));
        }

        let skill_id = self.state.goal(goal_id).and_then(|g| g.skill_id);
        self.state.epic_missions.retain(|e| e.goal_id != goal_id);
        if let Some(skill_id) = skill_id {
            self.state.skills.retain(|s| s.id != skill_id);
            self.state.dungeons.retain(|d| d.skill_id != skill_id);
        }
        self.state.goals.retain(|g| g.id != goal_id);
        info!(goal_id, "goal deleted");
        Ok(())
    }

    /// Goal ideas from the generator. Pure passthrough with shape
    /// validation; no state change.
    pub async fn goal_suggestions(
        &self,
        interests: Vec<String>,
    ) -> Result<Vec<String>, EngineError> {
        let content = generate_validated(
            self.generator.as_ref(),
            GenerationRequest::GoalSuggestions { interests },
        )
        .await?;
        match content {
            Content::GoalSuggestions(suggestions) => Ok(suggestions),
            _ => unreachable!("shape validated against request kind"),
        }
    }

    // ---- internals ----

    /// Create an epic mission for a goal at the given rank and seed
    /// exactly one daily mission into it. Both generation calls degrade:
    /// the title falls back to a template, the daily defers.
    async fn spawn_epic(
        &mut self,
        goal_id: GoalId,
        rank: Rank,
        now: DateTime<Utc>,
    ) -> Vec<ProgressionEvent> {
        let (goal_name, category) = match self.state.goal(goal_id) {
            Some(goal) => (goal.name.clone(), goal.category),
            None => return Vec::new(),
        };

        let title = match generate_validated(
            self.generator.as_ref(),
            GenerationRequest::EpicMission {
                goal: goal_name.clone(),
                category,
                rank,
            },
        )
        .await
        {
            Ok(Content::EpicMission { title }) => title,
            Ok(_) => unreachable!("shape validated against request kind"),
            Err(err) => {
                warn!(goal_id, %err, "epic title generation failed, using fallback");
                format!("Rank {rank} trial: {goal_name}")
            }
        };

        let epic_id = self.state.alloc_id();
        self.state.epic_missions.push(EpicMission {
            id: epic_id,
            goal_id,
            rank,
            title,
            completed: false,
            daily_missions: Vec::new(),
            last_completion: None,
            last_award: None,
            pending_feedback: None,
            generation_pending: false,
        });
        debug!(epic_id, goal_id, %rank, "epic mission created");

        self.generate_daily_for(epic_id, now).await
    }

    /// Request one new daily mission for an epic and append it as the
    /// active mission. On failure the chain enters the retryable
    /// "generating" state; nothing else changes.
    async fn generate_daily_for(
        &mut self,
        epic_id: EpicMissionId,
        _now: DateTime<Utc>,
    ) -> Vec<ProgressionEvent> {
        let request = {
            let Some(epic) = self.state.epic_mut(epic_id) else {
                return Vec::new();
            };
            let feedback = epic.pending_feedback.take();
            let rank = epic.rank;
            let completed: Vec<String> = epic
                .daily_missions
                .iter()
                .filter(|d| d.completed)
                .map(|d| d.name.clone())
                .collect();
            let goal_id = epic.goal_id;
            let Some(goal) = self.state.goal(goal_id) else {
                return Vec::new();
            };
            GenerationRequest::NextDailyMission {
                goal: goal.name.clone(),
                category: goal.category,
                rank,
                completed,
                feedback,
            }
        };

        match generate_validated(self.generator.as_ref(), request).await {
            Ok(Content::DailyMission {
                name,
                description,
                difficulty,
            }) => {
                let reward = rewards::mission_reward(
                    difficulty,
                    self.state.profile.level,
                    &self.config.rewards,
                );
                let daily_id = self.state.alloc_id();
                let epic = self
                    .state
                    .epic_mut(epic_id)
                    .expect("epic existed at request build time");
                epic.daily_missions.push(DailyMission {
                    id: daily_id,
                    name,
                    description,
                    xp: reward.xp,
                    fragments: reward.fragments,
                    completed: false,
                    completed_at: None,
                });
                epic.generation_pending = false;
                debug!(epic_id, daily_id, "next daily mission appended");
                vec![ProgressionEvent::NextMissionReady { epic_id, daily_id }]
            }
            Ok(_) => unreachable!("shape validated against request kind"),
            Err(err) => {
                warn!(epic_id, %err, "daily mission generation deferred");
                if let Some(epic) = self.state.epic_mut(epic_id) {
                    epic.generation_pending = true;
                }
                vec![ProgressionEvent::GenerationDeferred { epic_id }]
            }
        }
    }

    /// Lookup shared by the CLI and tests: the visible epic plus its
    /// active daily for a goal.
    pub fn active_daily_for(&self, goal_id: GoalId) -> Option<(&EpicMission, &DailyMission)> {
        let epic = self.visible_epic_for(goal_id)?;
        let daily = epic.active_daily()?;
        Some((epic, daily))
    }
}
