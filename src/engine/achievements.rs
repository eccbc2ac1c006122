//! Achievement evaluation.
//!
//! Progress is a pure function of current profile/mission/skill state
//! given each achievement's criteria. Unlocking is monotonic and
//! idempotent: once unlocked, progress and the unlock timestamp are
//! frozen, and re-evaluation can never flip the flag back.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;

use super::{Engine, ProgressionEvent};
use crate::domain::{Achievement, AchievementCriteria, CriteriaKind, GoalCategory, Rank};
use crate::error::EngineError;
use crate::generator::{generate_validated, Content, GenerationRequest};
use crate::state::GameState;

/// Aggregate counters the criteria kinds are evaluated against.
struct CriteriaInputs {
    missions_completed: u32,
    level: u32,
    goals_completed: u32,
    best_streak: u32,
    missions_per_category: HashMap<GoalCategory, u32>,
    skill_levels: Vec<(GoalCategory, u32)>,
}

impl CriteriaInputs {
    fn collect(state: &GameState) -> Self {
        let mut missions_completed = 0u32;
        let mut missions_per_category: HashMap<GoalCategory, u32> = HashMap::new();

        for epic in &state.epic_missions {
            let done = epic.completed_count();
            missions_completed += done;
            if let Some(goal) = state.goal(epic.goal_id) {
                *missions_per_category.entry(goal.category).or_insert(0) += done;
            }
        }

        // A goal counts as completed once its chain reached and closed
        // the SSS epic mission.
        let goals_completed = state
            .goals
            .iter()
            .filter(|goal| {
                state
                    .epics_for_goal(goal.id)
                    .any(|e| e.rank == Rank::SSS && e.completed)
            })
            .count() as u32;

        Self {
            missions_completed,
            level: state.profile.level,
            goals_completed,
            best_streak: state.profile.streak.best,
            missions_per_category,
            skill_levels: state
                .skills
                .iter()
                .map(|s| (s.category, s.level))
                .collect(),
        }
    }

    fn progress_for(&self, criteria: &AchievementCriteria) -> u32 {
        match criteria.kind {
            CriteriaKind::MissionsCompleted => self.missions_completed,
            CriteriaKind::LevelReached => self.level,
            CriteriaKind::GoalsCompleted => self.goals_completed,
            CriteriaKind::StreakMaintained => self.best_streak,
            CriteriaKind::SkillLevelReached => self
                .skill_levels
                .iter()
                .filter(|(category, _)| {
                    criteria.category.is_none() || criteria.category == Some(*category)
                })
                .map(|(_, level)| *level)
                .max()
                .unwrap_or(0),
            CriteriaKind::MissionsInCategoryCompleted => match criteria.category {
                Some(category) => self
                    .missions_per_category
                    .get(&category)
                    .copied()
                    .unwrap_or(0),
                None => self.missions_completed,
            },
        }
    }
}

impl Engine {
    /// Re-scan every achievement against live state. Called after each
    /// mutating entry point; safe to call any number of times.
    pub(super) fn evaluate_achievements(&mut self, now: DateTime<Utc>) -> Vec<ProgressionEvent> {
        let inputs = CriteriaInputs::collect(&self.state);
        let mut events = Vec::new();

        for achievement in &mut self.state.profile.achievements {
            if achievement.unlocked {
                continue; // Frozen
            }
            achievement.progress = inputs.progress_for(&achievement.criteria);
            if achievement.progress >= achievement.criteria.target {
                achievement.unlocked = true;
                achievement.unlocked_at = Some(now);
                info!(id = %achievement.id, "achievement unlocked");
                events.push(ProgressionEvent::AchievementUnlocked {
                    id: achievement.id.clone(),
                    name: achievement.name.clone(),
                });
            }
        }

        events
    }

    /// Request a starter achievement batch from the generator. Retryable:
    /// on failure the profile simply keeps its current (possibly empty)
    /// list. Already-present ids are not duplicated.
    pub async fn seed_achievements(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProgressionEvent>, EngineError> {
        let request = GenerationRequest::AchievementBatch {
            profile_level: self.state.profile.level,
            goals: self.state.goals.iter().map(|g| g.name.clone()).collect(),
        };
        let content = generate_validated(self.generator.as_ref(), request).await?;
        let Content::AchievementBatch(specs) = content else {
            unreachable!("shape validated against request kind");
        };

        for spec in specs {
            let exists = self
                .state
                .profile
                .achievements
                .iter()
                .any(|a| a.id == spec.id);
            if exists {
                continue;
            }
            self.state.profile.achievements.push(Achievement {
                id: spec.id,
                name: spec.name,
                description: spec.description,
                criteria: AchievementCriteria {
                    kind: spec.kind,
                    target: spec.target,
                    category: spec.category,
                },
                progress: 0,
                unlocked: false,
                unlocked_at: None,
            });
        }

        // Some criteria may already be satisfied by existing state.
        Ok(self.evaluate_achievements(now))
    }
}
