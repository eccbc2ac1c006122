//! Full persisted game state.
//!
//! This is the logical storage shape: one profile plus its goals,
//! mission chains, skills, and dungeon ladders, keyed by stable u64
//! identifiers allocated from internal counters. The engine owns a
//! `GameState` and is the only mutation surface.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::BalanceConfig;
use crate::domain::{
    DungeonState, EpicMission, EpicMissionId, Goal, GoalId, Profile, Skill, SkillId,
    StreakInfo, TowerProgress,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub profile: Profile,
    pub goals: Vec<Goal>,
    pub epic_missions: Vec<EpicMission>,
    pub skills: Vec<Skill>,
    pub dungeons: Vec<DungeonState>,

    #[serde(default = "default_next_id")]
    next_id: u64,
}

fn default_next_id() -> u64 {
    1
}

impl GameState {
    /// Fresh state with onboarding defaults.
    pub fn new_profile(name: impl Into<String>, config: &BalanceConfig, now: DateTime<Utc>) -> Self {
        let profile = Profile {
            name: name.into(),
            level: 1,
            xp: 0,
            xp_to_next_level: config.profile.initial_xp_to_next,
            attributes: Default::default(),
            streak: StreakInfo::default(),
            fragments: 0,
            crystals: config.profile.starting_crystals,
            hp_current: config.profile.hp_base,
            dungeon_lives: config.dungeon.max_lives,
            max_dungeon_lives: config.dungeon.max_lives,
            inventory: Vec::new(),
            tower: TowerProgress::new(config.tower.ticket_cap),
            achievements: Vec::new(),
            created_at: now,
        };

        Self {
            profile,
            goals: Vec::new(),
            epic_missions: Vec::new(),
            skills: Vec::new(),
            dungeons: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate the next stable identifier. Shared across entity kinds.
    pub fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---- lookups ----

    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn goal_mut(&mut self, id: GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    pub fn epic(&self, id: EpicMissionId) -> Option<&EpicMission> {
        self.epic_missions.iter().find(|e| e.id == id)
    }

    pub fn epic_mut(&mut self, id: EpicMissionId) -> Option<&mut EpicMission> {
        self.epic_missions.iter_mut().find(|e| e.id == id)
    }

    pub fn epics_for_goal(&self, goal_id: GoalId) -> impl Iterator<Item = &EpicMission> {
        self.epic_missions.iter().filter(move |e| e.goal_id == goal_id)
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn skill_mut(&mut self, id: SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    pub fn dungeon(&self, skill_id: SkillId) -> Option<&DungeonState> {
        self.dungeons.iter().find(|d| d.skill_id == skill_id)
    }

    pub fn dungeon_mut(&mut self, skill_id: SkillId) -> Option<&mut DungeonState> {
        self.dungeons.iter_mut().find(|d| d.skill_id == skill_id)
    }

    // ---- snapshot IO ----

    /// Default state file path (~/.ascend/state.json).
    pub fn default_path() -> std::path::PathBuf {
        BalanceConfig::global_dir().join("state.json")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;
        let state: GameState = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;
        Ok(state)
    }

    /// Save with an atomic write (temp file + rename).
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize state")?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write state file: {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move state into place: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip() {
        let config = BalanceConfig::default();
        let mut state = GameState::new_profile("Avery", &config, Utc::now());
        state.alloc_id();
        state.alloc_id();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        state.save_to_file(&path).unwrap();
        let mut loaded = GameState::from_file(&path).unwrap();

        assert_eq!(loaded.profile.name, "Avery");
        assert_eq!(loaded.profile.crystals, config.profile.starting_crystals);
        // Id counter survives the roundtrip.
        assert_eq!(loaded.alloc_id(), 3);
    }

    #[test]
    fn test_onboarding_defaults() {
        let config = BalanceConfig::default();
        let state = GameState::new_profile("Kai", &config, Utc::now());
        assert_eq!(state.profile.level, 1);
        assert_eq!(state.profile.xp, 0);
        assert_eq!(state.profile.xp_to_next_level, 100);
        assert_eq!(state.profile.dungeon_lives, 5);
        assert_eq!(state.profile.tower.floor, 1);
        assert_eq!(state.profile.tower.tickets, 3);
    }
}
