//! CLI command implementations.
//!
//! Every command follows the same shape: load the state snapshot and
//! balance config, build an engine over the offline template generator,
//! run one entry point, print the emitted events, save the snapshot.

pub mod dungeon;
pub mod goal;
pub mod init;
pub mod mission;
pub mod status;
pub mod tower;

use std::path::PathBuf;

use anyhow::{Context, Result};

use ascend::config::BalanceConfig;
use ascend::generator::TemplateGenerator;
use ascend::{Engine, GameState, ProgressionEvent};

/// Resolved file locations for this invocation.
pub struct Paths {
    pub state: PathBuf,
    pub config: PathBuf,
}

impl Paths {
    pub fn resolve(state: Option<PathBuf>, config: Option<PathBuf>) -> Self {
        Self {
            state: state.unwrap_or_else(GameState::default_path),
            config: config.unwrap_or_else(BalanceConfig::global_config_path),
        }
    }
}

/// Load state and config and assemble an engine.
pub fn load_engine(paths: &Paths) -> Result<Engine> {
    let config = BalanceConfig::load_or_default(&paths.config)?;
    let state = GameState::from_file(&paths.state).with_context(|| {
        format!(
            "No profile at {}. Run `ascend init <name>` first.",
            paths.state.display()
        )
    })?;
    Ok(Engine::new(state, config, Box::new(TemplateGenerator)))
}

/// Persist the engine's state snapshot.
pub fn save_engine(engine: Engine, paths: &Paths) -> Result<()> {
    engine.into_state().save_to_file(&paths.state)
}

/// Print emitted events in a terminal-friendly form.
pub fn print_events(events: &[ProgressionEvent]) {
    for event in events {
        match event {
            ProgressionEvent::XpAwarded { amount, reason } => {
                println!("  +{amount} XP ({reason})");
            }
            ProgressionEvent::LevelUp {
                new_level, title, ..
            } => {
                println!("  LEVEL UP! You are now level {new_level} ({title})");
            }
            ProgressionEvent::FragmentsAwarded { amount } => {
                println!("  +{amount} fragments");
            }
            ProgressionEvent::StreakExtended { count } => {
                println!("  Streak: {count} days");
            }
            ProgressionEvent::SkillXpAwarded { skill_id, amount } => {
                println!("  +{amount} skill XP (skill #{skill_id})");
            }
            ProgressionEvent::SkillLevelUp {
                skill_id,
                new_level,
                bonuses,
            } => {
                let names: Vec<&str> = bonuses.iter().map(|b| b.as_str()).collect();
                println!(
                    "  Skill #{skill_id} reached level {new_level} (+1 {})",
                    names.join(", +1 ")
                );
            }
            ProgressionEvent::SkillDecayed { skill_id, amount } => {
                println!("  Skill #{skill_id} lost {amount} XP to corruption");
            }
            ProgressionEvent::EpicMissionCompleted { epic_id } => {
                println!("  Epic mission #{epic_id} complete!");
            }
            ProgressionEvent::NextMissionReady { daily_id, .. } => {
                println!("  New daily mission ready (#{daily_id})");
            }
            ProgressionEvent::GenerationDeferred { epic_id } => {
                println!("  Next mission for epic #{epic_id} is generating, retry later");
            }
            ProgressionEvent::AchievementUnlocked { name, .. } => {
                println!("  Achievement unlocked: {name}");
            }
            ProgressionEvent::TowerChallengeReady { challenge_id } => {
                println!("  Tower challenge #{challenge_id} available");
            }
            ProgressionEvent::TowerChallengeCompleted { challenge_id } => {
                println!("  Tower challenge #{challenge_id} completed");
            }
            ProgressionEvent::TowerFloorAdvanced { floor } => {
                println!("  Tower floor advanced to {floor}");
            }
            ProgressionEvent::DungeonRoomCleared { room, .. } => {
                println!("  Dungeon room cleared, now at room {room}");
            }
        }
    }
}
