//! Skill dungeon commands.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::{load_engine, print_events, save_engine, Paths};

#[derive(Subcommand)]
pub enum DungeonAction {
    /// Open a dungeon for a skill
    Open {
        /// Skill id
        skill_id: u64,

        /// Spend a dungeon crystal to open
        #[arg(long)]
        crystal: bool,
    },

    /// Generate the next room's challenge
    Challenge {
        /// Skill id
        skill_id: u64,
    },

    /// Complete the active challenge
    Complete {
        /// Skill id
        skill_id: u64,

        /// What was done to clear the room
        #[arg(long, default_value = "")]
        proof: String,
    },

    /// Abandon the active challenge (costs a dungeon life)
    Abandon {
        /// Skill id
        skill_id: u64,
    },

    /// Show dungeon state
    Show,
}

pub async fn dungeon_command(paths: &Paths, action: DungeonAction) -> Result<()> {
    match action {
        DungeonAction::Open { skill_id, crystal } => {
            let mut engine = load_engine(paths)?;
            if crystal {
                engine.open_dungeon_with_crystal(skill_id, Utc::now())?;
            } else {
                engine.open_dungeon(skill_id, Utc::now())?;
            }
            println!("Dungeon opened for skill #{skill_id}.");
            save_engine(engine, paths)
        }
        DungeonAction::Challenge { skill_id } => {
            let mut engine = load_engine(paths)?;
            let events = engine.request_dungeon_challenge(skill_id, Utc::now()).await?;
            print_events(&events);
            if let Some(dungeon) = engine.state().dungeon(skill_id) {
                if let Some(challenge) = &dungeon.active {
                    println!(
                        "Room {} [d{}]: {} - {}",
                        challenge.room, challenge.difficulty, challenge.name, challenge.description
                    );
                }
            }
            save_engine(engine, paths)
        }
        DungeonAction::Complete { skill_id, proof } => {
            let mut engine = load_engine(paths)?;
            let events = engine
                .complete_dungeon_challenge(skill_id, &proof, Utc::now())
                .await?;
            print_events(&events);
            save_engine(engine, paths)
        }
        DungeonAction::Abandon { skill_id } => {
            let mut engine = load_engine(paths)?;
            engine.abandon_dungeon_challenge(skill_id)?;
            println!(
                "Challenge abandoned. {} dungeon lives left.",
                engine.state().profile.dungeon_lives
            );
            save_engine(engine, paths)
        }
        DungeonAction::Show => {
            let engine = load_engine(paths)?;
            let state = engine.state();
            println!(
                "Crystals: {}  Lives: {}/{}",
                state.profile.crystals,
                state.profile.dungeon_lives,
                engine.config().dungeon.max_lives
            );
            if state.dungeons.is_empty() {
                println!("No open dungeons.");
            }
            for dungeon in &state.dungeons {
                let skill_name = state
                    .skill(dungeon.skill_id)
                    .map(|s| s.name.as_str())
                    .unwrap_or("?");
                println!(
                    "  {} (skill #{}): room {} (highest {})",
                    skill_name, dungeon.skill_id, dungeon.room, dungeon.highest_room
                );
                if let Some(challenge) = &dungeon.active {
                    println!("      active [d{}] {}", challenge.difficulty, challenge.name);
                }
            }
            Ok(())
        }
    }
}
