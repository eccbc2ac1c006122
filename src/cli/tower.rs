//! Tower ladder commands.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use super::{load_engine, print_events, save_engine, Paths};

#[derive(Subcommand)]
pub enum TowerAction {
    /// Generate today's tower challenges
    Request,

    /// Accept an available challenge (spends a ticket)
    Accept {
        /// Challenge id
        challenge_id: u64,
    },

    /// Record progress on a requirement of an active challenge
    Progress {
        /// Challenge id
        challenge_id: u64,

        /// Requirement index (0-based)
        #[arg(long, default_value_t = 0)]
        requirement: usize,

        /// Progress amount
        #[arg(long, default_value_t = 1)]
        amount: u32,
    },

    /// Show tower state
    Show,
}

pub async fn tower_command(paths: &Paths, action: TowerAction) -> Result<()> {
    match action {
        TowerAction::Request => {
            let mut engine = load_engine(paths)?;
            let events = engine.request_tower_challenges(Utc::now()).await?;
            print_events(&events);
            save_engine(engine, paths)
        }
        TowerAction::Accept { challenge_id } => {
            let mut engine = load_engine(paths)?;
            engine.accept_tower_challenge(challenge_id, Utc::now())?;
            println!("Challenge #{challenge_id} accepted.");
            save_engine(engine, paths)
        }
        TowerAction::Progress {
            challenge_id,
            requirement,
            amount,
        } => {
            let mut engine = load_engine(paths)?;
            let events =
                engine.advance_tower_requirement(challenge_id, requirement, amount, Utc::now())?;
            print_events(&events);
            save_engine(engine, paths)
        }
        TowerAction::Show => {
            let engine = load_engine(paths)?;
            let tower = &engine.state().profile.tower;
            println!(
                "Floor {} (highest {})  completions {}/{}  tickets {}",
                tower.floor,
                tower.highest_floor,
                tower.floor_completions,
                engine.config().tower.floor_quota,
                tower.tickets
            );
            if let Some(until) = tower.lockout_until {
                println!("  LOCKED OUT until {until}");
            }
            for challenge in &tower.available {
                println!(
                    "  available #{} [d{}] {}",
                    challenge.id, challenge.difficulty, challenge.name
                );
            }
            for challenge in &tower.active {
                println!(
                    "  active    #{} [d{}] {}",
                    challenge.id, challenge.difficulty, challenge.name
                );
                for (index, requirement) in challenge.requirements.iter().enumerate() {
                    println!(
                        "      [{index}] {} ({}/{})",
                        requirement.description, requirement.progress, requirement.target
                    );
                }
            }
            Ok(())
        }
    }
}
