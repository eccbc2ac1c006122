//! Goal management commands.

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Subcommand;

use ascend::{GoalCategory, SmartDetail};

use super::{load_engine, print_events, save_engine, Paths};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Declare a new goal (creates its first epic mission)
    Add {
        /// Goal name
        name: String,

        /// Category: fitness, learning, career, creativity, social, mindfulness
        #[arg(long, default_value = "learning")]
        category: String,

        /// Skip creating the linked skill
        #[arg(long)]
        no_skill: bool,

        /// What exactly will be done (SMART: specific)
        #[arg(long, default_value = "")]
        specific: String,

        /// How progress is measured (SMART: measurable)
        #[arg(long, default_value = "")]
        measurable: String,
    },

    /// Delete a goal whose mission chain is finished
    Delete {
        /// Goal id
        goal_id: u64,
    },

    /// Suggest goal ideas from interests
    Suggest {
        /// Free-text interests
        interests: Vec<String>,
    },
}

pub async fn goal_command(paths: &Paths, action: GoalAction) -> Result<()> {
    match action {
        GoalAction::Add {
            name,
            category,
            no_skill,
            specific,
            measurable,
        } => {
            let Some(category) = GoalCategory::from_str(&category) else {
                bail!("Unknown category: {category}");
            };
            let detail = SmartDetail {
                specific,
                measurable,
                ..Default::default()
            };

            let mut engine = load_engine(paths)?;
            let (goal_id, events) = engine
                .create_goal(&name, category, detail, !no_skill, Utc::now())
                .await?;
            println!("Goal #{goal_id} created: {name}");
            print_events(&events);
            save_engine(engine, paths)
        }
        GoalAction::Delete { goal_id } => {
            let mut engine = load_engine(paths)?;
            engine.delete_goal(goal_id)?;
            println!("Goal #{goal_id} deleted.");
            save_engine(engine, paths)
        }
        GoalAction::Suggest { interests } => {
            let engine = load_engine(paths)?;
            let suggestions = engine.goal_suggestions(interests).await?;
            println!("Ideas:");
            for suggestion in suggestions {
                println!("  - {suggestion}");
            }
            Ok(())
        }
    }
}
