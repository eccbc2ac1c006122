use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "ascend")]
#[command(about = "Gamified personal-development tracker - progression engine")]
#[command(version)]
struct Cli {
    /// Path to the state file (defaults to ~/.ascend/state.json)
    #[arg(short, long, global = true)]
    state: Option<PathBuf>,

    /// Path to the balance config file (defaults to ~/.ascend/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a fresh profile and seed its starter achievements
    Init {
        /// Profile name
        name: String,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Show profile, goals, and active missions
    Status,

    /// Manage goals
    Goal {
        #[command(subcommand)]
        action: cli::goal::GoalAction,
    },

    /// Complete the active daily mission of a goal
    Complete {
        /// Goal id
        goal_id: u64,
    },

    /// Undo the most recent completion on an epic mission
    Revert {
        /// Epic mission id
        epic_id: u64,
    },

    /// Record feedback for the next generated mission
    Feedback {
        /// Epic mission id
        epic_id: u64,

        /// One of: too-easy, too-hard
        #[arg(long)]
        rating: Option<String>,

        /// Free-text hint for the generator
        #[arg(long)]
        hint: Option<String>,
    },

    /// Retry a deferred mission generation
    Retry {
        /// Epic mission id
        epic_id: u64,
    },

    /// Tower ladder operations
    Tower {
        #[command(subcommand)]
        action: cli::tower::TowerAction,
    },

    /// Dungeon ladder operations
    Dungeon {
        #[command(subcommand)]
        action: cli::dungeon::DungeonAction,
    },

    /// List achievements and their progress
    Achievements,

    /// Apply skill decay and list at-risk skills
    Decay,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let paths = cli::Paths::resolve(args.state, args.config);

    match args.command {
        Commands::Init { name, force } => cli::init::init_command(&paths, &name, force).await?,
        Commands::Status => cli::status::status_command(&paths)?,
        Commands::Goal { action } => cli::goal::goal_command(&paths, action).await?,
        Commands::Complete { goal_id } => {
            cli::mission::complete_command(&paths, goal_id).await?
        }
        Commands::Revert { epic_id } => cli::mission::revert_command(&paths, epic_id)?,
        Commands::Feedback {
            epic_id,
            rating,
            hint,
        } => cli::mission::feedback_command(&paths, epic_id, rating, hint)?,
        Commands::Retry { epic_id } => cli::mission::retry_command(&paths, epic_id).await?,
        Commands::Tower { action } => cli::tower::tower_command(&paths, action).await?,
        Commands::Dungeon { action } => cli::dungeon::dungeon_command(&paths, action).await?,
        Commands::Achievements => cli::status::achievements_command(&paths)?,
        Commands::Decay => cli::status::decay_command(&paths)?,
    }

    Ok(())
}
