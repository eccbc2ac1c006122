//! Init command implementation.

use anyhow::{bail, Result};
use chrono::Utc;

use ascend::config::BalanceConfig;
use ascend::generator::TemplateGenerator;
use ascend::{Engine, GameState};

use super::{print_events, Paths};

/// Create a fresh profile, write the default config if missing, and
/// seed the starter achievement batch.
pub async fn init_command(paths: &Paths, name: &str, force: bool) -> Result<()> {
    if paths.state.exists() && !force {
        bail!(
            "State file already exists at {} (use --force to overwrite)",
            paths.state.display()
        );
    }

    let config = BalanceConfig::load_or_default(&paths.config)?;
    if !paths.config.exists() {
        config.save_to_file(&paths.config)?;
        println!("Wrote default config to {}", paths.config.display());
    }

    let now = Utc::now();
    let state = GameState::new_profile(name, &config, now);
    let mut engine = Engine::new(state, config, Box::new(TemplateGenerator));

    match engine.seed_achievements(now).await {
        Ok(events) => print_events(&events),
        // Retryable: the profile works without achievements seeded.
        Err(err) => eprintln!("Achievement seeding deferred: {err}"),
    }

    engine.into_state().save_to_file(&paths.state)?;
    println!("Profile '{name}' created at {}", paths.state.display());
    Ok(())
}
