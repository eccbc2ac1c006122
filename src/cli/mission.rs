//! Daily mission commands: complete, revert, feedback, retry.

use anyhow::{bail, Result};
use chrono::Utc;

use ascend::MissionFeedback;

use super::{load_engine, print_events, save_engine, Paths};

/// Complete the active daily mission of a goal.
pub async fn complete_command(paths: &Paths, goal_id: u64) -> Result<()> {
    let mut engine = load_engine(paths)?;

    let Some((epic, daily)) = engine.active_daily_for(goal_id) else {
        bail!("Goal #{goal_id} has no active daily mission right now");
    };
    let (epic_id, daily_id, name) = (epic.id, daily.id, daily.name.clone());

    println!("Completing: {name}");
    let events = engine
        .complete_daily_mission(epic_id, daily_id, Utc::now())
        .await?;
    print_events(&events);
    save_engine(engine, paths)
}

/// Undo the most recent completion on an epic mission.
pub fn revert_command(paths: &Paths, epic_id: u64) -> Result<()> {
    let mut engine = load_engine(paths)?;
    engine.revert_last_daily_mission(epic_id)?;
    println!("Reverted the last completion on epic #{epic_id}.");
    save_engine(engine, paths)
}

/// Record feedback consumed by the next generated mission.
pub fn feedback_command(
    paths: &Paths,
    epic_id: u64,
    rating: Option<String>,
    hint: Option<String>,
) -> Result<()> {
    let feedback = match (rating.as_deref(), hint) {
        (Some("too-easy"), _) => MissionFeedback::TooEasy,
        (Some("too-hard"), _) => MissionFeedback::TooHard,
        (None, Some(hint)) => MissionFeedback::Hint(hint),
        (Some(other), _) => bail!("Unknown rating: {other} (use too-easy or too-hard)"),
        (None, None) => bail!("Provide --rating or --hint"),
    };

    let mut engine = load_engine(paths)?;
    engine.record_feedback(epic_id, feedback)?;
    println!("Feedback recorded for epic #{epic_id}.");
    save_engine(engine, paths)
}

/// Retry a deferred mission generation.
pub async fn retry_command(paths: &Paths, epic_id: u64) -> Result<()> {
    let mut engine = load_engine(paths)?;
    let events = engine.retry_generation(epic_id, Utc::now()).await?;
    print_events(&events);
    save_engine(engine, paths)
}
