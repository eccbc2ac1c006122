//! Status, achievements, and decay commands.

use anyhow::Result;
use chrono::Utc;

use super::{load_engine, print_events, save_engine, Paths};

/// Show the profile, its goals, and the active missions.
pub fn status_command(paths: &Paths) -> Result<()> {
    let engine = load_engine(paths)?;
    let state = engine.state();
    let profile = &state.profile;

    println!(
        "{} - level {} [{} {}]",
        profile.name,
        profile.level,
        profile.rank(),
        profile.title()
    );
    println!(
        "  XP {}/{}  fragments {}  crystals {}  streak {} (best {})",
        profile.xp,
        profile.xp_to_next_level,
        profile.fragments,
        profile.crystals,
        profile.streak.current,
        profile.streak.best
    );
    println!(
        "  Tower: floor {} (highest {})  tickets {}  Dungeon lives {}/{}",
        profile.tower.floor,
        profile.tower.highest_floor,
        profile.tower.tickets,
        profile.dungeon_lives,
        profile.max_dungeon_lives
    );

    if state.goals.is_empty() {
        println!("\nNo goals yet. Add one with `ascend goal add`.");
        return Ok(());
    }

    println!("\nGoals:");
    for goal in &state.goals {
        println!("  #{} [{}] {}", goal.id, goal.category, goal.name);
        if let Some(skill_id) = goal.skill_id {
            if let Some(skill) = state.skill(skill_id) {
                println!(
                    "      skill #{}: level {} ({}/{} XP)",
                    skill.id, skill.level, skill.xp, skill.xp_to_next_level
                );
            }
        }
        match engine.visible_epic_for(goal.id) {
            Some(epic) => {
                println!(
                    "      epic #{} [rank {}] {} ({}/{} missions)",
                    epic.id,
                    epic.rank,
                    epic.title,
                    epic.completed_count(),
                    engine.config().missions.daily_quota
                );
                match epic.active_daily() {
                    Some(daily) => println!(
                        "      today: #{} {} (+{} XP, +{} fragments)",
                        daily.id, daily.name, daily.xp, daily.fragments
                    ),
                    None if epic.generation_pending => {
                        println!("      today: generating... (`ascend retry {}`)", epic.id)
                    }
                    None => println!("      today: nothing pending"),
                }
            }
            None => println!("      chain complete"),
        }
    }

    Ok(())
}

/// List achievements and their progress.
pub fn achievements_command(paths: &Paths) -> Result<()> {
    let engine = load_engine(paths)?;
    let achievements = &engine.state().profile.achievements;

    if achievements.is_empty() {
        println!("No achievements yet.");
        return Ok(());
    }

    for achievement in achievements {
        let marker = if achievement.unlocked { "x" } else { " " };
        println!(
            "  [{marker}] {} - {} ({}/{})",
            achievement.name,
            achievement.description,
            achievement.progress.min(achievement.criteria.target),
            achievement.criteria.target
        );
    }
    Ok(())
}

/// Apply skill decay for the current time and report at-risk skills.
pub fn decay_command(paths: &Paths) -> Result<()> {
    let mut engine = load_engine(paths)?;
    let now = Utc::now();

    let events = engine.apply_skill_decay(now);
    if events.is_empty() {
        println!("No skills decayed.");
    } else {
        print_events(&events);
    }

    let at_risk = engine.skills_at_risk(now);
    if !at_risk.is_empty() {
        println!("At risk of corruption:");
        for skill_id in at_risk {
            if let Some(skill) = engine.state().skill(skill_id) {
                println!(
                    "  #{} {} (inactive {} days)",
                    skill.id,
                    skill.name,
                    skill.days_inactive(now)
                );
            }
        }
    }

    save_engine(engine, paths)
}
