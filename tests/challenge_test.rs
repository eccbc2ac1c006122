//! Tower and dungeon ladder tests over a scripted generator.

mod common;

use ascend::config::BalanceConfig;
use ascend::domain::{GoalCategory, SmartDetail};
use ascend::{Engine, EngineError, ProgressionEvent};

use common::{at, daily, dungeon, engine_with, epic, fail, tower};

#[tokio::test]
async fn test_tower_daily_batch_and_allowance() {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        BalanceConfig::default(),
        vec![
            tower("Push-up gauntlet", 2, 3),
            tower("Cold shower", 2, 1),
            tower("Early rise", 2, 1),
        ],
        t0,
    );

    let events = engine.request_tower_challenges(t0).await.unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(engine.state().profile.tower.available.len(), 3);
    assert_eq!(engine.state().profile.tower.daily_generated, 3);

    // Allowance exhausted: no further generation today, no error.
    let again = engine.request_tower_challenges(at(2026, 4, 10, 15)).await.unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_tower_midbatch_failure_keeps_partial() {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        BalanceConfig::default(),
        vec![tower("Push-up gauntlet", 2, 3), fail()],
        t0,
    );

    let events = engine.request_tower_challenges(t0).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(engine.state().profile.tower.available.len(), 1);
}

#[tokio::test]
async fn test_tower_total_failure_propagates() {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(BalanceConfig::default(), vec![fail()], t0);
    assert!(matches!(
        engine.request_tower_challenges(t0).await,
        Err(EngineError::Generation(_))
    ));
}

#[tokio::test]
async fn test_accept_spends_ticket_and_caps_active() {
    let mut config = BalanceConfig::default();
    config.tower.max_active = 1;
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        config,
        vec![
            tower("Push-up gauntlet", 2, 3),
            tower("Cold shower", 2, 1),
            tower("Early rise", 2, 1),
        ],
        t0,
    );
    engine.request_tower_challenges(t0).await.unwrap();
    let ids: Vec<u64> = engine
        .state()
        .profile
        .tower
        .available
        .iter()
        .map(|c| c.id)
        .collect();

    engine.accept_tower_challenge(ids[0], t0).unwrap();
    assert_eq!(engine.state().profile.tower.tickets, 2);
    assert_eq!(engine.state().profile.tower.active.len(), 1);

    // Active slots full.
    assert!(matches!(
        engine.accept_tower_challenge(ids[1], t0),
        Err(EngineError::InsufficientResource {
            resource: "active challenge slots"
        })
    ));
}

#[tokio::test]
async fn test_requirement_progress_completes_and_advances_floor() {
    let mut config = BalanceConfig::default();
    config.tower.floor_quota = 1;
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        config,
        vec![
            tower("Push-up gauntlet", 4, 2),
            tower("Cold shower", 2, 1),
            tower("Early rise", 2, 1),
        ],
        t0,
    );
    engine.request_tower_challenges(t0).await.unwrap();
    let id = engine.state().profile.tower.available[0].id;
    engine.accept_tower_challenge(id, t0).unwrap();

    // Partial progress: nothing completes.
    let events = engine.advance_tower_requirement(id, 0, 1, t0).unwrap();
    assert!(events.is_empty());

    let events = engine.advance_tower_requirement(id, 0, 1, t0).unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressionEvent::TowerChallengeCompleted { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressionEvent::TowerFloorAdvanced { floor: 2 })));

    let tower_state = &engine.state().profile.tower;
    assert_eq!(tower_state.floor, 2);
    assert_eq!(tower_state.highest_floor, 2);
    assert_eq!(tower_state.floor_completions, 0);
    // Unaccepted challenges from the old floor were discarded.
    assert!(tower_state.available.is_empty());
    // Difficulty 4 at level 1: 15 + 12 + 0.5 rounds to 28 XP.
    assert_eq!(engine.state().profile.xp, 28);
}

#[tokio::test]
async fn test_floor_advance_resets_daily_allowance() {
    let mut config = BalanceConfig::default();
    config.tower.floor_quota = 1;
    config.tower.daily_challenges = 1;
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        config,
        vec![tower("Push-up gauntlet", 4, 1), tower("Cold shower", 4, 1)],
        t0,
    );

    engine.request_tower_challenges(t0).await.unwrap();
    let id = engine.state().profile.tower.available[0].id;
    engine.accept_tower_challenge(id, t0).unwrap();
    engine.advance_tower_requirement(id, 0, 1, t0).unwrap();
    assert_eq!(engine.state().profile.tower.floor, 2);

    // Same local day: the fresh floor comes with a fresh allowance.
    let events = engine
        .request_tower_challenges(at(2026, 4, 10, 10))
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(engine.state().profile.tower.available[0].floor, 2);
}

#[tokio::test]
async fn test_oversized_progress_amount_clamps() {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        BalanceConfig::default(),
        vec![
            tower("Push-up gauntlet", 4, 3),
            tower("Cold shower", 2, 1),
            tower("Early rise", 2, 1),
        ],
        t0,
    );
    engine.request_tower_challenges(t0).await.unwrap();
    let id = engine.state().profile.tower.available[0].id;
    engine.accept_tower_challenge(id, t0).unwrap();
    engine.advance_tower_requirement(id, 0, 1, t0).unwrap();

    // An absurd amount clamps to the target instead of wrapping.
    let events = engine
        .advance_tower_requirement(id, 0, u32::MAX, t0)
        .unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressionEvent::TowerChallengeCompleted { .. })));
    assert_eq!(engine.state().profile.tower.floor_completions, 1);
}

#[tokio::test]
async fn test_lockout_gates_tower_until_expiry() {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        BalanceConfig::default(),
        vec![
            tower("Push-up gauntlet", 2, 3),
            tower("Cold shower", 2, 1),
            tower("Early rise", 2, 1),
        ],
        t0,
    );
    engine.enter_tower_lockout(at(2026, 4, 11, 9));

    assert!(matches!(
        engine.request_tower_challenges(t0).await,
        Err(EngineError::CooldownActive { .. })
    ));

    // Past the timestamp the gate clears itself.
    let events = engine
        .request_tower_challenges(at(2026, 4, 11, 10))
        .await
        .unwrap();
    assert_eq!(events.len(), 3);
    assert!(engine.state().profile.tower.lockout_until.is_none());
}

#[tokio::test]
async fn test_daily_reset_restores_tickets() {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        BalanceConfig::default(),
        vec![
            tower("Push-up gauntlet", 2, 3),
            tower("Cold shower", 2, 1),
            tower("Early rise", 2, 1),
            tower("Plank hold", 2, 1),
        ],
        t0,
    );
    engine.request_tower_challenges(t0).await.unwrap();
    let id = engine.state().profile.tower.available[0].id;
    engine.accept_tower_challenge(id, t0).unwrap();
    assert_eq!(engine.state().profile.tower.tickets, 2);

    // First interaction of the next local day resets counters.
    let t1 = at(2026, 4, 11, 8);
    let events = engine.request_tower_challenges(t1).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(engine.state().profile.tower.tickets, 3);
    assert_eq!(engine.state().profile.tower.daily_generated, 1);
}

async fn engine_with_skill() -> (Engine, u64) {
    let t0 = at(2026, 4, 10, 9);
    let mut engine = engine_with(
        BalanceConfig::default(),
        vec![
            epic("The First Trial"),
            daily("Practice scales", 4),
            dungeon("Sight-reading gauntlet", 5),
        ],
        t0,
    );
    let (goal_id, _) = engine
        .create_goal(
            "Learn piano",
            GoalCategory::Creativity,
            SmartDetail::default(),
            true,
            t0,
        )
        .await
        .unwrap();
    let skill_id = engine.state().goal(goal_id).unwrap().skill_id.unwrap();
    (engine, skill_id)
}

#[tokio::test]
async fn test_dungeon_room_progression() {
    let (mut engine, skill_id) = engine_with_skill().await;
    let t0 = at(2026, 4, 10, 10);

    engine.open_dungeon(skill_id, t0).unwrap();
    // Already open.
    assert!(matches!(
        engine.open_dungeon(skill_id, t0),
        Err(EngineError::InvariantViolation(_))
    ));

    engine.request_dungeon_challenge(skill_id, t0).await.unwrap();
    // One challenge at a time.
    assert!(matches!(
        engine.request_dungeon_challenge(skill_id, t0).await,
        Err(EngineError::InvariantViolation(_))
    ));

    let events = engine
        .complete_dungeon_challenge(skill_id, "Read two pieces cold", t0)
        .await
        .unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressionEvent::DungeonRoomCleared { room: 2, .. })));

    let dungeon_state = engine.state().dungeon(skill_id).unwrap();
    assert_eq!(dungeon_state.room, 2);
    assert_eq!(dungeon_state.highest_room, 2);
    assert!(dungeon_state.active.is_none());
    // Difficulty 5 at skill level 1 grants 30 skill XP.
    assert_eq!(engine.state().skill(skill_id).unwrap().xp, 30);
}

#[tokio::test]
async fn test_abandon_consumes_shared_life() {
    let (mut engine, skill_id) = engine_with_skill().await;
    let t0 = at(2026, 4, 10, 10);

    engine.open_dungeon(skill_id, t0).unwrap();
    engine.request_dungeon_challenge(skill_id, t0).await.unwrap();

    engine.abandon_dungeon_challenge(skill_id).unwrap();
    assert_eq!(engine.state().profile.dungeon_lives, 4);
    assert!(engine.state().dungeon(skill_id).unwrap().active.is_none());

    // Nothing active to abandon now.
    assert!(matches!(
        engine.abandon_dungeon_challenge(skill_id),
        Err(EngineError::InvariantViolation(_))
    ));
}

#[tokio::test]
async fn test_crystal_open_is_atomic() {
    let (mut engine, skill_id) = engine_with_skill().await;
    let t0 = at(2026, 4, 10, 10);
    assert_eq!(engine.state().profile.crystals, 1);

    engine.open_dungeon_with_crystal(skill_id, t0).unwrap();
    assert_eq!(engine.state().profile.crystals, 0);

    // A failed open keeps the crystal count untouched, and at zero
    // crystals the force-start is refused outright.
    assert!(matches!(
        engine.open_dungeon_with_crystal(skill_id, t0),
        Err(EngineError::InsufficientResource { resource: "crystals" })
    ));
}
