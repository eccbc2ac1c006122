//! Shared test fixtures: a scripted generator and engine builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};

use ascend::config::BalanceConfig;
use ascend::generator::{
    Content, ContentGenerator, GenerationError, GenerationRequest, RequirementSpec,
};
use ascend::{Engine, GameState};

/// Generator that replays a fixed queue of responses in call order.
/// Running the script dry is a transport error, so a test that makes an
/// unexpected generation call fails loudly.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<Content, GenerationError>>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<Content, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<Content, GenerationError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Transport("script exhausted".into())))
    }
}

/// A local-time instant, converted to the stored UTC form. Tests use
/// late-morning times so day arithmetic stays clear of DST edges.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .earliest()
        .unwrap()
        .to_utc()
}

pub fn epic(title: &str) -> Result<Content, GenerationError> {
    Ok(Content::EpicMission {
        title: title.to_string(),
    })
}

pub fn daily(name: &str, difficulty: u8) -> Result<Content, GenerationError> {
    Ok(Content::DailyMission {
        name: name.to_string(),
        description: format!("{name} today"),
        difficulty,
    })
}

pub fn score(value: u8) -> Result<Content, GenerationError> {
    Ok(Content::Difficulty(value))
}

pub fn tower(name: &str, difficulty: u8, target: u32) -> Result<Content, GenerationError> {
    Ok(Content::TowerChallenge {
        name: name.to_string(),
        description: format!("{name} trial"),
        difficulty,
        requirements: vec![RequirementSpec {
            description: format!("{name} reps"),
            target,
        }],
    })
}

pub fn dungeon(name: &str, difficulty: u8) -> Result<Content, GenerationError> {
    Ok(Content::DungeonChallenge {
        name: name.to_string(),
        description: format!("{name} room"),
        difficulty,
    })
}

pub fn fail() -> Result<Content, GenerationError> {
    Err(GenerationError::Transport("scripted failure".into()))
}

/// Engine over a fresh profile and the given response script.
pub fn engine_with(
    config: BalanceConfig,
    responses: Vec<Result<Content, GenerationError>>,
    now: DateTime<Utc>,
) -> Engine {
    let state = GameState::new_profile("Tester", &config, now);
    Engine::new(state, config, Box::new(ScriptedGenerator::new(responses)))
}
