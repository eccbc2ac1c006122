//! Ascend - gamified personal-development tracker.
//!
//! Users declare long-term goals; the system decomposes each into a
//! rank-ordered chain of epic missions, each built from small daily
//! missions. Completing daily missions grants XP and fragments to the
//! profile and levels up a per-goal skill. Around that core sit a
//! floor-based tower ladder, per-skill dungeons with a lives pool, and
//! generated achievements.
//!
//! This crate is the progression and reward state machine. Content
//! (mission text, challenge descriptions, difficulty scores) comes from
//! an external generator behind [`generator::ContentGenerator`]; all
//! rules and invariants live in [`engine::Engine`], the single mutation
//! surface over [`state::GameState`].

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod generator;
pub mod rewards;
pub mod state;

pub use domain::*;
pub use engine::{Engine, ProgressionEvent};
pub use error::EngineError;
pub use state::GameState;
