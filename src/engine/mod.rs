//! The progression engine: one explicit state store with well-defined
//! mutation entry points.
//!
//! All state transitions flow through [`Engine`] methods; nothing else
//! mutates [`GameState`]. Pure rules (leveling loops, cooldown math,
//! reward formulas) are synchronous; the single asynchronous boundary
//! is the external content generator. Reward and state mutations commit
//! before any dependent generation call, so a generator failure is
//! always isolated and retryable.

pub mod clock;

mod achievements;
mod dungeon;
mod events;
mod missions;
mod profile;
mod skills;
mod tower;

pub use events::ProgressionEvent;

use crate::config::BalanceConfig;
use crate::generator::ContentGenerator;
use crate::state::GameState;

/// State store plus mutation entry points. Single writer per profile:
/// all mutations originate from one interactive session holding this.
pub struct Engine {
    state: GameState,
    config: BalanceConfig,
    generator: Box<dyn ContentGenerator>,
}

impl Engine {
    pub fn new(
        state: GameState,
        config: BalanceConfig,
        generator: Box<dyn ContentGenerator>,
    ) -> Self {
        Self {
            state,
            config,
            generator,
        }
    }

    /// Read access to the full state. Mutation goes through entry
    /// points only.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Tear down the engine and take the state back, e.g. to persist it.
    pub fn into_state(self) -> GameState {
        self.state
    }
}
