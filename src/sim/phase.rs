//! Game phase state machine
//!
//! `Running` is the initial phase. Losing the last life or clearing the last
//! brick moves to `Ended`, which is terminal until an explicit restart.

use serde::{Deserialize, Serialize};

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay, one simulation step per frame
    #[default]
    Running,
    /// Run ended, simulation frozen until restart
    Ended(Outcome),
}

impl GamePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    /// `None` while the run is still undetermined
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GamePhase::Running => None,
            GamePhase::Ended(outcome) => Some(*outcome),
        }
    }

    /// Transition Running -> Ended. Returns false if already ended.
    pub fn end(&mut self, outcome: Outcome) -> bool {
        if !self.is_running() {
            return false;
        }
        *self = GamePhase::Ended(outcome);
        true
    }

    /// Back to Running from any phase
    pub fn restart(&mut self) {
        *self = GamePhase::Running;
    }
}
