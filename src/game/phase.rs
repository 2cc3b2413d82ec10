//! Turn phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five phases of a turn, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Draw,
    Resource,
    Action,
    Buy,
    Cleanup,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Draw,
        Phase::Resource,
        Phase::Action,
        Phase::Buy,
        Phase::Cleanup,
    ];

    /// Get the next phase within the same turn
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Resource),
            Phase::Resource => Some(Phase::Action),
            Phase::Action => Some(Phase::Buy),
            Phase::Buy => Some(Phase::Cleanup),
            Phase::Cleanup => None, // Hands over to the other side
        }
    }

    /// Phases that take an optional chosen card id
    pub fn takes_choice(&self) -> bool {
        matches!(self, Phase::Action | Phase::Buy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Draw => "DRAW",
            Phase::Resource => "RESOURCE",
            Phase::Action => "ACTION",
            Phase::Buy => "BUY",
            Phase::Cleanup => "CLEANUP",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
