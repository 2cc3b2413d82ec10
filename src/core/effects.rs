//! Primitive card effects
//!
//! A card's effect list is a sequence of these primitives, resolved in order
//! by the game interpreter. In JSON each effect is a single-key object such as
//! `{"addRice": 2}`, `{"gain": "RICE_SMALL"}` or `{"trashSelf": true}`.

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One primitive effect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEffect", into = "RawEffect")]
pub enum Effect {
    /// Add rice for this turn
    AddRice(u32),
    /// Add persistent knowledge
    AddKnowledge(u32),
    /// Draw up to N cards, reshuffling the discard pile when the deck runs out
    Draw(u32),
    /// Move up to N cards from the front of the hand to the discard pile
    Discard(u32),
    /// Put a copy of the card into the discard pile without touching the supply
    Acquire(CardId),
    /// Remove the most recently played card from play
    RemoveSelfFromPlay,
    /// Victory points, counted by scoring from ownership
    AddVictory(u32),
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::AddRice(_) => "addRice",
            Effect::AddKnowledge(_) => "addKnowledge",
            Effect::Draw(_) => "draw",
            Effect::Discard(_) => "discard",
            Effect::Acquire(_) => "gain",
            Effect::RemoveSelfFromPlay => "trashSelf",
            Effect::AddVictory(_) => "addVictory",
        }
    }

    pub fn victory_value(&self) -> u32 {
        match self {
            Effect::AddVictory(n) => *n,
            _ => 0,
        }
    }

    pub fn rice_value(&self) -> u32 {
        match self {
            Effect::AddRice(n) => *n,
            _ => 0,
        }
    }

    pub fn knowledge_value(&self) -> u32 {
        match self {
            Effect::AddKnowledge(n) => *n,
            _ => 0,
        }
    }

    pub fn draw_value(&self) -> u32 {
        match self {
            Effect::Draw(n) => *n,
            _ => 0,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::AddRice(n) => write!(f, "+{n} rice"),
            Effect::AddKnowledge(n) => write!(f, "+{n} knowledge"),
            Effect::Draw(n) => write!(f, "draw {n}"),
            Effect::Discard(n) => write!(f, "discard {n}"),
            Effect::Acquire(id) => write!(f, "gain {id}"),
            Effect::RemoveSelfFromPlay => write!(f, "remove from play"),
            Effect::AddVictory(n) => write!(f, "{n} VP"),
        }
    }
}

/// Wire form of an effect
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawEffect {
    AddRice(u32),
    AddKnowledge(u32),
    Draw(u32),
    Discard(u32),
    Gain(CardId),
    TrashSelf(bool),
    AddVictory(u32),
}

impl TryFrom<RawEffect> for Effect {
    type Error = String;

    fn try_from(raw: RawEffect) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawEffect::AddRice(n) => Effect::AddRice(n),
            RawEffect::AddKnowledge(n) => Effect::AddKnowledge(n),
            RawEffect::Draw(n) => Effect::Draw(n),
            RawEffect::Discard(n) => Effect::Discard(n),
            RawEffect::Gain(id) => Effect::Acquire(id),
            RawEffect::TrashSelf(true) => Effect::RemoveSelfFromPlay,
            RawEffect::TrashSelf(false) => {
                return Err("trashSelf must be true when present".to_string())
            }
            RawEffect::AddVictory(n) => Effect::AddVictory(n),
        })
    }
}

impl From<Effect> for RawEffect {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::AddRice(n) => RawEffect::AddRice(n),
            Effect::AddKnowledge(n) => RawEffect::AddKnowledge(n),
            Effect::Draw(n) => RawEffect::Draw(n),
            Effect::Discard(n) => RawEffect::Discard(n),
            Effect::Acquire(id) => RawEffect::Gain(id),
            Effect::RemoveSelfFromPlay => RawEffect::TrashSelf(true),
            Effect::AddVictory(n) => RawEffect::AddVictory(n),
        }
    }
}
