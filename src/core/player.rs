//! Sides and per-side player state

use crate::core::CardId;
use crate::zones::{PlayerZones, Zone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two competing sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The first side; completing a round back to this side bumps the turn counter
    Human,
    Cpu,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Human, Side::Cpu];

    pub fn other(self) -> Side {
        match self {
            Side::Human => Side::Cpu,
            Side::Cpu => Side::Human,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Cpu => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Human => "human",
            Side::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    pub side: Side,

    pub zones: PlayerZones,

    /// Rice available this turn (reset to 0 at cleanup)
    pub rice_this_turn: u32,

    /// Knowledge persists for the whole game
    pub knowledge: u32,

    /// Completed turns for this side
    pub turns_taken: u32,

    /// Set when an action card resolved this turn
    pub played_action_this_turn: bool,

    /// Set when a purchase succeeded this turn
    pub bought_this_turn: bool,
}

impl PlayerState {
    pub fn new(side: Side) -> Self {
        PlayerState {
            side,
            zones: PlayerZones::new(side),
            rice_this_turn: 0,
            knowledge: 0,
            turns_taken: 0,
            played_action_this_turn: false,
            bought_this_turn: false,
        }
    }

    pub fn deck(&self) -> &[CardId] {
        &self.zones.deck.cards
    }

    pub fn hand(&self) -> &[CardId] {
        &self.zones.hand.cards
    }

    pub fn discard(&self) -> &[CardId] {
        &self.zones.discard.cards
    }

    pub fn played(&self) -> &[CardId] {
        &self.zones.played.cards
    }

    pub fn zone_len(&self, zone: Zone) -> usize {
        self.zones.get_zone(zone).len()
    }

    /// Every card this side owns (deck + hand + discard + played)
    pub fn owned_cards(&self) -> impl Iterator<Item = &CardId> {
        self.zones.all_cards()
    }

    pub fn total_cards(&self) -> usize {
        self.zones.total_cards()
    }

    /// Clear per-turn counters and flags at cleanup
    pub fn reset_turn(&mut self) {
        self.rice_this_turn = 0;
        self.played_action_this_turn = false;
        self.bought_this_turn = false;
    }
}
