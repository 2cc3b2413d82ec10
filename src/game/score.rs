//! Victory point scoring
//!
//! Points are never stored. They are recomputed from what each side owns,
//! so scoring is safe on any state, finished or not.

use crate::core::Side;
use crate::game::{GameOutcome, GameState};
use serde::{Deserialize, Serialize};

/// Total victory points of every card `side` owns (deck + hand + discard + played)
///
/// Ids missing from the catalog contribute nothing.
pub fn compute_victory_points(state: &GameState, side: Side) -> u32 {
    state
        .player(side)
        .owned_cards()
        .filter_map(|id| state.card(id))
        .map(|card| card.victory_points())
        .fold(0, u32::saturating_add)
}

/// Higher total wins, equal totals draw
pub fn judge_winner(state: &GameState) -> GameOutcome {
    compare_scores(
        compute_victory_points(state, Side::Human),
        compute_victory_points(state, Side::Cpu),
    )
}

fn compare_scores(human: u32, cpu: u32) -> GameOutcome {
    use std::cmp::Ordering;
    match human.cmp(&cpu) {
        Ordering::Greater => GameOutcome::Won(Side::Human),
        Ordering::Less => GameOutcome::Won(Side::Cpu),
        Ordering::Equal => GameOutcome::Draw,
    }
}

/// Both totals at once, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub human: u32,
    pub cpu: u32,
}

impl ScoreBoard {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Human => self.human,
            Side::Cpu => self.cpu,
        }
    }

    pub fn leader(&self) -> GameOutcome {
        compare_scores(self.human, self.cpu)
    }
}

pub fn score_board(state: &GameState) -> ScoreBoard {
    ScoreBoard {
        human: compute_victory_points(state, Side::Human),
        cpu: compute_victory_points(state, Side::Cpu),
    }
}
