//! Random controller for testing and baseline play
//!
//! Picks uniformly among the legal candidates plus "pass".

use crate::core::{CardId, Side};
use crate::game::controller::{GameStateView, PlayerController};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub struct RandomController {
    side: Side,
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(side: Side, seed: u64) -> Self {
        RandomController {
            side,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, candidates: &[CardId]) -> Option<CardId> {
        // Index == len means pass
        let index = self.rng.gen_range(0..=candidates.len());
        candidates.get(index).cloned()
    }
}

impl PlayerController for RandomController {
    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        "random"
    }

    fn choose_action_card(&mut self, _view: &GameStateView, candidates: &[CardId]) -> Option<CardId> {
        self.pick(candidates)
    }

    fn choose_buy_card(&mut self, _view: &GameStateView, candidates: &[CardId]) -> Option<CardId> {
        self.pick(candidates)
    }
}
