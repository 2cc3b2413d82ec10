//! Effect interpreter
//!
//! Resolves a card's effect list against one side of the game. The interpreter
//! checks nothing: affordability and legality belong to the turn flow. It
//! cannot fail, so an effect list is always applied in full.

use crate::core::{Effect, Side};
use crate::game::GameState;
use crate::log_verbose;

/// Apply `effects` for `side` to a copy of `state`
pub fn apply_effects(state: &GameState, side: Side, effects: &[Effect]) -> GameState {
    let mut next = state.clone();
    resolve_effects(&mut next, side, effects);
    next
}

/// Apply a single effect to a copy of `state`
pub fn apply_effect(state: &GameState, side: Side, effect: &Effect) -> GameState {
    apply_effects(state, side, std::slice::from_ref(effect))
}

/// In-place resolution used by transitions that already own a fresh copy
pub(crate) fn resolve_effects(state: &mut GameState, side: Side, effects: &[Effect]) {
    for effect in effects {
        resolve_effect(state, side, effect);
    }
}

fn resolve_effect(state: &mut GameState, side: Side, effect: &Effect) {
    log_verbose!(state.logger, "{side} resolves {effect}");
    match effect {
        Effect::AddRice(n) => {
            let player = state.player_mut(side);
            player.rice_this_turn = player.rice_this_turn.saturating_add(*n);
        }
        Effect::AddKnowledge(n) => {
            let player = state.player_mut(side);
            player.knowledge = player.knowledge.saturating_add(*n);
        }
        Effect::Draw(n) => {
            state.draw_cards(side, *n as usize);
        }
        Effect::Discard(n) => {
            let zones = &mut state.player_mut(side).zones;
            let discarded = zones.hand.take_front(*n as usize);
            zones.discard.extend(discarded);
        }
        Effect::Acquire(card_id) => {
            state.player_mut(side).zones.discard.add(card_id.clone());
        }
        Effect::RemoveSelfFromPlay => {
            // The card leaves the game entirely
            state.player_mut(side).zones.played.take_last();
        }
        Effect::AddVictory(_) => {
            // Scored from ownership, nothing to track
        }
    }
}
