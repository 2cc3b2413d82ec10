//! Turn-phase state machine
//!
//! DRAW → RESOURCE → ACTION → BUY → CLEANUP, then DRAW for the other side.
//! ACTION and BUY take an optional chosen card id. An absent, unknown or
//! illegal choice changes nothing except the phase, so the same entry point
//! serves a person clicking through phases and a policy with a decided id.

use crate::core::{Card, CardId, CardType, PlayerState, Side};
use crate::game::interpreter::resolve_effects;
use crate::game::score::{judge_winner, score_board};
use crate::game::{GameEndReason, GameState, Phase};
use crate::log_verbose;
use crate::zones::Zone;
use smallvec::SmallVec;

/// Advance a phase that needs no decision
///
/// In ACTION or BUY this is the same as choosing nothing.
pub fn advance_phase(state: &GameState) -> GameState {
    advance_phase_with_choice(state, None)
}

/// Advance the current phase, passing a chosen card id to ACTION or BUY
///
/// The choice is ignored in the other phases. A finished game is returned
/// unchanged.
pub fn advance_phase_with_choice(state: &GameState, choice: Option<&CardId>) -> GameState {
    let mut next = state.clone();
    if next.ended {
        log_verbose!(next.logger, "game is over, ignoring {} advance", next.phase);
        return next;
    }

    match next.phase {
        Phase::Draw => draw_phase(&mut next),
        Phase::Resource => resource_phase(&mut next),
        Phase::Action => action_phase(&mut next, choice),
        Phase::Buy => buy_phase(&mut next, choice),
        Phase::Cleanup => cleanup_phase(&mut next),
    }
    next
}

/// Play the rest of the active side's turn with both decisions fixed up front
///
/// Stops when the game ends or control passes to the other side.
pub fn run_turn_with_choices(
    state: &GameState,
    action: Option<&CardId>,
    buy: Option<&CardId>,
) -> GameState {
    let side = state.active_side;
    let mut current = state.clone();
    while !current.ended && current.active_side == side {
        let choice = match current.phase {
            Phase::Action => action,
            Phase::Buy => buy,
            _ => None,
        };
        current = advance_phase_with_choice(&current, choice);
    }
    current
}

/// Enough rice and knowledge to buy `card`
///
/// Stock is not checked here; see [`can_buy`].
pub fn can_afford(player: &PlayerState, card: &Card) -> bool {
    player.rice_this_turn >= card.cost && player.knowledge >= card.knowledge_required
}

/// Whether `side` could buy `card_id` right now: the pile has stock and the
/// side can afford it
pub fn can_buy(state: &GameState, side: Side, card_id: &CardId) -> bool {
    let Some(pile) = state.pile(card_id) else {
        return false;
    };
    let Some(card) = state.card(card_id) else {
        return false;
    };
    pile.remaining > 0 && can_afford(state.player(side), card)
}

/// Supply card ids `side` could buy right now, in supply order
pub fn affordable_supply(state: &GameState, side: Side) -> SmallVec<[CardId; 8]> {
    let player = state.player(side);
    state
        .supply_cards()
        .filter(|(pile, card)| pile.remaining > 0 && can_afford(player, card))
        .map(|(pile, _)| pile.card_id.clone())
        .collect()
}

/// Person and event cards in `side`'s hand, in hand order
pub fn playable_action_cards(state: &GameState, side: Side) -> SmallVec<[CardId; 8]> {
    state
        .player(side)
        .hand()
        .iter()
        .filter(|id| state.card(id).is_some_and(|c| c.card_type.is_action()))
        .cloned()
        .collect()
}

fn draw_phase(state: &mut GameState) {
    let side = state.active_side;
    let drawn = state.refill_hand(side);
    log_verbose!(
        state.logger,
        "{side} draws {drawn} (hand {})",
        state.player(side).hand().len()
    );
    state.phase = Phase::Resource;
}

fn resource_phase(state: &mut GameState) {
    let side = state.active_side;
    let catalog = state.catalog.clone();
    let is_resource = |id: &CardId| catalog.get(id).is_some_and(|c| c.card_type == CardType::Resource);

    // Every resource card is in play before any of them resolves
    let hand = state.player_mut(side).zones.hand.take_all();
    let (resources, kept): (Vec<CardId>, Vec<CardId>) = hand.into_iter().partition(|id| is_resource(id));
    let zones = &mut state.player_mut(side).zones;
    zones.hand.extend(kept);
    zones.played.extend(resources.iter().cloned());

    for card_id in &resources {
        if let Some(card) = catalog.get(card_id) {
            resolve_effects(state, side, &card.effects);
        }
    }

    log_verbose!(
        state.logger,
        "{side} plays {} resource card(s), rice {}",
        resources.len(),
        state.player(side).rice_this_turn
    );
    state.phase = Phase::Action;
}

fn action_phase(state: &mut GameState, choice: Option<&CardId>) {
    let side = state.active_side;
    state.phase = Phase::Buy;

    let Some(card_id) = choice else {
        return;
    };
    if state.player(side).played_action_this_turn || !state.player(side).zones.hand.contains(card_id) {
        log_verbose!(state.logger, "{side} cannot play {card_id}");
        return;
    }

    let catalog = state.catalog.clone();
    let Some(card) = catalog.get(card_id).filter(|c| c.card_type.is_action()) else {
        log_verbose!(state.logger, "{side} cannot play {card_id}: not an action card");
        return;
    };

    let player = state.player_mut(side);
    player.zones.move_card(card_id, Zone::Hand, Zone::Played);
    player.played_action_this_turn = true;
    state.logger.normal(&format!("{side} plays {}", card.name));
    resolve_effects(state, side, &card.effects);
}

fn buy_phase(state: &mut GameState, choice: Option<&CardId>) {
    let side = state.active_side;
    state.phase = Phase::Cleanup;

    let Some(card_id) = choice else {
        return;
    };
    if state.player(side).bought_this_turn || !can_buy(state, side, card_id) {
        log_verbose!(state.logger, "{side} cannot buy {card_id}");
        return;
    }
    let Some(cost) = state.card(card_id).map(|c| c.cost) else {
        return;
    };

    let player = state.player_mut(side);
    player.rice_this_turn -= cost;
    player.zones.discard.add(card_id.clone());
    player.bought_this_turn = true;
    if let Some(pile) = state.supply.get_mut(card_id) {
        pile.remaining -= 1;
    }
    state.logger.normal(&format!("{side} buys {card_id} for {cost} rice"));
}

fn cleanup_phase(state: &mut GameState) {
    let side = state.active_side;
    let player = state.player_mut(side);
    let hand = player.zones.hand.take_all();
    let played = player.zones.played.take_all();
    player.zones.discard.extend(hand);
    player.zones.discard.extend(played);
    player.reset_turn();
    player.turns_taken += 1;

    state.active_side = side.other();
    if state.active_side == Side::Human {
        state.turn_count += 1;
    }

    if let Some(reason) = evaluate_game_end(state) {
        state.ended = true;
        state.end_reason = Some(reason);
        state.outcome = judge_winner(state);
        let board = score_board(state);
        state.logger.game_end(&format!(
            "Game over after turn {} ({reason}): {} [human {} - cpu {}]",
            state.turn_count, state.outcome, board.human, board.cpu
        ));
        return;
    }

    state.phase = Phase::Draw;
    log_verbose!(state.logger, "turn {}: {} to draw", state.turn_count, state.active_side);
}

/// Check the end conditions in priority order
fn evaluate_game_end(state: &GameState) -> Option<GameEndReason> {
    if state.turn_count >= state.rules.max_turns {
        Some(GameEndReason::TurnLimit)
    } else if state.victory_pile_depleted() {
        Some(GameEndReason::VictoryPileEmpty)
    } else if state.depleted_piles() >= state.rules.depleted_piles_to_end {
        Some(GameEndReason::PilesDepleted)
    } else {
        None
    }
}
