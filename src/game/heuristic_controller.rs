//! Heuristic opponent policy
//!
//! Plays a whole turn without input. Action cards are ranked by what their
//! effects grant (knowledge above draw above rice). Purchases
//! are ranked by category (victory, then knowledge-granting, then resource,
//! then anything else). Both break ties on the higher cost, then on the
//! earlier candidate.
//!
//! The ordering leans toward building an engine early and converting to
//! points once the big cards become affordable, without tracking game stage.

use crate::core::{Card, CardId, CardType, Side};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::turn_flow::{advance_phase_with_choice, affordable_supply, playable_action_cards};
use crate::game::{GameState, Phase};

/// Purchase category ranks
const VICTORY_RANK: u8 = 3;
const KNOWLEDGE_RANK: u8 = 2;
const RESOURCE_RANK: u8 = 1;
const OTHER_RANK: u8 = 0;

/// Rank key for an action card: knowledge first, then draw, then rice
pub fn score_action_card(card: &Card) -> (u32, u32, u32) {
    (card.knowledge_gain(), card.draw_count(), card.rice_gain())
}

/// Score a supply card by category
pub fn score_buy_card(card: &Card) -> u8 {
    if card.card_type == CardType::Victory {
        VICTORY_RANK
    } else if card.grants_knowledge() {
        KNOWLEDGE_RANK
    } else if card.card_type == CardType::Resource {
        RESOURCE_RANK
    } else {
        OTHER_RANK
    }
}

/// Highest (score, cost) among the candidates; the first one wins exact ties
fn pick_best<'a, K, F>(
    state: &GameState,
    candidates: impl IntoIterator<Item = &'a CardId>,
    score: F,
) -> Option<CardId>
where
    K: Ord,
    F: Fn(&Card) -> K,
{
    let mut best: Option<(&CardId, (K, u32))> = None;
    for id in candidates {
        let Some(card) = state.card(id) else {
            continue;
        };
        let key = (score(card), card.cost);
        if best.as_ref().map_or(true, |(_, best_key)| key > *best_key) {
            best = Some((id, key));
        }
    }
    best.map(|(id, _)| id.clone())
}

/// Best person or event card in `side`'s hand
pub fn choose_action_card(state: &GameState, side: Side) -> Option<CardId> {
    let candidates = playable_action_cards(state, side);
    pick_best(state, &candidates, score_action_card)
}

/// Best supply card `side` can buy right now
pub fn choose_buy_card(state: &GameState, side: Side) -> Option<CardId> {
    let candidates = affordable_supply(state, side);
    pick_best(state, &candidates, score_buy_card)
}

/// Let the policy finish `side`'s current turn
///
/// Starts from whatever phase the state is in. Returns an unchanged copy if
/// it is not `side`'s turn or the game is over.
pub fn run_policy_turn(state: &GameState, side: Side) -> GameState {
    let mut current = state.clone();
    while !current.ended && current.active_side == side {
        let choice = match current.phase {
            Phase::Action => choose_action_card(&current, side),
            Phase::Buy => choose_buy_card(&current, side),
            Phase::Draw | Phase::Resource | Phase::Cleanup => None,
        };
        if let Some(card_id) = &choice {
            let verb = if current.phase == Phase::Action { "plays" } else { "buys" };
            current.logger.controller_choice(side, &format!("{verb} {card_id}"));
        }
        current = advance_phase_with_choice(&current, choice.as_ref());
    }
    current
}

/// Run the automated opponent's turn
pub fn run_opponent_turn(state: &GameState) -> GameState {
    run_policy_turn(state, Side::Cpu)
}

/// Controller wrapper around the heuristic policy
pub struct HeuristicController {
    side: Side,
}

impl HeuristicController {
    pub fn new(side: Side) -> Self {
        HeuristicController { side }
    }
}

impl PlayerController for HeuristicController {
    fn side(&self) -> Side {
        self.side
    }

    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_action_card(&mut self, view: &GameStateView, candidates: &[CardId]) -> Option<CardId> {
        pick_best(view.game(), candidates, score_action_card)
    }

    fn choose_buy_card(&mut self, view: &GameStateView, candidates: &[CardId]) -> Option<CardId> {
        pick_best(view.game(), candidates, score_buy_card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RulesConfig;
    use crate::loader::CardCatalog;
    use std::sync::Arc;

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    fn new_game() -> GameState {
        let catalog = Arc::new(CardCatalog::bundled().unwrap());
        let mut game = GameState::new(catalog, RulesConfig::default(), 11);
        game.active_side = Side::Cpu;
        game
    }

    #[test]
    fn test_prefers_knowledge_person() {
        let mut game = new_game();
        game.player_mut(Side::Cpu).zones.hand.extend([
            id("RICE_SMALL"),
            id("CHR_HIDEYOSHI"),
            id("CHR_KENSHIN"),
            id("EVT_RAKUICHI"),
        ]);
        assert_eq!(choose_action_card(&game, Side::Cpu), Some(id("CHR_KENSHIN")));
    }

    #[test]
    fn test_draw_beats_rice() {
        let mut game = new_game();
        game.player_mut(Side::Cpu)
            .zones
            .hand
            .extend([id("EVT_RAKUICHI"), id("CHR_HIDEYOSHI")]);
        assert_eq!(choose_action_card(&game, Side::Cpu), Some(id("CHR_HIDEYOSHI")));
    }

    #[test]
    fn test_action_tie_broken_by_cost() {
        let catalog = CardCatalog::from_cards(vec![
            Card::new("CHEAP", "cheap", CardType::Person, 2).with_effect(crate::core::Effect::AddKnowledge(1)),
            Card::new("DEAR", "dear", CardType::Event, 5).with_effect(crate::core::Effect::AddKnowledge(1)),
        ])
        .unwrap();
        let mut game = GameState::new(Arc::new(catalog), RulesConfig::default(), 0);
        game.player_mut(Side::Cpu).zones.hand.extend([id("CHEAP"), id("DEAR")]);
        assert_eq!(choose_action_card(&game, Side::Cpu), Some(id("DEAR")));
    }

    #[test]
    fn test_huge_effect_amounts_rank_without_overflow() {
        let catalog = CardCatalog::from_cards(vec![
            Card::new("SAGE", "sage", CardType::Person, 1).with_effect(crate::core::Effect::AddKnowledge(30_000_000)),
            Card::new("SCOUT", "scout", CardType::Person, 9).with_effect(crate::core::Effect::Draw(u32::MAX)),
            Card::new("HOARD", "hoard", CardType::Event, 1)
                .with_effect(crate::core::Effect::AddRice(u32::MAX))
                .with_effect(crate::core::Effect::AddRice(u32::MAX)),
        ])
        .unwrap();
        let hoard = catalog.get(&id("HOARD")).unwrap();
        assert_eq!(hoard.rice_gain(), u32::MAX);

        let mut game = GameState::new(Arc::new(catalog), RulesConfig::default(), 0);
        game.active_side = Side::Cpu;
        game.player_mut(Side::Cpu)
            .zones
            .hand
            .extend([id("HOARD"), id("SCOUT"), id("SAGE")]);
        assert_eq!(choose_action_card(&game, Side::Cpu), Some(id("SAGE")));
    }

    #[test]
    fn test_no_action_card() {
        let mut game = new_game();
        game.player_mut(Side::Cpu)
            .zones
            .hand
            .extend([id("RICE_SMALL"), id("VP_VILLAGE")]);
        assert_eq!(choose_action_card(&game, Side::Cpu), None);
    }

    #[test]
    fn test_buys_country_when_rich() {
        let mut game = new_game();
        let p = game.player_mut(Side::Cpu);
        p.rice_this_turn = 8;
        p.knowledge = 3;
        assert_eq!(choose_buy_card(&game, Side::Cpu), Some(id("VP_COUNTRY")));
    }

    #[test]
    fn test_buys_nothing_when_broke() {
        let game = new_game();
        assert_eq!(choose_buy_card(&game, Side::Cpu), None);
    }

    #[test]
    fn test_knowledge_card_over_resource() {
        let mut game = new_game();
        game.player_mut(Side::Cpu).rice_this_turn = 4;
        // Villages out of stock: best remaining is a knowledge-granting card
        game.supply.get_mut(&id("VP_VILLAGE")).unwrap().remaining = 0;
        assert_eq!(choose_buy_card(&game, Side::Cpu), Some(id("CHR_KENSHIN")));
    }

    #[test]
    fn test_buy_scores() {
        let catalog = CardCatalog::bundled().unwrap();
        let score = |s: &str| score_buy_card(catalog.get(&id(s)).unwrap());
        assert!(score("VP_VILLAGE") > score("CHR_KENSHIN"));
        assert!(score("RES_TERAKOYA") > score("RICE_LARGE"));
        assert!(score("RICE_SMALL") > score("CHR_HIDEYOSHI"));
    }

    #[test]
    fn test_run_opponent_turn_hands_back() {
        let mut game = new_game();
        game.player_mut(Side::Cpu).zones.deck.extend([
            id("RICE_SMALL"),
            id("RICE_SMALL"),
            id("CHR_KENSHIN"),
            id("VP_VILLAGE"),
            id("RICE_SMALL"),
        ]);

        let next = run_opponent_turn(&game);
        let cpu = next.player(Side::Cpu);
        assert_eq!(next.active_side, Side::Human);
        assert_eq!(next.phase, Phase::Draw);
        assert_eq!(next.turn_count, 2);
        assert_eq!(cpu.knowledge, 2);
        // 3 rice buys the village
        assert!(cpu.discard().contains(&id("VP_VILLAGE")));
        assert_eq!(next.pile(&id("VP_VILLAGE")).unwrap().remaining, 11);
        assert_eq!(cpu.rice_this_turn, 0);
    }

    #[test]
    fn test_run_opponent_turn_not_its_turn() {
        let mut game = new_game();
        game.active_side = Side::Human;
        assert_eq!(run_opponent_turn(&game), game);
    }
}
