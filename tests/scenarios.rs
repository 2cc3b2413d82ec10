//! Rule scenarios driven through the public entry points
//!
//! Each test builds a state by hand, advances one phase and checks the
//! zones, counters and supply that should (or should not) have changed.

use sengoku_deck::core::{CardId, Side};
use sengoku_deck::game::{
    advance_phase, advance_phase_with_choice, compute_victory_points, GameOutcome, GameState, Phase,
    RulesConfig,
};
use sengoku_deck::loader::{CardCatalog, DeckSpec, GameInitializer};
use std::sync::Arc;

const SHRINE_CATALOG: &str = r#"[
    {"id": "RICE_SMALL", "name": "Small Rice", "type": "resource", "cost": 1,
     "effects": [{"addRice": 1}]},
    {"id": "SHRINE", "name": "Shrine", "type": "victory", "cost": 2, "knowledgeRequired": 1,
     "effects": [{"addVictory": 2}]}
]"#;

fn id(s: &str) -> CardId {
    CardId::new(s)
}

/// Bundled catalog, standard deck, no opening hand
fn fresh_game(seed: u64) -> GameState {
    let catalog = Arc::new(CardCatalog::bundled().unwrap());
    let rules = RulesConfig {
        deal_opening_hand: false,
        ..RulesConfig::default()
    };
    let mut game = GameInitializer::new(&catalog)
        .with_rules(rules)
        .init_game(&DeckSpec::standard(), seed)
        .unwrap();
    game.logger.enable_capture();
    game
}

fn shrine_game() -> GameState {
    let catalog = Arc::new(CardCatalog::from_json_str(SHRINE_CATALOG).unwrap());
    let mut game = GameState::new(catalog, RulesConfig::default(), 11);
    game.logger.enable_capture();
    game
}

/// A shrine game at BUY with the given rice and knowledge and a pile of 3
fn shrine_buy_state(rice: u32) -> GameState {
    let mut game = shrine_game();
    game.phase = Phase::Buy;
    game.supply.get_mut(&id("SHRINE")).unwrap().remaining = 3;
    let player = game.player_mut(Side::Human);
    player.rice_this_turn = rice;
    player.knowledge = 1;
    game
}

#[test]
fn test_scenario_a_draw_fills_empty_hand() {
    let game = fresh_game(1);
    assert!(game.player(Side::Human).hand().is_empty());
    assert_eq!(game.player(Side::Human).deck().len(), 10);

    let next = advance_phase(&game);
    assert_eq!(next.player(Side::Human).hand().len(), 5);
    assert_eq!(next.player(Side::Human).deck().len(), 5);
    assert_eq!(next.phase, Phase::Resource);
}

#[test]
fn test_scenario_b_draw_reshuffles_discard() {
    let mut game = fresh_game(2);
    let player = game.player_mut(Side::Human);
    player.zones.deck.clear();
    player.zones.deck.extend([id("VP_VILLAGE"), id("VP_VILLAGE")]);
    player.zones.discard.extend(std::iter::repeat(id("RICE_SMALL")).take(6));

    let next = advance_phase(&game);
    let player = next.player(Side::Human);
    assert_eq!(player.hand().len(), 5);
    assert_eq!(player.deck().len(), 3);
    assert!(player.discard().is_empty());
    // Both deck cards were drawn before the reshuffle
    assert_eq!(
        player.hand().iter().filter(|c| c.as_str() == "VP_VILLAGE").count(),
        2
    );
    assert_eq!(player.total_cards(), 8);
}

#[test]
fn test_scenario_c_buy_succeeds() {
    let game = shrine_buy_state(2);
    let next = advance_phase_with_choice(&game, Some(&id("SHRINE")));

    let player = next.player(Side::Human);
    assert_eq!(player.rice_this_turn, 0);
    assert_eq!(player.discard(), &[id("SHRINE")]);
    assert_eq!(next.pile(&id("SHRINE")).unwrap().remaining, 2);
    assert_eq!(next.phase, Phase::Cleanup);
    // The input state is untouched
    assert_eq!(game.pile(&id("SHRINE")).unwrap().remaining, 3);
    assert_eq!(game.player(Side::Human).rice_this_turn, 2);
}

#[test]
fn test_scenario_d_buy_without_enough_rice() {
    let game = shrine_buy_state(1);
    let next = advance_phase_with_choice(&game, Some(&id("SHRINE")));

    assert_eq!(next.player(Side::Human), game.player(Side::Human));
    assert_eq!(next.pile(&id("SHRINE")), game.pile(&id("SHRINE")));
    assert_eq!(next.phase, Phase::Cleanup);
}

#[test]
fn test_buy_unknown_id_is_a_pass() {
    let game = shrine_buy_state(5);
    let next = advance_phase_with_choice(&game, Some(&id("NOWHERE")));
    assert_eq!(next.player(Side::Human), game.player(Side::Human));
    assert_eq!(next.supply, game.supply);
    assert_eq!(next.phase, Phase::Cleanup);
}

#[test]
fn test_scenario_e_victory_points_from_discard() {
    let mut game = shrine_game();
    game.player_mut(Side::Cpu)
        .zones
        .discard
        .extend([id("SHRINE"), id("SHRINE")]);
    assert_eq!(compute_victory_points(&game, Side::Cpu), 4);
    assert_eq!(compute_victory_points(&game, Side::Cpu), 4);
    assert_eq!(compute_victory_points(&game, Side::Human), 0);
}

#[test]
fn test_scenario_f_turn_limit_ends_game() {
    let mut game = fresh_game(3);
    game.rules.max_turns = 4;
    game.turn_count = 3;
    game.active_side = Side::Cpu;
    game.phase = Phase::Cleanup;
    game.player_mut(Side::Cpu).zones.discard.add(id("VP_TOWN"));

    let ended = advance_phase(&game);
    assert!(ended.ended);
    assert_eq!(ended.turn_count, 4);
    assert_eq!(ended.outcome, GameOutcome::Won(Side::Cpu));

    // No further transitions are accepted
    let after = advance_phase(&ended);
    assert_eq!(after, ended);
    let after_buy = advance_phase_with_choice(&ended, Some(&id("VP_VILLAGE")));
    assert_eq!(after_buy, ended);
}

#[test]
fn test_turn_limit_draw_on_equal_scores() {
    let mut game = fresh_game(4);
    game.rules.max_turns = 2;
    game.active_side = Side::Cpu;
    game.phase = Phase::Cleanup;

    let ended = advance_phase(&game);
    assert!(ended.ended);
    assert_eq!(ended.outcome, GameOutcome::Draw);
}

#[test]
fn test_full_cycle_hands_over_to_other_side() {
    let mut game = fresh_game(5);
    for expected in [Phase::Resource, Phase::Action, Phase::Buy, Phase::Cleanup, Phase::Draw] {
        game = advance_phase(&game);
        assert_eq!(game.phase, expected);
    }
    assert_eq!(game.active_side, Side::Cpu);
    assert_eq!(game.turn_count, 1);
    let human = game.player(Side::Human);
    assert_eq!(human.rice_this_turn, 0);
    assert!(human.hand().is_empty());
    assert!(human.played().is_empty());
    assert_eq!(human.turns_taken, 1);
}
