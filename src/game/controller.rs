//! Player controller trait and game state view
//!
//! The game loop calls a controller whenever a side reaches ACTION or BUY.
//! Controllers inspect a read-only view of the game and return a card id,
//! or `None` to pass. Whatever they return is re-checked by the turn flow.

use crate::core::{Card, CardId, PlayerState, Side};
use crate::game::score::compute_victory_points;
use crate::game::{GameState, Phase, SupplyPile};

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
    side: Side,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, side: Side) -> Self {
        GameStateView { game, side }
    }

    /// The side this view is for
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn game(&self) -> &'a GameState {
        self.game
    }

    pub fn phase(&self) -> Phase {
        self.game.phase
    }

    pub fn turn_count(&self) -> u32 {
        self.game.turn_count
    }

    pub fn player(&self) -> &'a PlayerState {
        self.game.player(self.side)
    }

    pub fn opponent(&self) -> &'a PlayerState {
        self.game.player(self.side.other())
    }

    pub fn hand(&self) -> &'a [CardId] {
        self.player().hand()
    }

    pub fn rice(&self) -> u32 {
        self.player().rice_this_turn
    }

    pub fn knowledge(&self) -> u32 {
        self.player().knowledge
    }

    pub fn card(&self, card_id: &CardId) -> Option<&'a Card> {
        self.game.card(card_id)
    }

    pub fn card_name(&self, card_id: &CardId) -> Option<&'a str> {
        self.card(card_id).map(|c| c.name.as_str())
    }

    pub fn pile(&self, card_id: &CardId) -> Option<&'a SupplyPile> {
        self.game.pile(card_id)
    }

    pub fn victory_points(&self) -> u32 {
        compute_victory_points(self.game, self.side)
    }

    pub fn opponent_victory_points(&self) -> u32 {
        compute_victory_points(self.game, self.side.other())
    }
}

/// Decision interface for one side
///
/// Candidate lists are already filtered to legal options: action cards in
/// hand, or supply cards the side can afford that still have stock.
pub trait PlayerController {
    /// The side this controller plays
    fn side(&self) -> Side;

    /// Display name used in logs and reports
    fn name(&self) -> &str {
        "controller"
    }

    /// Pick a person or event card to play, or `None` to skip the action
    fn choose_action_card(&mut self, view: &GameStateView, candidates: &[CardId]) -> Option<CardId>;

    /// Pick a supply card to buy, or `None` to buy nothing
    fn choose_buy_card(&mut self, view: &GameStateView, candidates: &[CardId]) -> Option<CardId>;

    /// Called once when the game ends
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}
