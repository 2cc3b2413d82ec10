//! Game initialization from a starting deck and the card catalog

use crate::core::Side;
use crate::game::{GameLogger, GameState, RulesConfig};
use crate::loader::{CardCatalog, DeckSpec};
use crate::log_verbose;
use crate::Result;
use std::sync::Arc;

/// Game builder for initializing games from decks
pub struct GameInitializer<'a> {
    catalog: &'a Arc<CardCatalog>,
    rules: RulesConfig,
    logger: Option<GameLogger>,
}

impl<'a> GameInitializer<'a> {
    pub fn new(catalog: &'a Arc<CardCatalog>) -> Self {
        GameInitializer {
            catalog,
            rules: RulesConfig::default(),
            logger: None,
        }
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Install a preconfigured logger in the new game
    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Both sides start from the same deck
    pub fn init_game(&self, deck: &DeckSpec, seed: u64) -> Result<GameState> {
        self.init_game_with_decks(deck, deck, seed)
    }

    /// Create a game at DRAW for the first side, turn 1
    ///
    /// Each side's deck is shuffled with the seeded game RNG (first side
    /// first) and, unless disabled in the rules, an opening hand is dealt.
    pub fn init_game_with_decks(&self, human_deck: &DeckSpec, cpu_deck: &DeckSpec, seed: u64) -> Result<GameState> {
        self.rules.validate()?;
        human_deck.validate(self.catalog)?;
        cpu_deck.validate(self.catalog)?;

        let mut game = GameState::new(Arc::clone(self.catalog), self.rules.clone(), seed);
        if let Some(logger) = &self.logger {
            game.logger = logger.clone();
        }

        for (side, deck) in [(Side::Human, human_deck), (Side::Cpu, cpu_deck)] {
            game.player_mut(side).zones.deck.extend(deck.card_ids());
            game.shuffle_deck(side);
            if game.rules.deal_opening_hand {
                game.refill_hand(side);
            }
            log_verbose!(
                game.logger,
                "{side} starts with {} cards, {} in hand",
                deck.total_cards(),
                game.player(side).hand().len()
            );
        }

        Ok(game)
    }
}
