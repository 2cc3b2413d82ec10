//! Main game state structure

use crate::core::{Card, CardId, CardType, PlayerState, Side};
use crate::game::{GameLogger, Phase, RulesConfig};
use crate::loader::CardCatalog;
use crate::log_verbose;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A purchasable pile in the shared supply
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplyPile {
    pub card_id: CardId,
    /// Copies left; only ever decreases
    pub remaining: u32,
    /// Stocked amount at game start
    pub initial: u32,
}

impl SupplyPile {
    pub fn new(card_id: CardId, count: u32) -> Self {
        SupplyPile {
            card_id,
            remaining: count,
            initial: count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

/// Result of the game so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameOutcome {
    #[default]
    Undecided,
    Won(Side),
    Draw,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Undecided => write!(f, "undecided"),
            GameOutcome::Won(side) => write!(f, "{side} wins"),
            GameOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEndReason {
    /// The turn counter reached the configured maximum
    TurnLimit,
    /// A victory-type supply pile ran out
    VictoryPileEmpty,
    /// Enough supply piles are empty at the same time
    PilesDepleted,
    /// A driver stopped the game before the rules ended it
    LoopLimit,
}

impl fmt::Display for GameEndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameEndReason::TurnLimit => "turn limit reached",
            GameEndReason::VictoryPileEmpty => "a victory pile is empty",
            GameEndReason::PilesDepleted => "supply piles depleted",
            GameEndReason::LoopLimit => "stopped by driver",
        };
        f.write_str(text)
    }
}

/// Complete game state
///
/// Transitions never mutate a state they are handed: they clone it, change the
/// clone and return it. The catalog sits behind an `Arc` so cloning stays cheap.
///
/// The one exception is the logger: a clone shares its capture buffer with the
/// state it came from, so lines logged through any later state also show up in
/// earlier ones. Captured logs are not per-state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Card definitions shared by every state of this game
    pub catalog: Arc<CardCatalog>,

    /// Indexed by `Side::index`
    pub players: [PlayerState; 2],

    /// Supply piles keyed by card id (ordered for deterministic iteration)
    pub supply: BTreeMap<CardId, SupplyPile>,

    pub phase: Phase,

    pub active_side: Side,

    /// Starts at 1, increments when play returns to the first side
    pub turn_count: u32,

    /// Once set, no further transitions are accepted
    pub ended: bool,

    pub outcome: GameOutcome,

    pub end_reason: Option<GameEndReason>,

    pub rules: RulesConfig,

    /// Random number generator for shuffles (serializable for deterministic replay)
    pub rng: ChaCha12Rng,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    /// Create a game with empty zones and a fully stocked supply
    ///
    /// Every catalog card gets a pile sized by its type.
    pub fn new(catalog: Arc<CardCatalog>, rules: RulesConfig, seed: u64) -> Self {
        let supply = catalog
            .iter()
            .map(|card| {
                let count = rules.supply_counts.for_type(card.card_type);
                (card.id.clone(), SupplyPile::new(card.id.clone(), count))
            })
            .collect();

        GameState {
            catalog,
            players: [PlayerState::new(Side::Human), PlayerState::new(Side::Cpu)],
            supply,
            phase: Phase::Draw,
            active_side: Side::Human,
            turn_count: 1,
            ended: false,
            outcome: GameOutcome::Undecided,
            end_reason: None,
            rules,
            rng: ChaCha12Rng::seed_from_u64(seed),
            logger: GameLogger::new(),
        }
    }

    /// Seed the game RNG for deterministic shuffles
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side.index()]
    }

    pub fn active_player(&self) -> &PlayerState {
        self.player(self.active_side)
    }

    pub fn active_player_mut(&mut self) -> &mut PlayerState {
        let side = self.active_side;
        self.player_mut(side)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.catalog.get(id)
    }

    pub fn pile(&self, id: &CardId) -> Option<&SupplyPile> {
        self.supply.get(id)
    }

    /// Supply piles paired with their card definitions, in id order
    pub fn supply_cards(&self) -> impl Iterator<Item = (&SupplyPile, &Card)> {
        self.supply
            .values()
            .filter_map(move |pile| self.catalog.get(&pile.card_id).map(|card| (pile, card)))
    }

    pub fn depleted_piles(&self) -> usize {
        self.supply.values().filter(|p| p.is_empty()).count()
    }

    pub fn victory_pile_depleted(&self) -> bool {
        self.supply_cards()
            .any(|(pile, card)| card.card_type == CardType::Victory && pile.is_empty())
    }

    pub fn is_game_over(&self) -> bool {
        self.ended
    }

    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            GameOutcome::Won(side) => Some(side),
            _ => None,
        }
    }

    /// Shuffle a side's deck using the game's RNG
    pub fn shuffle_deck(&mut self, side: Side) {
        let player = &mut self.players[side.index()];
        player.zones.deck.shuffle(&mut self.rng);
    }

    /// Draw up to `count` cards from the front of the deck
    ///
    /// An empty deck is refilled by shuffling the discard pile. When both are
    /// empty drawing stops early. Returns the number of cards drawn.
    pub fn draw_cards(&mut self, side: Side, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.player(side).zones.deck.is_empty() && !self.reshuffle_discard(side) {
                break;
            }
            let player = self.player_mut(side);
            match player.zones.deck.draw_top() {
                Some(card_id) => {
                    player.zones.hand.add(card_id);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Draw until the hand holds `hand_size` cards
    pub fn refill_hand(&mut self, side: Side) -> usize {
        let missing = self.rules.hand_size.saturating_sub(self.player(side).hand().len());
        self.draw_cards(side, missing)
    }

    /// Move the discard pile under the deck and shuffle. False if discard was empty.
    fn reshuffle_discard(&mut self, side: Side) -> bool {
        let player = &mut self.players[side.index()];
        if player.zones.discard.is_empty() {
            return false;
        }
        let cards = player.zones.discard.take_all();
        player.zones.deck.extend(cards);
        player.zones.deck.shuffle(&mut self.rng);
        log_verbose!(
            self.logger,
            "{side} reshuffles discard into deck ({} cards)",
            self.player(side).deck().len()
        );
        true
    }
}

/// Equality over game content; the logger is ignored
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.catalog == other.catalog
            && self.players == other.players
            && self.supply == other.supply
            && self.phase == other.phase
            && self.active_side == other.active_side
            && self.turn_count == other.turn_count
            && self.ended == other.ended
            && self.outcome == other.outcome
            && self.end_reason == other.end_reason
            && self.rules == other.rules
            && self.rng == other.rng
    }
}
