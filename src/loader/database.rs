//! Card catalog for looking up card definitions
//!
//! The catalog is loaded once, validated, and then shared read-only
//! (behind an `Arc`) by every game state.

use crate::core::{Card, CardId, Effect};
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUNDLED_CARDS: &str = include_str!("../../data/cards.json");

/// Validated collection of card definitions
///
/// Iteration follows load order, which also fixes the order of supply piles
/// with equal scores in the opponent policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Build a catalog, rejecting malformed or inconsistent entries
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (i, card) in cards.iter().enumerate() {
            if card.id.as_str().trim().is_empty() {
                return Err(EngineError::InvalidCatalog(format!(
                    "card #{i} has an empty id"
                )));
            }
            if index.insert(card.id.clone(), i).is_some() {
                return Err(EngineError::InvalidCatalog(format!(
                    "duplicate card id {}",
                    card.id
                )));
            }
        }

        for card in &cards {
            for effect in &card.effects {
                if let Effect::Acquire(target) = effect {
                    if !index.contains_key(target) {
                        return Err(EngineError::InvalidCatalog(format!(
                            "{} gains unknown card {}",
                            card.id, target
                        )));
                    }
                }
            }
        }

        Ok(CardCatalog { cards, index })
    }

    /// Parse a catalog from canonical JSON (an array of cards)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The catalog shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CARDS)
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Look up a card, failing with `UnknownCard`
    pub fn card(&self, id: &CardId) -> Result<&Card> {
        self.get(id)
            .ok_or_else(|| EngineError::UnknownCard(id.to_string()))
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().map(|c| &c.id)
    }
}

impl TryFrom<Vec<Card>> for CardCatalog {
    type Error = EngineError;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        Self::from_cards(cards)
    }
}

impl From<CardCatalog> for Vec<Card> {
    fn from(catalog: CardCatalog) -> Self {
        catalog.cards
    }
}
