//! Card zones (Deck, Hand, Discard, Played)

use crate::core::{CardId, Side};
use serde::{Deserialize, Serialize};

/// The four zones each side owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    Played,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Deck, Zone::Hand, Zone::Discard, Zone::Played];
}

/// An ordered zone of card ids
///
/// For the deck, the front of `cards` is the top of the pile (next draw).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,

    /// Side owning this zone
    pub owner: Side,

    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: Side) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    /// Append to the end (bottom of the deck, newest in discard/played)
    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn extend<I: IntoIterator<Item = CardId>>(&mut self, ids: I) {
        self.cards.extend(ids);
    }

    /// Remove the first copy of `card_id`, keeping the order of the rest
    pub fn remove(&mut self, card_id: &CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|id| id == card_id) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.cards.contains(card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardId> {
        self.cards.iter()
    }

    /// Take the top card (front)
    pub fn draw_top(&mut self) -> Option<CardId> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn peek_top(&self) -> Option<&CardId> {
        self.cards.first()
    }

    /// Take up to `count` cards from the front
    pub fn take_front(&mut self, count: usize) -> Vec<CardId> {
        let n = count.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Take the most recently added card
    pub fn take_last(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Empty the zone, returning its cards in order
    pub fn take_all(&mut self) -> Vec<CardId> {
        std::mem::take(&mut self.cards)
    }

    /// Shuffle the zone using the game's RNG
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// The four zones of one side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: CardZone,
    pub hand: CardZone,
    pub discard: CardZone,
    pub played: CardZone,
}

impl PlayerZones {
    pub fn new(owner: Side) -> Self {
        PlayerZones {
            deck: CardZone::new(Zone::Deck, owner),
            hand: CardZone::new(Zone::Hand, owner),
            discard: CardZone::new(Zone::Discard, owner),
            played: CardZone::new(Zone::Played, owner),
        }
    }

    pub fn get_zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard,
            Zone::Played => &self.played,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Discard => &mut self.discard,
            Zone::Played => &mut self.played,
        }
    }

    /// Move one copy of a card between zones. Returns false if it was not in `from`.
    pub fn move_card(&mut self, card_id: &CardId, from: Zone, to: Zone) -> bool {
        if !self.get_zone_mut(from).remove(card_id) {
            return false;
        }
        self.get_zone_mut(to).add(card_id.clone());
        true
    }

    /// Every owned card id, zone by zone
    pub fn all_cards(&self) -> impl Iterator<Item = &CardId> {
        Zone::ALL.into_iter().flat_map(move |z| self.get_zone(z).iter())
    }

    pub fn total_cards(&self) -> usize {
        Zone::ALL.iter().map(|z| self.get_zone(*z).len()).sum()
    }
}
