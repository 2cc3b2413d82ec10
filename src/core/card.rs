//! Card types and definitions

use crate::core::Effect;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Catalog identifier of a card (e.g. "RICE_SMALL")
///
/// Zones and supply piles store ids only; the definition lives in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        CardId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

/// The four card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Resource,
    Person,
    Event,
    Victory,
}

impl CardType {
    pub const ALL: [CardType; 4] = [
        CardType::Resource,
        CardType::Person,
        CardType::Event,
        CardType::Victory,
    ];

    /// Person and event cards are the ones chosen during the action phase
    pub fn is_action(self) -> bool {
        matches!(self, CardType::Person | CardType::Event)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Resource => "resource",
            CardType::Person => "person",
            CardType::Event => "event",
            CardType::Victory => "victory",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable catalog entry
///
/// The JSON shape is fixed: unknown fields are rejected so that a
/// malformed catalog fails once at load time instead of at every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Card {
    pub id: CardId,

    /// Display name (e.g. "こめ袋（小）")
    pub name: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    /// Rice cost to buy from the supply
    pub cost: u32,

    /// Knowledge the buyer must already hold
    #[serde(default)]
    pub knowledge_required: u32,

    /// Applied strictly in order when the card is played
    #[serde(default)]
    pub effects: SmallVec<[Effect; 2]>,

    #[serde(default)]
    pub text: String,

    /// Artwork reference, unused by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Card {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, card_type: CardType, cost: u32) -> Self {
        Card {
            id: id.into(),
            name: name.into(),
            card_type,
            cost,
            knowledge_required: 0,
            effects: SmallVec::new(),
            text: String::new(),
            image: None,
        }
    }

    pub fn with_knowledge_required(mut self, knowledge: u32) -> Self {
        self.knowledge_required = knowledge;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn is_type(&self, card_type: CardType) -> bool {
        self.card_type == card_type
    }

    /// Sum of every add-victory effect on the card
    pub fn victory_points(&self) -> u32 {
        self.effects.iter().map(Effect::victory_value).fold(0, u32::saturating_add)
    }

    pub fn rice_gain(&self) -> u32 {
        self.effects.iter().map(Effect::rice_value).fold(0, u32::saturating_add)
    }

    pub fn knowledge_gain(&self) -> u32 {
        self.effects.iter().map(Effect::knowledge_value).fold(0, u32::saturating_add)
    }

    pub fn draw_count(&self) -> u32 {
        self.effects.iter().map(Effect::draw_value).fold(0, u32::saturating_add)
    }

    pub fn grants_knowledge(&self) -> bool {
        self.knowledge_gain() > 0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("VP_VILLAGE", "村落", CardType::Victory, 2)
            .with_effect(Effect::AddVictory(1))
            .with_text("勝利点1");

        assert_eq!(card.id.as_str(), "VP_VILLAGE");
        assert!(card.is_type(CardType::Victory));
        assert_eq!(card.victory_points(), 1);
        assert_eq!(card.knowledge_required, 0);
    }

    #[test]
    fn test_effect_summaries() {
        let card = Card::new("CHR_KENSHIN", "上杉謙信", CardType::Person, 5)
            .with_effect(Effect::AddKnowledge(2))
            .with_effect(Effect::Draw(1))
            .with_effect(Effect::AddKnowledge(1));

        assert_eq!(card.knowledge_gain(), 3);
        assert_eq!(card.draw_count(), 1);
        assert_eq!(card.rice_gain(), 0);
        assert!(card.grants_knowledge());
    }

    #[test]
    fn test_action_types() {
        assert!(CardType::Person.is_action());
        assert!(CardType::Event.is_action());
        assert!(!CardType::Resource.is_action());
        assert!(!CardType::Victory.is_action());
    }

    #[test]
    fn test_card_json_shape() {
        let json = r#"{
            "id": "VP_COUNTRY",
            "name": "国",
            "type": "victory",
            "cost": 8,
            "knowledgeRequired": 3,
            "effects": [{"addVictory": 6}],
            "text": "勝利点6"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.cost, 8);
        assert_eq!(card.knowledge_required, 3);
        assert_eq!(card.victory_points(), 6);
    }

    #[test]
    fn test_card_json_rejects_unknown_fields() {
        let json = r#"{
            "id": "X",
            "name": "x",
            "type": "resource",
            "cost": 0,
            "requiredKnowledge": 1
        }"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }

    #[test]
    fn test_card_json_rejects_unknown_type() {
        let json = r#"{"id": "X", "name": "x", "type": "character", "cost": 0}"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }
}
