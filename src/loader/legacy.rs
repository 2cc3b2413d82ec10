//! Converter for the older trigger/condition card dialect
//!
//! Legacy catalogs describe each effect as `{trigger, effect, value, condition}`.
//! Only the plain resource effects survive conversion; discounts, hand trashing,
//! triggers and conditions have no flat equivalent and are dropped. Every
//! dropped or weakened effect is listed in the returned [`ConversionReport`].

use crate::core::{Card, CardId, CardType, Effect};
use crate::loader::CardCatalog;
use crate::Result;
use serde::Deserialize;
use smallvec::SmallVec;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyCardType {
    Resource,
    Character,
    Event,
    Victory,
}

impl From<LegacyCardType> for CardType {
    fn from(t: LegacyCardType) -> Self {
        match t {
            LegacyCardType::Resource => CardType::Resource,
            LegacyCardType::Character => CardType::Person,
            LegacyCardType::Event => CardType::Event,
            LegacyCardType::Victory => CardType::Victory,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegacyTrigger {
    OnPlay,
    OnBuy,
    EndGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegacyEffectName {
    AddRice,
    AddKnowledge,
    Draw,
    Discount,
    AddVictory,
    TrashFromHand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyResource {
    Rice,
    Knowledge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LegacyOperator {
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyCondition {
    pub resource: LegacyResource,
    pub operator: LegacyOperator,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEffect {
    pub trigger: LegacyTrigger,
    pub effect: LegacyEffectName,
    #[serde(default)]
    pub value: Option<u32>,
    #[serde(default)]
    pub target_type: Option<LegacyCardType>,
    #[serde(default)]
    pub condition: Option<LegacyCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCard {
    pub id: String,
    pub era: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: LegacyCardType,
    pub cost: u32,
    #[serde(default)]
    pub required_knowledge: Option<u32>,
    #[serde(default)]
    pub effects: Vec<LegacyEffect>,
    #[serde(default)]
    pub text: String,
}

/// Why a legacy effect did not convert cleanly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossKind {
    /// No flat equivalent (discount, trashFromHand)
    Dropped,
    /// Converted, but its condition now always applies
    ConditionIgnored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionLoss {
    pub card_id: CardId,
    pub effect: LegacyEffectName,
    pub kind: LossKind,
}

/// Effects that were lost or weakened during conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub losses: Vec<ConversionLoss>,
}

impl ConversionReport {
    pub fn is_lossless(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn dropped(&self) -> impl Iterator<Item = &ConversionLoss> {
        self.losses.iter().filter(|l| l.kind == LossKind::Dropped)
    }
}

/// Convert one legacy card, appending losses to `report`
pub fn convert_card(legacy: &LegacyCard, report: &mut ConversionReport) -> Card {
    let id = CardId::new(legacy.id.clone());
    let mut effects: SmallVec<[Effect; 2]> = SmallVec::new();

    for le in &legacy.effects {
        let value = le.value.unwrap_or(0);
        let converted = match le.effect {
            LegacyEffectName::AddRice => Some(Effect::AddRice(value)),
            LegacyEffectName::AddKnowledge => Some(Effect::AddKnowledge(value)),
            LegacyEffectName::Draw => Some(Effect::Draw(value)),
            LegacyEffectName::AddVictory => Some(Effect::AddVictory(value)),
            // TODO: needs a discount field on PlayerState before it can convert
            LegacyEffectName::Discount => None,
            LegacyEffectName::TrashFromHand => None,
        };

        match converted {
            Some(effect) => {
                if le.condition.is_some() {
                    report.losses.push(ConversionLoss {
                        card_id: id.clone(),
                        effect: le.effect,
                        kind: LossKind::ConditionIgnored,
                    });
                }
                effects.push(effect);
            }
            None => report.losses.push(ConversionLoss {
                card_id: id.clone(),
                effect: le.effect,
                kind: LossKind::Dropped,
            }),
        }
    }

    Card {
        id,
        name: legacy.name.clone(),
        card_type: legacy.card_type.into(),
        cost: legacy.cost,
        knowledge_required: legacy.required_knowledge.unwrap_or(0),
        effects,
        text: legacy.text.clone(),
        image: None,
    }
}

/// Convert a legacy JSON card list into a validated catalog
///
/// With `era` set, only cards from that era are kept.
pub fn convert_legacy_json(json: &str, era: Option<&str>) -> Result<(CardCatalog, ConversionReport)> {
    let legacy: Vec<LegacyCard> = serde_json::from_str(json)?;
    let mut report = ConversionReport::default();
    let cards = legacy
        .iter()
        .filter(|c| era.map_or(true, |e| c.era == e))
        .map(|c| convert_card(c, &mut report))
        .collect();
    Ok((CardCatalog::from_cards(cards)?, report))
}

pub fn load_legacy_file(path: &Path, era: Option<&str>) -> Result<(CardCatalog, ConversionReport)> {
    let content = std::fs::read_to_string(path)?;
    convert_legacy_json(&content, era)
}
