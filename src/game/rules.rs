//! Tunable rule constants

use crate::core::CardType;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial pile size per card type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupplyCounts {
    pub resource: u32,
    pub person: u32,
    pub event: u32,
    pub victory: u32,
}

impl SupplyCounts {
    pub fn for_type(&self, card_type: CardType) -> u32 {
        match card_type {
            CardType::Resource => self.resource,
            CardType::Person => self.person,
            CardType::Event => self.event,
            CardType::Victory => self.victory,
        }
    }
}

impl Default for SupplyCounts {
    fn default() -> Self {
        SupplyCounts {
            resource: 10,
            person: 10,
            event: 10,
            victory: 12,
        }
    }
}

/// Game rules, loadable from JSON
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Cards in hand after the draw phase
    pub hand_size: usize,

    /// The game ends at cleanup once the turn counter reaches this value
    pub max_turns: u32,

    /// Number of simultaneously empty piles that ends the game
    pub depleted_piles_to_end: usize,

    pub supply_counts: SupplyCounts,

    /// Deal an opening hand during initialization
    pub deal_opening_hand: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            hand_size: 5,
            max_turns: 25,
            depleted_piles_to_end: 3,
            supply_counts: SupplyCounts::default(),
            deal_opening_hand: true,
        }
    }
}

impl RulesConfig {
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: RulesConfig = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(EngineError::InvalidConfig("max_turns must be at least 1".to_string()));
        }
        if self.hand_size == 0 {
            return Err(EngineError::InvalidConfig("hand_size must be at least 1".to_string()));
        }
        if self.supply_counts.victory == 0 {
            return Err(EngineError::InvalidConfig(
                "supply_counts.victory must be at least 1".to_string(),
            ));
        }
        if self.depleted_piles_to_end == 0 {
            return Err(EngineError::InvalidConfig(
                "depleted_piles_to_end must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RulesConfig::default();
        assert_eq!(rules.hand_size, 5);
        assert_eq!(rules.max_turns, 25);
        assert_eq!(rules.depleted_piles_to_end, 3);
        assert_eq!(rules.supply_counts.for_type(CardType::Victory), 12);
        assert_eq!(rules.supply_counts.for_type(CardType::Person), 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules = RulesConfig::from_json_str(r#"{"max_turns": 12, "supply_counts": {"victory": 20}}"#)
            .unwrap();
        assert_eq!(rules.max_turns, 12);
        assert_eq!(rules.hand_size, 5);
        assert_eq!(rules.supply_counts.victory, 20);
        assert_eq!(rules.supply_counts.resource, 10);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(RulesConfig::from_json_str(r#"{"max_turn": 12}"#).is_err());
    }

    #[test]
    fn test_zero_turns_rejected() {
        assert!(matches!(
            RulesConfig::from_json_str(r#"{"max_turns": 0}"#),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_hand_or_victory_supply_rejected() {
        assert!(matches!(
            RulesConfig::from_json_str(r#"{"hand_size": 0}"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            RulesConfig::from_json_str(r#"{"supply_counts": {"victory": 0}}"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(RulesConfig::default().with_hand_size(0).validate().is_err());
    }
}
