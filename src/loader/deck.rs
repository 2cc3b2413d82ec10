//! Starting deck loader (.deck format)
//!
//! One entry per line: `<count> <CARD_ID>`. Blank lines and `#` comments
//! are ignored.

use crate::core::CardId;
use crate::loader::CardCatalog;
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Deck loader for .deck files
pub struct DeckLoader;

impl DeckLoader {
    pub fn load_from_file(path: &Path) -> Result<DeckSpec> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str) -> Result<DeckSpec> {
        let mut entries = Vec::new();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (count_str, id) = line.split_once(char::is_whitespace).ok_or_else(|| {
                EngineError::InvalidDeckFormat(format!("line {}: expected '<count> <id>'", lineno + 1))
            })?;
            let count = count_str.parse::<u32>().map_err(|_| {
                EngineError::InvalidDeckFormat(format!("line {}: bad count '{count_str}'", lineno + 1))
            })?;

            entries.push(DeckEntry {
                card_id: CardId::new(id.trim()),
                count,
            });
        }

        let deck = DeckSpec { entries };
        if deck.total_cards() == 0 {
            return Err(EngineError::InvalidDeckFormat("Empty deck".to_string()));
        }
        Ok(deck)
    }
}

/// A card id and how many copies to start with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card_id: CardId,
    pub count: u32,
}

/// Starting deck composition, shared by both sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub entries: Vec<DeckEntry>,
}

impl DeckSpec {
    pub fn new(entries: Vec<DeckEntry>) -> Self {
        DeckSpec { entries }
    }

    /// Seven small rice bags and three villages
    pub fn standard() -> Self {
        DeckSpec {
            entries: vec![
                DeckEntry {
                    card_id: CardId::new("RICE_SMALL"),
                    count: 7,
                },
                DeckEntry {
                    card_id: CardId::new("VP_VILLAGE"),
                    count: 3,
                },
            ],
        }
    }

    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Expand to one id per copy, in entry order
    pub fn card_ids(&self) -> Vec<CardId> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.card_id.clone()).take(e.count as usize))
            .collect()
    }

    /// Fail on the first id the catalog does not know
    pub fn validate(&self, catalog: &CardCatalog) -> Result<()> {
        for entry in &self.entries {
            if !catalog.contains(&entry.card_id) {
                return Err(EngineError::UnknownCard(entry.card_id.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for DeckSpec {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_deck() {
        let content = r#"
# Standard opening
7 RICE_SMALL
3 VP_VILLAGE
"#;

        let deck = DeckLoader::parse(content).unwrap();
        assert_eq!(deck, DeckSpec::standard());
        assert_eq!(deck.total_cards(), 10);
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(
            DeckLoader::parse("# nothing\n\n"),
            Err(EngineError::InvalidDeckFormat(_))
        ));
        assert!(DeckLoader::parse("0 RICE_SMALL").is_err());
    }

    #[test]
    fn test_bad_line_rejected() {
        assert!(DeckLoader::parse("RICE_SMALL").is_err());
        assert!(DeckLoader::parse("seven RICE_SMALL").is_err());
    }

    #[test]
    fn test_card_ids_expand_in_order() {
        let ids = DeckSpec::standard().card_ids();
        assert_eq!(ids.len(), 10);
        assert_eq!(ids[0].as_str(), "RICE_SMALL");
        assert_eq!(ids[9].as_str(), "VP_VILLAGE");
    }

    #[test]
    fn test_validate_against_catalog() {
        let catalog = CardCatalog::bundled().unwrap();
        assert!(DeckSpec::standard().validate(&catalog).is_ok());

        let bad = DeckLoader::parse("2 NOT_A_CARD").unwrap();
        assert!(matches!(bad.validate(&catalog), Err(EngineError::UnknownCard(_))));
    }
}
