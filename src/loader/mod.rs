//! Card catalog and deck loaders

pub mod database;
pub mod deck;
pub mod game_init;
pub mod legacy;

pub use database::CardCatalog;
pub use deck::{DeckEntry, DeckLoader, DeckSpec};
pub use game_init::GameInitializer;
pub use legacy::{convert_legacy_json, ConversionReport};
