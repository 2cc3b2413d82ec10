//! Sengoku Deck - rules engine for a two-sided deck-building card game
//!
//! Players alternate five-phase turns, turning rice and knowledge cards into
//! purchases from a shared supply. Every transition takes a `GameState` by
//! reference and returns a new one, so a game can be replayed from any point.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{EngineError, Result};
