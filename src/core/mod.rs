//! Core card and player types

pub mod card;
pub mod effects;
pub mod player;

pub use card::{Card, CardId, CardType};
pub use effects::Effect;
pub use player::{PlayerState, Side};
