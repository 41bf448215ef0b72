//! Доменная модель стола: карты, колода, фишки, игроки, фазы, стол.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

pub type PlayerId = u64;

/// Индекс места за столом (порядок рассадки).
pub type SeatIndex = usize;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
