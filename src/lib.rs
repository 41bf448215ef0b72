//! Покерный стол: блайнды, раздача карманных карт и круги ставок
//! (префлоп, флоп, тёрн, ривер) для одного стола.
//!
//! Ядро – машина состояний раунда в `engine::game_loop`: кто сейчас ходит,
//! какие действия разрешены, как ставки попадают в банк и когда круг
//! закрывается и начинается следующая фаза.

pub mod domain;
pub mod engine;
pub mod infra;
pub mod time_ctrl;

pub use domain::{Card, Chips, Deck, Player, PlayerId, RoundPhase, SeatIndex, Table, TableConfig};
pub use engine::{PlayerAction, Strategy, TableError, Turn, TurnError, TurnNotification};
