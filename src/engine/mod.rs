//! Движок стола: ходы, ставки, переход фаз.
//!
//! Основные операции (методы `Table`, см. `game_loop`):
//!   - `begin_round` / `start_round` – запустить новый раунд;
//!   - `step` – один запрос хода и его применение;
//!   - `play_round` – довести раунд до Interim.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod strategy;
pub mod turn;
pub mod validation;

pub use actions::PlayerAction;
pub use betting::{BettingState, BlindKind};
pub use errors::{TableError, TurnError};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use strategy::{PassiveStrategy, ScriptStep, ScriptedStrategy, Strategy};
pub use turn::{PlayerResponse, Turn, TurnNotification};

/// RNG интерфейс для перемешивания колоды.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
