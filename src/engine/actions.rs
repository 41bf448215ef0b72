use core::fmt;

use serde::{Deserialize, Serialize};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    /// Повышение существующей ставки.
    Raise,
    /// Первая ставка на улице (когда ещё нет текущей ставки).
    Bet,
    /// Поставить весь стек.
    AllIn,
}

impl PlayerAction {
    /// Действия, которые не двигают фишки.
    pub fn is_passive(self) -> bool {
        matches!(self, PlayerAction::Fold | PlayerAction::Check)
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerAction::Fold => "fold",
            PlayerAction::Check => "check",
            PlayerAction::Call => "call",
            PlayerAction::Raise => "raise",
            PlayerAction::Bet => "bet",
            PlayerAction::AllIn => "allin",
        };
        f.write_str(s)
    }
}
