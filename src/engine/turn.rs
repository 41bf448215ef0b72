//! Контракты одного хода: уведомление от стола игроку (`TurnNotification`)
//! и ответ игрока столу (`Turn`).

use core::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::PlayerId;
use crate::engine::actions::PlayerAction;
use crate::engine::betting::BlindKind;

/// Одно решение игрока. `bet_amount` – сколько фишек игрок *добавляет*
/// этим действием (0 для Fold/Check).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub player_id: PlayerId,
    pub player_name: String,
    pub action: PlayerAction,
    pub bet_amount: Chips,
}

impl Turn {
    pub fn new(player: &Player, action: PlayerAction, bet_amount: Chips) -> Self {
        Self {
            player_id: player.id,
            player_name: player.name.clone(),
            action,
            bet_amount,
        }
    }

    pub fn fold(player: &Player) -> Self {
        Self::new(player, PlayerAction::Fold, Chips::ZERO)
    }

    pub fn check(player: &Player) -> Self {
        Self::new(player, PlayerAction::Check, Chips::ZERO)
    }

    pub fn call(player: &Player, amount: Chips) -> Self {
        Self::new(player, PlayerAction::Call, amount)
    }

    pub fn raise(player: &Player, amount: Chips) -> Self {
        Self::new(player, PlayerAction::Raise, amount)
    }

    pub fn bet(player: &Player, amount: Chips) -> Self {
        Self::new(player, PlayerAction::Bet, amount)
    }

    pub fn all_in(player: &Player) -> Self {
        Self::new(player, PlayerAction::AllIn, player.chips())
    }
}

impl fmt::Display for Turn {
    /// "Alice called 2.", "Bob raised 6.", "Carol folded.", "Dave beted."
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.action == PlayerAction::Raise { "d" } else { "ed" };
        write!(f, "{} {}{}", self.player_name, self.action, suffix)?;
        if matches!(self.action, PlayerAction::Raise | PlayerAction::Call) {
            write!(f, " {}", self.bet_amount)?;
        }
        f.write_str(".")
    }
}

/// Что стол предлагает игроку на его ходу. Создаётся заново на каждый запрос.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnNotification {
    /// Разрешённые действия.
    pub legal_actions: Vec<PlayerAction>,
    /// Сколько нужно добавить, чтобы уравнять.
    pub call_amount: Chips,
    /// Минимальный шаг для bet/raise (сверх call_amount).
    pub min_raise: Chips,
    /// Какой блайнд постится (None – обычный ход).
    pub blind: Option<BlindKind>,
    /// Сколько времени есть на решение (None – без ограничений).
    pub time_budget: Option<Duration>,
}

impl TurnNotification {
    pub fn allows(&self, action: PlayerAction) -> bool {
        self.legal_actions.contains(&action)
    }
}

/// Ответ игрока на запрос хода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerResponse {
    Acted(Turn),
    /// Игрок не успел принять решение.
    TimedOut,
}

impl From<Turn> for PlayerResponse {
    fn from(turn: Turn) -> Self {
        PlayerResponse::Acted(turn)
    }
}
