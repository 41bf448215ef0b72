//! Стратегии игроков: как из уведомления стола получить ход.
//!
//! Стол знает только трейт `Strategy`; конкретная реализация может быть
//! ботом, скриптом для тестов или интерактивным вводом.

use std::collections::VecDeque;

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::PlayerAction;
use crate::engine::turn::{PlayerResponse, Turn, TurnNotification};

pub trait Strategy {
    /// Принять решение. Вызов может блокироваться сколько угодно –
    /// ограничение по времени накладывает стол.
    fn play_turn(&mut self, player: &Player, notification: &TurnNotification) -> PlayerResponse;
}

impl<F> Strategy for F
where
    F: FnMut(&Player, &TurnNotification) -> PlayerResponse,
{
    fn play_turn(&mut self, player: &Player, notification: &TurnNotification) -> PlayerResponse {
        self(player, notification)
    }
}

/// Пассивный бот: ставит блайнды, чекает, если можно, иначе коллирует.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveStrategy;

impl PassiveStrategy {
    pub fn decide(player: &Player, notification: &TurnNotification) -> Turn {
        if notification.allows(PlayerAction::Check) {
            Turn::check(player)
        } else if notification.allows(PlayerAction::Call) {
            Turn::call(player, notification.call_amount.min(player.chips()))
        } else {
            Turn::fold(player)
        }
    }
}

impl Strategy for PassiveStrategy {
    fn play_turn(&mut self, player: &Player, notification: &TurnNotification) -> PlayerResponse {
        PassiveStrategy::decide(player, notification).into()
    }
}

/// Шаг сценария для `ScriptedStrategy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    Act(PlayerAction, Chips),
    /// Сделать вид, что время вышло.
    TimeOut,
}

/// Игрок по сценарию: отдаёт заготовленные ответы по порядку,
/// а когда они кончаются – играет как `PassiveStrategy`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStrategy {
    steps: VecDeque<ScriptStep>,
}

impl ScriptedStrategy {
    pub fn new<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = ScriptStep>,
    {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Сценарий из пар (действие, сумма).
    pub fn from_actions<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = (PlayerAction, u64)>,
    {
        Self::new(
            actions
                .into_iter()
                .map(|(action, amount)| ScriptStep::Act(action, Chips(amount))),
        )
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl Strategy for ScriptedStrategy {
    fn play_turn(&mut self, player: &Player, notification: &TurnNotification) -> PlayerResponse {
        match self.steps.pop_front() {
            Some(ScriptStep::Act(action, amount)) => Turn::new(player, action, amount).into(),
            Some(ScriptStep::TimeOut) => PlayerResponse::TimedOut,
            None => PassiveStrategy::decide(player, notification).into(),
        }
    }
}
