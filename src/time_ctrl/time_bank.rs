// src/time_ctrl/time_bank.rs
//! Таймбанк игроков: сколько дополнительного времени у кого осталось.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::PlayerId;

use super::TimeRules;

#[derive(Clone, Debug, Default)]
pub struct TimeBank {
    players: HashMap<PlayerId, Duration>,
}

impl TimeBank {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    /// Завести банк игроку, если его ещё нет.
    pub fn init_player(&mut self, rules: &TimeRules, player_id: PlayerId) {
        self.players
            .entry(player_id)
            .or_insert_with(|| rules.bank_per_player());
    }

    /// Остаток таймбанка у игрока.
    pub fn remaining_for(&self, player_id: PlayerId) -> Duration {
        self.players
            .get(&player_id)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Списать `requested` из банка игрока.
    /// Возвращает фактически списанное (может быть меньше, если банк пустеет).
    pub fn spend(&mut self, player_id: PlayerId, requested: Duration) -> Duration {
        match self.players.get_mut(&player_id) {
            Some(bank) => {
                let spent = requested.min(*bank);
                *bank -= spent;
                spent
            }
            None => Duration::ZERO,
        }
    }
}
