// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга (shot-clock) для решений игроков.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному столу.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Правила тайминга для одного стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRules {
    /// Базовое время на решение в миллисекундах. `None` – без ограничения.
    pub base_action_ms: Option<u64>,
    /// Сколько миллисекунд time bank есть у каждого игрока на сессию.
    pub bank_per_player_ms: u64,
}

impl TimeRules {
    pub const fn new(base_action_ms: u64, bank_per_player_ms: u64) -> Self {
        Self {
            base_action_ms: Some(base_action_ms),
            bank_per_player_ms,
        }
    }

    /// Стандартный профиль: 20 сек на ход, 60 сек банка.
    pub const fn standard() -> Self {
        Self::new(20_000, 60_000)
    }

    /// Без ограничения времени.
    pub const fn unlimited() -> Self {
        Self {
            base_action_ms: None,
            bank_per_player_ms: 0,
        }
    }

    pub fn base_action(&self) -> Option<Duration> {
        self.base_action_ms.map(Duration::from_millis)
    }

    pub fn bank_per_player(&self) -> Duration {
        Duration::from_millis(self.bank_per_player_ms)
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
