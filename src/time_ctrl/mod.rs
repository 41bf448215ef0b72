// src/time_ctrl/mod.rs
//! Контроль времени на решение (shot clock + time bank).
//!
//! Здесь собираем:
//! - правила (`TimeRules`);
//! - банк времени игроков (`TimeBank`);
//! - таймер хода (`TurnClock`);
//! - фасад `TimeController`, которым пользуется стол.

pub mod clock;
pub mod time_bank;
pub mod time_rules;

use std::time::Duration;

pub use clock::{TimeoutState, TurnClock};
pub use time_bank::TimeBank;
pub use time_rules::TimeRules;

use crate::domain::PlayerId;

#[derive(Clone, Debug)]
pub struct TimeController {
    pub rules: TimeRules,
    pub bank: TimeBank,
    pub clock: TurnClock,
}

impl TimeController {
    pub fn new(rules: TimeRules) -> Self {
        Self {
            rules,
            bank: TimeBank::new(),
            clock: TurnClock::new(),
        }
    }

    /// Завести таймбанк новому игроку.
    pub fn init_player(&mut self, player_id: PlayerId) {
        self.bank.init_player(&self.rules, player_id);
    }

    /// Начать ход игрока. Возвращает бюджет на решение.
    pub fn start_turn(&mut self, player_id: PlayerId) -> Option<Duration> {
        self.clock.start_turn(player_id, &self.rules, &self.bank)
    }

    /// Игрок ответил – останавливаем таймер.
    pub fn finish_turn(&mut self) -> TimeoutState {
        self.clock.finish(&mut self.bank)
    }
}
