// src/time_ctrl/clock.rs
//! Таймер хода (shot clock) для текущего игрока.

use std::time::{Duration, Instant};

use crate::domain::PlayerId;

use super::{TimeBank, TimeRules};

/// Чем закончился ход с точки зрения времени.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutState {
    /// Уложился в базовое время (или ограничения нет).
    InTime,
    /// Вышел за базовое время, но добрал из таймбанка.
    UsedBank { spent: Duration },
    /// Базовое время и таймбанк исчерпаны.
    TimedOut,
    /// Таймер не был запущен.
    NoActivePlayer,
}

#[derive(Clone, Debug, Default)]
pub struct TurnClock {
    pub current_player: Option<PlayerId>,
    started: Option<Instant>,
    base: Option<Duration>,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать ход. Возвращает полный бюджет (база + остаток банка).
    pub fn start_turn(
        &mut self,
        player_id: PlayerId,
        rules: &TimeRules,
        bank: &TimeBank,
    ) -> Option<Duration> {
        self.current_player = Some(player_id);
        self.started = Some(Instant::now());
        self.base = rules.base_action();
        self.base.map(|base| base + bank.remaining_for(player_id))
    }

    pub fn clear(&mut self) {
        self.current_player = None;
        self.started = None;
        self.base = None;
    }

    /// Остановить таймер, посчитав реально прошедшее время.
    pub fn finish(&mut self, bank: &mut TimeBank) -> TimeoutState {
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or(Duration::ZERO);
        self.finish_with(elapsed, bank)
    }

    /// Остановить таймер с заданным прошедшим временем:
    /// - сначала тратится базовое время;
    /// - перерасход списывается из таймбанка;
    /// - если банка не хватило – таймаут (банк обнуляется).
    pub fn finish_with(&mut self, elapsed: Duration, bank: &mut TimeBank) -> TimeoutState {
        let Some(player_id) = self.current_player else {
            return TimeoutState::NoActivePlayer;
        };
        let base = self.base;
        self.clear();

        let Some(base) = base else {
            return TimeoutState::InTime;
        };
        if elapsed <= base {
            return TimeoutState::InTime;
        }

        let overrun = elapsed - base;
        let spent = bank.spend(player_id, overrun);
        if spent < overrun {
            TimeoutState::TimedOut
        } else {
            TimeoutState::UsedBank { spent }
        }
    }
}
