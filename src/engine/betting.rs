use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::RoundPhase;
use crate::domain::SeatIndex;

/// Какой блайнд постится.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlindKind {
    Small,
    Big,
}

/// Состояние раунда ставок (на конкретной фазе).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Фаза, к которой относится этот раунд ставок.
    pub phase: RoundPhase,
    /// Текущая целевая ставка фазы, до которой должны дотянуться игроки.
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (bet/raise/all-in сверх ставки).
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих: кто ещё должен сделать действие на этой фазе.
    pub to_act: VecDeque<SeatIndex>,
    /// Ставки seat'ов на этой фазе (индекс = SeatIndex).
    pub street_bets: Vec<Chips>,
}

impl BettingState {
    pub fn new(phase: RoundPhase, min_raise: Chips, seat_count: usize) -> Self {
        Self {
            phase,
            current_bet: Chips::ZERO,
            min_raise,
            last_aggressor: None,
            to_act: VecDeque::new(),
            street_bets: vec![Chips::ZERO; seat_count],
        }
    }

    /// Чей сейчас ход.
    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.to_act.front().copied()
    }

    /// Ставка seat'а на этой фазе.
    pub fn street_bet(&self, seat: SeatIndex) -> Chips {
        self.street_bets.get(seat).copied().unwrap_or(Chips::ZERO)
    }

    /// Сколько seat'у нужно добавить, чтобы уравнять текущую ставку.
    pub fn to_call(&self, seat: SeatIndex) -> Chips {
        self.current_bet.saturating_sub(self.street_bet(seat))
    }

    /// Учесть фишки, внесённые seat'ом. Возвращает новую ставку seat'а.
    pub fn add_bet(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        if seat >= self.street_bets.len() {
            self.street_bets.resize(seat + 1, Chips::ZERO);
        }
        self.street_bets[seat] += amount;
        self.street_bets[seat]
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Обновить состояние после bet/raise:
    /// - current_bet;
    /// - min_raise (только полный рейз его двигает);
    /// - last_aggressor;
    /// - новая очередь to_act (её формирует стол).
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips, new_to_act: Vec<SeatIndex>) {
        let raise_size = new_bet.saturating_sub(self.current_bet);
        if raise_size >= self.min_raise {
            self.min_raise = raise_size;
        }
        self.current_bet = new_bet;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act.into();
    }

    /// Раунд ставок завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
