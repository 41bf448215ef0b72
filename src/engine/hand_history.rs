use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::RoundPhase;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::actions::PlayerAction;
use crate::engine::errors::TurnError;
use crate::engine::turn::Turn;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новый раунд начался, кнопка передвинута.
    RoundStarted {
        dealer: SeatIndex,
        dealer_name: String,
    },

    /// Оба блайнда обработаны.
    BlindsPosted { pot: Chips },

    /// Игрок получил карманные карты (сами карты в историю не пишем).
    HoleCardsDealt {
        player_id: PlayerId,
        player_name: String,
    },

    /// Открыты общие карты.
    BoardDealt { phase: RoundPhase, cards: Vec<Card> },

    /// Стол принял ход.
    TurnAccepted { turn: Turn, pot_after: Chips },

    /// Стол отклонил ход и спросит игрока снова.
    TurnRejected {
        player_id: PlayerId,
        reason: TurnError,
    },

    /// Игрок не уложился во время – стол сходил за него.
    DecisionTimedOut {
        player_id: PlayerId,
        action: PlayerAction,
    },

    /// Переход на следующую фазу.
    PhaseChanged { phase: RoundPhase },

    /// Раунд дошёл до Interim.
    RoundClosed { pot: Chips },
}

impl fmt::Display for HandEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandEventKind::RoundStarted { dealer_name, .. } => {
                write!(f, "ROUND STARTED, DEALER: {dealer_name}")
            }
            HandEventKind::BlindsPosted { pot } => write!(f, "POT AMOUNT: {pot}"),
            HandEventKind::HoleCardsDealt { player_name, .. } => {
                write!(f, "{player_name} received hole cards.")
            }
            HandEventKind::BoardDealt { phase, cards } => {
                let cards: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
                write!(f, "{phase}: {}", cards.join(" "))
            }
            HandEventKind::TurnAccepted { turn, .. } => {
                write!(f, "TABLE RECEIVED ACTION OF {turn}")
            }
            HandEventKind::TurnRejected { player_id, reason } => {
                write!(f, "TABLE REJECTED ACTION OF player {player_id}: {reason}")
            }
            HandEventKind::DecisionTimedOut { player_id, action } => {
                write!(f, "player {player_id} timed out, auto {action}")
            }
            HandEventKind::PhaseChanged { phase } => write!(f, "PHASE: {phase}"),
            HandEventKind::RoundClosed { pot } => write!(f, "ROUND CLOSED, POT: {pot}"),
        }
    }
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// Принятые ходы в порядке поступления.
    pub fn accepted_turns(&self) -> Vec<&Turn> {
        self.events
            .iter()
            .filter_map(|e| match &e.kind {
                HandEventKind::TurnAccepted { turn, .. } => Some(turn),
                _ => None,
            })
            .collect()
    }

    /// Фазы, через которые прошёл раунд (начиная с Preflop).
    pub fn phases(&self) -> Vec<RoundPhase> {
        let mut phases = vec![RoundPhase::Preflop];
        phases.extend(self.events.iter().filter_map(|e| match e.kind {
            HandEventKind::PhaseChanged { phase } => Some(phase),
            _ => None,
        }));
        phases
    }

    /// Текстовый след: одна строка на событие.
    pub fn transcript(&self) -> Vec<String> {
        self.events.iter().map(|e| e.kind.to_string()).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
