use core::fmt;

use serde::{Deserialize, Serialize};

/// Фаза раунда. Двигается только вперёд:
/// Preflop -> Flop -> Turn -> River -> Interim.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoundPhase {
    Preflop,
    Flop,
    Turn,
    River,
    /// Раунд закончен, ждём шоудаун/следующую раздачу.
    Interim,
}

impl RoundPhase {
    /// Следующая фаза. Interim – терминальная.
    pub fn next(self) -> Option<RoundPhase> {
        match self {
            RoundPhase::Preflop => Some(RoundPhase::Flop),
            RoundPhase::Flop => Some(RoundPhase::Turn),
            RoundPhase::Turn => Some(RoundPhase::River),
            RoundPhase::River => Some(RoundPhase::Interim),
            RoundPhase::Interim => None,
        }
    }

    /// Сколько карт борда открывается при входе в фазу.
    pub fn board_cards(self) -> usize {
        match self {
            RoundPhase::Flop => 3,
            RoundPhase::Turn | RoundPhase::River => 1,
            RoundPhase::Preflop | RoundPhase::Interim => 0,
        }
    }

    pub fn is_betting(self) -> bool {
        self != RoundPhase::Interim
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Preflop => "PREFLOP",
            RoundPhase::Flop => "FLOP",
            RoundPhase::Turn => "TURN",
            RoundPhase::River => "RIVER",
            RoundPhase::Interim => "INTERIM",
        };
        f.write_str(s)
    }
}
