use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DeckError};
use crate::domain::PlayerId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Игроку {0} уже розданы карманные карты в этом раунде")]
    HoleAlreadyDealt(PlayerId),

    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Статус игрока в текущем раунде (участие в раздаче).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в оллыне – не может больше делать ставки.
    AllIn,
    /// Сидит за столом, но не участвует (подсел посреди раунда или без фишек).
    SittingOut,
}

impl PlayerStatus {
    /// Ещё претендует на банк.
    pub fn is_in_hand(self) -> bool {
        matches!(self, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ещё принимать решения в этом раунде.
    pub fn can_act(self) -> bool {
        matches!(self, PlayerStatus::Active)
    }
}

/// Игрок за столом: имя, стек, карманные карты и сумма,
/// которую стол требует уравнять в текущем ходе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    stack: Chips,
    hole: [Option<Card>; 2],
    required_bet: Chips,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: [None, None],
            required_bet: Chips::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> Chips {
        self.stack
    }

    pub fn hole(&self) -> [Option<Card>; 2] {
        self.hole
    }

    pub fn has_hole(&self) -> bool {
        self.hole[0].is_some()
    }

    pub fn required_bet(&self) -> Chips {
        self.required_bet
    }

    pub fn set_required_bet(&mut self, amount: Chips) {
        self.required_bet = amount;
    }

    /// Взять две карманные карты из колоды. Повторная раздача в том же
    /// раунде запрещена – сначала `clear_hole`.
    pub fn draw_hole(&mut self, deck: &mut Deck) -> Result<(), PlayerError> {
        if self.has_hole() {
            return Err(PlayerError::HoleAlreadyDealt(self.id));
        }
        let cards = deck.deal_n(2)?;
        self.hole = [Some(cards[0]), Some(cards[1])];
        Ok(())
    }

    pub fn clear_hole(&mut self) {
        self.hole = [None, None];
    }

    /// Строка вида "Ah Kd" (или "-" если карт нет).
    pub fn hole_as_string(&self) -> String {
        match self.hole {
            [Some(a), Some(b)] => format!("{a} {b}"),
            _ => "-".to_string(),
        }
    }

    /// Списать фишки со стека (не больше, чем есть).
    pub(crate) fn take_chips(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        real
    }

    /// Зачислить фишки (выплата банка внешним кодом).
    pub fn add_chips(&mut self, amount: Chips) {
        self.stack += amount;
    }
}
