use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Размер стандартной колоды.
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Колода закончилась")]
    Exhausted,
}

/// Колода карт с курсором раздачи.
///
/// Карты раздаются с начала списка; `position` указывает на следующую.
/// Внутри одного перемешивания ни одна карта не выдаётся дважды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Diamonds 2..A, Clubs 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, position: 0 }
    }

    /// Перемешать всю колоду и вернуть курсор в начало.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
        self.position = 0;
    }

    /// Сколько карт ещё можно раздать.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Взять следующую карту.
    pub fn deal_next_card(&mut self) -> Result<Card, DeckError> {
        let card = *self.cards.get(self.position).ok_or(DeckError::Exhausted)?;
        self.position += 1;
        Ok(card)
    }

    /// Взять n карт подряд. Либо все n, либо ошибка без сдвига курсора.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.remaining() < n {
            return Err(DeckError::Exhausted);
        }
        let taken = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(taken)
    }

    /// Уже розданные карты (в порядке раздачи).
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.position]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard_52()
    }
}
