use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::deck::DeckError;
use crate::domain::player::PlayerError;
use crate::domain::PlayerId;
use crate::engine::actions::PlayerAction;

/// Почему стол отклонил ход игрока.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnError {
    #[error("ход сделан от имени игрока {got}, ожидался {expected}")]
    WrongPlayer { expected: PlayerId, got: PlayerId },

    #[error("действие {0} не входит в список разрешённых")]
    IllegalAction(PlayerAction),

    #[error("{action} не должен двигать фишки (передано {amount})")]
    NonZeroAmount { action: PlayerAction, amount: Chips },

    #[error("ставка {amount} меньше суммы колла {required}")]
    BetBelowCall { amount: Chips, required: Chips },

    #[error("ставка {amount} больше суммы колла {required}")]
    BetAboveCall { amount: Chips, required: Chips },

    #[error("рейз {amount} меньше минимума {minimum}")]
    RaiseTooSmall { amount: Chips, minimum: Chips },

    #[error("недостаточно фишек: ставка {amount}, стек {stack}")]
    NotEnoughChips { amount: Chips, stack: Chips },

    #[error("all-in должен быть на весь стек {stack}, передано {amount}")]
    AllInMismatch { amount: Chips, stack: Chips },
}

/// Ошибки стола.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Недостаточно активных игроков для раунда: {active}, нужно минимум 3")]
    NotEnoughPlayers { active: usize },

    #[error("Раунд уже идёт")]
    HandAlreadyInProgress,

    #[error("Раунд не активен")]
    NoActiveHand,

    #[error("Банк {0} прошлой раздачи не разыгран")]
    UnsettledPot(Chips),

    #[error("Все места за столом заняты")]
    TableFull,

    #[error("Игрок {0} уже сидит за столом")]
    DuplicatePlayer(PlayerId),

    #[error("В колоде не хватит карт: нужно {needed}, есть {available}")]
    DeckTooSmall { needed: usize, available: usize },

    #[error("Игрок {player_id}: ход отклонён – {reason}")]
    InvalidTurn { player_id: PlayerId, reason: TurnError },

    #[error("Некорректный конфиг стола: {0}")]
    Config(String),

    #[error("Раунд прерван: {0}")]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Player(#[from] PlayerError),
}
