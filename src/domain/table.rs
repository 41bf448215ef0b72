use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DECK_SIZE};
use crate::domain::hand::RoundPhase;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::SeatIndex;
use crate::engine::betting::{BettingState, BlindKind};
use crate::engine::errors::TableError;
use crate::engine::hand_history::HandHistory;
use crate::engine::pot::Pot;
use crate::engine::strategy::Strategy;
use crate::time_ctrl::{TimeController, TimeRules};

/// Минимум игроков с фишками для старта раунда (два блайнда + один ходящий).
pub const MIN_PLAYERS: usize = 3;

/// Карт на борде за раунд.
pub const BOARD_SIZE: usize = 5;

/// Больше мест колода не обслужит: 2 карты на место + борд.
pub const MAX_SEATS: usize = (DECK_SIZE - BOARD_SIZE) / 2;

/// Конфиг стола: блайнды, количество мест, политика повторных запросов, тайминг.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Максимальное количество мест за столом.
    pub max_seats: usize,
    /// Сколько подряд некорректных ходов одного игрока стол терпит,
    /// прежде чем вернуть ошибку наружу.
    pub max_rejections: u32,
    #[serde(default)]
    pub time_rules: TimeRules,
}

impl TableConfig {
    /// Блайнды 1/2, 10 мест, 3 повтора, стандартный тайминг.
    pub fn standard() -> Self {
        Self {
            small_blind: Chips(1),
            big_blind: Chips(2),
            max_seats: 10,
            max_rejections: 3,
            time_rules: TimeRules::standard(),
        }
    }

    pub fn with_blinds(small_blind: u64, big_blind: u64) -> Self {
        Self {
            small_blind: Chips(small_blind),
            big_blind: Chips(big_blind),
            ..Self::standard()
        }
    }

    pub fn blind_amount(&self, kind: BlindKind) -> Chips {
        match kind {
            BlindKind::Small => self.small_blind,
            BlindKind::Big => self.big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.small_blind.is_zero() {
            return Err(TableError::Config("small_blind должен быть > 0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(TableError::Config("big_blind меньше small_blind".into()));
        }
        if !(MIN_PLAYERS..=MAX_SEATS).contains(&self.max_seats) {
            return Err(TableError::Config(format!(
                "max_seats должен быть в диапазоне {MIN_PLAYERS}..={MAX_SEATS}, получено {}",
                self.max_seats
            )));
        }
        Ok(())
    }

    /// Загрузить и проверить конфиг из JSON.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|e| TableError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Место за столом: данные игрока и его стратегия.
pub struct Seat {
    pub player: Player,
    pub(crate) strategy: Box<dyn Strategy>,
}

/// Стол: рассадка, кнопка, банк и состояние текущего раунда.
///
/// Стол единолично владеет вкладами, статусами и курсором хода;
/// `contributions` и `statuses` параллельны `seats` (индекс = SeatIndex).
pub struct Table {
    pub(crate) config: TableConfig,
    pub(crate) seats: Vec<Seat>,
    pub(crate) statuses: Vec<PlayerStatus>,
    /// Сколько каждый seat внёс в банк за текущий раунд.
    pub(crate) contributions: Vec<Chips>,
    pub(crate) phase: RoundPhase,
    pub(crate) hand_in_progress: bool,
    pub(crate) cards_dealt: bool,
    pub(crate) dealer: Option<SeatIndex>,
    pub(crate) big_blind_seat: Option<SeatIndex>,
    /// Блайнды, которые ещё надо запросить.
    pub(crate) forced: VecDeque<(SeatIndex, BlindKind)>,
    pub(crate) betting: BettingState,
    pub(crate) pot: Pot,
    pub(crate) deck: Deck,
    pub(crate) board: Vec<Card>,
    pub(crate) history: HandHistory,
    pub(crate) time: TimeController,
    /// Подряд отклонённые ходы текущего игрока.
    pub(crate) rejections: u32,
}

impl Table {
    /// Пустой стол с заданной конфигурацией.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let time = TimeController::new(config.time_rules.clone());
        let min_raise = config.big_blind;
        Ok(Self {
            config,
            seats: Vec::new(),
            statuses: Vec::new(),
            contributions: Vec::new(),
            phase: RoundPhase::Preflop,
            hand_in_progress: false,
            cards_dealt: false,
            dealer: None,
            big_blind_seat: None,
            forced: VecDeque::new(),
            betting: BettingState::new(RoundPhase::Preflop, min_raise, 0),
            pot: Pot::new(),
            deck: Deck::standard_52(),
            board: Vec::new(),
            history: HandHistory::new(),
            time,
            rejections: 0,
        })
    }

    /// Стол с уже рассаженными игроками (порядок = порядок мест).
    pub fn with_players<I>(config: TableConfig, players: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Player, Box<dyn Strategy>)>,
    {
        let mut table = Self::new(config)?;
        for (player, strategy) in players {
            table.seat_player(player, strategy)?;
        }
        Ok(table)
    }

    /// Посадить игрока на следующее место.
    ///
    /// Если раунд уже идёт, игрок ждёт следующего раунда.
    pub fn add_player<S>(&mut self, player: Player, strategy: S) -> Result<SeatIndex, TableError>
    where
        S: Strategy + 'static,
    {
        self.seat_player(player, Box::new(strategy))
    }

    fn seat_player(
        &mut self,
        player: Player,
        strategy: Box<dyn Strategy>,
    ) -> Result<SeatIndex, TableError> {
        if self.seats.iter().any(|s| s.player.id == player.id) {
            return Err(TableError::DuplicatePlayer(player.id));
        }
        if self.seats.len() >= self.config.max_seats {
            return Err(TableError::TableFull);
        }

        let status = if self.hand_in_progress {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };

        self.time.init_player(player.id);
        tracing::info!("{} sits down ({:?})", player.name, status);

        self.seats.push(Seat { player, strategy });
        self.statuses.push(status);
        self.contributions.push(Chips::ZERO);
        self.betting.street_bets.push(Chips::ZERO);
        Ok(self.seats.len() - 1)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat).map(|s| &s.player)
    }

    /// Мутабельный доступ к игроку (например, для выплаты банка внешним кодом).
    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat).map(|s| &mut s.player)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().map(|s| &s.player)
    }

    pub fn status(&self, seat: SeatIndex) -> Option<PlayerStatus> {
        self.statuses.get(seat).copied()
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions.get(seat).copied().unwrap_or(Chips::ZERO)
    }

    pub fn contributions(&self) -> &[Chips] {
        &self.contributions
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn pot(&self) -> Chips {
        self.pot.total
    }

    pub fn dealer(&self) -> Option<SeatIndex> {
        self.dealer
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn is_hand_in_progress(&self) -> bool {
        self.hand_in_progress
    }

    /// Seat, который сейчас должен ходить (сначала блайнды, потом очередь ставок).
    pub fn current_player(&self) -> Option<SeatIndex> {
        if !self.hand_in_progress {
            return None;
        }
        self.forced
            .front()
            .map(|(seat, _)| *seat)
            .or_else(|| self.betting.current_actor())
    }

    /// Места, которые ещё претендуют на банк.
    pub fn contesting_seats(&self) -> Vec<SeatIndex> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_in_hand())
            .map(|(seat, _)| seat)
            .collect()
    }

    /// Банк == сумма вкладов.
    pub fn pot_matches_contributions(&self) -> bool {
        self.pot.total == self.contributions.iter().sum::<Chips>()
    }

    /// Остаток таймбанка игрока.
    pub fn time_bank_remaining(&self, seat: SeatIndex) -> Option<std::time::Duration> {
        self.player(seat)
            .map(|p| self.time.bank.remaining_for(p.id))
    }
}
