//! Общие хелперы для интеграционных тестов стола.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use poker_table::domain::{Chips, Player, PlayerId, Table, TableConfig};
use poker_table::engine::{PassiveStrategy, PlayerResponse, Strategy, TurnNotification};
use poker_table::time_ctrl::TimeRules;

/// Начальный стек для тестовых игроков.
pub const TEST_STACK: u64 = 100;

pub const NAMES: [&str; 6] = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"];

/// Журнал запросов: (кого спросили, что предложили).
pub type SolicitationLog = Rc<RefCell<Vec<(PlayerId, TurnNotification)>>>;

pub fn new_log() -> SolicitationLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Стратегия-обёртка, которая пишет каждый запрос в общий журнал.
pub struct Recorder {
    pub inner: Box<dyn Strategy>,
    pub log: SolicitationLog,
}

impl Strategy for Recorder {
    fn play_turn(&mut self, player: &Player, notification: &TurnNotification) -> PlayerResponse {
        self.log
            .borrow_mut()
            .push((player.id, notification.clone()));
        self.inner.play_turn(player, notification)
    }
}

/// Конфиг 1/2 без ограничения времени (тесты не должны зависеть от часов).
pub fn test_config() -> TableConfig {
    TableConfig {
        time_rules: TimeRules::unlimited(),
        ..TableConfig::with_blinds(1, 2)
    }
}

pub fn player(seat: usize) -> Player {
    Player::new(seat as PlayerId + 1, NAMES[seat], Chips(TEST_STACK))
}

/// Стол с `n` пассивными игроками Alice, Bob, Carol, ...
pub fn passive_table(n: usize) -> Table {
    let mut table = Table::new(test_config()).expect("valid config");
    for seat in 0..n {
        table
            .add_player(player(seat), PassiveStrategy)
            .expect("seat available");
    }
    table
}

/// Стол, где стратегию для каждого места задаёт вызывающий код,
/// а все запросы пишутся в журнал.
pub fn recorded_table(strategies: Vec<Box<dyn Strategy>>, log: &SolicitationLog) -> Table {
    let mut table = Table::new(test_config()).expect("valid config");
    for (seat, inner) in strategies.into_iter().enumerate() {
        table
            .add_player(
                player(seat),
                Recorder {
                    inner,
                    log: Rc::clone(log),
                },
            )
            .expect("seat available");
    }
    table
}

/// Кого спрашивали, по порядку.
pub fn solicited_ids(log: &SolicitationLog) -> Vec<PlayerId> {
    log.borrow().iter().map(|(id, _)| *id).collect()
}
