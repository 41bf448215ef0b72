//! Машина состояний раунда: блайнды, раздача, круги ставок, переход фаз.
//!
//! Высокоуровневые операции над `Table`:
//!   - `begin_round` – сдвинуть кнопку, собрать блайнды, раздать карты;
//!   - `step` – запросить ход у текущего игрока и применить его;
//!   - `play_round` – гонять `step` до Interim;
//!   - `start_round` – `begin_round` + `play_round`;
//!   - `settle_pot` – отдать банк внешнему шоудауну между раундами.

use std::collections::VecDeque;

use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DECK_SIZE};
use crate::domain::hand::RoundPhase;
use crate::domain::player::PlayerStatus;
use crate::domain::table::{Seat, Table, BOARD_SIZE, MIN_PLAYERS};
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerAction;
use crate::engine::betting::{BettingState, BlindKind};
use crate::engine::errors::TableError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{actors_after, next_dealer, next_seat_where, order_after};
use crate::engine::turn::{PlayerResponse, Turn, TurnNotification};
use crate::engine::validation::{legal_actions, timeout_action, validate_turn};
use crate::engine::RandomSource;
use crate::time_ctrl::TimeoutState;

impl Table {
    /// Старт раунда и прогон всех кругов ставок до Interim.
    pub fn start_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<RoundPhase, TableError> {
        self.begin_round(rng)?;
        // Оба блайнда могли сфолдить: тогда раунд закрылся ещё в begin_round.
        if !self.hand_in_progress {
            return Ok(self.phase);
        }
        self.play_round()
    }

    /// Старт нового раунда:
    /// - проверяет предусловия (ничего не меняя при ошибке);
    /// - сдвигает кнопку на одно место;
    /// - собирает малый и большой блайнды с двух мест слева от дилера;
    /// - раздаёт карманные карты и открывает префлоп-очередь.
    pub fn begin_round<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), TableError> {
        if self.hand_in_progress {
            return Err(TableError::HandAlreadyInProgress);
        }
        if !self.pot.is_empty() {
            return Err(TableError::UnsettledPot(self.pot.total));
        }

        let eligible = self
            .seats
            .iter()
            .filter(|s| !s.player.chips().is_zero())
            .count();
        if eligible < MIN_PLAYERS {
            return Err(TableError::NotEnoughPlayers { active: eligible });
        }
        let needed = eligible * 2 + BOARD_SIZE;
        if needed > DECK_SIZE {
            return Err(TableError::DeckTooSmall {
                needed,
                available: DECK_SIZE,
            });
        }

        let seat_count = self.seats.len();
        let dealer = next_dealer(self.dealer, seat_count);
        self.dealer = Some(dealer);

        // Сброс состояния раунда.
        self.phase = RoundPhase::Preflop;
        self.hand_in_progress = true;
        self.cards_dealt = false;
        self.rejections = 0;
        self.board.clear();
        self.history = HandHistory::new();
        self.contributions = vec![Chips::ZERO; seat_count];
        self.statuses = self
            .seats
            .iter()
            .map(|s| {
                if s.player.chips().is_zero() {
                    PlayerStatus::SittingOut
                } else {
                    PlayerStatus::Active
                }
            })
            .collect();
        for seat in self.seats.iter_mut() {
            seat.player.clear_hole();
            seat.player.set_required_bet(Chips::ZERO);
        }
        self.deck = Deck::standard_52();
        self.deck.shuffle(rng);
        self.betting = BettingState::new(RoundPhase::Preflop, self.config.big_blind, seat_count);

        let dealer_name = self.seats[dealer].player.name.clone();
        tracing::info!("Round started, dealer: {} (seat {})", dealer_name, dealer);
        self.history.push(HandEventKind::RoundStarted {
            dealer,
            dealer_name,
        });

        // Блайнды – следующие два активных места после дилера.
        let can_act = |s: PlayerStatus| s.can_act();
        let sb = next_seat_where(&self.statuses, dealer, can_act)
            .ok_or(TableError::NotEnoughPlayers { active: eligible })?;
        let bb = next_seat_where(&self.statuses, sb, can_act)
            .ok_or(TableError::NotEnoughPlayers { active: eligible })?;
        self.big_blind_seat = Some(bb);
        self.forced = VecDeque::from([(sb, BlindKind::Small), (bb, BlindKind::Big)]);

        self.drive(|table| !table.forced.is_empty())
    }

    /// Прогнать все оставшиеся ходы раунда до Interim.
    ///
    /// Некорректный ход запрашивается заново (до `max_rejections` подряд),
    /// после чего ошибка возвращается наружу. Повторный вызов продолжает
    /// с того же игрока.
    pub fn play_round(&mut self) -> Result<RoundPhase, TableError> {
        if !self.hand_in_progress {
            return Err(TableError::NoActiveHand);
        }
        self.drive(|table| table.hand_in_progress)?;
        Ok(self.phase)
    }

    fn drive<F>(&mut self, keep_going: F) -> Result<(), TableError>
    where
        F: Fn(&Table) -> bool,
    {
        self.rejections = 0;
        while keep_going(self) {
            match self.step() {
                Ok(_) => {}
                Err(TableError::InvalidTurn { .. })
                    if self.rejections < self.config.max_rejections => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Один запрос хода у текущего игрока.
    ///
    /// Отклонённый ход не меняет ни банк, ни курсор: следующий `step`
    /// снова спросит того же игрока.
    pub fn step(&mut self) -> Result<Turn, TableError> {
        if !self.hand_in_progress {
            return Err(TableError::NoActiveHand);
        }
        let seat = self.current_player().ok_or(TableError::NoActiveHand)?;
        let blind = self
            .forced
            .front()
            .filter(|(s, _)| *s == seat)
            .map(|(_, kind)| *kind);

        let mut notification = self.notification_for(seat, blind);
        let player_id = self.seats[seat].player.id;
        self.seats[seat]
            .player
            .set_required_bet(notification.call_amount);
        notification.time_budget = self.time.start_turn(player_id);

        let response = {
            let Seat { player, strategy } = &mut self.seats[seat];
            strategy.play_turn(player, &notification)
        };
        let timing = self.time.finish_turn();

        let turn = match (response, timing) {
            (PlayerResponse::Acted(turn), TimeoutState::InTime)
            | (PlayerResponse::Acted(turn), TimeoutState::UsedBank { .. })
            | (PlayerResponse::Acted(turn), TimeoutState::NoActivePlayer) => turn,
            _ => {
                let action = timeout_action(&notification);
                tracing::warn!(
                    "{} did not decide in time, auto {}",
                    self.seats[seat].player.name,
                    action
                );
                self.history
                    .push(HandEventKind::DecisionTimedOut { player_id, action });
                Turn::new(&self.seats[seat].player, action, Chips::ZERO)
            }
        };

        if let Err(reason) = validate_turn(&self.seats[seat].player, &notification, &turn) {
            self.rejections += 1;
            tracing::warn!(
                "Rejected turn of {} (attempt {}): {}",
                self.seats[seat].player.name,
                self.rejections,
                reason
            );
            self.history.push(HandEventKind::TurnRejected {
                player_id,
                reason: reason.clone(),
            });
            return Err(TableError::InvalidTurn { player_id, reason });
        }

        self.rejections = 0;
        self.receive_turn(seat, blind, turn.clone())?;
        Ok(turn)
    }

    /// Что предложить seat'у на этом ходу.
    fn notification_for(&self, seat: SeatIndex, blind: Option<BlindKind>) -> TurnNotification {
        let stack = self.seats[seat].player.chips();
        match blind {
            Some(kind) => TurnNotification {
                legal_actions: legal_actions(stack, Chips::ZERO, Chips::ZERO, Chips::ZERO, blind),
                call_amount: self.config.blind_amount(kind),
                min_raise: self.config.big_blind,
                blind,
                time_budget: None,
            },
            None => {
                let to_call = self.betting.to_call(seat);
                TurnNotification {
                    legal_actions: legal_actions(
                        stack,
                        to_call,
                        self.betting.current_bet,
                        self.betting.min_raise,
                        None,
                    ),
                    call_amount: to_call,
                    min_raise: self.betting.min_raise,
                    blind: None,
                    time_budget: None,
                }
            }
        }
    }

    /// Применить уже проверенный ход: банк, вклады, статусы, очередь.
    fn receive_turn(
        &mut self,
        seat: SeatIndex,
        blind: Option<BlindKind>,
        turn: Turn,
    ) -> Result<(), TableError> {
        match turn.action {
            PlayerAction::Fold => {
                self.statuses[seat] = PlayerStatus::Folded;
            }
            PlayerAction::Check => {}
            PlayerAction::Call | PlayerAction::Raise | PlayerAction::Bet | PlayerAction::AllIn => {
                let paid = self.seats[seat].player.take_chips(turn.bet_amount);
                self.contributions[seat] += paid;
                self.pot.add(paid);
                let new_bet = self.betting.add_bet(seat, paid);

                if self.seats[seat].player.chips().is_zero() {
                    self.statuses[seat] = PlayerStatus::AllIn;
                }

                if blind.is_some() {
                    self.betting.current_bet = self.betting.current_bet.max(new_bet);
                } else if new_bet > self.betting.current_bet {
                    // Агрессия: круг открывается заново для всех остальных.
                    let queue: Vec<SeatIndex> = actors_after(&self.statuses, seat)
                        .into_iter()
                        .filter(|&s| s != seat)
                        .collect();
                    tracing::debug!("Betting reopened by seat {}: {:?}", seat, queue);
                    self.betting.on_raise(seat, new_bet, queue);
                }
            }
        }

        if blind.is_some() {
            self.forced.pop_front();
        } else {
            self.betting.mark_acted(seat);
        }

        tracing::info!("TABLE RECEIVED ACTION OF {} (pot {})", turn, self.pot.total);
        self.history.push(HandEventKind::TurnAccepted {
            turn,
            pot_after: self.pot.total,
        });

        if self.forced.is_empty() && !self.cards_dealt {
            self.history.push(HandEventKind::BlindsPosted {
                pot: self.pot.total,
            });
            self.deal_hole_cards()?;
            self.open_preflop();
        }

        self.advance_if_needed()
    }

    /// Раздать по две карты каждому, кто остался в раунде, начиная слева от дилера.
    fn deal_hole_cards(&mut self) -> Result<(), TableError> {
        let dealer = self.dealer.unwrap_or(0);
        let order = order_after(self.seats.len(), dealer);
        for seat in order {
            if !self.statuses[seat].is_in_hand() {
                continue;
            }
            let player = &mut self.seats[seat].player;
            player.draw_hole(&mut self.deck)?;
            tracing::info!("{} received hole cards, {} chips left", player.name, player.chips());
            self.history.push(HandEventKind::HoleCardsDealt {
                player_id: player.id,
                player_name: player.name.clone(),
            });
        }
        self.cards_dealt = true;
        tracing::info!("POT AMOUNT: {}", self.pot.total);
        Ok(())
    }

    /// Префлоп: первым ходит место после большого блайнда, последним – сам BB.
    fn open_preflop(&mut self) {
        let start = self.big_blind_seat.or(self.dealer).unwrap_or(0);
        self.betting.to_act = actors_after(&self.statuses, start).into();
    }

    /// Если круг ставок закрыт – перейти к следующей фазе (по одной за раз).
    fn advance_if_needed(&mut self) -> Result<(), TableError> {
        if !self.forced.is_empty() || !self.cards_dealt {
            return Ok(());
        }

        loop {
            self.trim_queue();
            if !self.betting.is_round_complete() {
                return Ok(());
            }

            let Some(next) = self.phase.next() else {
                return Ok(());
            };
            self.phase = next;
            tracing::info!("Phase changed to {}", next);
            self.history.push(HandEventKind::PhaseChanged { phase: next });

            if !next.is_betting() {
                self.close_round();
                return Ok(());
            }

            if self.contesting_seats().len() >= 2 {
                let cards = self.deck.deal_n(next.board_cards())?;
                self.board.extend_from_slice(&cards);
                self.history.push(HandEventKind::BoardDealt {
                    phase: next,
                    cards: self.board.clone(),
                });
            }

            // Новая фаза: ставки обнуляются, первым ходит первый активный слева от дилера.
            self.betting =
                BettingState::new(next, self.config.big_blind, self.seats.len());
            let dealer = self.dealer.unwrap_or(0);
            self.betting.to_act = actors_after(&self.statuses, dealer).into();
        }
    }

    /// Убрать из очереди тех, кто не может действовать, и закрыть круг,
    /// если торговаться больше не с кем.
    fn trim_queue(&mut self) {
        let statuses = &self.statuses;
        self.betting.to_act.retain(|&s| statuses[s].can_act());

        let in_hand = self.contesting_seats().len();
        let actors: Vec<SeatIndex> = (0..self.statuses.len())
            .filter(|&s| self.statuses[s].can_act())
            .collect();

        let settled = match actors.as_slice() {
            [] => true,
            [only] => self.betting.to_call(*only).is_zero(),
            _ => false,
        };
        if in_hand <= 1 || settled {
            self.betting.to_act.clear();
        }
    }

    fn close_round(&mut self) {
        self.hand_in_progress = false;
        self.forced.clear();
        self.betting.to_act.clear();
        for seat in self.seats.iter_mut() {
            seat.player.set_required_bet(Chips::ZERO);
        }
        tracing::info!("Round closed, pot {}", self.pot.total);
        self.history.push(HandEventKind::RoundClosed {
            pot: self.pot.total,
        });
    }

    /// Забрать банк для внешнего шоудауна/выплаты. Только между раундами.
    pub fn settle_pot(&mut self) -> Result<Chips, TableError> {
        if self.hand_in_progress {
            return Err(TableError::HandAlreadyInProgress);
        }
        let total = self.pot.take();
        for c in self.contributions.iter_mut() {
            *c = Chips::ZERO;
        }
        tracing::info!("Pot of {} settled", total);
        Ok(total)
    }
}
