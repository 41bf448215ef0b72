//! Стратегия с жёстким таймаутом: решение принимается в отдельном потоке,
//! стол ждёт его не дольше бюджета из уведомления.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;

use crate::domain::player::Player;
use crate::engine::strategy::Strategy;
use crate::engine::turn::{PlayerResponse, TurnNotification};

/// Ответ рабочего потока: стратегия возвращается вместе с решением.
type Handoff<S> = Receiver<(S, PlayerResponse)>;

/// Обёртка, которая на каждый ход передаёт стратегию в рабочий поток
/// и забирает её обратно вместе с ответом.
///
/// Если поток не уложился в бюджет, стратегия остаётся у него. Пока он
/// не ответит, все следующие запросы этого места сразу получают
/// `TimedOut`; опоздавший ответ выбрасывается, а стратегия снова идёт в дело.
/// Если стратегия паникует, место отвечает `TimedOut` до конца сессии.
pub struct ThreadedStrategy<S> {
    idle: Option<S>,
    busy: Option<Handoff<S>>,
}

impl<S> ThreadedStrategy<S>
where
    S: Strategy + Send + 'static,
{
    pub fn new(inner: S) -> Self {
        Self {
            idle: Some(inner),
            busy: None,
        }
    }

    /// Стратегия свободна (не занята зависшим решением).
    pub fn is_idle(&self) -> bool {
        self.idle.is_some()
    }

    /// Забрать стратегию у отработавшего потока, не блокируясь.
    fn reclaim(&mut self) {
        let Some(rx) = self.busy.take() else {
            return;
        };
        match rx.try_recv() {
            Ok((strategy, stale)) => {
                tracing::debug!("Late decision dropped: {:?}", stale);
                self.idle = Some(strategy);
            }
            Err(TryRecvError::Empty) => self.busy = Some(rx),
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Decision thread died, strategy lost");
            }
        }
    }
}

impl<S> Strategy for ThreadedStrategy<S>
where
    S: Strategy + Send + 'static,
{
    fn play_turn(&mut self, player: &Player, notification: &TurnNotification) -> PlayerResponse {
        self.reclaim();

        let Some(budget) = notification.time_budget else {
            // Без лимита – ждём зависший поток и решаем в текущем.
            if let Some(rx) = self.busy.take() {
                if let Ok((strategy, _)) = rx.recv() {
                    self.idle = Some(strategy);
                }
            }
            return match self.idle.as_mut() {
                Some(strategy) => strategy.play_turn(player, notification),
                None => PlayerResponse::TimedOut,
            };
        };

        let Some(mut strategy) = self.idle.take() else {
            tracing::warn!("{} is still deciding the previous turn", player.name);
            return PlayerResponse::TimedOut;
        };

        let name = player.name.clone();
        let (tx, rx) = mpsc::channel();
        let player = player.clone();
        let notification = notification.clone();

        thread::spawn(move || {
            let response = strategy.play_turn(&player, &notification);
            let _ = tx.send((strategy, response));
        });

        match rx.recv_timeout(budget) {
            Ok((strategy, response)) => {
                self.idle = Some(strategy);
                response
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("Decision of {} cancelled after {:?}", name, budget);
                self.busy = Some(rx);
                PlayerResponse::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("Decision thread of {} died, strategy lost", name);
                PlayerResponse::TimedOut
            }
        }
    }
}
