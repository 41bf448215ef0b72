//! Проверка ходов: отклонения, рейзы, фолды, all-in, повторные запросы.

mod common;

use common::*;
use poker_table::domain::{Chips, Player, PlayerStatus, RoundPhase};
use poker_table::engine::validation::{legal_actions, validate_turn};
use poker_table::engine::{
    BlindKind, HandEventKind, PassiveStrategy, PlayerAction, PlayerResponse, ScriptedStrategy,
    Strategy, Turn, TurnNotification,
};
use poker_table::infra::FixedOrder;
use poker_table::{TableError, TurnError};

fn scripted(actions: &[(PlayerAction, u64)]) -> Box<dyn Strategy> {
    Box::new(ScriptedStrategy::from_actions(actions.iter().copied()))
}

fn passive() -> Box<dyn Strategy> {
    Box::new(PassiveStrategy)
}

fn notification(legal: &[PlayerAction], call: u64, min_raise: u64) -> TurnNotification {
    TurnNotification {
        legal_actions: legal.to_vec(),
        call_amount: Chips(call),
        min_raise: Chips(min_raise),
        blind: None,
        time_budget: None,
    }
}

#[test]
fn bet_below_call_is_rejected_and_cursor_stays() {
    let log = new_log();
    let mut table = recorded_table(
        vec![scripted(&[(PlayerAction::Call, 1)]), passive(), passive()],
        &log,
    );
    table.begin_round(&mut FixedOrder).unwrap();
    assert_eq!(table.current_player(), Some(0));

    match table.step() {
        Err(TableError::InvalidTurn { player_id, reason }) => {
            assert_eq!(player_id, 1);
            assert_eq!(
                reason,
                TurnError::BetBelowCall {
                    amount: Chips(1),
                    required: Chips(2)
                }
            );
        }
        other => panic!("ожидали InvalidTurn, получили {other:?}"),
    }
    assert_eq!(table.current_player(), Some(0));
    assert_eq!(table.pot(), Chips(3));
    assert_eq!(table.player(0).unwrap().chips(), Chips(TEST_STACK));
    assert!(matches!(
        table.history().events.last().map(|e| &e.kind),
        Some(HandEventKind::TurnRejected { player_id: 1, .. })
    ));

    // Сценарий кончился – второй запрос уходит тому же игроку и проходит.
    let turn = table.step().unwrap();
    assert_eq!(turn.to_string(), "Alice called 2.");
    assert_eq!(solicited_ids(&log)[2..], [1, 1]);
}

#[test]
fn blind_offering_raise_is_rejected_and_asked_again() {
    let log = new_log();
    let mut table = recorded_table(
        vec![passive(), scripted(&[(PlayerAction::Raise, 4)]), passive()],
        &log,
    );
    table.begin_round(&mut FixedOrder).unwrap();

    assert_eq!(solicited_ids(&log), vec![2, 2, 3]);
    let rejected = table.history().events.iter().find_map(|e| match &e.kind {
        HandEventKind::TurnRejected { reason, .. } => Some(reason.clone()),
        _ => None,
    });
    assert_eq!(rejected, Some(TurnError::IllegalAction(PlayerAction::Raise)));
    assert_eq!(table.pot(), Chips(3));
    assert_eq!(log.borrow()[1].1.blind, Some(BlindKind::Small));
}

#[test]
fn raise_below_minimum_is_rejected() {
    let mut table = recorded_table(
        vec![scripted(&[(PlayerAction::Raise, 3)]), passive(), passive()],
        &new_log(),
    );
    table.begin_round(&mut FixedOrder).unwrap();
    match table.step() {
        Err(TableError::InvalidTurn { reason, .. }) => assert_eq!(
            reason,
            TurnError::RaiseTooSmall {
                amount: Chips(3),
                minimum: Chips(4)
            }
        ),
        other => panic!("ожидали RaiseTooSmall, получили {other:?}"),
    }
    assert_eq!(table.current_player(), Some(0));
}

#[test]
fn raise_reopens_betting_for_everyone_else() {
    let log = new_log();
    let mut table = recorded_table(
        vec![
            scripted(&[(PlayerAction::Call, 2), (PlayerAction::Call, 4)]),
            scripted(&[
                (PlayerAction::Call, 1),
                (PlayerAction::Call, 1),
                (PlayerAction::Call, 4),
            ]),
            scripted(&[(PlayerAction::Call, 2), (PlayerAction::Raise, 4)]),
        ],
        &log,
    );
    table.begin_round(&mut FixedOrder).unwrap();

    table.step().unwrap(); // Alice call 2
    table.step().unwrap(); // Bob call 1
    let raise = table.step().unwrap();
    assert_eq!(raise.to_string(), "Carol raised 4.");
    assert_eq!(table.betting().current_bet, Chips(6));
    assert_eq!(table.betting().min_raise, Chips(4));
    assert_eq!(table.betting().last_aggressor, Some(2));
    assert_eq!(table.betting().to_act, [0, 1]);

    table.step().unwrap(); // Alice call 4
    {
        let entries = log.borrow();
        let (id, note) = &entries[5];
        assert_eq!(*id, 1);
        assert_eq!(note.call_amount, Chips(4));
        assert_eq!(note.min_raise, Chips(4));
    }
    table.step().unwrap(); // Bob call 4

    assert_eq!(solicited_ids(&log), vec![2, 3, 1, 2, 3, 1, 2]);
    assert_eq!(table.pot(), Chips(18));
    assert_eq!(table.phase(), RoundPhase::Flop);
    assert!(table.contributions().iter().all(|&c| c == Chips(6)));
    // Новая фаза – новая ставка и минимальный рейз снова равен BB.
    assert_eq!(table.betting().current_bet, Chips::ZERO);
    assert_eq!(table.betting().min_raise, Chips(2));
}

#[test]
fn bet_on_flop_makes_others_respond() {
    let log = new_log();
    let mut table = recorded_table(
        vec![
            passive(),
            passive(),
            scripted(&[
                (PlayerAction::Call, 2),
                (PlayerAction::Check, 0),
                (PlayerAction::Bet, 4),
            ]),
        ],
        &log,
    );
    let phase = table.start_round(&mut FixedOrder).unwrap();
    assert_eq!(phase, RoundPhase::Interim);

    // Флоп: Bob check, Carol bet 4, Alice call, Bob call.
    let flop_turns: Vec<String> = table
        .history()
        .accepted_turns()
        .iter()
        .skip(5)
        .take(4)
        .map(|t| t.to_string())
        .collect();
    assert_eq!(
        flop_turns,
        vec![
            "Bob checked.",
            "Carol beted.",
            "Alice called 4.",
            "Bob called 4."
        ]
    );
    let carol_flop = log
        .borrow()
        .iter()
        .filter(|(id, _)| *id == 3)
        .nth(2)
        .map(|(_, n)| n.clone())
        .unwrap();
    assert!(carol_flop.allows(PlayerAction::Bet));
    assert!(!carol_flop.allows(PlayerAction::Raise));
    assert_eq!(table.pot(), Chips(18));
    assert!(table.pot_matches_contributions());
}

#[test]
fn folded_player_is_never_asked_again() {
    let log = new_log();
    let mut table = recorded_table(
        vec![
            passive(),
            passive(),
            passive(),
            scripted(&[(PlayerAction::Fold, 0)]),
        ],
        &log,
    );
    table.start_round(&mut FixedOrder).unwrap();

    let dave_asked = solicited_ids(&log).iter().filter(|&&id| id == 4).count();
    assert_eq!(dave_asked, 1);
    assert_eq!(table.status(3), Some(PlayerStatus::Folded));
    assert_eq!(table.contribution(3), Chips::ZERO);
    assert_eq!(table.contesting_seats(), vec![0, 1, 2]);
}

#[test]
fn everyone_folding_to_one_player_closes_all_phases() {
    let log = new_log();
    let mut table = recorded_table(
        vec![
            scripted(&[(PlayerAction::Fold, 0)]),
            scripted(&[(PlayerAction::Call, 1), (PlayerAction::Fold, 0)]),
            passive(),
        ],
        &log,
    );
    let phase = table.start_round(&mut FixedOrder).unwrap();

    assert_eq!(phase, RoundPhase::Interim);
    assert_eq!(
        table.history().phases(),
        vec![
            RoundPhase::Preflop,
            RoundPhase::Flop,
            RoundPhase::Turn,
            RoundPhase::River,
            RoundPhase::Interim
        ]
    );
    assert!(table.board().is_empty());
    assert_eq!(table.pot(), Chips(3));
    assert_eq!(table.contesting_seats(), vec![2]);
    // Carol ставила только блайнд.
    assert_eq!(solicited_ids(&log), vec![2, 3, 1, 2]);
}

#[test]
fn repeated_invalid_turns_surface_error_then_resume() {
    let log = new_log();
    let mut table = recorded_table(
        vec![
            scripted(&[
                (PlayerAction::Call, 1),
                (PlayerAction::Call, 1),
                (PlayerAction::Call, 1),
            ]),
            passive(),
            passive(),
        ],
        &log,
    );
    table.begin_round(&mut FixedOrder).unwrap();

    let err = table.play_round();
    assert!(matches!(
        err,
        Err(TableError::InvalidTurn { player_id: 1, .. })
    ));
    assert!(table.is_hand_in_progress());
    assert_eq!(table.current_player(), Some(0));
    assert_eq!(solicited_ids(&log), vec![2, 3, 1, 1, 1]);

    // Повторный вызов сбрасывает счётчик и продолжает с того же игрока.
    assert_eq!(table.play_round().unwrap(), RoundPhase::Interim);
    assert_eq!(solicited_ids(&log)[5], 1);
    assert_eq!(table.pot(), Chips(6));
}

#[test]
fn turn_on_behalf_of_another_player_is_rejected() {
    let mut calls = 0;
    let impostor: Box<dyn Strategy> = Box::new(move |player: &Player, note: &TurnNotification| -> PlayerResponse {
        calls += 1;
        if calls == 1 {
            let other = Player::new(99, "Mallory", Chips(100));
            Turn::call(&other, note.call_amount).into()
        } else {
            PassiveStrategy::decide(player, note).into()
        }
    });
    let mut table = recorded_table(vec![impostor, passive(), passive()], &new_log());
    table.begin_round(&mut FixedOrder).unwrap();

    match table.step() {
        Err(TableError::InvalidTurn { reason, .. }) => assert_eq!(
            reason,
            TurnError::WrongPlayer {
                expected: 1,
                got: 99
            }
        ),
        other => panic!("ожидали WrongPlayer, получили {other:?}"),
    }
    assert!(table.step().is_ok());
}

#[test]
fn all_in_players_skip_remaining_betting() {
    let mut table = recorded_table(
        vec![
            scripted(&[(PlayerAction::AllIn, TEST_STACK)]),
            passive(),
            passive(),
        ],
        &new_log(),
    );
    let phase = table.start_round(&mut FixedOrder).unwrap();

    assert_eq!(phase, RoundPhase::Interim);
    assert_eq!(table.pot(), Chips(300));
    for seat in 0..3 {
        assert_eq!(table.status(seat), Some(PlayerStatus::AllIn));
        assert_eq!(table.player(seat).unwrap().chips(), Chips::ZERO);
    }
    assert_eq!(table.board().len(), 5);
    assert_eq!(
        table.history().transcript()[7],
        "TABLE RECEIVED ACTION OF Alice allined."
    );
}

#[test]
fn legal_actions_follow_betting_state() {
    use PlayerAction::*;

    assert_eq!(
        legal_actions(Chips(100), Chips::ZERO, Chips::ZERO, Chips(2), Some(BlindKind::Big)),
        vec![Fold, Call]
    );
    assert_eq!(
        legal_actions(Chips(100), Chips::ZERO, Chips::ZERO, Chips(2), None),
        vec![Fold, Check, Bet, AllIn]
    );
    assert_eq!(
        legal_actions(Chips(100), Chips(2), Chips(2), Chips(2), None),
        vec![Fold, Call, Raise, AllIn]
    );
    // Стека хватает на колл, но не на минимальный рейз.
    assert_eq!(
        legal_actions(Chips(3), Chips(2), Chips(2), Chips(2), None),
        vec![Fold, Call, AllIn]
    );
}

#[test]
fn validate_turn_checks_amounts() {
    use PlayerAction::*;

    let alice = Player::new(1, "Alice", Chips(100));
    let note = notification(&[Fold, Check, Bet, AllIn], 0, 2);

    assert_eq!(validate_turn(&alice, &note, &Turn::check(&alice)), Ok(()));
    assert_eq!(
        validate_turn(&alice, &note, &Turn::new(&alice, Fold, Chips(3))),
        Err(TurnError::NonZeroAmount {
            action: Fold,
            amount: Chips(3)
        })
    );
    assert!(Fold.is_passive() && Check.is_passive());
    assert!(!Call.is_passive() && !AllIn.is_passive());
    assert_eq!(
        validate_turn(&alice, &note, &Turn::new(&alice, Check, Chips(5))),
        Err(TurnError::NonZeroAmount {
            action: Check,
            amount: Chips(5)
        })
    );
    assert_eq!(
        validate_turn(&alice, &note, &Turn::bet(&alice, Chips(200))),
        Err(TurnError::NotEnoughChips {
            amount: Chips(200),
            stack: Chips(100)
        })
    );
    assert_eq!(
        validate_turn(&alice, &note, &Turn::new(&alice, AllIn, Chips(50))),
        Err(TurnError::AllInMismatch {
            amount: Chips(50),
            stack: Chips(100)
        })
    );
    assert_eq!(validate_turn(&alice, &note, &Turn::all_in(&alice)), Ok(()));
    assert_eq!(
        validate_turn(&alice, &note, &Turn::call(&alice, Chips(2))),
        Err(TurnError::IllegalAction(Call))
    );

    // Короткий стек коллирует всем, что есть.
    let bob = Player::new(2, "Bob", Chips(1));
    let note = notification(&[Fold, Call, AllIn], 2, 2);
    assert_eq!(validate_turn(&bob, &note, &Turn::call(&bob, Chips(1))), Ok(()));
    assert_eq!(
        validate_turn(&bob, &note, &Turn::call(&bob, Chips(2))),
        Err(TurnError::BetAboveCall {
            amount: Chips(2),
            required: Chips(1)
        })
    );
}

#[test]
fn turn_text_form() {
    let p = |i: usize| Player::new(i as u64 + 1, NAMES[i], Chips(10));
    assert_eq!(Turn::call(&p(0), Chips(2)).to_string(), "Alice called 2.");
    assert_eq!(Turn::raise(&p(1), Chips(6)).to_string(), "Bob raised 6.");
    assert_eq!(Turn::fold(&p(2)).to_string(), "Carol folded.");
    assert_eq!(Turn::bet(&p(3), Chips(4)).to_string(), "Dave beted.");
    assert_eq!(Turn::check(&p(4)).to_string(), "Eve checked.");
    assert_eq!(Turn::all_in(&p(5)).to_string(), "Frank allined.");
}
