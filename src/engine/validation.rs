use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::PlayerAction;
use crate::engine::betting::BlindKind;
use crate::engine::errors::TurnError;
use crate::engine::turn::{Turn, TurnNotification};

/// Какие действия доступны игроку при данном состоянии ставок.
///
/// Блайнд можно только поставить (Call) или отказаться (Fold).
pub fn legal_actions(
    stack: Chips,
    to_call: Chips,
    current_bet: Chips,
    min_raise: Chips,
    blind: Option<BlindKind>,
) -> Vec<PlayerAction> {
    if blind.is_some() {
        return vec![PlayerAction::Fold, PlayerAction::Call];
    }

    let mut actions = vec![PlayerAction::Fold];
    if to_call.is_zero() {
        actions.push(PlayerAction::Check);
    } else {
        actions.push(PlayerAction::Call);
    }

    if stack > to_call && stack >= to_call + min_raise {
        if current_bet.is_zero() {
            actions.push(PlayerAction::Bet);
        } else {
            actions.push(PlayerAction::Raise);
        }
    }

    if !stack.is_zero() {
        actions.push(PlayerAction::AllIn);
    }
    actions
}

/// Проверка хода игрока против выданного ему уведомления.
/// Ничего не меняет – стол применяет ход только после успешной проверки.
pub fn validate_turn(
    player: &Player,
    notification: &TurnNotification,
    turn: &Turn,
) -> Result<(), TurnError> {
    if turn.player_id != player.id {
        return Err(TurnError::WrongPlayer {
            expected: player.id,
            got: turn.player_id,
        });
    }

    if !notification.allows(turn.action) {
        return Err(TurnError::IllegalAction(turn.action));
    }

    let amount = turn.bet_amount;
    let stack = player.chips();

    if turn.action.is_passive() {
        return if amount.is_zero() {
            Ok(())
        } else {
            Err(TurnError::NonZeroAmount {
                action: turn.action,
                amount,
            })
        };
    }

    match turn.action {
        // Fold/Check уже проверены выше.
        PlayerAction::Fold | PlayerAction::Check => Ok(()),

        PlayerAction::Call => {
            // Короткий стек коллирует всем, что есть.
            let required = notification.call_amount.min(stack);
            if amount < required {
                Err(TurnError::BetBelowCall { amount, required })
            } else if amount > required {
                Err(TurnError::BetAboveCall { amount, required })
            } else {
                Ok(())
            }
        }

        PlayerAction::Bet | PlayerAction::Raise => {
            if amount > stack {
                return Err(TurnError::NotEnoughChips { amount, stack });
            }
            let minimum = notification.call_amount + notification.min_raise;
            if amount < minimum {
                return Err(TurnError::RaiseTooSmall { amount, minimum });
            }
            Ok(())
        }

        PlayerAction::AllIn => {
            if amount == stack && !stack.is_zero() {
                Ok(())
            } else {
                Err(TurnError::AllInMismatch { amount, stack })
            }
        }
    }
}

/// Авто-действие при таймауте: Check, если можно, иначе Fold.
pub fn timeout_action(notification: &TurnNotification) -> PlayerAction {
    if notification.allows(PlayerAction::Check) {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    }
}
