//! Betting rules for the single flop street.
//!
//! The street opens with no bet outstanding. Each player may check or bet;
//! a bet may be answered by a call, a fold, or one raise. After a raise only
//! a call or a fold remains. The hand ends on a fold, on check-check, or when
//! a bet or raise is called.

use crate::player::Action;

/// Pot units added by the first bet of the hand.
pub const BET_SIZE: u32 = 1;
/// Pot units added by a raise (match the bet, then one more unit).
pub const RAISE_SIZE: u32 = 2;
/// Pot units added by a call; the outstanding amount is always one unit.
pub const CALL_SIZE: u32 = 1;

/// Actions permitted after `history`. Empty exactly when the hand is over.
///
/// # Examples
///
/// ```
/// use flopbot_engine::player::Action::*;
/// use flopbot_engine::rules::legal_actions_after;
///
/// assert_eq!(legal_actions_after(&[]), vec![Check, Bet]);
/// assert_eq!(legal_actions_after(&[Bet]), vec![Call, Bet, Fold]);
/// assert_eq!(legal_actions_after(&[Bet, Bet]), vec![Call, Fold]);
/// assert!(legal_actions_after(&[Check, Check]).is_empty());
/// ```
pub fn legal_actions_after(history: &[Action]) -> Vec<Action> {
    if is_terminal(history) {
        return Vec::new();
    }
    match bets_made(history) {
        0 => vec![Action::Check, Action::Bet],
        1 => vec![Action::Call, Action::Bet, Action::Fold],
        _ => vec![Action::Call, Action::Fold],
    }
}

/// True once the history ends the hand.
pub fn is_terminal(history: &[Action]) -> bool {
    match history {
        [.., Action::Fold] | [.., Action::Call] => true,
        [.., Action::Check, Action::Check] => true,
        _ => false,
    }
}

/// Number of bets (the opening bet plus any raise) in `history`.
pub fn bets_made(history: &[Action]) -> usize {
    history.iter().filter(|a| **a == Action::Bet).count()
}

/// Pot units `action` adds when taken after `history`.
pub fn contribution(history: &[Action], action: Action) -> u32 {
    match action {
        Action::Bet if bets_made(history) == 0 => BET_SIZE,
        Action::Bet => RAISE_SIZE,
        Action::Call => CALL_SIZE,
        Action::Check | Action::Fold => 0,
    }
}
