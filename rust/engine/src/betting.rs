use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::flop_strength;
use crate::player::{Action, Seat};
use crate::rules;

/// What one seat can see at a decision point: its own hole cards, the board,
/// and the public betting history. The other seat's hole cards are never
/// part of a key.
///
/// Cards are stored sorted so that the order they were dealt in never
/// produces two keys for the same information.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct InfoStateKey {
    pub seat: Seat,
    pub hole: [Card; 2],
    pub board: [Card; 3],
    pub history: Vec<Action>,
}

impl InfoStateKey {
    pub fn new(seat: Seat, mut hole: [Card; 2], mut board: [Card; 3], history: Vec<Action>) -> Self {
        hole.sort_unstable();
        board.sort_unstable();
        Self {
            seat,
            hole,
            board,
            history,
        }
    }

    /// Legal actions for the seat holding this key. Derived from the history
    /// alone, so equal keys always agree on the legal set.
    pub fn legal_actions(&self) -> Vec<Action> {
        rules::legal_actions_after(&self.history)
    }
}

impl fmt::Display for InfoStateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history: Vec<&str> = self.history.iter().map(|a| a.symbol()).collect();
        write!(
            f,
            "{} [{} {}] board [{} {} {}] history [{}]",
            self.seat,
            self.hole[0],
            self.hole[1],
            self.board[0],
            self.board[1],
            self.board[2],
            history.join(",")
        )
    }
}

/// State of one hand: the dealt cards, who opens the betting, and the action
/// history. Pot size and the raise flag are derived from the history.
///
/// # Examples
///
/// ```
/// use flopbot_engine::betting::BettingState;
/// use flopbot_engine::cards::Card;
/// use flopbot_engine::player::{Action, Seat};
///
/// let cards = |s: &str| Card::parse_many(s).unwrap();
/// let mut state = BettingState::new();
/// state.set_player_cards(&cards("AsAh")).unwrap();
/// state.set_opponent_cards(&cards("KdQd")).unwrap();
/// state.set_board(&cards("2c7s9d")).unwrap();
///
/// state.apply_action(Action::Check).unwrap();
/// state.apply_action(Action::Check).unwrap();
/// assert!(state.is_terminal());
/// assert_eq!(state.resolve_winner().unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BettingState {
    player_hole: Option<[Card; 2]>,
    opponent_hole: Option<[Card; 2]>,
    board: Option<[Card; 3]>,
    history: Vec<Action>,
    first_to_act: Seat,
}

impl Default for BettingState {
    fn default() -> Self {
        Self::new()
    }
}

impl BettingState {
    pub fn new() -> Self {
        Self {
            player_hole: None,
            opponent_hole: None,
            board: None,
            history: Vec::with_capacity(4),
            first_to_act: Seat::Player,
        }
    }

    /// Clears cards and history for a new episode. The first actor is kept.
    pub fn reset(&mut self) {
        self.player_hole = None;
        self.opponent_hole = None;
        self.board = None;
        self.history.clear();
    }

    pub fn set_first_to_act(&mut self, seat: Seat) {
        self.first_to_act = seat;
    }

    pub fn first_to_act(&self) -> Seat {
        self.first_to_act
    }

    pub fn set_player_cards(&mut self, cards: &[Card]) -> Result<(), GameError> {
        self.ensure_no_actions()?;
        self.player_hole = Some(exactly::<2>(cards)?);
        Ok(())
    }

    pub fn set_opponent_cards(&mut self, cards: &[Card]) -> Result<(), GameError> {
        self.ensure_no_actions()?;
        self.opponent_hole = Some(exactly::<2>(cards)?);
        Ok(())
    }

    pub fn set_board(&mut self, cards: &[Card]) -> Result<(), GameError> {
        self.ensure_no_actions()?;
        self.board = Some(exactly::<3>(cards)?);
        Ok(())
    }

    pub fn hole_cards(&self, seat: Seat) -> Option<[Card; 2]> {
        match seat {
            Seat::Player => self.player_hole,
            Seat::Opponent => self.opponent_hole,
        }
    }

    pub fn board(&self) -> Option<[Card; 3]> {
        self.board
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        rules::legal_actions_after(&self.history)
    }

    pub fn is_terminal(&self) -> bool {
        rules::is_terminal(&self.history)
    }

    /// Seat whose turn it is, or `None` once the hand is over.
    pub fn to_act(&self) -> Option<Seat> {
        if self.is_terminal() {
            return None;
        }
        Some(if self.history.len() % 2 == 0 {
            self.first_to_act
        } else {
            self.first_to_act.other()
        })
    }

    /// Seat that folded, if the hand ended that way.
    pub fn folded(&self) -> Option<Seat> {
        match self.history.last() {
            // the folding seat made the last action
            Some(Action::Fold) => Some(self.seat_of(self.history.len() - 1)),
            _ => None,
        }
    }

    /// Total units both seats have put in so far.
    pub fn pot(&self) -> u32 {
        (0..self.history.len())
            .map(|i| rules::contribution(&self.history[..i], self.history[i]))
            .sum()
    }

    /// True once a bet is outstanding, so a further bet would be a raise.
    pub fn raised(&self) -> bool {
        rules::bets_made(&self.history) > 0
    }

    /// Units `action` would add to the pot if taken now.
    pub fn contribution(&self, action: Action) -> u32 {
        rules::contribution(&self.history, action)
    }

    pub fn current_state_key(&self, seat: Seat) -> Result<InfoStateKey, GameError> {
        let hole = self.hole_cards(seat).ok_or(GameError::CardsNotDealt)?;
        let board = self.board.ok_or(GameError::CardsNotDealt)?;
        Ok(InfoStateKey::new(seat, hole, board, self.history.clone()))
    }

    pub fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if !self.is_dealt() {
            return Err(GameError::CardsNotDealt);
        }
        let legal = self.legal_actions();
        if !legal.contains(&action) {
            return Err(GameError::IllegalAction { action, legal });
        }
        self.history.push(action);
        Ok(())
    }

    /// Showdown result: `1` when the player's hand is stronger, `-1` when the
    /// opponent's is, `0` on a tie.
    pub fn resolve_winner(&self) -> Result<i8, GameError> {
        if !self.is_terminal() {
            return Err(GameError::HandNotTerminal);
        }
        if self.folded().is_some() {
            return Err(GameError::ShowdownAfterFold);
        }
        let (Some(player), Some(opponent), Some(board)) =
            (self.player_hole, self.opponent_hole, self.board)
        else {
            return Err(GameError::CardsNotDealt);
        };
        let ours = flop_strength(&player, &board);
        let theirs = flop_strength(&opponent, &board);
        Ok(match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        })
    }

    fn is_dealt(&self) -> bool {
        self.player_hole.is_some() && self.opponent_hole.is_some() && self.board.is_some()
    }

    fn seat_of(&self, index: usize) -> Seat {
        if index % 2 == 0 {
            self.first_to_act
        } else {
            self.first_to_act.other()
        }
    }

    fn ensure_no_actions(&self) -> Result<(), GameError> {
        if self.history.is_empty() {
            Ok(())
        } else {
            Err(GameError::InvalidAction(
                "cards cannot change once betting has started".to_string(),
            ))
        }
    }
}

fn exactly<const N: usize>(cards: &[Card]) -> Result<[Card; N], GameError> {
    cards.try_into().map_err(|_| {
        GameError::InvalidCard(format!("expected {} cards, got {}", N, cards.len()))
    })
}
