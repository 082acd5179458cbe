use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// One of the two seats at the table. `Player` is the first agent and is the
/// side a positive showdown result favours; `Opponent` is the second.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::Player, Seat::Opponent];

    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => write!(f, "player"),
            Seat::Opponent => write!(f, "opponent"),
        }
    }
}

impl FromStr for Seat {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player" | "p" | "1" => Ok(Seat::Player),
            "opponent" | "o" | "2" => Ok(Seat::Opponent),
            _ => Err(GameError::InvalidAction(format!("unknown seat {s}"))),
        }
    }
}

/// A betting action. Sizes are fixed: a bet is one unit, a second bet in the
/// same hand is a raise of one more unit.
///
/// The declaration order (Check, Call, Bet, Fold) is the priority used to
/// break ties between equally valued actions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "Ch")]
    Check,
    #[serde(rename = "C")]
    Call,
    #[serde(rename = "B")]
    Bet,
    #[serde(rename = "F")]
    Fold,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Check, Action::Call, Action::Bet, Action::Fold];

    pub fn symbol(self) -> &'static str {
        match self {
            Action::Check => "Ch",
            Action::Call => "C",
            Action::Bet => "B",
            Action::Fold => "F",
        }
    }

    /// Parses a comma separated history such as `"Ch,B,C"`. An empty string
    /// is the empty history.
    pub fn parse_history(s: &str) -> Result<Vec<Action>, GameError> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ch" | "check" => Ok(Action::Check),
            "c" | "call" => Ok(Action::Call),
            "b" | "bet" | "raise" => Ok(Action::Bet),
            "f" | "fold" => Ok(Action::Fold),
            _ => Err(GameError::InvalidAction(s.to_string())),
        }
    }
}
