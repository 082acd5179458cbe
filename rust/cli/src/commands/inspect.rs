//! Prints what one agent has learned at a single information state.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "agent": "bot_1",
//!   "key": "player [Ah As] board [2c 7s 9d] history [Ch,B]",
//!   "legal_actions": ["C", "B", "F"],
//!   "policy": { "C": 0.866, "B": 0.066, "F": 0.066 },
//!   "values": { "C": 1.42, "F": 0.0 },
//!   "greedy": "C"
//! }
//! ```

use crate::config;
use crate::error::CliError;
use flopbot_ai::Agent;
use flopbot_engine::betting::InfoStateKey;
use flopbot_engine::cards::Card;
use flopbot_engine::player::{Action, Seat};
use flopbot_engine::rules::legal_actions_after;
use std::io::Write;

pub fn handle_inspect_command(
    agent: &str,
    seat: Seat,
    hole: &str,
    board: &str,
    history: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let key = parse_key(seat, hole, board, history)?;
    let cfg = config::load_with_sources()?.config;
    let agent = Agent::load_or_init(agent, &cfg.model_dir, cfg.compress)?;

    let display = serde_json::json!({
        "agent": agent.name(),
        "key": key.to_string(),
        "legal_actions": key.legal_actions(),
        "policy": agent.policy.distribution(&key),
        "values": agent.values.values(&key),
        "greedy": agent.values.greedy_action(&key),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}

/// Builds a key from command-line text, rejecting repeated cards and
/// histories the betting rules could not produce.
fn parse_key(seat: Seat, hole: &str, board: &str, history: &str) -> Result<InfoStateKey, CliError> {
    let hole: [Card; 2] = Card::parse_many(hole)?
        .try_into()
        .map_err(|_| CliError::InvalidInput("hole must be exactly two cards".into()))?;
    let board: [Card; 3] = Card::parse_many(board)?
        .try_into()
        .map_err(|_| CliError::InvalidInput("board must be exactly three cards".into()))?;

    let mut all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    all.sort();
    all.dedup();
    if all.len() != 5 {
        return Err(CliError::InvalidInput("cards must all be different".into()));
    }

    let history = Action::parse_history(history)?;
    for (i, action) in history.iter().enumerate() {
        if !legal_actions_after(&history[..i]).contains(action) {
            return Err(CliError::InvalidInput(format!(
                "{} is not legal after [{}]",
                action,
                history[..i]
                    .iter()
                    .map(|a| a.symbol())
                    .collect::<Vec<_>>()
                    .join(",")
            )));
        }
    }
    Ok(InfoStateKey::new(seat, hole, board, history))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_normalized() {
        let key = parse_key(Seat::Player, "AhAs", "9d2c7s", "Ch,B").unwrap();
        let same = parse_key(Seat::Player, "AsAh", "2c7s9d", "ch, b").unwrap();
        assert_eq!(key, same);
        assert_eq!(key.legal_actions(), vec![Action::Call, Action::Bet, Action::Fold]);
    }

    #[test]
    fn impossible_history_is_rejected() {
        let err = parse_key(Seat::Player, "AsAh", "2c7s9d", "B,B,B").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert!(parse_key(Seat::Player, "AsAh", "2c7s9d", "F").is_err());
    }

    #[test]
    fn wrong_card_counts_and_duplicates_are_rejected() {
        assert!(parse_key(Seat::Player, "As", "2c7s9d", "").is_err());
        assert!(parse_key(Seat::Player, "AsAh", "2c7s", "").is_err());
        assert!(parse_key(Seat::Player, "AsAh", "As7s9d", "").is_err());
        assert!(matches!(
            parse_key(Seat::Player, "AsXx", "2c7s9d", ""),
            Err(CliError::Engine(_))
        ));
    }
}
