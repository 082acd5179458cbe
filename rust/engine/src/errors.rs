use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Illegal action {action} (legal: {})", format_actions(.legal))]
    IllegalAction { action: Action, legal: Vec<Action> },
    #[error("Cannot draw {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Hole and board cards must be set before betting")]
    CardsNotDealt,
    #[error("Hand is not terminal yet")]
    HandNotTerminal,
    #[error("Showdown requested after a fold")]
    ShowdownAfterFold,
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Invalid action: {0:?}")]
    InvalidAction(String),
}

fn format_actions(actions: &[Action]) -> String {
    if actions.is_empty() {
        return "none".to_string();
    }
    actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
