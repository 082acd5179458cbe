//! # flopbot-engine: Flop Poker Game Core
//!
//! A heads-up poker variant reduced to a single betting street: each seat
//! holds two hole cards, three board cards are dealt face up, and one round
//! of fixed-size betting (one bet, at most one raise) decides the hand.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - Seeded deck shuffling and drawing without replacement
//! - [`hand`] - Five-card hand evaluation and strength comparison
//! - [`player`] - Seats and betting actions
//! - [`rules`] - Legal actions, termination and pot contributions
//! - [`betting`] - Per-hand state machine and information-state keys
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use flopbot_engine::betting::BettingState;
//! use flopbot_engine::deck::Deck;
//! use flopbot_engine::player::{Action, Seat};
//!
//! let mut deck = Deck::shuffled(42);
//! let mut state = BettingState::new();
//! state.set_player_cards(&deck.draw(2).unwrap()).unwrap();
//! state.set_opponent_cards(&deck.draw(2).unwrap()).unwrap();
//! state.set_board(&deck.draw(3).unwrap()).unwrap();
//!
//! let key = state.current_state_key(Seat::Player).unwrap();
//! assert_eq!(key.legal_actions(), vec![Action::Check, Action::Bet]);
//!
//! state.apply_action(Action::Bet).unwrap();
//! state.apply_action(Action::Call).unwrap();
//! assert!(state.legal_actions().is_empty());
//! assert_eq!(state.pot(), 2);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod player;
pub mod rules;
