//! # flopbot-ai: Self-Play Learning Agents
//!
//! Tabular Monte Carlo control for flop poker. Two agents, each a policy
//! table plus an action-value table, play against each other and update from
//! the returns of every completed hand.
//!
//! ## Core Components
//!
//! - [`PolicyTable`] - Epsilon-greedy action distributions per information state
//! - [`ActionValueTable`] - Constant step size action-value estimates
//! - [`Agent`] - Named policy/value pair with load, save and the backward pass
//! - [`episode`] - Betting loop, trajectories and terminal payoff
//! - [`SelfPlayTrainer`] - Batch loop driving both agents
//! - [`stop`] - Signals checked between batches
//! - [`storage`] - JSON artifacts, optionally zstd-compressed
//!
//! ## Quick Start
//!
//! ```rust
//! use flopbot_ai::stop::BatchLimit;
//! use flopbot_ai::{Agent, SelfPlayTrainer, TrainingParams};
//!
//! let params = TrainingParams {
//!     episodes_per_batch: 100,
//!     seed: 42,
//!     ..TrainingParams::default()
//! };
//! let mut trainer = SelfPlayTrainer::new(Agent::new("bot_1"), Agent::new("bot_2"), params);
//! let stats = trainer.train(&mut BatchLimit(1)).unwrap();
//! assert_eq!(stats.episodes, 100);
//! ```

pub mod agent;
pub mod episode;
pub mod errors;
pub mod policy;
pub mod stop;
pub mod storage;
pub mod trainer;
pub mod value;

pub use agent::Agent;
pub use errors::{StorageError, TrainError};
pub use policy::PolicyTable;
pub use trainer::{SelfPlayTrainer, TrainStats, TrainingParams};
pub use value::ActionValueTable;
