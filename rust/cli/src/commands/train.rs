//! Self-play training command.
//!
//! Loads (or creates) both agents, trains them against each other in
//! batches until the stop file shows up or the optional batch cap is hit,
//! then writes both agents back to the model directory.

use crate::config::{self, Overrides};
use crate::error::CliError;
use crate::ui;
use flopbot_ai::stop::{BatchLimit, StopFile};
use flopbot_ai::{Agent, SelfPlayTrainer, TrainingParams};
use flopbot_engine::player::Seat;
use std::io::Write;
use tracing::info;

/// Handle the train command.
///
/// # Errors
///
/// Returns `CliError::Config` for invalid settings, `CliError::Storage` if
/// a saved table is corrupt, and `CliError::Training` if an episode aborts.
/// Tables are saved before a training error is returned.
pub fn handle_train_command(
    batches: Option<u64>,
    overrides: Overrides,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?.apply(overrides)?;
    let cfg = resolved.config;
    let seed = cfg.seed.unwrap_or_else(rand::random);

    if cfg.stop_file.exists() {
        ui::display_warning(
            err,
            &format!(
                "stop file {} already exists, training will end after one batch",
                cfg.stop_file.display()
            ),
        )?;
    }

    let player = Agent::load_or_init(&cfg.agent_a, &cfg.model_dir, cfg.compress)?;
    let opponent = Agent::load_or_init(&cfg.agent_b, &cfg.model_dir, cfg.compress)?;

    let params = TrainingParams {
        learning_rate: cfg.learning_rate,
        epsilon: cfg.epsilon,
        episodes_per_batch: cfg.episodes_per_batch,
        first_to_act: Seat::Player,
        alternate_first_actor: cfg.alternate_first_actor,
        seed,
    };
    info!(
        seed,
        episodes_per_batch = params.episodes_per_batch,
        epsilon = params.epsilon,
        learning_rate = params.learning_rate,
        "Starting self-play"
    );

    let mut stop = (StopFile(cfg.stop_file.clone()), batches.map(BatchLimit));
    let mut trainer = SelfPlayTrainer::new(player, opponent, params);
    let stats = trainer.train_and_save(&mut stop, &cfg.model_dir, cfg.compress)?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(
        out,
        "Trained: {} episodes in {} batches",
        stats.episodes, stats.batches
    )?;
    writeln!(
        out,
        "Folds: {} | Showdowns: {} | Splits: {}",
        stats.folds, stats.showdowns, stats.splits
    )?;
    writeln!(
        out,
        "States: {} {} | {} {}",
        cfg.agent_a,
        trainer.agent(Seat::Player).policy.len(),
        cfg.agent_b,
        trainer.agent(Seat::Opponent).policy.len()
    )?;
    Ok(())
}
