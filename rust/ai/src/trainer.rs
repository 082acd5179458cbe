//! Self-play Monte Carlo control.
//!
//! The trainer owns both agents and plays them against each other one
//! episode at a time. After every episode each agent runs its backward pass
//! over its own trajectory. Episodes are grouped into batches and the stop
//! signal is only polled between batches.

use std::path::Path;

use flopbot_engine::betting::BettingState;
use flopbot_engine::deck::Deck;
use flopbot_engine::player::Seat;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::agent::Agent;
use crate::episode::{EpisodeOutcome, play_episode};
use crate::errors::TrainError;
use crate::policy::check_epsilon;
use crate::stop::StopSignal;

const PROGRESS_EVERY: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingParams {
    /// Constant step size for value updates.
    pub learning_rate: f64,
    /// Exploration rate used when refreshing policies.
    pub epsilon: f64,
    pub episodes_per_batch: u64,
    pub first_to_act: Seat,
    /// Swap the opening seat every episode.
    pub alternate_first_actor: bool,
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            epsilon: 0.20,
            episodes_per_batch: 100_000,
            first_to_act: Seat::Player,
            alternate_first_actor: true,
            seed: 0,
        }
    }
}

impl TrainingParams {
    /// Rejects settings that would corrupt the tables before any episode
    /// runs.
    pub fn validate(&self) -> Result<(), TrainError> {
        check_epsilon(self.epsilon)?;
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(TrainError::InvalidParameter(format!(
                "learning rate must be within (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.episodes_per_batch == 0 {
            return Err(TrainError::InvalidParameter(
                "episodes per batch must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Running counters for a training or evaluation session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrainStats {
    pub episodes: u64,
    pub batches: u64,
    pub folds: u64,
    pub showdowns: u64,
    pub splits: u64,
}

impl TrainStats {
    pub fn record(&mut self, outcome: &EpisodeOutcome) {
        self.episodes += 1;
        if outcome.is_showdown() {
            self.showdowns += 1;
            if outcome.is_split() {
                self.splits += 1;
            }
        } else {
            self.folds += 1;
        }
    }
}

/// Seat that opens episode `index`.
pub fn opener(first_to_act: Seat, alternate: bool, index: u64) -> Seat {
    if alternate && index % 2 == 1 {
        first_to_act.other()
    } else {
        first_to_act
    }
}

/// Shuffles a fresh deck for episode `index` and deals both hands and the
/// board into `state`.
pub fn deal(state: &mut BettingState, seed: u64, index: u64) -> Result<(), TrainError> {
    let mut deck = Deck::shuffled(seed.wrapping_add(index));
    state.reset();
    state.set_player_cards(&deck.draw(2)?)?;
    state.set_opponent_cards(&deck.draw(2)?)?;
    state.set_board(&deck.draw(3)?)?;
    Ok(())
}

pub struct SelfPlayTrainer {
    agents: [Agent; 2],
    params: TrainingParams,
    rng: ChaCha20Rng,
    state: BettingState,
    stats: TrainStats,
}

impl SelfPlayTrainer {
    /// `player` always sits in [`Seat::Player`], `opponent` in
    /// [`Seat::Opponent`].
    pub fn new(player: Agent, opponent: Agent, params: TrainingParams) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(params.seed);
        Self {
            agents: [player, opponent],
            params,
            rng,
            state: BettingState::new(),
            stats: TrainStats::default(),
        }
    }

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    pub fn stats(&self) -> TrainStats {
        self.stats
    }

    pub fn agent(&self, seat: Seat) -> &Agent {
        &self.agents[seat.index()]
    }

    pub fn into_agents(self) -> [Agent; 2] {
        self.agents
    }

    /// Deals, plays, settles and learns from one episode.
    pub fn run_episode(&mut self) -> Result<EpisodeOutcome, TrainError> {
        let index = self.stats.episodes;
        let Self {
            agents,
            params,
            rng,
            state,
            stats,
        } = self;

        deal(state, params.seed, index)?;
        state.set_first_to_act(opener(
            params.first_to_act,
            params.alternate_first_actor,
            index,
        ));

        let mut episode = play_episode(state, |seat, key| {
            agents[seat.index()].policy.draw_action(key, &mut *rng)
        })?;
        let outcome = episode.settle(state)?;

        for seat in Seat::BOTH {
            agents[seat.index()].learn(
                episode.trajectory(seat),
                params.learning_rate,
                params.epsilon,
            )?;
        }

        stats.record(&outcome);
        if stats.episodes % PROGRESS_EVERY == 0 {
            debug!(
                episodes = stats.episodes,
                player_states = agents[0].policy.len(),
                opponent_states = agents[1].policy.len(),
                "Training progress"
            );
        }
        Ok(outcome)
    }

    pub fn run_batch(&mut self) -> Result<(), TrainError> {
        for _ in 0..self.params.episodes_per_batch {
            self.run_episode()?;
        }
        self.stats.batches += 1;
        info!(
            batch = self.stats.batches,
            episodes = self.stats.episodes,
            folds = self.stats.folds,
            showdowns = self.stats.showdowns,
            "Batch complete"
        );
        Ok(())
    }

    /// Runs batches until `stop` says otherwise. At least one batch always
    /// runs.
    pub fn train<S: StopSignal + ?Sized>(&mut self, stop: &mut S) -> Result<TrainStats, TrainError> {
        self.params.validate()?;
        loop {
            self.run_batch()?;
            if stop.should_stop(self.stats.batches) {
                break;
            }
        }
        Ok(self.stats)
    }

    pub fn save(&self, dir: &Path, compress: bool) -> Result<(), TrainError> {
        for agent in &self.agents {
            agent.save(dir, compress)?;
        }
        Ok(())
    }

    /// Trains and then saves both agents. Tables are saved even when training
    /// fails; in that case the training error is returned.
    pub fn train_and_save<S: StopSignal + ?Sized>(
        &mut self,
        stop: &mut S,
        dir: &Path,
        compress: bool,
    ) -> Result<TrainStats, TrainError> {
        let trained = self.train(stop);
        if let Err(e) = &trained {
            error!(error = %e, episodes = self.stats.episodes, "Training aborted, saving tables");
        }
        let saved = self.save(dir, compress);
        match (trained, saved) {
            (Err(e), Err(save_err)) => {
                error!(error = %save_err, "Saving after abort failed");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(_), Err(save_err)) => Err(save_err),
            (Ok(stats), Ok(())) => Ok(stats),
        }
    }
}
