//! Head-to-head evaluation of the saved agents.
//!
//! Both agents play from their stored policies without learning: unseen
//! information states are sampled uniformly and never written back. The
//! opening seat alternates every hand.

use crate::config;
use crate::error::CliError;
use crate::ui::format_chips;
use flopbot_ai::episode::{EpisodeOutcome, play_episode};
use flopbot_ai::trainer::{deal, opener};
use flopbot_ai::{Agent, TrainError, TrainStats};
use flopbot_engine::betting::BettingState;
use flopbot_engine::player::Seat;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::Write;

/// Chip totals tracked per seat.
#[derive(Debug, Clone, Default)]
struct EvalStats {
    outcomes: TrainStats,
    net: [f64; 2],
    wins: [u64; 2],
}

impl EvalStats {
    fn record(&mut self, outcome: &EpisodeOutcome, net: [f64; 2]) {
        self.outcomes.record(outcome);
        self.net[0] += net[0];
        self.net[1] += net[1];
        if let Some(winner) = outcome.winner {
            self.wins[winner.index()] += 1;
        }
    }

    fn mean(&self, seat: Seat) -> f64 {
        if self.outcomes.episodes == 0 {
            0.0
        } else {
            self.net[seat.index()] / self.outcomes.episodes as f64
        }
    }
}

/// Plays `hands` hands between the two configured agents.
pub fn handle_eval_command(
    hands: u64,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?.config;
    let agents = [
        Agent::load_or_init(&cfg.agent_a, &cfg.model_dir, cfg.compress)?,
        Agent::load_or_init(&cfg.agent_b, &cfg.model_dir, cfg.compress)?,
    ];
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let stats = evaluate(&agents, hands, base_seed)?;
    print_eval_results(out, &agents, &stats, hands, base_seed)?;
    Ok(())
}

fn evaluate(agents: &[Agent; 2], hands: u64, seed: u64) -> Result<EvalStats, TrainError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut state = BettingState::new();
    let mut stats = EvalStats::default();

    for index in 0..hands {
        deal(&mut state, seed, index)?;
        state.set_first_to_act(opener(Seat::Player, true, index));
        let mut episode = play_episode(&mut state, |seat, key| {
            agents[seat.index()].policy.sample(key, &mut rng)
        })?;
        let outcome = episode.settle(&state)?;
        let net = Seat::BOTH.map(|seat| episode.trajectory(seat).total_reward());
        stats.record(&outcome, net);
    }
    Ok(stats)
}

fn print_eval_results(
    out: &mut dyn Write,
    agents: &[Agent; 2],
    stats: &EvalStats,
    hands: u64,
    seed: u64,
) -> std::io::Result<()> {
    writeln!(out, "Evaluation Results")?;
    writeln!(out, "Hands played: {}", hands)?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out)?;

    for seat in Seat::BOTH {
        let agent = &agents[seat.index()];
        writeln!(out, "{} ({}):", agent.name(), seat)?;
        writeln!(out, "  Net chips: {}", format_chips(stats.net[seat.index()]))?;
        writeln!(out, "  Mean per hand: {:+.4}", stats.mean(seat))?;
        writeln!(out, "  Pots won: {}", stats.wins[seat.index()])?;
        writeln!(out, "  Known states: {}", agent.policy.len())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Folds: {} | Showdowns: {} | Splits: {}",
        stats.outcomes.folds, stats.outcomes.showdowns, stats.outcomes.splits
    )?;
    Ok(())
}
