//! Command-line argument types.

use clap::{Parser, Subcommand};
use flopbot_engine::player::Seat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flopbot",
    version,
    about = "Self-play Monte Carlo training for flop poker"
)]
pub struct FlopbotCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train both agents against each other until the stop file appears
    Train {
        /// Stop after this many batches even without a stop file
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        batches: Option<u64>,
        #[arg(long)]
        episodes_per_batch: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        epsilon: Option<f64>,
        #[arg(long)]
        learning_rate: Option<f64>,
        #[arg(long)]
        model_dir: Option<PathBuf>,
        #[arg(long)]
        stop_file: Option<PathBuf>,
        #[arg(long)]
        agent_a: Option<String>,
        #[arg(long)]
        agent_b: Option<String>,
        /// Keep the same seat opening every hand
        #[arg(long)]
        fixed_first_actor: bool,
        /// Store tables zstd-compressed
        #[arg(long)]
        compress: bool,
    },
    /// Play the saved agents against each other without learning
    Eval {
        #[arg(long, default_value_t = 10_000)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show what one agent learned for a single information state
    Inspect {
        #[arg(long)]
        agent: String,
        #[arg(long, default_value = "player")]
        seat: Seat,
        /// Two hole cards, e.g. AsAh
        #[arg(long)]
        hole: String,
        /// Three board cards, e.g. 2c7s9d
        #[arg(long)]
        board: String,
        /// Comma separated actions so far, e.g. Ch,B
        #[arg(long, default_value = "")]
        history: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
