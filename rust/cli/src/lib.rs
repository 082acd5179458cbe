//! # flopbot CLI Library
//!
//! Command-line front end for self-play training of flop poker agents.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["flopbot", "train", "--batches", "1", "--episodes-per-batch", "1000"];
//! let code = flopbot_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `train`: Train both agents by self-play until the stop file appears
//! - `eval`: Play the saved agents against each other without learning
//! - `inspect`: Show the learned distribution and values for one state
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{Commands, FlopbotCli};
use commands::{
    handle_cfg_command, handle_eval_command, handle_inspect_command, handle_train_command,
};
use config::Overrides;

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let mut out = Vec::new();
/// let code = flopbot_cli::run(vec!["flopbot", "--help"], &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("train"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["train", "eval", "inspect", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match FlopbotCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    let _ = writeln!(err, "Usage: flopbot <command> [options]\n");
                    let _ = writeln!(err, "Commands:");
                    for c in COMMANDS {
                        let _ = writeln!(err, "  {}", c);
                    }
                    let _ = writeln!(err, "\nFor full help, run: flopbot --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Train {
            batches,
            episodes_per_batch,
            seed,
            epsilon,
            learning_rate,
            model_dir,
            stop_file,
            agent_a,
            agent_b,
            fixed_first_actor,
            compress,
        } => {
            let overrides = Overrides {
                episodes_per_batch,
                learning_rate,
                epsilon,
                seed,
                fixed_first_actor,
                agent_a,
                agent_b,
                model_dir,
                stop_file,
                compress,
            };
            handle_train_command(batches, overrides, out, err)
        }
        Commands::Eval { hands, seed } => handle_eval_command(hands, seed, out),
        Commands::Inspect {
            agent,
            seat,
            hole,
            board,
            history,
        } => handle_inspect_command(&agent, seat, &hole, &board, &history, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}
