//! Command handler modules for the flopbot CLI.
//!
//! Each subcommand lives in its own module and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in by the caller
//! - Errors propagated via the `CliError` enum

mod cfg;
mod eval;
mod inspect;
mod train;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use inspect::handle_inspect_command;
pub use train::handle_train_command;
