//! Configuration command handler.
//!
//! Displays the resolved training configuration with the source of every
//! value (default, configuration file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "epsilon": {
//!     "value": 0.2,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "episodes_per_batch": {
            "value": config.episodes_per_batch,
            "source": sources.episodes_per_batch,
        },
        "learning_rate": {
            "value": config.learning_rate,
            "source": sources.learning_rate,
        },
        "epsilon": {
            "value": config.epsilon,
            "source": sources.epsilon,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "alternate_first_actor": {
            "value": config.alternate_first_actor,
            "source": sources.alternate_first_actor,
        },
        "agent_a": {
            "value": config.agent_a,
            "source": sources.agent_a,
        },
        "agent_b": {
            "value": config.agent_b,
            "source": sources.agent_b,
        },
        "model_dir": {
            "value": config.model_dir,
            "source": sources.model_dir,
        },
        "stop_file": {
            "value": config.stop_file,
            "source": sources.stop_file,
        },
        "compress": {
            "value": config.compress,
            "source": sources.compress,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
