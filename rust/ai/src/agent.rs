use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::episode::Trajectory;
use crate::errors::{StorageError, TrainError};
use crate::policy::PolicyTable;
use crate::storage::{read_artifact, write_artifact};
use crate::value::ActionValueTable;

const POLICY_EXT: &str = "policy";
const VALUE_EXT: &str = "savf";

/// A named learner: one policy table and one action-value table.
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    pub policy: PolicyTable,
    pub values: ActionValueTable,
}

impl Agent {
    /// Fresh agent with uniform tables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: PolicyTable::uniform(),
            values: ActionValueTable::uniform(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy_path(name: &str, dir: &Path, compress: bool) -> PathBuf {
        artifact_path(name, POLICY_EXT, dir, compress)
    }

    pub fn value_path(name: &str, dir: &Path, compress: bool) -> PathBuf {
        artifact_path(name, VALUE_EXT, dir, compress)
    }

    /// Loads both tables for `name` from `dir`.
    ///
    /// Missing artifacts are not an error: the agent starts from uniform
    /// tables. A half-present pair is logged and discarded. An artifact that
    /// exists but does not parse is returned as [`StorageError::Corrupt`].
    pub fn load_or_init(name: &str, dir: &Path, compress: bool) -> Result<Self, StorageError> {
        let policy_path = Self::policy_path(name, dir, compress);
        let value_path = Self::value_path(name, dir, compress);

        let policy_bytes = read_present(&policy_path)?;
        let value_bytes = read_present(&value_path)?;

        match (policy_bytes, value_bytes) {
            (Some(policy), Some(values)) => {
                let policy = PolicyTable::from_storage(&policy).map_err(|e| corrupt(&policy_path, e))?;
                let values =
                    ActionValueTable::from_storage(&values).map_err(|e| corrupt(&value_path, e))?;
                info!(
                    agent = name,
                    policy_states = policy.len(),
                    value_states = values.len(),
                    "Loaded agent"
                );
                Ok(Self {
                    name: name.to_string(),
                    policy,
                    values,
                })
            }
            (None, None) => {
                info!(agent = name, dir = %dir.display(), "No saved tables, starting uniform");
                Ok(Self::new(name))
            }
            (policy, _) => {
                let missing = if policy.is_some() { &value_path } else { &policy_path };
                warn!(
                    agent = name,
                    missing = %missing.display(),
                    "Incomplete artifact pair, starting uniform"
                );
                Ok(Self::new(name))
            }
        }
    }

    pub fn save(&self, dir: &Path, compress: bool) -> Result<(), StorageError> {
        let policy_path = Self::policy_path(&self.name, dir, compress);
        let value_path = Self::value_path(&self.name, dir, compress);
        write_artifact(&policy_path, &self.policy.to_storage()?)?;
        write_artifact(&value_path, &self.values.to_storage()?)?;
        info!(
            agent = %self.name,
            policy = %policy_path.display(),
            values = %value_path.display(),
            "Saved agent"
        );
        Ok(())
    }

    /// Backward pass over one episode: walks `trajectory` from the last step,
    /// accumulating the return, updating the value estimate for each step and
    /// then re-centering the policy at that key on the new greedy action.
    pub fn learn(&mut self, trajectory: &Trajectory, alpha: f64, epsilon: f64) -> Result<(), TrainError> {
        let mut g = 0.0;
        for step in trajectory.steps().iter().rev() {
            g += step.reward;
            self.values.update(&step.key, step.action, g, alpha);
            let greedy = self
                .values
                .greedy_action(&step.key)
                .ok_or_else(|| TrainError::NoLegalActions(step.key.to_string()))?;
            self.policy.refresh(&step.key, greedy, epsilon)?;
        }
        Ok(())
    }
}

fn artifact_path(name: &str, ext: &str, dir: &Path, compress: bool) -> PathBuf {
    let file = if compress {
        format!("{name}.{ext}.zst")
    } else {
        format!("{name}.{ext}")
    };
    dir.join(file)
}

/// A compressed artifact that fails to decompress counts as corrupt.
fn read_present(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    read_artifact(path).map_err(|e| match e {
        StorageError::Compression { .. } => corrupt(path, e),
        other => other,
    })
}

fn corrupt(path: &Path, source: StorageError) -> StorageError {
    StorageError::Corrupt {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}
