use std::collections::{BTreeMap, HashMap};

use flopbot_engine::betting::InfoStateKey;
use flopbot_engine::errors::GameError;
use flopbot_engine::player::Action;
use rand::Rng;
use rand::distr::Distribution as _;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::errors::{StorageError, TrainError};
use crate::storage;

/// Probability of each legal action at one information state.
pub type Distribution = BTreeMap<Action, f64>;

const KIND: &str = "policy";
const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Serialize, Deserialize)]
struct PolicyEntry {
    key: InfoStateKey,
    probabilities: Distribution,
}

/// Epsilon-greedy action distributions, one per visited information state.
///
/// Unseen keys behave as a uniform distribution over the key's legal
/// actions and are materialized the first time [`PolicyTable::draw_action`]
/// touches them.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    entries: HashMap<InfoStateKey, Distribution>,
}

impl PolicyTable {
    pub fn uniform() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored distribution for `key`, if one has been materialized.
    pub fn distribution(&self, key: &InfoStateKey) -> Option<&Distribution> {
        self.entries.get(key)
    }

    /// Samples an action for `key`, installing a uniform distribution first
    /// when the key has never been seen.
    pub fn draw_action<R: Rng + ?Sized>(
        &mut self,
        key: &InfoStateKey,
        rng: &mut R,
    ) -> Result<Action, TrainError> {
        if !self.entries.contains_key(key) {
            let dist = uniform_over(key)?;
            self.entries.insert(key.clone(), dist);
        }
        match self.entries.get(key) {
            Some(dist) => sample_from(key, dist, rng),
            None => Err(TrainError::NoLegalActions(key.to_string())),
        }
    }

    /// Samples without touching the table. Unseen keys are sampled uniformly.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        key: &InfoStateKey,
        rng: &mut R,
    ) -> Result<Action, TrainError> {
        match self.entries.get(key) {
            Some(dist) => sample_from(key, dist, rng),
            None => sample_from(key, &uniform_over(key)?, rng),
        }
    }

    /// Rewrites the distribution at `key` in epsilon-greedy form around
    /// `greedy`: `1 - epsilon + epsilon/|A|` for the greedy action and
    /// `epsilon/|A|` for every other legal action.
    pub fn refresh(
        &mut self,
        key: &InfoStateKey,
        greedy: Action,
        epsilon: f64,
    ) -> Result<(), TrainError> {
        check_epsilon(epsilon)?;
        let legal = key.legal_actions();
        if !legal.contains(&greedy) {
            return Err(GameError::IllegalAction {
                action: greedy,
                legal,
            }
            .into());
        }
        let share = epsilon / legal.len() as f64;
        let dist = legal
            .into_iter()
            .map(|a| {
                let p = if a == greedy { 1.0 - epsilon + share } else { share };
                (a, p)
            })
            .collect();
        self.entries.insert(key.clone(), dist);
        Ok(())
    }

    pub fn to_storage(&self) -> Result<Vec<u8>, StorageError> {
        let mut entries: Vec<PolicyEntry> = self
            .entries
            .iter()
            .map(|(key, dist)| PolicyEntry {
                key: key.clone(),
                probabilities: dist.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        storage::encode(KIND, entries)
    }

    pub fn from_storage(bytes: &[u8]) -> Result<Self, StorageError> {
        let entries: Vec<PolicyEntry> = storage::decode(KIND, bytes)?;
        let mut table = HashMap::with_capacity(entries.len());
        for entry in entries {
            validate(&entry)?;
            table.insert(entry.key, entry.probabilities);
        }
        Ok(Self { entries: table })
    }
}

/// Exploration rates outside [0, 1] would store negative probabilities.
pub fn check_epsilon(epsilon: f64) -> Result<(), TrainError> {
    if epsilon.is_finite() && (0.0..=1.0).contains(&epsilon) {
        Ok(())
    } else {
        Err(TrainError::InvalidParameter(format!(
            "epsilon must be within [0, 1], got {epsilon}"
        )))
    }
}

fn uniform_over(key: &InfoStateKey) -> Result<Distribution, TrainError> {
    let legal = key.legal_actions();
    if legal.is_empty() {
        return Err(TrainError::NoLegalActions(key.to_string()));
    }
    let p = 1.0 / legal.len() as f64;
    Ok(legal.into_iter().map(|a| (a, p)).collect())
}

fn sample_from<R: Rng + ?Sized>(
    key: &InfoStateKey,
    dist: &Distribution,
    rng: &mut R,
) -> Result<Action, TrainError> {
    let actions: Vec<Action> = dist.keys().copied().collect();
    let index = WeightedIndex::<f64>::new(dist.values()).map_err(|e| TrainError::Sampling {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    Ok(actions[index.sample(rng)])
}

fn validate(entry: &PolicyEntry) -> Result<(), StorageError> {
    let legal = entry.key.legal_actions();
    let stored: Vec<Action> = entry.probabilities.keys().copied().collect();
    if stored != legal {
        return Err(StorageError::Invalid(format!(
            "policy at {} covers {:?}, legal actions are {:?}",
            entry.key, stored, legal
        )));
    }
    if let Some((action, p)) = entry
        .probabilities
        .iter()
        .find(|(_, p)| !(p.is_finite() && (0.0..=1.0 + TOLERANCE).contains(*p)))
    {
        return Err(StorageError::Invalid(format!(
            "policy at {} gives {} probability {}",
            entry.key, action, p
        )));
    }
    let total: f64 = entry.probabilities.values().sum();
    if (total - 1.0).abs() > TOLERANCE {
        return Err(StorageError::Invalid(format!(
            "policy at {} sums to {}",
            entry.key, total
        )));
    }
    Ok(())
}
