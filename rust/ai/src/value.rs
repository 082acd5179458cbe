use std::collections::{BTreeMap, HashMap};

use flopbot_engine::betting::InfoStateKey;
use flopbot_engine::player::Action;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::storage;

const KIND: &str = "value";

#[derive(Debug, Serialize, Deserialize)]
struct ValueEntry {
    key: InfoStateKey,
    values: BTreeMap<Action, f64>,
}

/// Tabular action values `Q(key, action)` learned with a constant step size.
#[derive(Debug, Clone, Default)]
pub struct ActionValueTable {
    entries: HashMap<InfoStateKey, BTreeMap<Action, f64>>,
}

impl ActionValueTable {
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Number of information states with at least one estimate.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn value(&self, key: &InfoStateKey, action: Action) -> Option<f64> {
        self.entries.get(key)?.get(&action).copied()
    }

    pub fn values(&self, key: &InfoStateKey) -> Option<&BTreeMap<Action, f64>> {
        self.entries.get(key)
    }

    /// `q <- q + alpha * (g - q)`, with `q = 0` on first touch. Returns the
    /// new estimate.
    pub fn update(&mut self, key: &InfoStateKey, action: Action, g: f64, alpha: f64) -> f64 {
        let q = match self.entries.get_mut(key) {
            Some(values) => values.entry(action).or_insert(0.0),
            None => self
                .entries
                .entry(key.clone())
                .or_default()
                .entry(action)
                .or_insert(0.0),
        };
        *q += alpha * (g - *q);
        *q
    }

    /// Highest valued legal action at `key`. Actions never updated count as
    /// zero; ties go to the earlier action in Check, Call, Bet, Fold order.
    /// `None` only for terminal keys.
    pub fn greedy_action(&self, key: &InfoStateKey) -> Option<Action> {
        let stored = self.entries.get(key);
        let mut best: Option<(Action, f64)> = None;
        for action in key.legal_actions() {
            let q = stored
                .and_then(|values| values.get(&action))
                .copied()
                .unwrap_or(0.0);
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }

    pub fn to_storage(&self) -> Result<Vec<u8>, StorageError> {
        let mut entries: Vec<ValueEntry> = self
            .entries
            .iter()
            .map(|(key, values)| ValueEntry {
                key: key.clone(),
                values: values.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        storage::encode(KIND, entries)
    }

    pub fn from_storage(bytes: &[u8]) -> Result<Self, StorageError> {
        let entries: Vec<ValueEntry> = storage::decode(KIND, bytes)?;
        let mut table = HashMap::with_capacity(entries.len());
        for entry in entries {
            let legal = entry.key.legal_actions();
            if let Some(bad) = entry.values.keys().find(|a| !legal.contains(a)) {
                return Err(StorageError::Invalid(format!(
                    "value for illegal action {} at {}",
                    bad, entry.key
                )));
            }
            if entry.values.values().any(|q| !q.is_finite()) {
                return Err(StorageError::Invalid(format!(
                    "non-finite value at {}",
                    entry.key
                )));
            }
            table.insert(entry.key, entry.values);
        }
        Ok(Self { entries: table })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flopbot_engine::cards::Card;
    use flopbot_engine::player::Seat;

    fn key(history: Vec<Action>) -> InfoStateKey {
        let hole = Card::parse_many("KdQd").unwrap();
        let board = Card::parse_many("2c7s9d").unwrap();
        InfoStateKey::new(
            Seat::Opponent,
            [hole[0], hole[1]],
            [board[0], board[1], board[2]],
            history,
        )
    }

    #[test]
    fn first_update_starts_from_zero() {
        let mut q = ActionValueTable::uniform();
        let k = key(vec![]);
        assert_eq!(q.value(&k, Action::Bet), None);
        let v = q.update(&k, Action::Bet, 2.0, 0.5);
        assert!((v - 1.0).abs() < 1e-12);
        assert_eq!(q.value(&k, Action::Check), None);
    }

    #[test]
    fn constant_return_converges_monotonically_without_overshoot() {
        for &(g, alpha) in &[(3.0, 0.05), (-2.0, 0.3), (1.0, 0.99)] {
            let mut q = ActionValueTable::uniform();
            let k = key(vec![Action::Check]);
            let mut previous = 0.0f64;
            for _ in 0..500 {
                let v = q.update(&k, Action::Bet, g, alpha);
                assert!((g - v).abs() <= (g - previous).abs());
                if g > 0.0 {
                    assert!(v <= g && v >= previous);
                } else {
                    assert!(v >= g && v <= previous);
                }
                previous = v;
            }
            assert!((previous - g).abs() < 1e-6);
        }
    }

    #[test]
    fn greedy_prefers_highest_value() {
        let mut q = ActionValueTable::uniform();
        let k = key(vec![Action::Bet]);
        q.update(&k, Action::Call, -1.0, 1.0);
        q.update(&k, Action::Bet, 0.5, 1.0);
        assert_eq!(q.greedy_action(&k), Some(Action::Bet));
    }

    #[test]
    fn unvisited_actions_count_as_zero() {
        let mut q = ActionValueTable::uniform();
        let k = key(vec![Action::Bet]);
        q.update(&k, Action::Call, -1.0, 1.0);
        q.update(&k, Action::Bet, -0.5, 1.0);
        // Fold was never tried and stands at 0
        assert_eq!(q.greedy_action(&k), Some(Action::Fold));
    }

    #[test]
    fn ties_follow_fixed_priority() {
        let q = ActionValueTable::uniform();
        assert_eq!(q.greedy_action(&key(vec![])), Some(Action::Check));
        assert_eq!(q.greedy_action(&key(vec![Action::Bet])), Some(Action::Call));
        assert_eq!(q.greedy_action(&key(vec![Action::Check, Action::Check])), None);
    }

    #[test]
    fn storage_round_trip_keeps_values() {
        let mut q = ActionValueTable::uniform();
        let k = key(vec![Action::Check]);
        q.update(&k, Action::Bet, 4.0, 0.25);
        let back = ActionValueTable::from_storage(&q.to_storage().unwrap()).unwrap();
        assert_eq!(back.value(&k, Action::Bet), Some(1.0));
    }

    #[test]
    fn storage_rejects_values_for_illegal_actions() {
        let entry = ValueEntry {
            key: key(vec![]),
            values: [(Action::Fold, 1.0)].into_iter().collect(),
        };
        let bytes = storage::encode(KIND, vec![entry]).unwrap();
        assert!(matches!(
            ActionValueTable::from_storage(&bytes),
            Err(StorageError::Invalid(_))
        ));
    }
}
