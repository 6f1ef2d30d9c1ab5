//! Q-table for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Learned state-action values.
///
/// Maps a [`StateKey`] to the value of each move tried from that state. Any
/// (state, action) pair that was never written reads as `q_init` (0.0 by
/// default); action maps are populated lazily on first write, so the table
/// only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    /// state -> (move -> Q-value)
    values: HashMap<StateKey, HashMap<usize, f64>>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Value reported for unseen state-action pairs
    q_init: f64,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            values: HashMap::new(),
            learning_rate,
            discount_factor,
            q_init,
        }
    }

    /// Q-value for a state-action pair, defaulting to `q_init` when unseen
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(self.q_init)
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: usize, value: f64) {
        self.values.entry(state).or_default().insert(action, value);
    }

    /// Maximum Q-value over the given actions; `q_init` entries count, and an
    /// empty action set (terminal successor) yields 0.0
    pub fn max_value(&self, state: &StateKey, actions: &[usize]) -> f64 {
        if actions.is_empty() {
            return 0.0;
        }
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action over `actions`, breaking ties toward the first
    /// encountered maximum so that selection is deterministic for a fixed
    /// enumeration order. Returns `None` only for an empty action set.
    pub fn greedy_action(&self, state: &StateKey, actions: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &action in actions {
            let value = self.get(state, action);
            match best {
                Some((_, incumbent)) if value <= incumbent => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) <- Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// `next_actions` are the legal moves in `next_state`; an empty slice
    /// marks a terminal successor and contributes no future value.
    pub fn td_update(
        &mut self,
        state: StateKey,
        action: usize,
        reward: f64,
        next_state: &StateKey,
        next_actions: &[usize],
    ) {
        let current = self.get(&state, action);
        let max_next = self.max_value(next_state, next_actions);
        let target = reward + self.discount_factor * max_next;
        let updated = current + self.learning_rate * (target - current);
        self.set(state, action, updated);
    }

    /// Number of states with at least one learned value
    pub fn state_count(&self) -> usize {
        self.values.len()
    }

    /// Total number of stored state-action values
    pub fn entry_count(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    /// Whether nothing has been learned yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all learned values
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }
}
