// src/history.rs

use crate::types::{Control, State};

/// Append-only record of visited states and applied inputs.
///
/// Grows by exactly one row per simulation tick, is never truncated or
/// reordered, and is consumed only by external plotting/analysis. This is the
/// sole mutable, accumulating entity in the core model.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    states: Vec<State>,
    inputs: Vec<Control>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one `(state, input)` row, preserving chronological order.
    pub fn push(&mut self, state: State, input: Control) {
        self.states.push(state);
        self.inputs.push(input);
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn inputs(&self) -> &[Control] {
        &self.inputs
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
