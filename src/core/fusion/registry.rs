//! Zone-code registry
//!
//! Tracks which zone-code texts have already been handed out during one fusion
//! run. A text is claimed at most once; the registry lives exactly as long as the
//! run that owns it.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    assigned: HashSet<String>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `text`; returns false if it was already claimed
    pub fn claim(&mut self, text: &str) -> bool {
        if self.assigned.contains(text) {
            return false;
        }
        self.assigned.insert(text.to_string())
    }

    /// Number of distinct zone codes claimed so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
