//! Cards: named groups of ducks.

use serde::{Deserialize, Serialize};
use super::{Member, MemberId};

/// Opaque card identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A group of duck members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    /// Member ids in join order, no duplicates.
    pub members: Vec<MemberId>,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), members: Vec::new() }
    }

    /// Add a member. Returns false if it was already present.
    pub fn add(&mut self, id: MemberId) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    pub fn remove(&mut self, id: MemberId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != id);
        self.members.len() != before
    }

    /// Mean of `(speed + endurance) / 2` over the given members.
    ///
    /// Non-duck members contribute nothing and are not counted. An empty
    /// card scores 0.
    pub fn mean_performance(members: &[Member]) -> f64 {
        let scores: Vec<f64> = members
            .iter()
            .filter_map(|m| m.duck_traits())
            .map(|t| (t.speed + t.endurance) / 2.0)
            .collect();
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}
