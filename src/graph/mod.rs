//! # Friendship Graph Analysis
//!
//! Undirected adjacency view over a friendship snapshot, plus the two
//! analyses run on it:
//!
//! | Analysis | Module | Output |
//! |----------|--------|--------|
//! | Connected components | `components` | ordered `Vec<Community>` |
//! | Eccentricity / diameter | `eccentricity` | `usize`, most sociable `Community` |
//!
//! The graph is rebuilt from the current edge set on every query. It never
//! mutates its inputs and holds no shared state.

pub mod components;
pub mod eccentricity;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{Friendship, MemberId, Snapshot};

pub use components::find_components;
pub use eccentricity::{diameter, eccentricity, most_sociable};

// ============================================================================
// FriendshipGraph
// ============================================================================

/// Immutable, deduplicated, undirected friendship adjacency.
///
/// Members are kept in ascending id order so that every traversal over the
/// graph is deterministic.
#[derive(Debug, Clone, Default)]
pub struct FriendshipGraph {
    /// member → neighbours
    adjacency: BTreeMap<MemberId, BTreeSet<MemberId>>,
}

impl FriendshipGraph {
    /// Build the graph from the known member ids and the raw friendship
    /// relation.
    ///
    /// Self-loops and edges with an endpoint outside `members` are dropped.
    /// Duplicate edges collapse into one.
    pub fn new<M, E>(members: M, edges: E) -> Self
    where
        M: IntoIterator<Item = MemberId>,
        E: IntoIterator<Item = Friendship>,
    {
        let mut adjacency: BTreeMap<MemberId, BTreeSet<MemberId>> =
            members.into_iter().map(|id| (id, BTreeSet::new())).collect();

        let mut skipped = 0usize;
        for edge in edges {
            let (a, b) = edge.endpoints();
            if edge.is_self_loop() || !adjacency.contains_key(&a) || !adjacency.contains_key(&b) {
                skipped += 1;
                continue;
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }

        if skipped > 0 {
            tracing::warn!(skipped, "ignored dangling or self-referencing friendships");
        }

        Self { adjacency }
    }

    /// Friends of `id`. Empty for unknown members.
    pub fn neighbors(&self, id: MemberId) -> impl Iterator<Item = MemberId> + '_ {
        self.adjacency.get(&id).into_iter().flat_map(|n| n.iter().copied())
    }

    /// Every known member, ascending.
    pub fn all_members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn are_friends(&self, a: MemberId, b: MemberId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    pub fn degree(&self, id: MemberId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    pub fn member_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }
}

impl From<&Snapshot> for FriendshipGraph {
    fn from(snapshot: &Snapshot) -> Self {
        FriendshipGraph::new(snapshot.member_ids(), snapshot.friendships().iter().copied())
    }
}

// ============================================================================
// Community
// ============================================================================

/// A maximal connected set of members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    members: BTreeSet<MemberId>,
}

impl Community {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: MemberId) -> bool {
        self.members.insert(id)
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.iter().copied()
    }

    pub fn members(&self) -> &BTreeSet<MemberId> {
        &self.members
    }
}

impl FromIterator<MemberId> for Community {
    fn from_iter<I: IntoIterator<Item = MemberId>>(iter: I) -> Self {
        Self { members: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<MemberId> {
        raw.iter().copied().map(MemberId).collect()
    }

    fn edge(a: u64, b: u64) -> Friendship {
        Friendship::new(MemberId(a), MemberId(b))
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let g = FriendshipGraph::new(ids(&[1, 2, 3]), [edge(1, 2)]);
        assert_eq!(g.neighbors(MemberId(1)).collect::<Vec<_>>(), ids(&[2]));
        assert_eq!(g.neighbors(MemberId(2)).collect::<Vec<_>>(), ids(&[1]));
        assert_eq!(g.neighbors(MemberId(3)).count(), 0);
    }

    #[test]
    fn test_duplicates_collapse() {
        let g = FriendshipGraph::new(ids(&[1, 2]), [edge(1, 2), edge(2, 1), edge(1, 2)]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(MemberId(1)), 1);
    }

    #[test]
    fn test_dangling_and_self_edges_are_ignored() {
        let g = FriendshipGraph::new(ids(&[1, 2]), [edge(1, 99), edge(2, 2), edge(1, 2)]);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.contains(MemberId(99)));
        assert!(!g.are_friends(MemberId(2), MemberId(2)));
        assert_eq!(g.neighbors(MemberId(99)).count(), 0);
    }

    #[test]
    fn test_all_members_ascending() {
        let g = FriendshipGraph::new(ids(&[5, 1, 3]), Vec::<Friendship>::new());
        assert_eq!(g.all_members().collect::<Vec<_>>(), ids(&[1, 3, 5]));
        assert_eq!(g.member_count(), 3);
    }
}
