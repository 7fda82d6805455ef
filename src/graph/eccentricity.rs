//! Eccentricity, diameter and the "most sociable" community.
//!
//! Shortest paths are recomputed from every member on every call; nothing is
//! cached between calls.

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::model::MemberId;
use super::{Community, FriendshipGraph};

/// Longest shortest-path distance (in edges) from `start` to any member of
/// `community` reachable without leaving it.
///
/// Returns 0 when `start` has no friends inside the community.
pub fn eccentricity(graph: &FriendshipGraph, community: &Community, start: MemberId) -> usize {
    let mut dist: HashMap<MemberId, usize> = HashMap::with_capacity(community.len());
    let mut queue = VecDeque::from([start]);
    dist.insert(start, 0);

    let mut max = 0;
    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for friend in graph.neighbors(current) {
            if !community.contains(friend) || dist.contains_key(&friend) {
                continue;
            }
            dist.insert(friend, d + 1);
            max = max.max(d + 1);
            queue.push_back(friend);
        }
    }

    max
}

/// Maximum eccentricity over all members of `community`.
///
/// A singleton or empty community has diameter 0.
pub fn diameter(graph: &FriendshipGraph, community: &Community) -> usize {
    community
        .iter()
        .map(|member| eccentricity(graph, community, member))
        .max()
        .unwrap_or(0)
}

/// The community with the strictly largest diameter.
///
/// Ties go to whichever community comes first in `components`. An empty
/// input yields an empty community.
pub fn most_sociable(graph: &FriendshipGraph, components: &[Community]) -> Community {
    let mut best: Option<(&Community, usize)> = None;

    for component in components {
        let diam = diameter(graph, component);
        if best.is_none_or(|(_, best_diam)| diam > best_diam) {
            best = Some((component, diam));
        }
    }

    match best {
        Some((component, diam)) => {
            tracing::debug!(diameter = diam, size = component.len(), "most sociable community selected");
            component.clone()
        }
        None => Community::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::find_components;
    use crate::model::Friendship;
    use pretty_assertions::assert_eq;

    fn graph(members: &[u64], edges: &[(u64, u64)]) -> FriendshipGraph {
        FriendshipGraph::new(
            members.iter().copied().map(MemberId),
            edges.iter().map(|&(a, b)| Friendship::new(MemberId(a), MemberId(b))),
        )
    }

    fn community(raw: &[u64]) -> Community {
        raw.iter().copied().map(MemberId).collect()
    }

    #[test]
    fn test_singleton_diameter_is_zero() {
        let g = graph(&[1], &[]);
        assert_eq!(diameter(&g, &community(&[1])), 0);
    }

    #[test]
    fn test_complete_subgraph_diameter_is_one() {
        let g = graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
        assert_eq!(diameter(&g, &community(&[1, 2, 3, 4])), 1);
    }

    #[test]
    fn test_path_diameter() {
        // 1 - 2 - 3 - 4
        let g = graph(&[1, 2, 3, 4], &[(1, 2), (2, 3), (3, 4)]);
        let c = community(&[1, 2, 3, 4]);
        assert_eq!(eccentricity(&g, &c, MemberId(1)), 3);
        assert_eq!(eccentricity(&g, &c, MemberId(2)), 2);
        assert_eq!(diameter(&g, &c), 3);
    }

    #[test]
    fn test_cycle_diameter() {
        let g = graph(&[1, 2, 3, 4, 5], &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]);
        assert_eq!(diameter(&g, &community(&[1, 2, 3, 4, 5])), 2);
    }

    #[test]
    fn test_search_stays_inside_community() {
        // 1 - 2 - 3, but only {1, 2} is considered
        let g = graph(&[1, 2, 3], &[(1, 2), (2, 3)]);
        assert_eq!(diameter(&g, &community(&[1, 2])), 1);
    }

    #[test]
    fn test_most_sociable_picks_longest_chain() {
        // {1,2} diameter 1, {3,4,5} path diameter 2, {6} diameter 0
        let g = graph(&[1, 2, 3, 4, 5, 6], &[(1, 2), (3, 4), (4, 5)]);
        let comps = find_components(&g);
        assert_eq!(most_sociable(&g, &comps), community(&[3, 4, 5]));
    }

    #[test]
    fn test_most_sociable_tie_goes_to_first() {
        let g = graph(&[1, 2, 3, 4], &[(3, 4), (1, 2)]);
        let comps = find_components(&g);
        assert_eq!(most_sociable(&g, &comps), community(&[1, 2]));
    }

    #[test]
    fn test_most_sociable_of_isolated_members() {
        let g = graph(&[4, 2], &[]);
        let comps = find_components(&g);
        assert_eq!(most_sociable(&g, &comps), community(&[2]));
    }

    #[test]
    fn test_most_sociable_of_nothing_is_empty() {
        let g = graph(&[], &[]);
        assert!(most_sociable(&g, &[]).is_empty());
    }
}
