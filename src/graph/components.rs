//! Community detection: connected components by breadth-first search.

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::model::MemberId;
use super::{Community, FriendshipGraph};

/// Partition the graph into connected communities.
///
/// Seeds are visited in ascending member id, so identical snapshots always
/// produce the same components in the same order. Every member lands in
/// exactly one community; isolated members form singletons.
pub fn find_components(graph: &FriendshipGraph) -> Vec<Community> {
    let mut visited: HashSet<MemberId> = HashSet::with_capacity(graph.member_count());
    let mut components = Vec::new();

    for seed in graph.all_members() {
        if visited.contains(&seed) {
            continue;
        }
        components.push(collect_component(graph, seed, &mut visited));
    }

    tracing::debug!(
        members = graph.member_count(),
        components = components.len(),
        "community detection finished"
    );
    components
}

fn collect_component(
    graph: &FriendshipGraph,
    seed: MemberId,
    visited: &mut HashSet<MemberId>,
) -> Community {
    let mut component = Community::new();
    let mut queue = VecDeque::from([seed]);
    visited.insert(seed);

    while let Some(current) = queue.pop_front() {
        component.insert(current);
        for friend in graph.neighbors(current) {
            if visited.insert(friend) {
                queue.push_back(friend);
            }
        }
    }

    component
}
