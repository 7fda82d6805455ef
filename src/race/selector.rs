//! Lane selection.

use crate::model::{Capability, Member};

/// Pick at most `lanes` members of `pool` that have `capability`.
///
/// Candidates are ranked by endurance descending, then speed descending.
/// Remaining ties keep their pool order. An undersized pool yields everyone
/// eligible; `lanes == 0` yields nobody.
pub fn select(pool: &[Member], capability: Capability, lanes: usize) -> Vec<Member> {
    let mut eligible: Vec<&Member> = pool
        .iter()
        .filter(|m| m.can(capability))
        .collect();

    // stable sort, so equal (endurance, speed) keep pool order
    eligible.sort_by(|a, b| {
        let (ea, sa) = rank_key(a);
        let (eb, sb) = rank_key(b);
        eb.total_cmp(&ea).then_with(|| sb.total_cmp(&sa))
    });

    let selected: Vec<Member> = eligible.into_iter().take(lanes).cloned().collect();
    tracing::debug!(
        pool = pool.len(),
        %capability,
        lanes,
        selected = selected.len(),
        "race participants selected"
    );
    selected
}

fn rank_key(member: &Member) -> (f64, f64) {
    member
        .duck_traits()
        .map_or((f64::NEG_INFINITY, f64::NEG_INFINITY), |t| (t.endurance, t.speed))
}
