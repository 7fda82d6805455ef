//! Point-in-time view of the registry consumed by the analyses.

use serde::{Deserialize, Serialize};
use super::{Friendship, Member, MemberId};

/// Immutable copy of the member pool and the friendship relation.
///
/// Members are sorted by ascending id. The friendship list is kept exactly as
/// the registry returned it and may contain duplicates or dangling ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    members: Vec<Member>,
    friendships: Vec<Friendship>,
}

impl Snapshot {
    pub fn new(mut members: Vec<Member>, friendships: Vec<Friendship>) -> Self {
        members.sort_by_key(|m| m.id);
        members.dedup_by_key(|m| m.id);
        Self { members, friendships }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn friendships(&self) -> &[Friendship] {
        &self.friendships
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|idx| &self.members[idx])
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.member(id).is_some()
    }

    pub fn member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.members.iter().map(|m| m.id)
    }

    /// Duck members in ascending id order.
    pub fn ducks(&self) -> Vec<Member> {
        self.members.iter().filter(|m| m.is_duck()).cloned().collect()
    }
}
