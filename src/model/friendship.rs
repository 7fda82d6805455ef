//! Friendship edge between two members.

use serde::{Deserialize, Serialize};
use super::MemberId;

/// An unordered pair of member ids.
///
/// Always stored normalized as `(min, max)`, so `Friendship::new(a, b)` and
/// `Friendship::new(b, a)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Friendship {
    low: MemberId,
    high: MemberId,
}

impl Friendship {
    pub fn new(a: MemberId, b: MemberId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn endpoints(&self) -> (MemberId, MemberId) {
        (self.low, self.high)
    }

    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }

    pub fn involves(&self, id: MemberId) -> bool {
        self.low == id || self.high == id
    }

    /// The "other" end of the friendship from the given member.
    pub fn other(&self, from: MemberId) -> Option<MemberId> {
        if from == self.low { Some(self.high) }
        else if from == self.high { Some(self.low) }
        else { None }
    }
}

impl From<(MemberId, MemberId)> for Friendship {
    fn from((a, b): (MemberId, MemberId)) -> Self {
        Friendship::new(a, b)
    }
}
