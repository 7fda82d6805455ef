//! # Network Model
//!
//! Plain data types shared by the registry, the graph analysis and the race
//! pipeline: members, capabilities, friendships, cards and events.
//!
//! Design rule: this module is pure data. No I/O, no state, no async.

pub mod member;
pub mod capability;
pub mod friendship;
pub mod card;
pub mod event;
pub mod snapshot;

pub use member::{Member, MemberId, MemberKind, NewMember, PersonProfile, DuckTraits};
pub use capability::{Capability, CapabilitySet};
pub use friendship::Friendship;
pub use card::{Card, CardId};
pub use event::{Event, EventId, EventKind, EventSubscription};
pub use snapshot::Snapshot;
