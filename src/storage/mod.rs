//! # Registry Backend Trait
//!
//! The contract between the network service and whatever keeps members,
//! friendships, cards and events. The graph and race analyses never talk to
//! a backend directly; they receive a [`Snapshot`] taken from it.
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryRegistry` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::*;
use crate::Result;

pub use memory::MemoryRegistry;

// ============================================================================
// Backend Configuration
// ============================================================================

/// Which registry backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-memory (no persistence)
    #[default]
    Memory,
}

// ============================================================================
// RegistryBackend Trait
// ============================================================================

/// The member registry contract.
///
/// Writes validate their input and fail with `Validation`, `NotFound` or
/// `IllegalAction`; reads of missing records return `None` or an empty list.
#[async_trait]
pub trait RegistryBackend: Send + Sync + 'static {
    // ========================================================================
    // Members
    // ========================================================================

    /// Store a new member and return its assigned id.
    /// Username and email must be valid and unique.
    async fn add_member(&self, member: NewMember) -> Result<MemberId>;

    /// Get a member by id. Returns None if not found.
    async fn get_member(&self, id: MemberId) -> Result<Option<Member>>;

    /// Remove a member along with its friendships, subscriptions and card
    /// memberships. Returns true if it existed.
    async fn remove_member(&self, id: MemberId) -> Result<bool>;

    /// All members, ascending id.
    async fn all_members(&self) -> Result<Vec<Member>>;

    /// Duck members only, ascending id.
    async fn ducks(&self) -> Result<Vec<Member>> {
        Ok(self.all_members().await?.into_iter().filter(Member::is_duck).collect())
    }

    // ========================================================================
    // Friendships
    // ========================================================================

    /// Befriend two existing, distinct members. Re-adding is a no-op.
    async fn add_friendship(&self, a: MemberId, b: MemberId) -> Result<()>;

    /// Returns true if the friendship existed.
    async fn remove_friendship(&self, a: MemberId, b: MemberId) -> Result<bool>;

    /// The raw friendship relation.
    async fn friendships(&self) -> Result<Vec<Friendship>>;

    // ========================================================================
    // Cards
    // ========================================================================

    async fn create_card(&self, name: &str) -> Result<Card>;

    async fn remove_card(&self, id: CardId) -> Result<bool>;

    async fn get_card(&self, id: CardId) -> Result<Option<Card>>;

    async fn cards(&self) -> Result<Vec<Card>>;

    /// Only duck members may join a card.
    async fn add_to_card(&self, duck: MemberId, card: CardId) -> Result<()>;

    async fn remove_from_card(&self, duck: MemberId, card: CardId) -> Result<bool>;

    /// Members of a card in join order. Empty for a missing card.
    async fn card_members(&self, card: CardId) -> Result<Vec<Member>>;

    // ========================================================================
    // Events
    // ========================================================================

    async fn create_event(&self, name: &str) -> Result<Event>;

    /// Buoy distances must all be positive.
    async fn create_race_event(&self, name: &str, buoys: Vec<f64>) -> Result<Event>;

    async fn get_event(&self, id: EventId) -> Result<Option<Event>>;

    async fn events(&self) -> Result<Vec<Event>>;

    /// Subscribe an existing member to an existing event. Re-subscribing is
    /// a no-op.
    async fn subscribe(&self, event: EventId, member: MemberId) -> Result<()>;

    async fn unsubscribe(&self, event: EventId, member: MemberId) -> Result<bool>;

    /// Subscribers of an event, in subscription order.
    async fn subscribers(&self, event: EventId) -> Result<EventSubscription>;

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Members plus the friendship relation.
    ///
    /// Default: read members, then friendships, as two separate reads.
    /// Backends that can see concurrent writes must override this to read
    /// both under one lock.
    async fn snapshot(&self) -> Result<Snapshot> {
        let members = self.all_members().await?;
        let friendships = self.friendships().await?;
        Ok(Snapshot::new(members, friendships))
    }

    /// A snapshot together with an event's subscribers, so every subscriber
    /// resolves against the returned members.
    ///
    /// Default: `snapshot()` then `subscribers()`, with the same caveat.
    async fn snapshot_with_subscribers(&self, event: EventId) -> Result<(Snapshot, EventSubscription)> {
        let snapshot = self.snapshot().await?;
        let subscribers = self.subscribers(event).await?;
        Ok((snapshot, subscribers))
    }
}
