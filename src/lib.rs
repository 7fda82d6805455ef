//! # duck-network: Duck Social Network Analysis
//!
//! A social graph of people and ducks, with two independent pipelines on
//! top of it:
//!
//! 1. **Communities**: connected components of the friendship graph and the
//!    "most sociable" community (largest diameter, first one wins ties).
//! 2. **Races**: lane selection from the duck pool and simulation over a
//!    sequence of buoy distances, announced to the event's subscribers.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `RegistryBackend` is the contract between the service and storage
//! 2. **Snapshot in, result out**: analyses are pure functions over a [`Snapshot`]
//! 3. **Deterministic**: identical snapshots give identical components in identical order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use duck_network::{Network, NewMember, CapabilitySet};
//!
//! # async fn example() -> duck_network::Result<()> {
//! let network = Network::open_memory();
//!
//! let a = network.add_member(NewMember::duck("daisy", "daisy@pond.io", CapabilitySet::SWIM, 5.0, 9.0)).await?;
//! let b = network.add_member(NewMember::duck("donald", "donald@pond.io", CapabilitySet::SWIM, 8.0, 3.0)).await?;
//! network.add_friend(a, b).await?;
//!
//! let race = network.create_race_event("Lake Cup", vec![10.0, 20.0]).await?;
//! network.subscribe(race.id, a).await?;
//! let result = network.run_race(race.id, 2).await?;
//! println!("finished in {:.3}s", result.total);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod race;
pub mod notify;
pub mod storage;
pub mod config;
pub mod validate;

use std::sync::Arc;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Member, MemberId, MemberKind, NewMember, PersonProfile, DuckTraits,
    Capability, CapabilitySet, Friendship, Card, CardId,
    Event, EventId, EventKind, EventSubscription, Snapshot,
};

// ============================================================================
// Re-exports: Analyses
// ============================================================================

pub use graph::{Community, FriendshipGraph};
pub use race::{LaneTime, RaceConfig, RaceResult};
pub use notify::{DeliveryReport, InboxMailbox, Mailbox, TracingMailbox};

// ============================================================================
// Re-exports: Storage & config
// ============================================================================

pub use storage::{BackendConfig, MemoryRegistry, RegistryBackend};
pub use config::{NetworkConfig, RaceSettings};

// ============================================================================
// Top-level Network handle
// ============================================================================

/// The primary entry point. A `Network` wraps a registry backend and runs
/// the graph and race analyses over fresh snapshots of it.
pub struct Network<B: RegistryBackend> {
    backend: B,
    mailbox: Arc<dyn Mailbox>,
    race: RaceSettings,
}

impl<B: RegistryBackend> Network<B> {
    /// Create a Network with the given backend, announcing through the log.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            mailbox: Arc::new(TracingMailbox),
            race: RaceSettings::default(),
        }
    }

    /// Replace the transport used for event notifications.
    pub fn with_mailbox(mut self, mailbox: Arc<dyn Mailbox>) -> Self {
        self.mailbox = mailbox;
        self
    }

    pub fn with_race_settings(mut self, race: RaceSettings) -> Self {
        self.race = race;
        self
    }

    /// Access the underlying backend (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn race_settings(&self) -> &RaceSettings {
        &self.race
    }

    // ========================================================================
    // Members
    // ========================================================================

    pub async fn add_member(&self, member: NewMember) -> Result<MemberId> {
        self.backend.add_member(member).await
    }

    pub async fn remove_member(&self, id: MemberId) -> Result<bool> {
        self.backend.remove_member(id).await
    }

    /// Fails with `NotFound` for an unknown id.
    pub async fn find_member(&self, id: MemberId) -> Result<Member> {
        self.backend
            .get_member(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Member {id}")))
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.backend.all_members().await
    }

    // ========================================================================
    // Friendships & communities
    // ========================================================================

    pub async fn add_friend(&self, a: MemberId, b: MemberId) -> Result<()> {
        self.backend.add_friendship(a, b).await
    }

    pub async fn remove_friend(&self, a: MemberId, b: MemberId) -> Result<bool> {
        self.backend.remove_friendship(a, b).await
    }

    /// Connected communities of the current friendship graph.
    pub async fn communities(&self) -> Result<Vec<Community>> {
        let snapshot = self.backend.snapshot().await?;
        let graph = FriendshipGraph::from(&snapshot);
        Ok(graph::find_components(&graph))
    }

    pub async fn number_of_communities(&self) -> Result<usize> {
        Ok(self.communities().await?.len())
    }

    /// The community with the largest diameter, together with that diameter.
    pub async fn most_sociable_community(&self) -> Result<(Community, usize)> {
        let snapshot = self.backend.snapshot().await?;
        let graph = FriendshipGraph::from(&snapshot);
        let components = graph::find_components(&graph);
        let best = graph::most_sociable(&graph, &components);
        let diameter = graph::diameter(&graph, &best);
        Ok((best, diameter))
    }

    // ========================================================================
    // Cards
    // ========================================================================

    pub async fn create_card(&self, name: &str) -> Result<Card> {
        self.backend.create_card(name).await
    }

    pub async fn remove_card(&self, id: CardId) -> Result<bool> {
        self.backend.remove_card(id).await
    }

    pub async fn list_cards(&self) -> Result<Vec<Card>> {
        self.backend.cards().await
    }

    pub async fn add_duck_to_card(&self, duck: MemberId, card: CardId) -> Result<()> {
        self.backend.add_to_card(duck, card).await
    }

    pub async fn remove_duck_from_card(&self, duck: MemberId, card: CardId) -> Result<bool> {
        self.backend.remove_from_card(duck, card).await
    }

    pub async fn card_members(&self, card: CardId) -> Result<Vec<Member>> {
        self.backend.card_members(card).await
    }

    /// Mean `(speed + endurance) / 2` of the card's ducks.
    pub async fn card_performance(&self, card: CardId) -> Result<f64> {
        if self.backend.get_card(card).await?.is_none() {
            return Err(Error::NotFound(format!("Card {card}")));
        }
        let members = self.backend.card_members(card).await?;
        Ok(Card::mean_performance(&members))
    }

    // ========================================================================
    // Events & races
    // ========================================================================

    pub async fn create_event(&self, name: &str) -> Result<Event> {
        self.backend.create_event(name).await
    }

    pub async fn create_race_event(&self, name: &str, buoys: Vec<f64>) -> Result<Event> {
        self.backend.create_race_event(name, buoys).await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.backend.events().await
    }

    pub async fn subscribe(&self, event: EventId, member: MemberId) -> Result<()> {
        self.backend.subscribe(event, member).await
    }

    pub async fn unsubscribe(&self, event: EventId, member: MemberId) -> Result<bool> {
        self.backend.unsubscribe(event, member).await
    }

    /// Send a free-form message to an event's subscribers.
    pub async fn announce(&self, event: EventId, message: &str) -> Result<DeliveryReport> {
        self.load_event(event).await?;
        let (snapshot, subscribers) = self.backend.snapshot_with_subscribers(event).await?;
        notify::notify(self.mailbox.as_ref(), &snapshot, &subscribers, message)
    }

    /// Select up to `lanes` eligible ducks, race them over the event's
    /// buoys and announce the result to the event's subscribers.
    pub async fn run_race(&self, event: EventId, lanes: usize) -> Result<RaceResult> {
        let event = self.load_event(event).await?;
        let buoys = event
            .buoys()
            .ok_or_else(|| Error::IllegalAction(format!("Event {} is not a race event", event.id)))?;
        let config = RaceConfig::new(buoys.to_vec(), lanes)?;

        let (snapshot, subscribers) = self.backend.snapshot_with_subscribers(event.id).await?;
        let participants = race::select(&snapshot.ducks(), self.race.capability, config.lanes());

        race::run_race(
            &event.name,
            &participants,
            config.distances(),
            &subscribers,
            &snapshot,
            self.mailbox.as_ref(),
        )
    }

    /// `run_race` with the configured default lane count.
    pub async fn run_default_race(&self, event: EventId) -> Result<RaceResult> {
        self.run_race(event, self.race.default_lanes).await
    }

    async fn load_event(&self, id: EventId) -> Result<Event> {
        self.backend
            .get_event(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Event {id}")))
    }
}

/// In-memory network for testing and embedding.
impl Network<MemoryRegistry> {
    pub fn open_memory() -> Self {
        Self::with_backend(MemoryRegistry::new())
    }

    /// Build a network from configuration.
    pub fn open(config: NetworkConfig) -> Self {
        let backend = match config.backend {
            BackendConfig::Memory => MemoryRegistry::new(),
        };
        Self::with_backend(backend).with_race_settings(config.race)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid member state: {0}")]
    InvalidMemberState(String),

    #[error("Unknown member: {0}")]
    UnknownMember(MemberId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
