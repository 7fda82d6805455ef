//! In-memory registry backend.
//!
//! This is the reference implementation of `RegistryBackend`.
//! It uses ordered maps protected by `parking_lot::RwLock`.
//!
//! ## Limitations
//!
//! - **No persistence**: everything is lost when the registry is dropped.
//! - **Per-collection locks**: any operation touching more than one
//!   collection takes its locks in a fixed order (members → friendships →
//!   subscriptions → cards) and holds them together. Writes that reference a
//!   member keep the `members` guard until the write is done, so
//!   `remove_member` can never leave a dangling edge, subscription or card
//!   entry behind.
//!
//! Use this backend for:
//! - Testing the graph and race pipelines
//! - Embedding the network in applications that don't need persistence

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::*;
use crate::race::validate_distances;
use crate::validate;
use crate::{Error, Result};
use super::RegistryBackend;

// ============================================================================
// MemoryRegistry
// ============================================================================

/// In-memory member registry.
#[derive(Clone)]
pub struct MemoryRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    members: RwLock<BTreeMap<MemberId, Member>>,
    /// Normalized pairs, insertion order, no duplicates.
    friendships: RwLock<Vec<Friendship>>,
    subscriptions: RwLock<HashMap<EventId, EventSubscription>>,
    cards: RwLock<BTreeMap<CardId, Card>>,
    events: RwLock<BTreeMap<EventId, Event>>,
    next_member_id: AtomicU64,
    next_card_id: AtomicU64,
    next_event_id: AtomicU64,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                members: RwLock::new(BTreeMap::new()),
                friendships: RwLock::new(Vec::new()),
                subscriptions: RwLock::new(HashMap::new()),
                cards: RwLock::new(BTreeMap::new()),
                events: RwLock::new(BTreeMap::new()),
                next_member_id: AtomicU64::new(1),
                next_card_id: AtomicU64::new(1),
                next_event_id: AtomicU64::new(1),
            }),
        }
    }

    fn ensure_member(&self, id: MemberId) -> Result<()> {
        ensure_member_in(&self.inner.members.read(), id)
    }

    fn store_event(&self, name: &str, kind: EventKind) -> Result<Event> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Event name required".into()));
        }
        let id = EventId(self.inner.next_event_id.fetch_add(1, Ordering::Relaxed));
        let event = Event::new(id, name, kind);
        self.inner.events.write().insert(id, event.clone());
        self.inner.subscriptions.write().insert(id, EventSubscription::new());
        tracing::debug!(event = %id, race = event.is_race(), "event created");
        Ok(event)
    }
}

fn ensure_member_in(members: &BTreeMap<MemberId, Member>, id: MemberId) -> Result<()> {
    if !members.contains_key(&id) {
        return Err(Error::NotFound(format!("Member {id}")));
    }
    Ok(())
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RegistryBackend impl
// ============================================================================

#[async_trait]
impl RegistryBackend for MemoryRegistry {
    // ========================================================================
    // Members
    // ========================================================================

    async fn add_member(&self, member: NewMember) -> Result<MemberId> {
        validate::new_member(&member)?;
        let is_duck = matches!(member.kind, MemberKind::Duck(_));

        let mut members = self.inner.members.write();
        let username = member.username.trim();
        let email = member.email.trim();
        if members.values().any(|m| m.username == username || m.email == email) {
            return Err(Error::Validation(format!(
                "Duplicate username or email: {username} / {email}"
            )));
        }

        let id = MemberId(self.inner.next_member_id.fetch_add(1, Ordering::Relaxed));
        let (username, email) = (username.to_string(), email.to_string());
        let mut stored = member.with_id(id);
        stored.username = username;
        stored.email = email;
        members.insert(id, stored);

        tracing::debug!(member = %id, duck = is_duck, "member added");
        Ok(id)
    }

    async fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        Ok(self.inner.members.read().get(&id).cloned())
    }

    async fn remove_member(&self, id: MemberId) -> Result<bool> {
        let mut members = self.inner.members.write();
        let mut friendships = self.inner.friendships.write();
        let mut subscriptions = self.inner.subscriptions.write();
        let mut cards = self.inner.cards.write();

        let removed = members.remove(&id);
        if removed.is_some() {
            friendships.retain(|f| !f.involves(id));
            for subs in subscriptions.values_mut() {
                subs.unsubscribe(id);
            }
            for card in cards.values_mut() {
                card.remove(id);
            }
            tracing::debug!(member = %id, "member removed");
        }
        Ok(removed.is_some())
    }

    async fn all_members(&self) -> Result<Vec<Member>> {
        Ok(self.inner.members.read().values().cloned().collect())
    }

    // ========================================================================
    // Friendships
    // ========================================================================

    async fn add_friendship(&self, a: MemberId, b: MemberId) -> Result<()> {
        if a == b {
            return Err(Error::IllegalAction("A member cannot befriend themselves".into()));
        }
        let members = self.inner.members.read();
        ensure_member_in(&members, a)?;
        ensure_member_in(&members, b)?;

        let edge = Friendship::new(a, b);
        let mut friendships = self.inner.friendships.write();
        if !friendships.contains(&edge) {
            friendships.push(edge);
        }
        Ok(())
    }

    async fn remove_friendship(&self, a: MemberId, b: MemberId) -> Result<bool> {
        self.ensure_member(a)?;
        self.ensure_member(b)?;

        let edge = Friendship::new(a, b);
        let mut friendships = self.inner.friendships.write();
        let before = friendships.len();
        friendships.retain(|f| *f != edge);
        Ok(friendships.len() != before)
    }

    async fn friendships(&self) -> Result<Vec<Friendship>> {
        Ok(self.inner.friendships.read().clone())
    }

    // ========================================================================
    // Cards
    // ========================================================================

    async fn create_card(&self, name: &str) -> Result<Card> {
        validate::card_name(name)?;
        let id = CardId(self.inner.next_card_id.fetch_add(1, Ordering::Relaxed));
        let card = Card::new(id, name.trim());
        self.inner.cards.write().insert(id, card.clone());
        Ok(card)
    }

    async fn remove_card(&self, id: CardId) -> Result<bool> {
        Ok(self.inner.cards.write().remove(&id).is_some())
    }

    async fn get_card(&self, id: CardId) -> Result<Option<Card>> {
        Ok(self.inner.cards.read().get(&id).cloned())
    }

    async fn cards(&self) -> Result<Vec<Card>> {
        Ok(self.inner.cards.read().values().cloned().collect())
    }

    async fn add_to_card(&self, duck: MemberId, card: CardId) -> Result<()> {
        let members = self.inner.members.read();
        let member = members
            .get(&duck)
            .ok_or_else(|| Error::NotFound(format!("Member {duck}")))?;
        if !member.is_duck() {
            return Err(Error::IllegalAction("Only ducks can join cards".into()));
        }

        let mut cards = self.inner.cards.write();
        let entry = cards
            .get_mut(&card)
            .ok_or_else(|| Error::NotFound(format!("Card {card}")))?;
        entry.add(duck);
        Ok(())
    }

    async fn remove_from_card(&self, duck: MemberId, card: CardId) -> Result<bool> {
        self.ensure_member(duck)?;
        Ok(self
            .inner
            .cards
            .write()
            .get_mut(&card)
            .is_some_and(|c| c.remove(duck)))
    }

    async fn card_members(&self, card: CardId) -> Result<Vec<Member>> {
        let member_ids = match self.inner.cards.read().get(&card) {
            Some(c) => c.members.clone(),
            None => return Ok(Vec::new()),
        };
        let members = self.inner.members.read();
        Ok(member_ids.iter().filter_map(|id| members.get(id).cloned()).collect())
    }

    // ========================================================================
    // Events
    // ========================================================================

    async fn create_event(&self, name: &str) -> Result<Event> {
        self.store_event(name, EventKind::Plain)
    }

    async fn create_race_event(&self, name: &str, buoys: Vec<f64>) -> Result<Event> {
        validate_distances(&buoys)?;
        self.store_event(name, EventKind::Race { buoys })
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>> {
        Ok(self.inner.events.read().get(&id).cloned())
    }

    async fn events(&self) -> Result<Vec<Event>> {
        Ok(self.inner.events.read().values().cloned().collect())
    }

    async fn subscribe(&self, event: EventId, member: MemberId) -> Result<()> {
        if !self.inner.events.read().contains_key(&event) {
            return Err(Error::NotFound(format!("Event {event}")));
        }
        let members = self.inner.members.read();
        ensure_member_in(&members, member)?;
        self.inner
            .subscriptions
            .write()
            .entry(event)
            .or_default()
            .subscribe(member);
        Ok(())
    }

    async fn unsubscribe(&self, event: EventId, member: MemberId) -> Result<bool> {
        Ok(self
            .inner
            .subscriptions
            .write()
            .get_mut(&event)
            .is_some_and(|s| s.unsubscribe(member)))
    }

    async fn subscribers(&self, event: EventId) -> Result<EventSubscription> {
        Ok(self
            .inner
            .subscriptions
            .read()
            .get(&event)
            .cloned()
            .unwrap_or_default())
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    async fn snapshot(&self) -> Result<Snapshot> {
        let members = self.inner.members.read();
        let friendships = self.inner.friendships.read();
        Ok(Snapshot::new(members.values().cloned().collect(), friendships.clone()))
    }

    async fn snapshot_with_subscribers(&self, event: EventId) -> Result<(Snapshot, EventSubscription)> {
        let members = self.inner.members.read();
        let friendships = self.inner.friendships.read();
        let subscriptions = self.inner.subscriptions.read();
        let subscribers = subscriptions.get(&event).cloned().unwrap_or_default();
        let snapshot = Snapshot::new(members.values().cloned().collect(), friendships.clone());
        Ok((snapshot, subscribers))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn duck(name: &str) -> NewMember {
        NewMember::duck(name, format!("{name}@pond.io"), CapabilitySet::SWIM, 3.0, 4.0)
    }

    fn person(name: &str) -> NewMember {
        NewMember::person(
            name,
            format!("{name}@town.io"),
            PersonProfile {
                first_name: "Ada".into(),
                last_name: "Byron".into(),
                birth_date: None,
                occupation: "engineer".into(),
                empathy: 8,
            },
        )
    }

    #[tokio::test]
    async fn test_add_and_get_member() {
        let db = MemoryRegistry::new();
        let id = db.add_member(duck("donald")).await.unwrap();
        let member = db.get_member(id).await.unwrap().unwrap();

        assert_eq!(member.id, id);
        assert_eq!(member.username, "donald");
        assert!(member.is_duck());
        assert!(db.get_member(MemberId(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_and_duplicate_members_rejected() {
        let db = MemoryRegistry::new();
        assert!(matches!(db.add_member(duck("ab")).await, Err(Error::Validation(_))));

        db.add_member(duck("daisy")).await.unwrap();
        let dup = db.add_member(duck("daisy")).await;
        assert!(matches!(dup, Err(Error::Validation(_))));
        assert_eq!(db.all_members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ducks_filters_persons() {
        let db = MemoryRegistry::new();
        db.add_member(person("alice")).await.unwrap();
        db.add_member(duck("scrooge")).await.unwrap();

        let ducks = db.ducks().await.unwrap();
        assert_eq!(ducks.len(), 1);
        assert_eq!(ducks[0].username, "scrooge");
    }

    #[tokio::test]
    async fn test_friendship_rules() {
        let db = MemoryRegistry::new();
        let a = db.add_member(person("alice")).await.unwrap();
        let b = db.add_member(person("bobby")).await.unwrap();

        assert!(matches!(db.add_friendship(a, a).await, Err(Error::IllegalAction(_))));
        assert!(matches!(db.add_friendship(a, MemberId(77)).await, Err(Error::NotFound(_))));

        db.add_friendship(a, b).await.unwrap();
        db.add_friendship(b, a).await.unwrap();
        assert_eq!(db.friendships().await.unwrap(), vec![Friendship::new(a, b)]);

        assert!(db.remove_friendship(b, a).await.unwrap());
        assert!(!db.remove_friendship(a, b).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_member_detaches_everything() {
        let db = MemoryRegistry::new();
        let a = db.add_member(duck("huey")).await.unwrap();
        let b = db.add_member(duck("dewey")).await.unwrap();
        db.add_friendship(a, b).await.unwrap();

        let card = db.create_card("Nephews").await.unwrap();
        db.add_to_card(a, card.id).await.unwrap();
        let event = db.create_event("Picnic").await.unwrap();
        db.subscribe(event.id, a).await.unwrap();

        assert!(db.remove_member(a).await.unwrap());
        assert!(!db.remove_member(a).await.unwrap());
        assert!(db.friendships().await.unwrap().is_empty());
        assert!(db.card_members(card.id).await.unwrap().is_empty());
        assert!(db.subscribers(event.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cards_accept_only_ducks() {
        let db = MemoryRegistry::new();
        let d = db.add_member(duck("louie")).await.unwrap();
        let p = db.add_member(person("carol")).await.unwrap();
        let card = db.create_card("  Racers  ").await.unwrap();
        assert_eq!(card.name, "Racers");

        db.add_to_card(d, card.id).await.unwrap();
        db.add_to_card(d, card.id).await.unwrap();
        assert!(matches!(db.add_to_card(p, card.id).await, Err(Error::IllegalAction(_))));
        assert!(matches!(db.add_to_card(d, CardId(99)).await, Err(Error::NotFound(_))));

        let members = db.card_members(card.id).await.unwrap();
        assert_eq!(members.iter().map(|m| m.id).collect::<Vec<_>>(), vec![d]);
        assert!(db.card_members(CardId(99)).await.unwrap().is_empty());

        assert!(db.remove_from_card(d, card.id).await.unwrap());
        assert!(db.remove_card(card.id).await.unwrap());
        assert!(db.cards().await.unwrap().is_empty());
        assert!(matches!(db.create_card(" ").await, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_events_and_subscriptions() {
        let db = MemoryRegistry::new();
        let m = db.add_member(person("alice")).await.unwrap();
        let race = db.create_race_event("Lake Cup", vec![10.0, 20.0]).await.unwrap();
        assert_eq!(race.buoys(), Some(&[10.0, 20.0][..]));

        assert!(matches!(
            db.create_race_event("Bad", vec![0.0]).await,
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(db.subscribe(EventId(42), m).await, Err(Error::NotFound(_))));
        assert!(matches!(db.subscribe(race.id, MemberId(42)).await, Err(Error::NotFound(_))));

        db.subscribe(race.id, m).await.unwrap();
        db.subscribe(race.id, m).await.unwrap();
        assert_eq!(db.subscribers(race.id).await.unwrap().len(), 1);

        assert!(db.unsubscribe(race.id, m).await.unwrap());
        assert!(!db.unsubscribe(race.id, m).await.unwrap());
        assert_eq!(db.events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_from_card_unknown_duck() {
        let db = MemoryRegistry::new();
        let d = db.add_member(duck("gladstone")).await.unwrap();
        let card = db.create_card("Lucky").await.unwrap();
        db.add_to_card(d, card.id).await.unwrap();

        assert!(matches!(
            db.remove_from_card(MemberId(404), card.id).await,
            Err(Error::NotFound(_))
        ));
        assert!(!db.remove_from_card(d, CardId(404)).await.unwrap());
        assert_eq!(db.get_card(card.id).await.unwrap().unwrap().members, vec![d]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_remove_leaves_no_dangling_references() {
        let db = MemoryRegistry::new();
        let anchor = db.add_member(duck("anchor")).await.unwrap();
        let event = db.create_event("Regatta").await.unwrap().id;
        let card = db.create_card("Fleet").await.unwrap().id;

        for round in 0..500 {
            let id = db.add_member(duck(&format!("ghost{round}"))).await.unwrap();
            let (sub, friend, join, gone) = {
                let (a, b, c, d) = (db.clone(), db.clone(), db.clone(), db.clone());
                (
                    tokio::spawn(async move { a.subscribe(event, id).await }),
                    tokio::spawn(async move { b.add_friendship(anchor, id).await }),
                    tokio::spawn(async move { c.add_to_card(id, card).await }),
                    tokio::spawn(async move { d.remove_member(id).await }),
                )
            };
            // each write either lands before the removal or fails with NotFound
            for outcome in [sub.await.unwrap(), friend.await.unwrap(), join.await.unwrap()] {
                assert!(matches!(outcome, Ok(()) | Err(Error::NotFound(_))), "{outcome:?}");
            }
            assert!(gone.await.unwrap().unwrap());
        }

        let (snapshot, subscribers) = db.snapshot_with_subscribers(event).await.unwrap();
        assert_eq!(snapshot.member_ids().collect::<Vec<_>>(), vec![anchor]);
        assert!(subscribers.is_empty());
        assert!(db.friendships().await.unwrap().is_empty());
        assert!(db.get_card(card).await.unwrap().unwrap().members.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_with_subscribers() {
        let db = MemoryRegistry::new();
        let a = db.add_member(person("alice")).await.unwrap();
        let b = db.add_member(duck("daffy")).await.unwrap();
        let event = db.create_event("Picnic").await.unwrap();
        db.subscribe(event.id, b).await.unwrap();
        db.subscribe(event.id, a).await.unwrap();

        let (snap, subs) = db.snapshot_with_subscribers(event.id).await.unwrap();
        assert_eq!(snap.member_ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(subs.iter().collect::<Vec<_>>(), vec![b, a]);

        let (_, none) = db.snapshot_with_subscribers(EventId(99)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot() {
        let db = MemoryRegistry::new();
        let a = db.add_member(person("alice")).await.unwrap();
        let b = db.add_member(duck("daffy")).await.unwrap();
        db.add_friendship(b, a).await.unwrap();

        let snap = db.snapshot().await.unwrap();
        assert_eq!(snap.member_ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(snap.friendships(), &[Friendship::new(a, b)]);
    }
}
