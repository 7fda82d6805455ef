//! Events and their subscriber lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::MemberId;

/// Opaque event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plain announcement event or a buoy race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Plain,
    Race { buoys: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(id: EventId, name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// Buoy distances if this is a race event.
    pub fn buoys(&self) -> Option<&[f64]> {
        match &self.kind {
            EventKind::Race { buoys } => Some(buoys),
            EventKind::Plain => None,
        }
    }

    pub fn is_race(&self) -> bool {
        matches!(self.kind, EventKind::Race { .. })
    }
}

/// Subscriber ids attached to an event.
///
/// Unique, iterated in subscription order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubscription {
    subscribers: Vec<MemberId>,
}

impl EventSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the member was already subscribed.
    pub fn subscribe(&mut self, id: MemberId) -> bool {
        if self.subscribers.contains(&id) {
            return false;
        }
        self.subscribers.push(id);
        true
    }

    pub fn unsubscribe(&mut self, id: MemberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| *s != id);
        self.subscribers.len() != before
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.subscribers.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.subscribers.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl FromIterator<MemberId> for EventSubscription {
    fn from_iter<I: IntoIterator<Item = MemberId>>(iter: I) -> Self {
        let mut subs = EventSubscription::new();
        for id in iter {
            subs.subscribe(id);
        }
        subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_is_unique_and_ordered() {
        let subs: EventSubscription = [3, 1, 3, 2].into_iter().map(MemberId).collect();
        assert_eq!(subs.iter().collect::<Vec<_>>(), vec![MemberId(3), MemberId(1), MemberId(2)]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut subs = EventSubscription::new();
        subs.subscribe(MemberId(1));
        assert!(subs.unsubscribe(MemberId(1)));
        assert!(!subs.unsubscribe(MemberId(1)));
        assert!(subs.is_empty());
    }

    #[test]
    fn test_race_buoys() {
        let race = Event::new(EventId(1), "Lake Cup", EventKind::Race { buoys: vec![10.0, 20.0] });
        assert!(race.is_race());
        assert_eq!(race.buoys(), Some(&[10.0, 20.0][..]));
        let plain = Event::new(EventId(2), "Picnic", EventKind::Plain);
        assert_eq!(plain.buoys(), None);
    }
}
