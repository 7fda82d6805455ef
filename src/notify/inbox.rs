//! In-memory mailbox.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::model::{Member, MemberId};
use crate::Result;
use super::Mailbox;

/// A message that reached a member.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub delivered_at: DateTime<Utc>,
}

/// Stores every delivered message per recipient.
#[derive(Debug, Default)]
pub struct InboxMailbox {
    inbox: RwLock<HashMap<MemberId, Vec<Notification>>>,
}

impl InboxMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received by `member`, oldest first.
    pub fn inbox(&self, member: MemberId) -> Vec<Notification> {
        self.inbox.read().get(&member).cloned().unwrap_or_default()
    }

    /// Message texts received by `member`, oldest first.
    pub fn messages(&self, member: MemberId) -> Vec<String> {
        self.inbox
            .read()
            .get(&member)
            .map(|n| n.iter().map(|n| n.message.clone()).collect())
            .unwrap_or_default()
    }

    /// Total number of delivered messages.
    pub fn total(&self) -> usize {
        self.inbox.read().values().map(Vec::len).sum()
    }
}

impl Mailbox for InboxMailbox {
    fn deliver(&self, recipient: &Member, message: &str) -> Result<()> {
        self.inbox.write().entry(recipient.id).or_default().push(Notification {
            message: message.to_string(),
            delivered_at: Utc::now(),
        });
        Ok(())
    }
}
