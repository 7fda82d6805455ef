//! # Event Notification
//!
//! Fan-out of a text message to an event's subscribers.
//!
//! Delivery goes through a [`Mailbox`] transport. The fan-out is
//! fire-and-forget: a failed delivery is logged and recorded in the
//! [`DeliveryReport`], and the remaining subscribers are still served.
//!
//! | Mailbox | Description |
//! |---------|-------------|
//! | `TracingMailbox` | Emits one `tracing` event per delivery |
//! | `InboxMailbox` | Keeps messages per member in memory |

pub mod inbox;

use crate::model::{EventSubscription, Member, MemberId, Snapshot};
use crate::{Error, Result};

pub use inbox::{InboxMailbox, Notification};

// ============================================================================
// Mailbox trait
// ============================================================================

/// Transport that hands a message to one member.
pub trait Mailbox: Send + Sync {
    fn deliver(&self, recipient: &Member, message: &str) -> Result<()>;
}

/// Default transport: writes each delivery to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMailbox;

impl Mailbox for TracingMailbox {
    fn deliver(&self, recipient: &Member, message: &str) -> Result<()> {
        tracing::info!(member = %recipient.id, "Notify {} : {}", recipient.username, message);
        Ok(())
    }
}

// ============================================================================
// Fan-out
// ============================================================================

/// Who received the message and who did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<MemberId>,
    pub failed: Vec<MemberId>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Deliver `message` to every subscriber, in subscription order.
///
/// Every subscriber must exist in `snapshot`; otherwise the call fails with
/// `UnknownMember` before anything is delivered.
pub fn notify(
    mailbox: &dyn Mailbox,
    snapshot: &Snapshot,
    subscribers: &EventSubscription,
    message: &str,
) -> Result<DeliveryReport> {
    let recipients = subscribers
        .iter()
        .map(|id| snapshot.member(id).ok_or(Error::UnknownMember(id)))
        .collect::<Result<Vec<&Member>>>()?;

    let mut report = DeliveryReport::default();
    for recipient in recipients {
        match mailbox.deliver(recipient, message) {
            Ok(()) => report.delivered.push(recipient.id),
            Err(e) => {
                tracing::warn!(member = %recipient.id, error = %e, "notification delivery failed");
                report.failed.push(recipient.id);
            }
        }
    }

    Ok(report)
}
