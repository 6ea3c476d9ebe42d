//! Change notification for committed state transitions.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::Span;

/// Error a subscriber may report; it is logged and otherwise ignored.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

type Subscriber = Box<dyn FnMut() -> Result<(), SubscriberError> + Send>;

/// Token returned by [`NotificationBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one [`NotificationBus::notify`] round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Registry of zero-argument change callbacks.
///
/// A failing subscriber (error or panic) is logged and does not keep the
/// others from running. No ordering among subscribers is promised.
pub struct NotificationBus {
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    next_id: u64,
    span: Span,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            subscribers: BTreeMap::new(),
            next_id: 0,
            span: tracing::info_span!("notify"),
        }
    }

    /// Registers a callback; each call yields a distinct token.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut() -> Result<(), SubscriberError> + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Box::new(callback));
        tracing::info!(parent: &self.span, subscription = id.0, "subscribed");
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscribers.remove(&id).is_some();
        tracing::info!(parent: &self.span, subscription = id.0, removed, "unsubscribed");
        removed
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Invokes every subscriber once.
    pub fn notify(&mut self) -> NotifyReport {
        let _guard = self.span.enter();
        let mut report = NotifyReport::default();
        for (id, subscriber) in &mut self.subscribers {
            match panic::catch_unwind(AssertUnwindSafe(|| subscriber())) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(error)) => {
                    report.failed += 1;
                    tracing::error!(subscription = id.0, %error, "subscriber failed");
                }
                Err(payload) => {
                    report.failed += 1;
                    tracing::error!(
                        subscription = id.0,
                        panic = panic_message(payload.as_ref()),
                        "subscriber panicked"
                    );
                }
            }
        }
        tracing::debug!(
            delivered = report.delivered,
            failed = report.failed,
            "notified"
        );
        report
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscribers.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
