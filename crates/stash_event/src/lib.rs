//! # stash_event - Change Signals
//!
//! Zero-argument signals fired after a container commits a mutation:
//! - Multiple independent subscribers
//! - Synchronous delivery on the calling thread
//! - Subscription-order dispatch
//! - Handle-based unsubscribe

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Signal handler function type
pub type SignalHandler = Arc<dyn Fn() + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

/// A multi-subscriber "content changed" signal.
///
/// Subscribing and emitting both take `&self`, so a signal can be shared
/// behind an `Arc` between the container that fires it and the views that
/// listen to it. Handlers are invoked outside the internal lock, so a handler
/// may subscribe or unsubscribe without deadlocking; such changes take effect
/// on the next emit.
pub struct ChangeSignal {
    /// Handlers in subscription order
    handlers: RwLock<Vec<(SubscriberId, SignalHandler)>>,
    /// Next subscriber ID
    next_subscriber_id: AtomicU64,
}

impl ChangeSignal {
    /// Create a signal with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(1),
        }
    }

    /// Subscribe a handler, returning the handle needed to unsubscribe it
    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id.fetch_add(1, Ordering::Relaxed));
        let handler: SignalHandler = Arc::new(handler);
        self.handlers.write().push((id, handler));
        id
    }

    /// Unsubscribe. Returns false if the handle was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub_id, _)| *sub_id != id);
        handlers.len() != before
    }

    /// Invoke every current subscriber in subscription order.
    ///
    /// Emitting with zero subscribers does nothing.
    pub fn emit(&self) {
        let snapshot: Vec<SignalHandler> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in snapshot {
            handler();
        }
    }

    /// Remove all subscribers
    pub fn clear(&self) {
        self.handlers.write().clear();
    }

    /// Get subscriber count
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Check if anyone is listening
    pub fn has_subscribers(&self) -> bool {
        !self.handlers.read().is_empty()
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{ChangeSignal, SignalHandler, SubscriberId};
}
