//! Curve change broadcast.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use road_curves::CurveChange;
use tracing::debug;

/// Identifies one subscription on a [`ChangeFeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Receiving end of a feed subscription.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<CurveChange>,
}

impl Subscription {
    /// Identity to pass to [`ChangeFeed::unsubscribe`].
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take every pending change without blocking.
    ///
    /// Stops early if the feed has been dropped.
    pub fn drain(&self) -> impl Iterator<Item = CurveChange> + '_ {
        std::iter::from_fn(|| match self.receiver.try_recv() {
            Ok(change) => Some(change),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        })
    }
}

/// Fan-out hub for [`CurveChange`] notifications.
///
/// The curve owner publishes; every current subscriber gets a copy. There is
/// no global instance: whoever edits curves owns the feed and hands it to the
/// extruders that should listen.
///
/// # Example
///
/// ```
/// use road_curves::{ChangeKind, CurveChange, CurveId};
/// use road_mesh::ChangeFeed;
///
/// let mut feed = ChangeFeed::new();
/// let sub = feed.subscribe();
///
/// feed.publish(CurveChange::new(CurveId(0), 2, ChangeKind::PointModified));
/// assert_eq!(sub.drain().count(), 1);
///
/// assert!(feed.unsubscribe(sub.id()));
/// assert_eq!(feed.publish(CurveChange::new(CurveId(0), 0, ChangeKind::Replaced)), 0);
/// ```
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<(SubscriptionId, Sender<CurveChange>)>,
    next_id: u64,
}

impl ChangeFeed {
    /// Create a feed with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = mpsc::channel();
        self.subscribers.push((id, sender));
        debug!(subscription = id.0, total = self.subscribers.len(), "subscribed");

        Subscription { id, receiver }
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(held, _)| *held != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(subscription = id.0, total = self.subscribers.len(), "unsubscribed");
        }
        removed
    }

    /// Send `change` to every subscriber, returning how many received it.
    ///
    /// Subscribers whose [`Subscription`] was dropped are pruned.
    pub fn publish(&mut self, change: CurveChange) -> usize {
        self.subscribers
            .retain(|(_, sender)| sender.send(change).is_ok());
        self.subscribers.len()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
