use std::fmt;
use std::sync::mpsc::Sender;

use log::warn;

use crate::error::BackendError;

use super::types::{BackendEvent, EventChannel};

type Dispose = Box<dyn FnOnce() -> Result<(), BackendError> + Send>;

/// Anything that can deliver [`BackendEvent`]s on named channels.
pub trait EventSource {
    /// Register `sink` for `channel`. Dropping the returned handle without
    /// calling [`Subscription::unsubscribe`] leaves the listener registered.
    fn subscribe(
        &self,
        channel: EventChannel,
        sink: Sender<BackendEvent>,
    ) -> Result<Subscription, BackendError>;
}

/// One registered listener and the means to remove it.
pub struct Subscription {
    channel: EventChannel,
    dispose: Option<Dispose>,
}

impl Subscription {
    pub fn new(
        channel: EventChannel,
        dispose: impl FnOnce() -> Result<(), BackendError> + Send + 'static,
    ) -> Self {
        Self {
            channel,
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn channel(&self) -> EventChannel {
        self.channel
    }

    pub fn unsubscribe(mut self) -> Result<(), BackendError> {
        match self.dispose.take() {
            Some(dispose) => dispose(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

/// Composite cleanup handle: disposing it (or dropping it) unsubscribes
/// every channel it holds.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn channels(&self) -> Vec<EventChannel> {
        self.subscriptions.iter().map(Subscription::channel).collect()
    }

    /// Unsubscribe everything. Individual failures are logged and counted,
    /// never returned. Calling it again is a no-op.
    pub fn dispose(&mut self) -> usize {
        let mut failed = 0;
        for subscription in self.subscriptions.drain(..) {
            let channel = subscription.channel();
            if let Err(e) = subscription.unsubscribe() {
                warn!("unsubscribing from {} failed: {e}", channel.name());
                failed += 1;
            }
        }
        failed
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.dispose();
    }
}
