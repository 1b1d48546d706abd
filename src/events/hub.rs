use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::error::BackendError;

use super::subscription::{EventSource, Subscription};
use super::types::{BackendEvent, EventChannel};

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    listeners: HashMap<EventChannel, Vec<(u64, Sender<BackendEvent>)>>,
}

/// In-process [`EventSource`]. Engines, the MPRIS service and tests `emit`
/// onto it from any thread.
#[derive(Debug, Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener of its channel. Listeners whose
    /// receiver is gone are dropped. Returns how many received it.
    pub fn emit(&self, event: BackendEvent) -> usize {
        let Ok(mut inner) = self.inner.lock() else {
            return 0;
        };
        let Some(listeners) = inner.listeners.get_mut(&event.channel()) else {
            return 0;
        };

        let mut delivered = 0;
        listeners.retain(|(_, tx)| {
            let alive = tx.send(event.clone()).is_ok();
            delivered += usize::from(alive);
            alive
        });
        delivered
    }

    pub fn listener_count(&self, channel: EventChannel) -> usize {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.listeners.get(&channel).map(Vec::len))
            .unwrap_or(0)
    }
}

impl EventSource for EventHub {
    fn subscribe(
        &self,
        channel: EventChannel,
        sink: Sender<BackendEvent>,
    ) -> Result<Subscription, BackendError> {
        let mut inner = self.inner.lock().map_err(|_| BackendError::Disconnected)?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.entry(channel).or_default().push((id, sink));

        let hub = Arc::downgrade(&self.inner);
        Ok(Subscription::new(channel, move || {
            let hub = hub.upgrade().ok_or(BackendError::Disconnected)?;
            let mut inner = hub.lock().map_err(|_| BackendError::Disconnected)?;
            if let Some(listeners) = inner.listeners.get_mut(&channel) {
                listeners.retain(|(listener, _)| *listener != id);
            }
            Ok(())
        }))
    }
}
