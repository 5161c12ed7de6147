use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::Event;

/// Events a slow subscriber may fall behind by before it sees `Lagged`.
const CHANNEL_CAPACITY: usize = 256;

/// Fan-out of reservation events to whoever watches a hotel, e.g. a front
/// desk screen or a cache of room availability.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Watch one hotel. Its channel is opened on first subscription.
    pub fn subscribe(&self, hotel_id: Ulid) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(hotel_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Publish to the hotel's watchers. Dropped when nobody watches it.
    pub fn send(&self, hotel_id: Ulid, event: &Event) {
        if let Some(sender) = self.channels.get(&hotel_id) {
            let _ = sender.send(event.clone());
        }
    }
}
