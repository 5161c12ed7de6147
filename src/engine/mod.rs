mod conflict;
mod error;
mod mutations;
mod queries;
mod store;

pub use error::EngineError;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::config::EngineConfig;
use crate::model::*;
use crate::notify::NotifyHub;
use crate::reservation::Reservation;

use store::ReservationIndex;

/// A registered reservation plus a handle to the room whose calendar it
/// occupies, so cancellation needs nothing but the reservation id.
struct Booked {
    reservation: Reservation,
    room: SharedRoom,
}

/// Registry of reservations and the only way to create or cancel one.
///
/// Every room's booked ranges equal exactly the ranges of that room's active
/// reservations held here. Mutations take the user's quota lock (only when a
/// quota is configured), then the room's write lock, then the registry shard,
/// never in another order.
pub struct ReservationManager {
    reservations: DashMap<Ulid, Booked>,
    index: ReservationIndex,
    config: EngineConfig,
    notify: Arc<NotifyHub>,
}

impl ReservationManager {
    pub fn new(config: EngineConfig, notify: Arc<NotifyHub>) -> Self {
        Self {
            reservations: DashMap::new(),
            index: ReservationIndex::default(),
            config,
            notify,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Receive every reservation event for `hotel_id` from now on.
    pub fn subscribe(&self, hotel_id: Ulid) -> broadcast::Receiver<Event> {
        self.notify.subscribe(hotel_id)
    }
}

impl Default for ReservationManager {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Arc::new(NotifyHub::new()))
    }
}
