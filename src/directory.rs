use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use ulid::Ulid;

use crate::engine::EngineError;
use crate::hotel::Hotel;
use crate::limits::*;
use crate::model::HotelInfo;

/// Registry of hotels by id.
#[derive(Default)]
pub struct HotelDirectory {
    hotels: DashMap<Ulid, Arc<Hotel>>,
}

impl HotelDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    pub fn add_hotel(&self, hotel: Hotel) -> Result<Arc<Hotel>, EngineError> {
        if self.hotels.len() >= MAX_HOTELS {
            return Err(EngineError::LimitExceeded("too many hotels"));
        }
        match self.hotels.entry(hotel.id()) {
            Entry::Occupied(_) => Err(EngineError::AlreadyExists(hotel.id())),
            Entry::Vacant(slot) => {
                tracing::info!("hotel {} registered: {:?}", hotel.id(), hotel.name());
                let shared = Arc::new(hotel);
                slot.insert(shared.clone());
                Ok(shared)
            }
        }
    }

    pub fn get_hotel(&self, id: &Ulid) -> Result<Arc<Hotel>, EngineError> {
        self.hotels
            .get(id)
            .map(|e| e.value().clone())
            .ok_or(EngineError::NotFound(*id))
    }

    /// Snapshot of every hotel, ordered by id.
    pub fn list_hotels(&self) -> Vec<HotelInfo> {
        let mut hotels: Vec<HotelInfo> = self.hotels.iter().map(|e| e.value().info()).collect();
        hotels.sort_by_key(|h| h.id);
        hotels
    }
}
