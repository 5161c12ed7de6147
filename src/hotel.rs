use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use ulid::Ulid;

use crate::engine::EngineError;
use crate::limits::*;
use crate::model::*;

type RoomPredicate = Arc<dyn Fn(&Room) -> bool + Send + Sync>;

/// Composable room filter for availability search. An empty filter accepts
/// every room; each added constraint narrows the result.
#[derive(Clone, Default)]
pub struct RoomFilter {
    min_capacity: Option<u32>,
    room_type: Option<String>,
    predicates: Vec<RoomPredicate>,
}

impl RoomFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Room must sleep at least `guests`.
    pub fn min_capacity(mut self, guests: u32) -> Self {
        self.min_capacity = Some(guests);
        self
    }

    /// Room type must equal `room_type` (case-insensitive).
    pub fn room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// Arbitrary extra constraint.
    pub fn matching(mut self, predicate: impl Fn(&Room) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Arc::new(predicate));
        self
    }

    pub fn accepts(&self, room: &Room) -> bool {
        if let Some(min) = self.min_capacity
            && room.capacity() < min
        {
            return false;
        }
        if let Some(ref wanted) = self.room_type
            && !room.room_type().eq_ignore_ascii_case(wanted)
        {
            return false;
        }
        self.predicates.iter().all(|p| p(room))
    }
}

impl fmt::Debug for RoomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomFilter")
            .field("min_capacity", &self.min_capacity)
            .field("room_type", &self.room_type)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// A hotel and the rooms it owns. Rooms are moved in by value, so a room can
/// only ever belong to one hotel.
pub struct Hotel {
    id: Ulid,
    name: String,
    address: String,
    star_rating: u8,
    rooms: DashMap<Ulid, SharedRoom>,
}

impl Hotel {
    pub fn new(
        id: Ulid,
        name: impl Into<String>,
        address: impl Into<String>,
        star_rating: u8,
    ) -> Result<Self, EngineError> {
        let name = name.into();
        let address = address.into();
        if !(MIN_STAR_RATING..=MAX_STAR_RATING).contains(&star_rating) {
            return Err(EngineError::InvalidAttribute("star rating must be between 1 and 5"));
        }
        if name.trim().is_empty() {
            return Err(EngineError::InvalidAttribute("hotel name must not be empty"));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(EngineError::InvalidAttribute("hotel name too long"));
        }
        if address.len() > MAX_ADDRESS_LEN {
            return Err(EngineError::InvalidAttribute("hotel address too long"));
        }
        Ok(Self {
            id,
            name,
            address,
            star_rating,
            rooms: DashMap::new(),
        })
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn star_rating(&self) -> u8 {
        self.star_rating
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn add_room(&self, room: Room) -> Result<SharedRoom, EngineError> {
        if self.rooms.len() >= MAX_ROOMS_PER_HOTEL {
            return Err(EngineError::LimitExceeded("too many rooms in hotel"));
        }
        match self.rooms.entry(room.id()) {
            Entry::Occupied(_) => Err(EngineError::AlreadyExists(room.id())),
            Entry::Vacant(slot) => {
                tracing::debug!("hotel {}: added room {} (#{})", self.id, room.id(), room.number());
                let shared = Arc::new(RwLock::new(room));
                slot.insert(shared.clone());
                Ok(shared)
            }
        }
    }

    pub fn get_room(&self, room_id: &Ulid) -> Result<SharedRoom, EngineError> {
        self.rooms
            .get(room_id)
            .map(|e| e.value().clone())
            .ok_or(EngineError::NotFound(*room_id))
    }

    /// Handles cloned out of the map so no shard lock is held while a room
    /// lock is taken.
    fn room_handles(&self) -> Vec<SharedRoom> {
        self.rooms.iter().map(|e| e.value().clone()).collect()
    }

    /// Every room, ordered by room number then id.
    pub fn list_rooms(&self) -> Vec<RoomInfo> {
        let mut rooms: Vec<RoomInfo> = self
            .room_handles()
            .iter()
            .map(|rs| rs.read().info())
            .collect();
        rooms.sort_by_key(|r| (r.number, r.id));
        rooms
    }

    /// Rooms free for the whole of `range` and accepted by `filter`, ordered
    /// by room number then id.
    pub fn find_available_rooms(&self, range: &DateRange, filter: &RoomFilter) -> Vec<RoomInfo> {
        metrics::counter!(crate::observability::AVAILABILITY_QUERIES_TOTAL).increment(1);
        let mut free: Vec<RoomInfo> = self
            .room_handles()
            .iter()
            .filter_map(|rs| {
                let guard = rs.read();
                (guard.is_available(range) && filter.accepts(&guard)).then(|| guard.info())
            })
            .collect();
        free.sort_by_key(|r| (r.number, r.id));
        tracing::debug!("hotel {}: {} rooms free for {range}", self.id, free.len());
        free
    }

    pub fn info(&self) -> HotelInfo {
        HotelInfo {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
            star_rating: self.star_rating,
            room_count: self.rooms.len(),
        }
    }
}

impl fmt::Debug for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotel")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("star_rating", &self.star_rating)
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
