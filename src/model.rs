use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::engine::EngineError;
use crate::limits::*;

/// Half-open calendar range `[start, end)`. The end date is the check-out day
/// and is not occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if start >= end {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whole nights between check-in and check-out. Always at least 1.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains_date(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Opaque reference to a guest, issued by whatever manages users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type SharedRoom = Arc<RwLock<Room>>;

/// A bookable room and its calendar.
#[derive(Debug, Clone)]
pub struct Room {
    id: Ulid,
    number: u32,
    room_type: String,
    price: Decimal,
    capacity: u32,
    /// Booked ranges, sorted by start. Pairwise disjoint.
    bookings: Vec<DateRange>,
}

impl Room {
    pub fn new(
        id: Ulid,
        number: u32,
        room_type: impl Into<String>,
        price: Decimal,
        capacity: u32,
    ) -> Result<Self, EngineError> {
        let room_type = room_type.into();
        if room_type.trim().is_empty() {
            return Err(EngineError::InvalidAttribute("room type must not be empty"));
        }
        if room_type.len() > MAX_ROOM_TYPE_LEN {
            return Err(EngineError::InvalidAttribute("room type too long"));
        }
        if price < Decimal::ZERO {
            return Err(EngineError::InvalidAttribute("nightly price must not be negative"));
        }
        if capacity == 0 {
            return Err(EngineError::InvalidAttribute("capacity must be positive"));
        }
        Ok(Self {
            id,
            number,
            room_type,
            price,
            capacity,
            bookings: Vec::new(),
        })
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn bookings(&self) -> &[DateRange] {
        &self.bookings
    }

    /// Booked ranges intersecting `query`.
    pub fn overlapping(&self, query: &DateRange) -> impl Iterator<Item = &DateRange> {
        // Everything at index >= right_bound starts on or after query.end.
        let right_bound = self.bookings.partition_point(|b| b.start < query.end);
        self.bookings[..right_bound]
            .iter()
            .filter(move |b| b.end > query.start)
    }

    pub fn is_available(&self, range: &DateRange) -> bool {
        self.overlapping(range).next().is_none()
    }

    pub fn add_booking(&mut self, range: DateRange) -> Result<(), EngineError> {
        if let Some(existing) = self.overlapping(&range).next() {
            return Err(EngineError::Overlap {
                requested: range,
                existing: *existing,
            });
        }
        let pos = self.bookings.partition_point(|b| b.start < range.start);
        self.bookings.insert(pos, range);
        Ok(())
    }

    /// Remove the booking that matches `range` exactly.
    pub fn remove_booking(&mut self, range: &DateRange) -> Result<(), EngineError> {
        match self.bookings.binary_search_by_key(&range.start, |b| b.start) {
            Ok(pos) if self.bookings[pos] == *range => {
                self.bookings.remove(pos);
                Ok(())
            }
            _ => Err(EngineError::BookingNotFound(*range)),
        }
    }

    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            id: self.id,
            number: self.number,
            room_type: self.room_type.clone(),
            price: self.price,
            capacity: self.capacity,
        }
    }
}

/// Events published to hotel subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ReservationCreated {
        id: Ulid,
        hotel_id: Ulid,
        room_id: Ulid,
        user_id: UserId,
        range: DateRange,
        total_price: Decimal,
    },
    ReservationCancelled {
        id: Ulid,
        hotel_id: Ulid,
        room_id: Ulid,
        range: DateRange,
    },
}

impl Event {
    pub fn hotel_id(&self) -> Ulid {
        match self {
            Event::ReservationCreated { hotel_id, .. }
            | Event::ReservationCancelled { hotel_id, .. } => *hotel_id,
        }
    }
}

// ── Query result types ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomInfo {
    pub id: Ulid,
    pub number: u32,
    pub room_type: String,
    pub price: Decimal,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelInfo {
    pub id: Ulid,
    pub name: String,
    pub address: String,
    pub star_rating: u8,
    pub room_count: usize,
}
