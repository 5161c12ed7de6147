use rust_decimal::Decimal;
use serde::Serialize;
use ulid::Ulid;

use crate::engine::EngineError;
use crate::model::{DateRange, Room, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

/// A stay of one user in one room. Price and identity are fixed at
/// construction; only the status moves, and only from `Active` to `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    id: Ulid,
    hotel_id: Ulid,
    room_id: Ulid,
    user_id: UserId,
    range: DateRange,
    total_price: Decimal,
    status: ReservationStatus,
}

impl Reservation {
    /// Price the stay against `room`. Does not touch the room's calendar.
    pub(crate) fn new(
        id: Ulid,
        hotel_id: Ulid,
        room: &Room,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Self, EngineError> {
        let total_price = Decimal::from(range.nights())
            .checked_mul(room.price())
            .ok_or(EngineError::LimitExceeded("total price overflow"))?;
        Ok(Self {
            id,
            hotel_id,
            room_id: room.id(),
            user_id,
            range,
            total_price,
            status: ReservationStatus::Active,
        })
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn hotel_id(&self) -> Ulid {
        self.hotel_id
    }

    pub fn room_id(&self) -> Ulid {
        self.room_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn nights(&self) -> i64 {
        self.range.nights()
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Flip to `Cancelled`. The caller is responsible for unbooking the room.
    pub(crate) fn cancel(&mut self) -> Result<(), EngineError> {
        if self.status == ReservationStatus::Cancelled {
            return Err(EngineError::AlreadyCancelled(self.id));
        }
        self.status = ReservationStatus::Cancelled;
        Ok(())
    }
}
