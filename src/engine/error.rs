use chrono::NaiveDate;
use thiserror::Error;
use ulid::Ulid;

use crate::model::DateRange;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid range [{start}, {end}): start must be before end")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("range {requested} overlaps existing booking {existing}")]
    Overlap { requested: DateRange, existing: DateRange },
    #[error("room {room_id} is unavailable for {requested}: booked {conflicting}")]
    RoomUnavailable {
        room_id: Ulid,
        requested: DateRange,
        conflicting: DateRange,
    },
    #[error("already exists: {0}")]
    AlreadyExists(Ulid),
    #[error("not found: {0}")]
    NotFound(Ulid),
    #[error("no booking for exactly {0}")]
    BookingNotFound(DateRange),
    #[error("reservation {0} is already cancelled")]
    AlreadyCancelled(Ulid),
    #[error("invalid attribute: {0}")]
    InvalidAttribute(&'static str),
    #[error("limit exceeded: {0}")]
    LimitExceeded(&'static str),
    /// A room's calendar no longer matches its active reservations. Not
    /// recoverable by retrying.
    #[error("calendar of room {room_id} lost booking {range} held by reservation {reservation_id}")]
    CalendarInconsistent {
        reservation_id: Ulid,
        room_id: Ulid,
        range: DateRange,
    },
}
