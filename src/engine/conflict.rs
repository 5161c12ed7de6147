use crate::config::EngineConfig;
use crate::model::*;

use super::EngineError;

/// Reject stays longer than the configured maximum, if one is set.
pub(crate) fn validate_stay(range: &DateRange, config: &EngineConfig) -> Result<(), EngineError> {
    if let Some(max) = config.max_stay_nights
        && range.nights() > max
    {
        return Err(EngineError::LimitExceeded("stay too long"));
    }
    Ok(())
}

/// Fail with `RoomUnavailable` if any booking on `room` intersects `range`.
pub(crate) fn check_no_conflict(room: &Room, range: &DateRange) -> Result<(), EngineError> {
    match room.overlapping(range).next() {
        Some(existing) => Err(EngineError::RoomUnavailable {
            room_id: room.id(),
            requested: *range,
            conflicting: *existing,
        }),
        None => Ok(()),
    }
}
