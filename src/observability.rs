use tracing_subscriber::EnvFilter;

use crate::engine::EngineError;

/// Counter: reservations successfully created.
pub const RESERVATIONS_CREATED_TOTAL: &str = "innkeep_reservations_created_total";

/// Counter: reservations cancelled.
pub const RESERVATIONS_CANCELLED_TOTAL: &str = "innkeep_reservations_cancelled_total";

/// Counter: create requests refused. Labels: reason.
pub const RESERVATIONS_REJECTED_TOTAL: &str = "innkeep_reservations_rejected_total";

/// Gauge: reservations currently active.
pub const RESERVATIONS_ACTIVE: &str = "innkeep_reservations_active";

/// Counter: room availability searches.
pub const AVAILABILITY_QUERIES_TOTAL: &str = "innkeep_availability_queries_total";

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Map an error to a short label for metrics.
pub fn error_label(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidRange { .. } => "invalid_range",
        EngineError::Overlap { .. } => "overlap",
        EngineError::RoomUnavailable { .. } => "room_unavailable",
        EngineError::AlreadyExists(_) => "already_exists",
        EngineError::NotFound(_) => "not_found",
        EngineError::BookingNotFound(_) => "booking_not_found",
        EngineError::AlreadyCancelled(_) => "already_cancelled",
        EngineError::InvalidAttribute(_) => "invalid_attribute",
        EngineError::LimitExceeded(_) => "limit_exceeded",
        EngineError::CalendarInconsistent { .. } => "calendar_inconsistent",
    }
}
