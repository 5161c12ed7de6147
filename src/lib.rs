//! Hotel rooms, their calendars, and the reservations that occupy them.
//!
//! [`ReservationManager`] is the only way to create or cancel a reservation;
//! it keeps every [`Room`]'s booked ranges equal to the ranges of that room's
//! active reservations.

pub mod config;
pub mod directory;
pub mod engine;
pub mod hotel;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod reservation;

pub use config::EngineConfig;
pub use directory::HotelDirectory;
pub use engine::{EngineError, ReservationManager};
pub use hotel::{Hotel, RoomFilter};
pub use model::{DateRange, Event, HotelInfo, Room, RoomInfo, SharedRoom, UserId};
pub use notify::NotifyHub;
pub use reservation::{Reservation, ReservationStatus};
