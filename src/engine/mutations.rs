use chrono::NaiveDate;
use tracing::{error, info, warn};
use ulid::Ulid;

use crate::hotel::Hotel;
use crate::model::*;
use crate::observability::{self, error_label};
use crate::reservation::Reservation;

use super::conflict::{check_no_conflict, validate_stay};
use super::{Booked, EngineError, ReservationManager};

impl ReservationManager {
    /// Book `room_id` in `hotel` for `[start, end)` on behalf of `user_id`.
    ///
    /// The availability check and the booking happen under one write lock on
    /// the room. On any error the room's calendar and the registry are left
    /// exactly as they were.
    pub fn create_reservation(
        &self,
        hotel: &Hotel,
        room_id: Ulid,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Reservation, EngineError> {
        match self.try_create(hotel, room_id, user_id, start, end) {
            Ok(reservation) => {
                metrics::counter!(observability::RESERVATIONS_CREATED_TOTAL).increment(1);
                metrics::gauge!(observability::RESERVATIONS_ACTIVE).increment(1.0);
                info!(
                    "reservation {} created: hotel {} room {} user {} {} total {}",
                    reservation.id(),
                    reservation.hotel_id(),
                    reservation.room_id(),
                    reservation.user_id(),
                    reservation.range(),
                    reservation.total_price(),
                );
                self.notify.send(
                    reservation.hotel_id(),
                    &Event::ReservationCreated {
                        id: reservation.id(),
                        hotel_id: reservation.hotel_id(),
                        room_id: reservation.room_id(),
                        user_id: reservation.user_id().clone(),
                        range: reservation.range(),
                        total_price: reservation.total_price(),
                    },
                );
                Ok(reservation)
            }
            Err(e) => {
                metrics::counter!(observability::RESERVATIONS_REJECTED_TOTAL, "reason" => error_label(&e))
                    .increment(1);
                warn!("reservation rejected for room {room_id} in hotel {}: {e}", hotel.id());
                Err(e)
            }
        }
    }

    fn try_create(
        &self,
        hotel: &Hotel,
        room_id: Ulid,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Reservation, EngineError> {
        let range = DateRange::new(start, end)?;
        validate_stay(&range, &self.config)?;
        let room = hotel.get_room(&room_id)?;

        // The user's quota lock is held until the reservation is registered,
        // so concurrent creates for one user are counted one at a time.
        // Order: user -> room -> registry shard.
        let quota_lock = self
            .config
            .max_active_per_user
            .map(|max| (max, self.index.quota_lock(&user_id)));
        let _quota_guard = match &quota_lock {
            Some((max, lock)) => {
                let held = lock.lock();
                if self.active_count_for_user(&user_id) >= *max {
                    return Err(EngineError::LimitExceeded("too many active reservations for user"));
                }
                Some(held)
            }
            None => None,
        };

        let mut guard = room.write();
        check_no_conflict(&guard, &range)?;
        guard.add_booking(range)?;

        let reservation = match Reservation::new(Ulid::new(), hotel.id(), &guard, user_id, range) {
            Ok(r) => r,
            Err(e) => {
                guard.remove_booking(&range)?;
                return Err(e);
            }
        };

        self.reservations.insert(
            reservation.id(),
            Booked {
                reservation: reservation.clone(),
                room: room.clone(),
            },
        );
        self.index.record(&reservation);
        Ok(reservation)
    }

    /// Cancel an active reservation and free its dates.
    ///
    /// Fails with `NotFound` for an unknown id and `AlreadyCancelled` when the
    /// reservation was cancelled before; neither changes any state. A
    /// `CalendarInconsistent` error means the room lost the booking behind
    /// the registry's back; the reservation is left active.
    pub fn cancel_reservation(&self, id: Ulid) -> Result<Reservation, EngineError> {
        match self.try_cancel(id) {
            Ok(reservation) => {
                metrics::counter!(observability::RESERVATIONS_CANCELLED_TOTAL).increment(1);
                metrics::gauge!(observability::RESERVATIONS_ACTIVE).decrement(1.0);
                info!(
                    "reservation {id} cancelled: room {} freed for {}",
                    reservation.room_id(),
                    reservation.range()
                );
                self.notify.send(
                    reservation.hotel_id(),
                    &Event::ReservationCancelled {
                        id,
                        hotel_id: reservation.hotel_id(),
                        room_id: reservation.room_id(),
                        range: reservation.range(),
                    },
                );
                Ok(reservation)
            }
            Err(e @ EngineError::CalendarInconsistent { .. }) => {
                error!("{e}");
                Err(e)
            }
            Err(e) => {
                warn!("cancellation of {id} refused: {e}");
                Err(e)
            }
        }
    }

    fn try_cancel(&self, id: Ulid) -> Result<Reservation, EngineError> {
        // Read without holding the shard, then lock the room before the
        // registry entry to keep the room -> registry lock order.
        let (room, range) = {
            let entry = self.reservations.get(&id).ok_or(EngineError::NotFound(id))?;
            if !entry.reservation.is_active() {
                return Err(EngineError::AlreadyCancelled(id));
            }
            (entry.room.clone(), entry.reservation.range())
        };

        let mut guard = room.write();
        let mut entry = self.reservations.get_mut(&id).ok_or(EngineError::NotFound(id))?;
        // A concurrent cancel may have won between the two lookups.
        if !entry.reservation.is_active() {
            return Err(EngineError::AlreadyCancelled(id));
        }
        if guard.remove_booking(&range).is_err() {
            return Err(EngineError::CalendarInconsistent {
                reservation_id: id,
                room_id: guard.id(),
                range,
            });
        }
        entry.reservation.cancel()?;
        Ok(entry.reservation.clone())
    }
}
