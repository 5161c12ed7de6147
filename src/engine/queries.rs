use ulid::Ulid;

use crate::model::UserId;
use crate::reservation::Reservation;

use super::{EngineError, ReservationManager};

impl ReservationManager {
    pub fn get_reservation(&self, id: Ulid) -> Result<Reservation, EngineError> {
        self.reservations
            .get(&id)
            .map(|e| e.reservation.clone())
            .ok_or(EngineError::NotFound(id))
    }

    /// All of the user's reservations, active and cancelled, ordered by start
    /// date. The iterator owns a snapshot; clone it to walk it again.
    pub fn get_user_history(&self, user_id: &UserId) -> std::vec::IntoIter<Reservation> {
        let ids = self.index.for_user(user_id);
        tracing::debug!("history for user {user_id}: {} reservations", ids.len());
        self.snapshot_sorted(&ids).into_iter()
    }

    /// All reservations made in one hotel, ordered by start date.
    pub fn get_hotel_reservations(&self, hotel_id: &Ulid) -> std::vec::IntoIter<Reservation> {
        let ids = self.index.for_hotel(hotel_id);
        self.snapshot_sorted(&ids).into_iter()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    pub fn active_reservation_count(&self) -> usize {
        self.reservations
            .iter()
            .filter(|e| e.reservation.is_active())
            .count()
    }

    pub(super) fn active_count_for_user(&self, user_id: &UserId) -> usize {
        self.index
            .for_user(user_id)
            .iter()
            .filter(|id| {
                self.reservations
                    .get(*id)
                    .is_some_and(|e| e.reservation.is_active())
            })
            .count()
    }

    /// Ties on start date fall back to id, which sorts by creation time.
    fn snapshot_sorted(&self, ids: &[Ulid]) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = ids
            .iter()
            .filter_map(|id| self.reservations.get(id).map(|e| e.reservation.clone()))
            .collect();
        out.sort_by_key(|r| (r.range().start(), r.id()));
        out
    }
}
