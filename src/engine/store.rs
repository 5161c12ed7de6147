use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use ulid::Ulid;

use crate::model::UserId;
use crate::reservation::Reservation;

/// Secondary indexes over the manager's reservations. Ids are appended in
/// creation order and never removed; cancelled reservations stay for history.
#[derive(Default)]
pub(super) struct ReservationIndex {
    by_user: DashMap<UserId, Vec<Ulid>>,
    by_hotel: DashMap<Ulid, Vec<Ulid>>,
    quota_locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl ReservationIndex {
    pub fn record(&self, reservation: &Reservation) {
        self.by_user
            .entry(reservation.user_id().clone())
            .or_default()
            .push(reservation.id());
        self.by_hotel
            .entry(reservation.hotel_id())
            .or_default()
            .push(reservation.id());
    }

    pub fn for_user(&self, user_id: &UserId) -> Vec<Ulid> {
        self.by_user
            .get(user_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    pub fn for_hotel(&self, hotel_id: &Ulid) -> Vec<Ulid> {
        self.by_hotel
            .get(hotel_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    /// Per-user lock serializing quota checks. Only taken when a quota is
    /// configured.
    pub fn quota_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        self.quota_locks
            .entry(user_id.clone())
            .or_default()
            .value()
            .clone()
    }
}
