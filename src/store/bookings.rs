use tracing::info;

use super::{SharedStore, StoreError};
use crate::models::BookingRecord;

const ALL_BOOKINGS_KEY: &str = "bookings";

fn user_key(email: &str) -> String {
    format!("bookings:{email}")
}

/// Архив бронирований поверх KV-порта.
///
/// Запись делается в два списка как одна логическая операция: общий
/// список `bookings` для админки и персональный `bookings:{email}` для
/// профиля пользователя.
#[derive(Clone)]
pub struct BookingArchive {
    store: SharedStore,
}

impl BookingArchive {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn record(&self, booking: &BookingRecord) -> Result<(), StoreError> {
        let mut all = self.load(ALL_BOOKINGS_KEY)?;
        all.push(booking.clone());
        self.save(ALL_BOOKINGS_KEY, &all)?;

        let key = user_key(&booking.user_email);
        let mut personal = self.load(&key)?;
        personal.push(booking.clone());
        self.save(&key, &personal)?;

        info!(booking_id = %booking.booking_id, user = %booking.user_email, "booking archived");
        Ok(())
    }

    pub fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError> {
        self.load(ALL_BOOKINGS_KEY)
    }

    pub fn list_for(&self, email: &str) -> Result<Vec<BookingRecord>, StoreError> {
        self.load(&user_key(email))
    }

    /// Удаляет бронирование из общего списка (админская операция);
    /// true, если запись существовала.
    pub fn delete(&self, booking_id: &str) -> Result<bool, StoreError> {
        let mut all = self.load(ALL_BOOKINGS_KEY)?;
        let before = all.len();
        all.retain(|b| b.booking_id != booking_id);
        if all.len() == before {
            return Ok(false);
        }
        self.save(ALL_BOOKINGS_KEY, &all)?;
        info!(booking_id, "booking removed from archive");
        Ok(true)
    }

    fn load(&self, key: &str) -> Result<Vec<BookingRecord>, StoreError> {
        match self.store.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, key: &str, bookings: &[BookingRecord]) -> Result<(), StoreError> {
        self.store.put(key, &serde_json::to_string(bookings)?)
    }
}
