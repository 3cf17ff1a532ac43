//! Порт хранилища ключ-значение.
//!
//! Браузерный localStorage из исходной системы заменён явной
//! абстракцией: каталог фильмов, архив бронирований и сессия работают
//! через `KeyValueStore`, а не через глобальное состояние. Значения -
//! JSON-строки, один ключ на коллекцию.

use std::sync::Arc;

pub mod bookings;
pub mod memory;
pub mod movies;
pub mod session;

pub use bookings::BookingArchive;
pub use memory::MemoryStore;
pub use movies::MovieCatalog;
pub use session::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored payload is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Минимальный контракт хранилища: строковые ключи, строковые значения.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Разделяемая ссылка на хранилище - инжектируется во все порты.
pub type SharedStore = Arc<dyn KeyValueStore>;
