use tracing::info;

use super::{SharedStore, StoreError};
use crate::models::{Movie, MovieDraft};

const MOVIES_KEY: &str = "movies";
const DEFAULT_DURATION_MIN: i64 = 120;

/// Каталог фильмов поверх KV-порта (ключ `movies`).
///
/// Обновление и удаление адресуются по названию фильма - так работала
/// админка исходной системы.
#[derive(Clone)]
pub struct MovieCatalog {
    store: SharedStore,
}

impl MovieCatalog {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Movie>, StoreError> {
        match self.store.get(MOVIES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Добавляет фильм; идентификатор - unix-время в миллисекундах.
    pub fn add(&self, draft: MovieDraft, now_millis: i64) -> Result<Movie, StoreError> {
        let movie = Movie {
            id: now_millis,
            title: draft.title,
            description: draft.description,
            duration: draft.duration.unwrap_or(DEFAULT_DURATION_MIN),
            release_date: draft.release_date,
            genre: draft.genre,
            rating: draft.rating,
            poster_url: draft.poster_url,
            price: draft.price,
        };

        let mut movies = self.list()?;
        movies.push(movie.clone());
        self.save(&movies)?;
        info!(title = %movie.title, id = movie.id, "movie added to catalog");
        Ok(movie)
    }

    /// Обновляет фильм по названию; возвращает обновлённую запись,
    /// если фильм найден.
    pub fn update(&self, title: &str, draft: MovieDraft) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.list()?;
        let Some(movie) = movies.iter_mut().find(|m| m.title == title) else {
            return Ok(None);
        };

        movie.title = draft.title;
        movie.genre = draft.genre;
        movie.description = draft.description;
        if let Some(duration) = draft.duration {
            movie.duration = duration;
        }
        if draft.release_date.is_some() {
            movie.release_date = draft.release_date;
        }
        if draft.rating.is_some() {
            movie.rating = draft.rating;
        }
        movie.poster_url = draft.poster_url;
        movie.price = draft.price;

        let updated = movie.clone();
        self.save(&movies)?;
        info!(title = %updated.title, "movie updated in catalog");
        Ok(Some(updated))
    }

    /// Удаляет фильм по названию; true, если что-то было удалено.
    pub fn delete(&self, title: &str) -> Result<bool, StoreError> {
        let mut movies = self.list()?;
        let before = movies.len();
        movies.retain(|m| m.title != title);
        if movies.len() == before {
            return Ok(false);
        }
        self.save(&movies)?;
        info!(title, "movie removed from catalog");
        Ok(true)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.list()?.is_empty())
    }

    fn save(&self, movies: &[Movie]) -> Result<(), StoreError> {
        self.store.put(MOVIES_KEY, &serde_json::to_string(movies)?)
    }
}
