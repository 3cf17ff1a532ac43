//! Админ-консоль: фильмы, пользователи, бронирования.
//!
//! Каждая операция начинается с проверки прав: без сессии - на логин,
//! без админских прав - на главную. Фильмы и бронирования живут в
//! локальных портах хранилища, пользователи - на бэкенде; правило
//! "главного админа трогать нельзя" живёт на сервере и приходит сюда
//! как `ApiError::Validation`.

use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::flow::FlowError;
use crate::models::{BookingRecord, Movie, MovieDraft, User, UserUpdate};
use crate::services::ApiError;
use crate::AppState;

/// Ошибки админских операций.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("movie draft is invalid")]
    InvalidDraft(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("movie '{0}' not found")]
    MovieNotFound(String),
    #[error("booking '{0}' not found")]
    BookingNotFound(String),
}

#[derive(Clone)]
pub struct AdminConsole {
    state: Arc<AppState>,
}

impl AdminConsole {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Проверяет, что текущая сессия принадлежит активному админу.
    pub fn require_admin(&self) -> Result<User, FlowError> {
        let user = self
            .state
            .session
            .current_user()?
            .ok_or(FlowError::NotAuthenticated)?;
        if !user.is_admin {
            return Err(FlowError::NotAuthorized);
        }
        Ok(user)
    }

    fn bearer_token(&self) -> Result<String, FlowError> {
        self.state
            .session
            .bearer_token()?
            .ok_or(FlowError::NotAuthenticated)
    }

    /* ---------- MOVIES ---------- */

    pub fn list_movies(&self) -> Result<Vec<Movie>, AdminError> {
        self.require_admin()?;
        Ok(self.state.movies.list().map_err(FlowError::Storage)?)
    }

    /// Добавляет фильм в локальный каталог.
    pub fn add_movie(&self, draft: MovieDraft, now_millis: i64) -> Result<Movie, AdminError> {
        let admin = self.require_admin()?;
        draft.validate()?;
        let movie = self
            .state
            .movies
            .add(draft, now_millis)
            .map_err(FlowError::Storage)?;
        info!(admin = %admin.username, movie = %movie.title, "admin added movie");
        Ok(movie)
    }

    pub fn update_movie(&self, title: &str, draft: MovieDraft) -> Result<Movie, AdminError> {
        self.require_admin()?;
        draft.validate()?;
        self.state
            .movies
            .update(title, draft)
            .map_err(FlowError::Storage)?
            .ok_or_else(|| AdminError::MovieNotFound(title.to_string()))
    }

    pub fn delete_movie(&self, title: &str) -> Result<(), AdminError> {
        self.require_admin()?;
        if !self.state.movies.delete(title).map_err(FlowError::Storage)? {
            return Err(AdminError::MovieNotFound(title.to_string()));
        }
        Ok(())
    }

    /// Публикует фильм на бэкенде (POST /movies/add).
    pub async fn publish_movie(&self, draft: &MovieDraft) -> Result<Movie, AdminError> {
        self.require_admin()?;
        draft.validate()?;
        let token = self.bearer_token()?;
        Ok(self.state.backend.add_movie(&token, draft).await?)
    }

    /* ---------- USERS ---------- */

    pub async fn list_users(&self) -> Result<Vec<User>, AdminError> {
        self.require_admin()?;
        let token = self.bearer_token()?;
        Ok(self.state.backend.users(&token).await?)
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, AdminError> {
        self.require_admin()?;
        let token = self.bearer_token()?;
        Ok(self.state.backend.update_user(&token, id, update).await?)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AdminError> {
        let admin = self.require_admin()?;
        let token = self.bearer_token()?;
        self.state.backend.delete_user(&token, id).await?;
        info!(admin = %admin.username, user_id = id, "admin deleted user");
        Ok(())
    }

    /* ---------- BOOKINGS ---------- */

    pub fn list_bookings(&self) -> Result<Vec<BookingRecord>, AdminError> {
        self.require_admin()?;
        Ok(self.state.bookings.list_all().map_err(FlowError::Storage)?)
    }

    pub fn delete_booking(&self, booking_id: &str) -> Result<(), AdminError> {
        self.require_admin()?;
        if !self
            .state
            .bookings
            .delete(booking_id)
            .map_err(FlowError::Storage)?
        {
            return Err(AdminError::BookingNotFound(booking_id.to_string()));
        }
        Ok(())
    }
}
