//! backend.rs
//!
//! Типизированный клиент HTTP-бэкенда. Покрывает ровно ту поверхность,
//! которой пользуются экраны: вход, регистрация, каталог фильмов,
//! сеансы, бронирования и админские операции над пользователями.
//!
//! Все сетевые вызовы защищены Circuit Breaker'ом: транспортная ошибка
//! считается сбоем, ответ сервера (включая 4xx/5xx) - нет.
//! Обработка 401 остаётся на вызывающей стороне: клиент только
//! сообщает о статусе, чистить сессию и уводить на логин - задача
//! координатора.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use super::breaker::CircuitBreaker;
use crate::config::{ApiConfig, CircuitBreakerConfig};
use crate::models::{Movie, MovieDraft, RegisterRequest, Screening, User, UserUpdate};

/// Ошибки клиента бэкенда. Ветвление по статусам совпадает с тем, как
/// экраны исходной системы разбирали ответы axios.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("backend is unavailable")]
    Gateway,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("circuit breaker is open - backend temporarily unavailable")]
    Breaker,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    pub total: i64,
    pub total_pages: i64,
}

/// Параметры листинга фильмов.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MovieQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateBookingRequest<'a> {
    screening_id: i64,
    seats: &'a [String],
}

/// Бронирование в представлении бэкенда.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiBooking {
    pub id: i64,
    pub user_id: i64,
    pub screening_id: i64,
    pub seats: Vec<String>,
    pub total_amount: f64,
    pub booking_time: chrono::NaiveDateTime,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    breaker: Arc<CircuitBreaker>,
}

impl BackendClient {
    pub fn from_config(api: &ApiConfig, breaker_cfg: &CircuitBreakerConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(api.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: api.base_url.trim_end_matches('/').to_string(),
            breaker: Arc::new(CircuitBreaker::new(
                breaker_cfg.failure_threshold,
                breaker_cfg.cooldown_secs,
            )),
        }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Выполняет запрос через Circuit Breaker и разворачивает статус
    /// в `ApiError`.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        if !self.breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking backend request");
            return Err(ApiError::Breaker);
        }

        match request.send().await {
            Ok(response) => {
                self.breaker.record_success();
                self.check_status(response).await
            }
            Err(e) => {
                error!("Backend request failed: {:?}", e);
                self.breaker.record_failure();
                Err(ApiError::Network(e))
            }
        }
    }

    async fn check_status(&self, response: Response) -> Result<Response, ApiError> {
        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                let detail = response
                    .json::<ErrorBody>()
                    .await
                    .ok()
                    .and_then(|b| b.detail)
                    .unwrap_or_else(|| "invalid request".to_string());
                Err(ApiError::Validation(detail))
            }
            s if s.is_server_error() => Err(ApiError::Gateway),
            s => {
                warn!(status = %s, "unexpected backend status");
                Err(ApiError::Gateway)
            }
        }
    }

    fn with_token(request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token)
    }

    /* ---------- AUTH ---------- */

    /// POST /login - совмещённый вход и получение профиля.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self
            .http
            .post(self.url("/login"))
            .json(&LoginRequest { username, password });
        Ok(self.execute(request).await?.json().await?)
    }

    /// POST /register
    pub async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        let request = self.http.post(self.url("/register")).json(req);
        Ok(self.execute(request).await?.json().await?)
    }

    /* ---------- MOVIES ---------- */

    /// GET /movies с пагинацией, фильтром по жанру, поиском и сортировкой.
    pub async fn movies(&self, query: &MovieQuery) -> Result<MovieListResponse, ApiError> {
        let request = self.http.get(self.url("/movies")).query(query);
        Ok(self.execute(request).await?.json().await?)
    }

    /// GET /movies/featured
    pub async fn featured_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let request = self.http.get(self.url("/movies/featured"));
        Ok(self.execute(request).await?.json().await?)
    }

    /// GET /movies/{id}
    pub async fn movie(&self, id: i64) -> Result<Movie, ApiError> {
        let request = self.http.get(self.url(&format!("/movies/{id}")));
        Ok(self.execute(request).await?.json().await?)
    }

    /// GET /movies/{id}/screenings
    pub async fn screenings(&self, movie_id: i64) -> Result<Vec<Screening>, ApiError> {
        let request = self
            .http
            .get(self.url(&format!("/movies/{movie_id}/screenings")));
        Ok(self.execute(request).await?.json().await?)
    }

    /// POST /movies/add (админ).
    pub async fn add_movie(&self, token: &str, draft: &MovieDraft) -> Result<Movie, ApiError> {
        let request = Self::with_token(self.http.post(self.url("/movies/add")), token).json(draft);
        Ok(self.execute(request).await?.json().await?)
    }

    /* ---------- BOOKINGS ---------- */

    /// GET /bookings/me
    pub async fn my_bookings(&self, token: &str) -> Result<Vec<ApiBooking>, ApiError> {
        let request = Self::with_token(self.http.get(self.url("/bookings/me")), token);
        Ok(self.execute(request).await?.json().await?)
    }

    /// GET /bookings (админ).
    pub async fn all_bookings(&self, token: &str) -> Result<Vec<ApiBooking>, ApiError> {
        let request = Self::with_token(self.http.get(self.url("/bookings")), token);
        Ok(self.execute(request).await?.json().await?)
    }

    /// POST /bookings
    pub async fn create_booking(
        &self,
        token: &str,
        screening_id: i64,
        seats: &[String],
    ) -> Result<ApiBooking, ApiError> {
        let request = Self::with_token(self.http.post(self.url("/bookings")), token)
            .json(&CreateBookingRequest { screening_id, seats });
        Ok(self.execute(request).await?.json().await?)
    }

    /* ---------- USERS (админ) ---------- */

    /// GET /users
    pub async fn users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let request = Self::with_token(self.http.get(self.url("/users")), token);
        Ok(self.execute(request).await?.json().await?)
    }

    /// PUT /users/{id}
    pub async fn update_user(
        &self,
        token: &str,
        id: i64,
        update: &UserUpdate,
    ) -> Result<User, ApiError> {
        let request =
            Self::with_token(self.http.put(self.url(&format!("/users/{id}"))), token).json(update);
        Ok(self.execute(request).await?.json().await?)
    }

    /// DELETE /users/{id}
    pub async fn delete_user(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let request = Self::with_token(self.http.delete(self.url(&format!("/users/{id}"))), token);
        self.execute(request).await?;
        Ok(())
    }
}
