use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Фильм в том виде, в каком его отдаёт бэкенд и хранит каталог.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i64,
    pub release_date: Option<NaiveDate>,
    pub genre: String,
    pub rating: Option<f64>,
    pub poster_url: String,
    pub price: f64,
}

/// Черновик фильма для создания/редактирования в админке.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MovieDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    #[serde(default)]
    pub description: String,
    /// Если не указана, каталог подставит 120 минут.
    pub duration: Option<i64>,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    #[validate(length(min = 1, message = "Poster URL is required"))]
    pub poster_url: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screening {
    pub id: i64,
    pub movie_id: i64,
    pub screening_time: NaiveDateTime,
    pub price: f64,
    pub available_seats: i32,
}
