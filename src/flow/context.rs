use serde::{Deserialize, Serialize};

use super::FlowError;
use crate::models::Movie;

/// Сырой навигационный контекст, приходящий с экрана фильма.
///
/// Все поля опциональны - это то, что реально лежит в state перехода.
/// Валидация происходит при входе на экран выбора мест.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub movie_id: Option<i64>,
    pub movie_title: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<i64>,
    pub genre: Option<String>,
    pub poster_url: Option<String>,
}

impl From<&Movie> for NavigationState {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: Some(movie.id),
            movie_title: Some(movie.title.clone()),
            price: Some(movie.price),
            duration: Some(movie.duration),
            genre: Some(movie.genre.clone()),
            poster_url: Some(movie.poster_url.clone()),
        }
    }
}

/// Проверенный контекст сеанса: обязательные поля гарантированно есть.
///
/// Отсутствие обязательного поля - это `MissingContext` и редирект на
/// главную, а не тихая подстановка значения по умолчанию.
#[derive(Debug, Clone)]
pub struct ScreeningContext {
    pub movie_id: i64,
    pub movie_title: String,
    pub price: f64,
    pub duration: Option<i64>,
    pub genre: Option<String>,
    pub poster_url: Option<String>,
}

impl TryFrom<NavigationState> for ScreeningContext {
    type Error = FlowError;

    fn try_from(state: NavigationState) -> Result<Self, Self::Error> {
        let movie_id = state
            .movie_id
            .ok_or(FlowError::MissingContext { field: "movie_id" })?;
        let movie_title = state
            .movie_title
            .ok_or(FlowError::MissingContext { field: "movie_title" })?;
        let price = state
            .price
            .ok_or(FlowError::MissingContext { field: "price" })?;

        Ok(Self {
            movie_id,
            movie_title,
            price,
            duration: state.duration,
            genre: state.genre,
            poster_url: state.poster_url,
        })
    }
}

/// Неизменяемый снимок выбора, передаваемый на экран оплаты.
/// Форма совпадает с навигационным payload исходной системы.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub movie_id: i64,
    pub movie_title: String,
    pub selected_seats: Vec<String>,
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_state() -> NavigationState {
        NavigationState {
            movie_id: Some(42),
            movie_title: Some("Inception".to_string()),
            price: Some(200.0),
            duration: Some(148),
            genre: Some("Sci-Fi".to_string()),
            poster_url: None,
        }
    }

    #[test]
    fn full_state_validates() {
        let ctx = ScreeningContext::try_from(full_state()).unwrap();
        assert_eq!(ctx.movie_id, 42);
        assert_eq!(ctx.price, 200.0);
    }

    #[test]
    fn each_required_field_is_checked() {
        let mut state = full_state();
        state.movie_id = None;
        assert!(matches!(
            ScreeningContext::try_from(state),
            Err(FlowError::MissingContext { field: "movie_id" })
        ));

        let mut state = full_state();
        state.movie_title = None;
        assert!(matches!(
            ScreeningContext::try_from(state),
            Err(FlowError::MissingContext { field: "movie_title" })
        ));

        let mut state = full_state();
        state.price = None;
        assert!(matches!(
            ScreeningContext::try_from(state),
            Err(FlowError::MissingContext { field: "price" })
        ));
    }

    #[test]
    fn draft_serializes_in_payload_shape() {
        let draft = BookingDraft {
            movie_id: 42,
            movie_title: "Inception".to_string(),
            selected_seats: vec!["A-1".to_string(), "B-1".to_string()],
            total_price: 400.0,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["movieId"], 42);
        assert_eq!(json["movieTitle"], "Inception");
        assert_eq!(json["selectedSeats"][0], "A-1");
        assert_eq!(json["totalPrice"], 400.0);
    }
}
