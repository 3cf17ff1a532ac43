use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// Запись о подтверждённом бронировании - ровно та форма JSON, в которой
/// записи лежат в хранилище (`bookingId`, `userEmail`, `selectedSeats`...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_id: String,
    pub username: String,
    pub user_email: String,
    pub movie_title: String,
    pub selected_seats: Vec<String>,
    pub total_price: f64,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_in_storage_shape() {
        let record = BookingRecord {
            booking_id: "BK1724580000000".to_string(),
            username: "demo".to_string(),
            user_email: "demo@example.com".to_string(),
            movie_title: "Inception".to_string(),
            selected_seats: vec!["A-1".to_string(), "B-1".to_string()],
            total_price: 400.0,
            booking_date: "2026-08-25T10:00:00Z".parse().unwrap(),
            status: BookingStatus::Confirmed,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["bookingId"], "BK1724580000000");
        assert_eq!(json["userEmail"], "demo@example.com");
        assert_eq!(json["selectedSeats"][1], "B-1");
        assert_eq!(json["status"], "Confirmed");
    }
}
