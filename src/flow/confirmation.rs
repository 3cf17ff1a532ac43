use chrono::{DateTime, Utc};
use tracing::info;

use super::payment::PaidBooking;
use super::router::Route;
use super::FlowError;
use crate::models::{BookingRecord, BookingStatus};
use crate::store::{BookingArchive, SessionStore};

/// Экран подтверждения бронирования.
///
/// Требует оплаченный черновик и активную сессию. Подтверждение
/// собирает итоговую запись и кладёт её в архив; после этого экран
/// терминальный - дальше только "мои бронирования" или новый фильм.
pub struct ConfirmationScreen {
    paid: PaidBooking,
    confirmed: Option<BookingRecord>,
}

impl ConfirmationScreen {
    pub fn enter(paid: Option<PaidBooking>) -> Result<Self, FlowError> {
        let paid = paid.ok_or(FlowError::MissingContext { field: "paid_booking" })?;
        Ok(Self { paid, confirmed: None })
    }

    pub fn paid(&self) -> &PaidBooking {
        &self.paid
    }

    pub fn confirmed(&self) -> Option<&BookingRecord> {
        self.confirmed.as_ref()
    }

    /// Подтверждает бронирование: идентификатор `BK{unix_millis}`,
    /// запись уходит в архив (общий список плюс список пользователя).
    pub fn confirm(
        &mut self,
        session: &SessionStore,
        archive: &BookingArchive,
        now: DateTime<Utc>,
    ) -> Result<&BookingRecord, FlowError> {
        let user = session
            .current_user()?
            .ok_or(FlowError::NotAuthenticated)?;

        let record = BookingRecord {
            booking_id: format!("BK{}", now.timestamp_millis()),
            username: user.username,
            user_email: user.email,
            movie_title: self.paid.draft.movie_title.clone(),
            selected_seats: self.paid.draft.selected_seats.clone(),
            total_price: self.paid.draft.total_price,
            booking_date: now,
            status: BookingStatus::Confirmed,
        };

        archive.record(&record)?;
        info!(booking_id = %record.booking_id, "booking confirmed");
        Ok(&*self.confirmed.insert(record))
    }

    /// Переходы с терминального экрана.
    pub fn view_my_bookings(&self) -> Route {
        Route::Profile
    }

    pub fn book_another(&self) -> Route {
        Route::Home
    }
}
