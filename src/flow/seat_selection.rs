use std::time::{Duration, Instant};

use tracing::info;

use super::context::{BookingDraft, NavigationState, ScreeningContext};
use super::notice::{NoticeKind, TransientNotice};
use super::FlowError;
use crate::config::BookingConfig;
use crate::seating::{pricing, SeatId, SeatMap, Selection, Toggle};

/// Фаза экрана выбора мест.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Экран открыт, ничего не выбрано.
    Idle,
    /// Идёт выбор мест.
    Selecting,
    /// Висит неистёкшее уведомление о превышении лимита.
    CapacityBlocked,
    /// Успешный proceed: черновик передан на оплату.
    Proceeding,
}

/// Экран выбора мест.
///
/// Состояние живёт только на время визита: уход с экрана его просто
/// отбрасывает. Итог пересчитывается синхронно при каждом переключении
/// и нигде не кешируется между изменениями.
pub struct SeatSelectionScreen {
    ctx: ScreeningContext,
    map: SeatMap,
    selection: Selection,
    notice: Option<TransientNotice>,
    notice_ttl: Duration,
    proceeded: bool,
}

impl SeatSelectionScreen {
    /// Вход на экран. Навигационный контекст проверяется сразу:
    /// без movie_id/movie_title/price экран не открывается, координатор
    /// уводит пользователя на главную.
    pub fn enter(
        state: NavigationState,
        map: SeatMap,
        booking: &BookingConfig,
    ) -> Result<Self, FlowError> {
        let ctx = ScreeningContext::try_from(state)?;
        info!(movie = %ctx.movie_title, movie_id = ctx.movie_id, "entering seat selection");
        Ok(Self {
            ctx,
            map,
            selection: Selection::new(booking.max_seats_per_booking),
            notice: None,
            notice_ttl: Duration::from_secs(booking.notice_ttl_secs),
            proceeded: false,
        })
    }

    /// Клик по месту. Отказ по лимиту поднимает гаснущее уведомление;
    /// успешное переключение снимает любое текущее уведомление.
    pub fn toggle_seat(&mut self, seat: SeatId, now: Instant) -> Toggle {
        let outcome = self.selection.toggle(seat, &self.map);
        match outcome {
            Toggle::Added | Toggle::Removed => {
                self.notice = None;
            }
            Toggle::RejectedFull => {
                self.notice = Some(TransientNotice::capacity_exceeded(
                    self.selection.capacity(),
                    now,
                    self.notice_ttl,
                ));
            }
            Toggle::RejectedBooked => {}
        }
        outcome
    }

    /// Итоговая цена текущего выбора, пересчитывается при каждом вызове.
    pub fn total_price(&self) -> f64 {
        pricing::total(self.selection.len(), Some(self.ctx.price))
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn map(&self) -> &SeatMap {
        &self.map
    }

    pub fn context(&self) -> &ScreeningContext {
        &self.ctx
    }

    /// Актуальное уведомление, если оно ещё не истекло.
    pub fn notice(&self, now: Instant) -> Option<&TransientNotice> {
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }

    /// Убирает истёкшие уведомления (вызывается из цикла обновления UI).
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    pub fn phase(&self, now: Instant) -> Phase {
        if self.proceeded {
            Phase::Proceeding
        } else if self
            .notice(now)
            .is_some_and(|n| n.kind() == NoticeKind::CapacityExceeded)
        {
            Phase::CapacityBlocked
        } else if self.selection.is_empty() {
            Phase::Idle
        } else {
            Phase::Selecting
        }
    }

    /// Переход к оплате. Пустой выбор - доменная ошибка плюс
    /// негаснущее уведомление; экран остаётся текущим.
    pub fn proceed(&mut self, now: Instant) -> Result<BookingDraft, FlowError> {
        if self.selection.is_empty() {
            self.notice = Some(TransientNotice::empty_selection(now));
            return Err(FlowError::EmptySelection);
        }

        self.proceeded = true;
        let draft = BookingDraft {
            movie_id: self.ctx.movie_id,
            movie_title: self.ctx.movie_title.clone(),
            selected_seats: self.selection.iter().map(|s| s.to_string()).collect(),
            total_price: self.total_price(),
        };
        info!(
            movie = %draft.movie_title,
            seats = draft.selected_seats.len(),
            total = draft.total_price,
            "proceeding to payment"
        );
        Ok(draft)
    }
}
