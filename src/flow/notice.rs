use std::time::{Duration, Instant};

/// Типы уведомлений на экранах бронирования.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Попытка выбрать место сверх лимита. Гаснет само.
    CapacityExceeded,
    /// Попытка перейти к оплате без выбранных мест. Висит, пока
    /// пользователь не исправит ввод.
    EmptySelection,
}

/// Уведомление пользователю, возможно с ограниченным сроком жизни.
///
/// Это интерфейсный дебаунс, а не доменная ошибка: тесты доменного
/// состояния не обязаны симулировать таймеры - срок жизни проверяется
/// передачей `now` снаружи.
#[derive(Debug, Clone)]
pub struct TransientNotice {
    kind: NoticeKind,
    message: String,
    raised_at: Instant,
    ttl: Option<Duration>,
}

impl TransientNotice {
    pub fn capacity_exceeded(max_seats: usize, raised_at: Instant, ttl: Duration) -> Self {
        Self {
            kind: NoticeKind::CapacityExceeded,
            message: format!("Maximum {max_seats} seats allowed per booking"),
            raised_at,
            ttl: Some(ttl),
        }
    }

    pub fn empty_selection(raised_at: Instant) -> Self {
        Self {
            kind: NoticeKind::EmptySelection,
            message: "Please select at least one seat".to_string(),
            raised_at,
            ttl: None,
        }
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(self.raised_at) >= ttl,
            None => false,
        }
    }
}
