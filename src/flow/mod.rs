//! Экраны процесса бронирования: выбор мест, оплата, подтверждение.
//!
//! Каждый экран - маленькая машина состояний без собственного ввода-вывода.
//! Все ошибки здесь локальные: они либо исправляются дальнейшим вводом
//! пользователя, либо приводят к переходу на безопасный экран. Фатальных
//! путей нет.

pub mod confirmation;
pub mod context;
pub mod notice;
pub mod payment;
pub mod router;
pub mod seat_selection;

use crate::store::StoreError;

/// Доменные ошибки процесса бронирования.
///
/// Превышение лимита мест сюда сознательно не входит: это временное
/// уведомление интерфейса (см. `notice`), а не доменная ошибка.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("required navigation context is missing: {field}")]
    MissingContext { field: &'static str },
    #[error("please select at least one seat")]
    EmptySelection,
    #[error("no active session")]
    NotAuthenticated,
    #[error("admin privileges required")]
    NotAuthorized,
    #[error(transparent)]
    Storage(#[from] StoreError),
}
