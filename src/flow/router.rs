use super::FlowError;

/// Экраны приложения. Сам механизм навигации - внешний; здесь только
/// значения, которые координатор интерпретирует.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Movies,
    MovieDetail(i64),
    SeatSelection,
    Payment,
    Confirmation,
    Login,
    Profile,
    Admin,
    AdminMovies,
    AdminUsers,
    AdminBookings,
}

/// Результат обработки события на экране.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Остаёмся на текущем экране.
    Stay,
    /// Переход на другой экран.
    Go(Route),
    /// Редирект на главную (безопасный экран по умолчанию).
    RedirectHome,
}

/// Куда уводить пользователя при доменной ошибке.
///
/// Отсутствие платёжного черновика возвращает к списку фильмов, как и в
/// исходном экране оплаты; прочий отсутствующий контекст - на главную.
pub fn redirect_for(err: &FlowError) -> Transition {
    match err {
        FlowError::MissingContext { field: "booking_draft" } => Transition::Go(Route::Movies),
        FlowError::MissingContext { .. } => Transition::RedirectHome,
        FlowError::EmptySelection => Transition::Stay,
        FlowError::NotAuthenticated => Transition::Go(Route::Login),
        FlowError::NotAuthorized => Transition::RedirectHome,
        FlowError::Storage(_) => Transition::Stay,
    }
}
