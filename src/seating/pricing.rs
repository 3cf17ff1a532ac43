/// Итоговая цена: цена за место * количество выбранных мест.
///
/// Чистая функция, пересчитывается синхронно при каждом изменении выбора,
/// ничего не кеширует. Отсутствующая цена трактуется как 0 - экран
/// деградирует, а не падает.
pub fn total(seats_selected: usize, unit_price: Option<f64>) -> f64 {
    unit_price.unwrap_or(0.0) * seats_selected as f64
}
