use std::collections::HashSet;

use super::seat::{SeatId, SeatStatus};
use super::selection::Selection;

/// Количество рядов в зале: 'A'..='J'.
pub const ROW_COUNT: u8 = 10;
/// Количество мест в ряду: 1..=12.
pub const COLUMN_COUNT: u8 = 12;

// Занятые места текущего сеанса. Список фиксирован на всё время работы
// процесса и не запрашивается с бэкенда. I-15 и I-16 лежат за пределами
// сетки 10x12, но остаются в множестве: is_booked для них отвечает true,
// а all_seats их никогда не выдаёт.
const BOOKED: [SeatId; 12] = [
    SeatId::new_unchecked('A', 7),
    SeatId::new_unchecked('C', 1),
    SeatId::new_unchecked('C', 3),
    SeatId::new_unchecked('C', 4),
    SeatId::new_unchecked('C', 6),
    SeatId::new_unchecked('E', 7),
    SeatId::new_unchecked('G', 1),
    SeatId::new_unchecked('G', 6),
    SeatId::new_unchecked('G', 7),
    SeatId::new_unchecked('G', 8),
    SeatId::new_unchecked('I', 15),
    SeatId::new_unchecked('I', 16),
];

/// Статическая топология зала плюс неизменяемое множество занятых мест.
///
/// Никаких побочных эффектов и никаких ошибок: идентификаторы, которые
/// выдаёт `all_seats`, корректны по построению.
#[derive(Debug, Clone)]
pub struct SeatMap {
    booked: HashSet<SeatId>,
}

impl SeatMap {
    /// Карта текущего сеанса с захардкоженным списком занятых мест.
    pub fn current_screening() -> Self {
        Self {
            booked: BOOKED.iter().copied().collect(),
        }
    }

    /// Карта с произвольным множеством занятых мест (для тестов).
    pub fn with_booked(booked: impl IntoIterator<Item = SeatId>) -> Self {
        Self {
            booked: booked.into_iter().collect(),
        }
    }

    /// O(1) проверка занятости.
    pub fn is_booked(&self, seat: &SeatId) -> bool {
        self.booked.contains(seat)
    }

    /// Вся сетка 10x12 в порядке "ряд за рядом". Детерминированный,
    /// перезапускаемый итератор.
    pub fn all_seats(&self) -> impl Iterator<Item = SeatId> {
        (0..ROW_COUNT).flat_map(|row| {
            let row_letter = (b'A' + row) as char;
            (1..=COLUMN_COUNT).map(move |number| SeatId::new_unchecked(row_letter, number))
        })
    }

    /// Отображаемый статус места относительно текущего выбора.
    pub fn status_of(&self, seat: &SeatId, selection: &Selection) -> SeatStatus {
        if self.is_booked(seat) {
            SeatStatus::Booked
        } else if selection.contains(seat) {
            SeatStatus::Selected
        } else {
            SeatStatus::Available
        }
    }
}
