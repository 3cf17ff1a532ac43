use tracing::debug;

use super::map::SeatMap;
use super::seat::SeatId;

/// Результат одного переключения места.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Место добавлено в выбор.
    Added,
    /// Место убрано из выбора.
    Removed,
    /// Место занято - переключение игнорируется.
    RejectedBooked,
    /// Достигнут лимит мест на одно бронирование.
    RejectedFull,
}

/// Текущий выбор пользователя: упорядоченный по кликам список мест
/// без дубликатов, с ограничением на размер.
///
/// Инварианты: `len() <= capacity`, ни одно место из выбора не занято,
/// порядок итерации совпадает с порядком добавления (его используют
/// список мест на экране и итоговая запись о бронировании).
/// Состояние живёт только на время визита на экран выбора мест.
#[derive(Debug, Clone)]
pub struct Selection {
    seats: Vec<SeatId>,
    capacity: usize,
}

impl Selection {
    pub fn new(capacity: usize) -> Self {
        Self {
            seats: Vec::new(),
            capacity,
        }
    }

    /// Переключает место с учётом занятости и лимита.
    ///
    /// Занятое место - no-op. Уже выбранное место снимается всегда,
    /// снятие не ограничено лимитом. Добавление сверх лимита отклоняется,
    /// состояние при этом не меняется.
    pub fn toggle(&mut self, seat: SeatId, map: &SeatMap) -> Toggle {
        if map.is_booked(&seat) {
            debug!(seat = %seat, "toggle ignored: seat is booked");
            return Toggle::RejectedBooked;
        }

        if let Some(pos) = self.seats.iter().position(|s| *s == seat) {
            self.seats.remove(pos);
            debug!(seat = %seat, selected = self.seats.len(), "seat deselected");
            return Toggle::Removed;
        }

        if self.seats.len() >= self.capacity {
            debug!(seat = %seat, capacity = self.capacity, "toggle rejected: selection full");
            return Toggle::RejectedFull;
        }

        self.seats.push(seat);
        debug!(seat = %seat, selected = self.seats.len(), "seat selected");
        Toggle::Added
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        self.seats.contains(seat)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Места в порядке добавления.
    pub fn seats(&self) -> &[SeatId] {
        &self.seats
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatId> {
        self.seats.iter()
    }
}
