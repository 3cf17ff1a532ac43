use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Идентификатор места: буква ряда + номер, например "C-4".
///
/// Ряды идут от 'A', номер начинается с 1. Идентификаторы, построенные
/// перебором сетки зала, корректны по построению; `FromStr` нужен для
/// внешнего ввода и отбрасывает всё, что не похоже на "C-4".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    row: char,
    number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatIdError {
    #[error("seat row must be a single uppercase letter, got '{0}'")]
    BadRow(String),
    #[error("seat number must be a positive integer, got '{0}'")]
    BadNumber(String),
    #[error("seat id must look like 'C-4', got '{0}'")]
    BadFormat(String),
}

impl SeatId {
    pub fn new(row: char, number: u8) -> Result<Self, SeatIdError> {
        if !row.is_ascii_uppercase() {
            return Err(SeatIdError::BadRow(row.to_string()));
        }
        if number == 0 {
            return Err(SeatIdError::BadNumber(number.to_string()));
        }
        Ok(Self { row, number })
    }

    // Для статических списков внутри крейта, где значения заведомо корректны.
    pub(crate) const fn new_unchecked(row: char, number: u8) -> Self {
        Self { row, number }
    }

    pub fn row(&self) -> char {
        self.row
    }

    pub fn number(&self) -> u8 {
        self.number
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.number)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row_part, number_part) = s
            .split_once('-')
            .ok_or_else(|| SeatIdError::BadFormat(s.to_string()))?;

        let mut chars = row_part.chars();
        let row = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(SeatIdError::BadRow(row_part.to_string())),
        };

        let number: u8 = number_part
            .parse()
            .map_err(|_| SeatIdError::BadNumber(number_part.to_string()))?;

        Self::new(row, number)
    }
}

impl Serialize for SeatId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Статус места - вычисляется, нигде не хранится.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Booked,
    Selected,
    Available,
}
