// Ядро выбора мест: сетка зала, состояние выбора и расчёт цены.
// Полностью синхронное и чистое - никакой сети, никаких таймеров.

pub mod map;
pub mod pricing;
pub mod seat;
pub mod selection;

pub use map::SeatMap;
pub use seat::{SeatId, SeatIdError, SeatStatus};
pub use selection::{Selection, Toggle};
