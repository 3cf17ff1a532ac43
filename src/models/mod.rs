pub mod booking;
pub mod movie;
pub mod user;

pub use booking::{BookingRecord, BookingStatus};
pub use movie::{Movie, MovieDraft, Screening};
pub use user::{RegisterRequest, User, UserUpdate};
