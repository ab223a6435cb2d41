pub mod actor;
pub mod booking;
pub mod draft;

pub use actor::{Actor, Role};
pub use booking::{BookingRecord, BookingStatus, Route, ServiceSelection, UserSnapshot};
pub use draft::{BookingDraft, Contact, HomeSize, MoveType};
