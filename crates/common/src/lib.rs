//! Identifier types shared by every crate in the booking workspace.

mod types;

pub use types::{BookingId, RoomId, UserId};
