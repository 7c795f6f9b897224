//! Booking request, room and money types, plus the attempt state machine.

mod request;
mod state;
mod value_objects;

pub use request::{BookingRequest, BookingRequestBuilder};
pub use state::BookingState;
pub use value_objects::{Money, Room};
