//! Booking workflow step names, used in logs, metrics and timeout errors.

/// Step name: atomically resolve and reserve a room.
pub const RESERVE_ROOM: &str = "reserve_room";

/// Step name: price the stay.
pub const PRICE_STAY: &str = "price_stay";

/// Step name: charge the prepayment.
pub const PROCESS_PAYMENT: &str = "process_payment";

/// Step name: persist the booking record.
pub const PERSIST_BOOKING: &str = "persist_booking";

/// Step name: send the booking confirmation.
pub const SEND_CONFIRMATION: &str = "send_confirmation";
