//! Persistence for booking records.
//!
//! Provides the `BookingStore` trait with an in-memory implementation for
//! tests and embedding, and a PostgreSQL implementation backed by sqlx.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryBookingStore;
pub use postgres::PostgresBookingStore;
pub use record::BookingRecord;
pub use store::{BookingStore, BookingStoreExt};
