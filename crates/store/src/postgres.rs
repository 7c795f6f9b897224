use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use common::BookingId;
use domain::BookingRequest;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{BookingRecord, BookingStore, Result, StoreError};

/// PostgreSQL-backed booking store implementation.
#[derive(Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Creates a new PostgreSQL booking store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_record(row: PgRow) -> Result<BookingRecord> {
        let guest_count: i32 = row.try_get("guest_count")?;
        let guest_count = u32::try_from(guest_count).map_err(|_| {
            StoreError::InvalidRecord(format!("negative guest_count {guest_count}"))
        })?;

        let mut builder = BookingRequest::builder()
            .user_id(row.try_get::<String, _>("user_id")?)
            .date_from(row.try_get::<NaiveDate, _>("date_from")?)
            .date_to(row.try_get::<NaiveDate, _>("date_to")?)
            .guest_count(guest_count)
            .prepaid(row.try_get("prepaid")?);
        if let Some(room_id) = row.try_get::<Option<String>, _>("room_id")? {
            builder = builder.room_id(room_id);
        }
        let request = builder
            .build()
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;

        Ok(BookingRecord {
            booking_id: BookingId::from_uuid(row.try_get::<Uuid, _>("id")?),
            request,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn save(&self, request: &BookingRequest) -> Result<BookingId> {
        let record = BookingRecord::new(request.clone());
        let guest_count = i32::try_from(request.guest_count())
            .map_err(|_| StoreError::Rejected("guest_count out of range".to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, date_from, date_to, guest_count, prepaid, room_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.booking_id.as_uuid())
        .bind(request.user_id().as_str())
        .bind(request.date_from())
        .bind(request.date_to())
        .bind(guest_count)
        .bind(request.is_prepaid())
        .bind(request.room_id().map(|r| r.as_str()))
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(booking_id = %record.booking_id, "booking saved");
        Ok(record.booking_id)
    }

    async fn get(&self, booking_id: BookingId) -> Result<BookingRecord> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, user_id, date_from, date_to, guest_count, prepaid, room_id, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_record(row),
            None => Err(StoreError::NotFound(booking_id)),
        }
    }

    async fn delete(&self, booking_id: BookingId) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(booking_id));
        }
        Ok(())
    }
}
