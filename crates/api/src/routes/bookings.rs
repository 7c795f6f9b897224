//! Booking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use booking::{
    BookingOrchestrator, InMemoryAvailabilityResolver, InMemoryPaymentGateway,
    LoggingNotificationDispatcher,
};
use booking_store::{BookingRecord, BookingStore};
use chrono::NaiveDate;
use common::BookingId;
use domain::BookingRequest;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Orchestrator wired the way the server runs it: in-memory inventory and
/// payments, log-only confirmations, and a pluggable booking store.
pub type AppOrchestrator<S> = BookingOrchestrator<
    InMemoryAvailabilityResolver,
    InMemoryPaymentGateway,
    S,
    LoggingNotificationDispatcher,
>;

/// Shared application state accessible from all handlers.
pub struct AppState<S: BookingStore> {
    pub orchestrator: AppOrchestrator<S>,
    pub payment: InMemoryPaymentGateway,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct BookingBody {
    #[serde(default)]
    pub user_id: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub guest_count: u32,
    #[serde(default)]
    pub prepaid: bool,
}

impl BookingBody {
    fn into_request(self) -> Result<BookingRequest, ApiError> {
        BookingRequest::builder()
            .user_id(self.user_id)
            .date_from(self.date_from)
            .date_to(self.date_to)
            .guest_count(self.guest_count)
            .prepaid(self.prepaid)
            .build()
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct BookingCreatedResponse {
    pub booking_id: String,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub user_id: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub nights: i64,
    pub guest_count: u32,
    pub prepaid: bool,
    pub room_id: Option<String>,
    pub created_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(record: BookingRecord) -> Self {
        let request = &record.request;
        Self {
            booking_id: record.booking_id.to_string(),
            user_id: request.user_id().to_string(),
            date_from: request.date_from(),
            date_to: request.date_to(),
            nights: request.nights(),
            guest_count: request.guest_count(),
            prepaid: request.is_prepaid(),
            room_id: request.room_id().map(|id| id.to_string()),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct QuoteResponse {
    pub price: f64,
    pub price_eur: f64,
    pub nights: i64,
}

// -- Handlers --

/// POST /bookings: run the booking workflow.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: BookingStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(body): Json<BookingBody>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    let request = body.into_request()?;
    let booking_id = state.orchestrator.make_booking(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            booking_id: booking_id.to_string(),
        }),
    ))
}

/// GET /bookings/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: BookingStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking_id = parse_booking_id(&id)?;
    let record = state.orchestrator.get_booking(booking_id).await?;
    Ok(Json(record.into()))
}

/// DELETE /bookings/{id}: release the room and drop the record.
#[tracing::instrument(skip(state))]
pub async fn cancel<S: BookingStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let booking_id = parse_booking_id(&id)?;
    state.orchestrator.cancel_booking(booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /bookings/quote: price a stay without booking it.
#[tracing::instrument(skip(state, body))]
pub async fn quote<S: BookingStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(body): Json<BookingBody>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let request = body.into_request()?;
    let price = state.orchestrator.calculate_price(&request)?;
    let price_eur = state.orchestrator.calculate_price_euro(&request)?;

    Ok(Json(QuoteResponse {
        price: price.as_major(),
        price_eur: price_eur.as_major(),
        nights: request.nights(),
    }))
}

fn parse_booking_id(id: &str) -> Result<BookingId, ApiError> {
    id.parse::<BookingId>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
