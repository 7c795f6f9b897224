//! Room inventory endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use booking_store::BookingStore;
use serde::Serialize;

use super::bookings::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub capacity: u32,
}

#[derive(Serialize)]
pub struct AvailableRoomsResponse {
    pub rooms: Vec<RoomResponse>,
    pub place_count: u32,
}

/// GET /rooms/available
#[tracing::instrument(skip(state))]
pub async fn available<S: BookingStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<AvailableRoomsResponse>, ApiError> {
    let rooms = state.orchestrator.get_available_rooms().await?;
    // Summed from the same snapshot so the two fields always agree.
    let place_count = rooms
        .iter()
        .fold(0u32, |total, room| total.saturating_add(room.capacity));

    Ok(Json(AvailableRoomsResponse {
        rooms: rooms
            .into_iter()
            .map(|room| RoomResponse {
                id: room.id.to_string(),
                capacity: room.capacity,
            })
            .collect(),
        place_count,
    }))
}
