//! Room inventory trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::RoomId;
use domain::{BookingRequest, Room};
use tokio::sync::RwLock;

use crate::error::BookingError;

/// Owner of the room inventory and its availability flags.
#[async_trait]
pub trait AvailabilityResolver: Send + Sync {
    /// Selects an available room that can hold the request's guests.
    ///
    /// Nothing is reserved; see [`reserve_room`](Self::reserve_room).
    async fn find_available_room_id(&self, request: &BookingRequest)
    -> Result<RoomId, BookingError>;

    /// Marks a room as booked.
    async fn book_room(&self, room_id: &RoomId) -> Result<(), BookingError>;

    /// Marks a room as available again.
    async fn unbook_room(&self, room_id: &RoomId) -> Result<(), BookingError>;

    /// Returns the rooms that are currently available.
    async fn get_available_rooms(&self) -> Result<Vec<Room>, BookingError>;

    /// Resolves and books a room in one step, so two concurrent callers can
    /// never obtain the same room.
    async fn reserve_room(&self, request: &BookingRequest) -> Result<RoomId, BookingError>;
}

#[derive(Debug, Clone, Copy)]
struct RoomSlot {
    capacity: u32,
    available: bool,
}

/// In-memory room inventory.
///
/// Rooms are kept ordered by ID. Selection is best fit: the smallest
/// available room that holds the guests, ties going to the lowest ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilityResolver {
    rooms: Arc<RwLock<BTreeMap<RoomId, RoomSlot>>>,
}

impl InMemoryAvailabilityResolver {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory where every given room is available.
    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let rooms = rooms
            .into_iter()
            .map(|room| {
                (
                    room.id,
                    RoomSlot {
                        capacity: room.capacity,
                        available: true,
                    },
                )
            })
            .collect();
        Self {
            rooms: Arc::new(RwLock::new(rooms)),
        }
    }

    /// Adds an available room, replacing any room with the same ID.
    pub async fn add_room(&self, room: Room) {
        self.rooms.write().await.insert(
            room.id,
            RoomSlot {
                capacity: room.capacity,
                available: true,
            },
        );
    }

    /// Returns the total number of rooms, booked or not.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Returns `Some(true)` if the room exists and is free.
    pub async fn is_available(&self, room_id: &RoomId) -> Option<bool> {
        self.rooms.read().await.get(room_id).map(|slot| slot.available)
    }

    fn best_fit(rooms: &BTreeMap<RoomId, RoomSlot>, guests: u32) -> Result<RoomId, BookingError> {
        rooms
            .iter()
            .filter(|(_, slot)| slot.available && slot.capacity >= guests)
            .min_by_key(|(_, slot)| slot.capacity)
            .map(|(id, _)| id.clone())
            .ok_or(BookingError::NoRoomAvailable { guests })
    }
}

#[async_trait]
impl AvailabilityResolver for InMemoryAvailabilityResolver {
    async fn find_available_room_id(
        &self,
        request: &BookingRequest,
    ) -> Result<RoomId, BookingError> {
        let rooms = self.rooms.read().await;
        Self::best_fit(&rooms, request.guest_count())
    }

    async fn book_room(&self, room_id: &RoomId) -> Result<(), BookingError> {
        let mut rooms = self.rooms.write().await;
        let slot = rooms
            .get_mut(room_id)
            .ok_or_else(|| BookingError::UnknownRoom(room_id.clone()))?;

        if !slot.available {
            return Err(BookingError::RoomAlreadyBooked(room_id.clone()));
        }
        slot.available = false;
        Ok(())
    }

    async fn unbook_room(&self, room_id: &RoomId) -> Result<(), BookingError> {
        let mut rooms = self.rooms.write().await;
        let slot = rooms
            .get_mut(room_id)
            .ok_or_else(|| BookingError::UnknownRoom(room_id.clone()))?;

        if slot.available {
            tracing::debug!(%room_id, "room already available");
        }
        slot.available = true;
        Ok(())
    }

    async fn get_available_rooms(&self) -> Result<Vec<Room>, BookingError> {
        let rooms = self.rooms.read().await;
        Ok(rooms
            .iter()
            .filter(|(_, slot)| slot.available)
            .map(|(id, slot)| Room::new(id.clone(), slot.capacity))
            .collect())
    }

    async fn reserve_room(&self, request: &BookingRequest) -> Result<RoomId, BookingError> {
        let mut rooms = self.rooms.write().await;
        let room_id = Self::best_fit(&rooms, request.guest_count())?;

        if let Some(slot) = rooms.get_mut(&room_id) {
            slot.available = false;
        }
        Ok(room_id)
    }
}
