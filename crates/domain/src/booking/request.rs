//! Booking request value type and its builder.

use chrono::NaiveDate;
use common::{RoomId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A guest's request to stay in the hotel.
///
/// The request is an immutable value: equality and hashing compare every
/// field, including the assigned room. Assigning a room produces a new value
/// via [`BookingRequest::with_room`] so the caller's copy is never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingRequest {
    user_id: UserId,
    date_from: NaiveDate,
    date_to: NaiveDate,
    guest_count: u32,
    prepaid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    room_id: Option<RoomId>,
}

impl BookingRequest {
    /// Creates a new builder.
    pub fn builder() -> BookingRequestBuilder {
        BookingRequestBuilder::default()
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date_from(&self) -> NaiveDate {
        self.date_from
    }

    pub fn date_to(&self) -> NaiveDate {
        self.date_to
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    pub fn is_prepaid(&self) -> bool {
        self.prepaid
    }

    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    /// Whole days between arrival and departure. Negative when the range is
    /// inverted.
    pub fn nights(&self) -> i64 {
        (self.date_to - self.date_from).num_days()
    }

    /// Returns a copy of this request carrying the given room.
    pub fn with_room(&self, room_id: RoomId) -> Self {
        Self {
            room_id: Some(room_id),
            ..self.clone()
        }
    }

    /// Checks the rules every bookable request must satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.is_empty() {
            return Err(DomainError::InvalidRequest(
                "user_id must not be empty".to_string(),
            ));
        }
        if self.guest_count == 0 {
            return Err(DomainError::InvalidRequest(
                "guest_count must be greater than 0".to_string(),
            ));
        }
        if self.date_to <= self.date_from {
            return Err(DomainError::InvalidRequest(format!(
                "date_to ({}) must be after date_from ({})",
                self.date_to, self.date_from
            )));
        }
        Ok(())
    }
}

/// Builder for [`BookingRequest`].
///
/// `build` only checks that required fields are present; business rules are
/// checked by [`BookingRequest::validate`].
#[derive(Debug, Clone, Default)]
pub struct BookingRequestBuilder {
    user_id: Option<UserId>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    guest_count: Option<u32>,
    prepaid: bool,
    room_id: Option<RoomId>,
}

impl BookingRequestBuilder {
    pub fn user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn guest_count(mut self, count: u32) -> Self {
        self.guest_count = Some(count);
        self
    }

    pub fn prepaid(mut self, prepaid: bool) -> Self {
        self.prepaid = prepaid;
        self
    }

    /// Sets the room up front. Mostly useful for rebuilding stored records.
    pub fn room_id(mut self, room_id: impl Into<RoomId>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    pub fn build(self) -> Result<BookingRequest, DomainError> {
        Ok(BookingRequest {
            user_id: self.user_id.ok_or(DomainError::MissingField("user_id"))?,
            date_from: self.date_from.ok_or(DomainError::MissingField("date_from"))?,
            date_to: self.date_to.ok_or(DomainError::MissingField("date_to"))?,
            guest_count: self
                .guest_count
                .ok_or(DomainError::MissingField("guest_count"))?,
            prepaid: self.prepaid,
            room_id: self.room_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request() -> BookingRequest {
        BookingRequest::builder()
            .user_id("1")
            .date_from(date(2020, 1, 1))
            .date_to(date(2020, 1, 5))
            .guest_count(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let req = request();
        assert!(!req.is_prepaid());
        assert!(req.room_id().is_none());
        assert_eq!(req.nights(), 4);
    }

    #[test]
    fn test_builder_missing_field() {
        let result = BookingRequest::builder()
            .user_id("1")
            .date_from(date(2020, 1, 1))
            .guest_count(2)
            .build();
        assert_eq!(result, Err(DomainError::MissingField("date_to")));
    }

    #[test]
    fn test_with_room_leaves_original_untouched() {
        let original = request();
        let assigned = original.with_room(RoomId::new("1.3"));

        assert!(original.room_id().is_none());
        assert_eq!(assigned.room_id(), Some(&RoomId::new("1.3")));
        assert_ne!(original, assigned);
    }

    #[test]
    fn test_value_equality_includes_room() {
        let a = request().with_room(RoomId::new("1.3"));
        let b = request().with_room(RoomId::new("1.3"));
        let c = request().with_room(RoomId::new("2.1"));

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_same_day_and_inverted_ranges() {
        let same_day = BookingRequest::builder()
            .user_id("1")
            .date_from(date(2020, 1, 1))
            .date_to(date(2020, 1, 1))
            .guest_count(2)
            .build()
            .unwrap();
        assert!(matches!(
            same_day.validate(),
            Err(DomainError::InvalidRequest(_))
        ));

        let inverted = BookingRequest::builder()
            .user_id("1")
            .date_from(date(2020, 1, 5))
            .date_to(date(2020, 1, 1))
            .guest_count(2)
            .build()
            .unwrap();
        assert_eq!(inverted.nights(), -4);
        assert!(matches!(
            inverted.validate(),
            Err(DomainError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_guests_and_blank_user() {
        let no_guests = BookingRequest::builder()
            .user_id("1")
            .date_from(date(2020, 1, 1))
            .date_to(date(2020, 1, 2))
            .guest_count(0)
            .build()
            .unwrap();
        assert!(no_guests.validate().is_err());

        let blank_user = BookingRequest::builder()
            .user_id(" ")
            .date_from(date(2020, 1, 1))
            .date_to(date(2020, 1, 2))
            .guest_count(1)
            .build()
            .unwrap();
        assert!(blank_user.validate().is_err());
    }

    #[test]
    fn test_serialization_omits_unassigned_room() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("room_id").is_none());
        assert_eq!(json["date_from"], "2020-01-01");

        let assigned = request().with_room(RoomId::new("1.3"));
        let json = serde_json::to_string(&assigned).unwrap();
        let back: BookingRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(assigned, back);
    }
}
