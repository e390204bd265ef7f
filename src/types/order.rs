// Copyright 2022 the roombook authors.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

use super::errors::BookingError;
use super::room::RoomKey;
use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

pub type ID = Uuid;

/// A booking as submitted by a client, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub hotel_id: String,
    #[serde(rename = "room_id")]
    pub room_type_id: String,
    #[serde(rename = "email")]
    pub user_email: String,
    /// Start of the stay. `None` if the client didn't set it; a zero timestamp also counts as
    /// unset.
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    /// End of the stay, exclusive. `None` if the client didn't set it.
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl BookingRequest {
    pub fn room_key(&self) -> RoomKey {
        RoomKey::new(&self.hotel_id, &self.room_type_id)
    }
}

/// Half-open interval `[from, to)` with `from` strictly before `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateRange {
    /// Builds a range from optional bounds, failing if either is unset or they are not in order.
    pub fn new(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, BookingError> {
        match (from.filter(is_set), to.filter(is_set)) {
            (Some(from), Some(to)) if from < to => Ok(Self { from, to }),
            _ => Err(BookingError::InvalidDateRange),
        }
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Whether the two ranges share at least one instant. Ranges which only touch at an endpoint
    /// don't overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.from < other.to && self.to > other.from
    }
}

/// Whether `instant` is a real timestamp rather than the zero value `0001-01-01T00:00:00Z`.
fn is_set(instant: &DateTime<Utc>) -> bool {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).single() != Some(*instant)
}

/// A confirmed booking of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: ID,
    pub hotel_id: String,
    #[serde(rename = "room_id")]
    pub room_type_id: String,
    #[serde(rename = "email")]
    pub user_email: String,
    #[serde(flatten)]
    pub stay: DateRange,
}

impl Order {
    pub fn new(request: BookingRequest, stay: DateRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            hotel_id: request.hotel_id,
            room_type_id: request.room_type_id,
            user_email: request.user_email,
            stay,
        }
    }

    pub fn room_key(&self) -> RoomKey {
        RoomKey::new(&self.hotel_id, &self.room_type_id)
    }

    pub fn is_for(&self, key: &RoomKey) -> bool {
        self.hotel_id == key.hotel_id && self.room_type_id == key.room_type_id
    }
}
