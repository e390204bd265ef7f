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

use serde::Deserialize;
use serde::Serialize;

/// A bookable room type of a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Room {
    /// ID of the hotel offering the room.
    pub hotel_id: String,
    /// ID of the room type within the hotel.
    pub room_type_id: String,
}

impl Room {
    pub fn key(&self) -> RoomKey {
        RoomKey::new(&self.hotel_id, &self.room_type_id)
    }
}

/// Composite key of a room, which orders reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomKey {
    pub hotel_id: String,
    pub room_type_id: String,
}

impl RoomKey {
    pub fn new(hotel_id: &str, room_type_id: &str) -> Self {
        Self {
            hotel_id: hotel_id.to_owned(),
            room_type_id: room_type_id.to_owned(),
        }
    }
}

impl std::fmt::Display for RoomKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.hotel_id, self.room_type_id)
    }
}
