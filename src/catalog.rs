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

//! The fixed set of rooms each hotel offers.

use crate::types::errors::InternalError;
use crate::types::room::Room;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait RoomCatalog: Send + Sync {
    /// Returns all rooms of the given hotel, in no particular order. An unknown hotel has no
    /// rooms.
    async fn rooms_for_hotel(&self, hotel_id: &str) -> Result<Vec<Room>, InternalError>;
}

/// Catalog held in memory, fixed at construction.
#[derive(Debug, Default)]
pub struct MemoryRoomCatalog {
    rooms: HashMap<String, Vec<Room>>,
}

impl MemoryRoomCatalog {
    pub fn new(rooms: impl IntoIterator<Item = Room>) -> Self {
        let mut by_hotel: HashMap<String, Vec<Room>> = HashMap::new();
        for room in rooms {
            by_hotel
                .entry(room.hotel_id.clone())
                .or_default()
                .push(room);
        }
        Self { rooms: by_hotel }
    }
}

#[async_trait]
impl RoomCatalog for MemoryRoomCatalog {
    async fn rooms_for_hotel(&self, hotel_id: &str) -> Result<Vec<Room>, InternalError> {
        Ok(self.rooms.get(hotel_id).cloned().unwrap_or_default())
    }
}
