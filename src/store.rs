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

//! Persisted orders.

use crate::types::errors::InternalError;
use crate::types::order;
use crate::types::order::Order;
use crate::types::room::RoomKey;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Storage of confirmed orders. Orders are never updated or removed once created.
///
/// Implementations don't check for overlapping orders themselves; callers serialise the check and
/// the following `create` per room.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create(&self, order: Order) -> Result<(), InternalError>;

    /// Returns all orders for the given room, in the order they were created.
    async fn orders_for(&self, room: &RoomKey) -> Result<Vec<Order>, InternalError>;

    async fn get(&self, id: &order::ID) -> Result<Option<Order>, InternalError>;
}

#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, order: Order) -> Result<(), InternalError> {
        self.orders.write().push(order);
        Ok(())
    }

    async fn orders_for(&self, room: &RoomKey) -> Result<Vec<Order>, InternalError> {
        Ok(self
            .orders
            .read()
            .iter()
            .filter(|order| order.is_for(room))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &order::ID) -> Result<Option<Order>, InternalError> {
        Ok(self.orders.read().iter().find(|order| order.id == *id).cloned())
    }
}
