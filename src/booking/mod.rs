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

//! Validation and creation of bookings.

mod locks;

pub use locks::KeyedLocks;

use crate::catalog::RoomCatalog;
use crate::store::OrderStore;
use crate::types::errors::BookingError;
use crate::types::errors::InternalError;
use crate::types::order::BookingRequest;
use crate::types::order::DateRange;
use crate::types::order::Order;
use crate::types::room::RoomKey;
use std::sync::Arc;

/// Accepts a booking only if its dates are valid, the room exists and no existing order for the
/// same room overlaps it.
///
/// Checking availability and storing the order happen under a per-room lock, so concurrent
/// bookings for the same room through the same validator can't both succeed. Errors are returned
/// to the caller, never logged here.
pub struct BookingValidator {
    catalog: Arc<dyn RoomCatalog>,
    store: Arc<dyn OrderStore>,
    locks: KeyedLocks,
}

impl BookingValidator {
    pub fn new(catalog: Arc<dyn RoomCatalog>, store: Arc<dyn OrderStore>) -> Self {
        Self {
            catalog,
            store,
            locks: KeyedLocks::new(),
        }
    }

    pub async fn create_booking(&self, request: BookingRequest) -> Result<Order, BookingError> {
        let stay = DateRange::new(request.from, request.to)?;
        let room = request.room_key();

        if !self.is_known_room(&room).await? {
            return Err(BookingError::UnknownRoom);
        }

        let _guard = self.locks.lock(&room).await;
        if !self.is_room_available(&room, &stay).await? {
            return Err(BookingError::RoomUnavailable);
        }

        let order = Order::new(request, stay);
        self.store.create(order.clone()).await?;
        Ok(order)
    }

    async fn is_known_room(&self, room: &RoomKey) -> Result<bool, InternalError> {
        Ok(self
            .catalog
            .rooms_for_hotel(&room.hotel_id)
            .await?
            .iter()
            .any(|known| known.room_type_id == room.room_type_id))
    }

    async fn is_room_available(
        &self,
        room: &RoomKey,
        stay: &DateRange,
    ) -> Result<bool, InternalError> {
        Ok(!self
            .store
            .orders_for(room)
            .await?
            .iter()
            .any(|order| order.stay.overlaps(stay)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryRoomCatalog;
    use crate::store::MemoryOrderStore;
    use crate::types::order;
    use crate::types::room::Room;
    use async_trait::async_trait;
    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn request(
        room_type_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> BookingRequest {
        BookingRequest {
            hotel_id: "reddison".to_string(),
            room_type_id: room_type_id.to_string(),
            user_email: "guest@example.com".to_string(),
            from,
            to,
        }
    }

    fn lux(from: u32, to: u32) -> BookingRequest {
        request("lux", Some(day(from)), Some(day(to)))
    }

    fn validator() -> (BookingValidator, Arc<MemoryOrderStore>) {
        let catalog = MemoryRoomCatalog::new(vec![Room {
            hotel_id: "reddison".to_string(),
            room_type_id: "lux".to_string(),
        }]);
        let store = Arc::new(MemoryOrderStore::new());
        (
            BookingValidator::new(Arc::new(catalog), store.clone()),
            store,
        )
    }

    async fn stored(store: &MemoryOrderStore) -> Vec<Order> {
        store
            .orders_for(&RoomKey::new("reddison", "lux"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn valid_booking_is_persisted() {
        let (validator, store) = validator();

        let order = validator.create_booking(lux(1, 5)).await.unwrap();

        assert_eq!(order.hotel_id, "reddison");
        assert_eq!(order.room_type_id, "lux");
        assert_eq!(order.user_email, "guest@example.com");
        assert_eq!(order.stay.from(), day(1));
        assert_eq!(order.stay.to(), day(5));
        assert_eq!(stored(&store).await, vec![order.clone()]);
        assert_eq!(store.get(&order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn overlapping_booking_is_refused() {
        let (validator, store) = validator();
        validator.create_booking(lux(1, 5)).await.unwrap();

        assert_eq!(
            validator.create_booking(lux(3, 7)).await,
            Err(BookingError::RoomUnavailable)
        );
        assert_eq!(
            validator.create_booking(lux(2, 3)).await,
            Err(BookingError::RoomUnavailable)
        );
        assert_eq!(stored(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn booking_starting_when_another_ends_is_accepted() {
        let (validator, store) = validator();
        validator.create_booking(lux(5, 10)).await.unwrap();

        validator.create_booking(lux(1, 5)).await.unwrap();
        validator.create_booking(lux(10, 12)).await.unwrap();
        assert_eq!(stored(&store).await.len(), 3);
    }

    #[tokio::test]
    async fn unknown_room_is_refused() {
        let (validator, store) = validator();

        assert_eq!(
            validator
                .create_booking(request("suite", Some(day(1)), Some(day(5))))
                .await,
            Err(BookingError::UnknownRoom)
        );
        let mut other_hotel = lux(1, 5);
        other_hotel.hotel_id = "hilton".to_string();
        assert_eq!(
            validator.create_booking(other_hotel).await,
            Err(BookingError::UnknownRoom)
        );
        assert!(stored(&store).await.is_empty());
    }

    #[tokio::test]
    async fn invalid_dates_are_refused() {
        let (validator, store) = validator();

        for request in [
            lux(10, 5),
            lux(5, 5),
            request("lux", None, Some(day(5))),
            request("lux", Some(day(1)), None),
        ] {
            assert_eq!(
                validator.create_booking(request).await,
                Err(BookingError::InvalidDateRange)
            );
        }
        assert!(stored(&store).await.is_empty());
    }

    #[tokio::test]
    async fn zero_timestamp_is_refused() {
        let (validator, store) = validator();
        let request: BookingRequest = serde_json::from_str(
            r#"{
                "hotel_id": "reddison",
                "room_id": "lux",
                "email": "guest@example.com",
                "from": "0001-01-01T00:00:00Z",
                "to": "2024-01-05T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(
            validator.create_booking(request).await,
            Err(BookingError::InvalidDateRange)
        );
        assert!(stored(&store).await.is_empty());
    }

    #[tokio::test]
    async fn dates_are_checked_before_room() {
        let (validator, _) = validator();
        assert_eq!(
            validator.create_booking(request("suite", None, None)).await,
            Err(BookingError::InvalidDateRange)
        );
    }

    #[tokio::test]
    async fn room_is_checked_before_availability() {
        let (validator, _) = validator();
        validator.create_booking(lux(1, 5)).await.unwrap();
        assert_eq!(
            validator
                .create_booking(request("suite", Some(day(1)), Some(day(5))))
                .await,
            Err(BookingError::UnknownRoom)
        );
    }

    #[tokio::test]
    async fn room_availability() {
        let (validator, store) = validator();
        let room = RoomKey::new("reddison", "lux");
        let stay = |from, to| DateRange::new(Some(day(from)), Some(day(to))).unwrap();

        assert!(validator.is_room_available(&room, &stay(1, 5)).await.unwrap());
        store
            .create(Order::new(lux(1, 5), stay(1, 5)))
            .await
            .unwrap();
        assert!(validator.is_room_available(&room, &stay(6, 10)).await.unwrap());
        assert!(!validator.is_room_available(&room, &stay(3, 7)).await.unwrap());
    }

    #[tokio::test]
    async fn known_room() {
        let (validator, _) = validator();
        assert!(validator
            .is_known_room(&RoomKey::new("reddison", "lux"))
            .await
            .unwrap());
        assert!(!validator
            .is_known_room(&RoomKey::new("reddison", "unknown_room"))
            .await
            .unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_overlapping_bookings_admit_exactly_one() {
        const BOOKINGS: u32 = 16;
        let (validator, store) = validator();
        let validator = Arc::new(validator);

        let handles = (0..BOOKINGS).map(|i| {
            let validator = validator.clone();
            // Every range covers 9 to 11 January, so all pairs overlap.
            tokio::spawn(async move { validator.create_booking(lux(1 + i % 9, 11 + i % 7)).await })
        });
        let results = futures::future::join_all(handles).await;

        let mut successes = 0;
        for result in results {
            match result.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => assert_eq!(err, BookingError::RoomUnavailable),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(stored(&store).await.len(), 1);
    }

    struct BrokenStore;

    #[async_trait]
    impl OrderStore for BrokenStore {
        async fn create(&self, _order: Order) -> Result<(), InternalError> {
            Err(InternalError::Storage("read-only".to_string()))
        }

        async fn orders_for(&self, _room: &RoomKey) -> Result<Vec<Order>, InternalError> {
            Ok(vec![])
        }

        async fn get(&self, _id: &order::ID) -> Result<Option<Order>, InternalError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn store_failures_are_internal() {
        let catalog = MemoryRoomCatalog::new(vec![Room {
            hotel_id: "reddison".to_string(),
            room_type_id: "lux".to_string(),
        }]);
        let validator = BookingValidator::new(Arc::new(catalog), Arc::new(BrokenStore));

        assert_eq!(
            validator.create_booking(lux(1, 5)).await,
            Err(BookingError::Internal(InternalError::Storage(
                "read-only".to_string()
            )))
        );
    }
}
