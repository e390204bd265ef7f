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

use crate::extractors::BookingPayload;
use crate::types::errors::InternalError;
use crate::types::errors::ServerError;
use crate::types::order;
use crate::types::order::Order;
use crate::State;
use axum::extract::Extension;
use axum::extract::Path;
use axum::Json;
use http::StatusCode;
use std::future::Future;
use std::time::Duration;

async fn with_deadline<T>(
    deadline: Duration,
    future: impl Future<Output = T>,
) -> Result<T, InternalError> {
    tokio::time::timeout(deadline, future)
        .await
        .map_err(|_| InternalError::Timeout)
}

#[tracing::instrument(name = "CreateOrder", skip(state), err)]
pub async fn create(
    Extension(state): Extension<State>,
    BookingPayload(request): BookingPayload,
) -> Result<(StatusCode, Json<Order>), ServerError> {
    let order = with_deadline(
        state.config.network.request_timeout,
        state.bookings.create_booking(request),
    )
    .await??;

    tracing::info!(id = %order.id, room = %order.room_key(), "Created order");
    Ok((StatusCode::CREATED, Json(order)))
}

#[tracing::instrument(name = "GetOrder", skip(state), err)]
pub async fn get(
    Extension(state): Extension<State>,
    Path(id): Path<order::ID>,
) -> Result<Json<Order>, ServerError> {
    with_deadline(state.config.network.request_timeout, state.orders.get(&id))
        .await??
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("order {}", id)))
}

pub async fn update(Path(_id): Path<order::ID>) -> ServerError {
    ServerError::NotImplemented
}

pub async fn delete(Path(_id): Path<order::ID>) -> ServerError {
    ServerError::NotImplemented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::server::Config;
    use crate::config::Config as _;
    use crate::types::errors::BookingError;
    use crate::types::order::BookingRequest;
    use chrono::TimeZone;
    use chrono::Utc;

    fn state() -> State {
        State::new(Config::parse(Config::DEFAULT_TOML).unwrap())
    }

    fn payload(room_type_id: &str, from: u32, to: u32) -> BookingPayload {
        BookingPayload(BookingRequest {
            hotel_id: "reddison".to_string(),
            room_type_id: room_type_id.to_string(),
            user_email: "guest@example.com".to_string(),
            from: Some(Utc.with_ymd_and_hms(2024, 1, from, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 1, to, 0, 0, 0).unwrap()),
        })
    }

    async fn book(state: &State, room_type_id: &str, from: u32, to: u32) -> Result<Order, ServerError> {
        create(Extension(state.clone()), payload(room_type_id, from, to))
            .await
            .map(|(status, Json(order))| {
                assert_eq!(status, StatusCode::CREATED);
                order
            })
    }

    #[tokio::test]
    async fn booking_scenarios() {
        let state = state();

        let first = book(&state, "lux", 1, 5).await.unwrap();
        assert_eq!(
            book(&state, "lux", 3, 7).await.unwrap_err(),
            ServerError::Booking(BookingError::RoomUnavailable)
        );
        book(&state, "lux", 5, 10).await.unwrap();
        assert_eq!(
            book(&state, "suite", 1, 5).await.unwrap_err(),
            ServerError::Booking(BookingError::UnknownRoom)
        );
        assert_eq!(
            book(&state, "premium", 5, 1).await.unwrap_err(),
            ServerError::Booking(BookingError::InvalidDateRange)
        );

        let Json(fetched) = get(Extension(state.clone()), Path(first.id)).await.unwrap();
        assert_eq!(fetched, first);
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let err = get(Extension(state()), Path(order::ID::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.status().0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_and_delete_are_not_implemented() {
        let id = order::ID::new_v4();
        assert_eq!(update(Path(id)).await, ServerError::NotImplemented);
        assert_eq!(delete(Path(id)).await, ServerError::NotImplemented);
    }

    #[tokio::test]
    async fn deadline_expiry_is_internal() {
        let result = with_deadline(Duration::from_millis(10), std::future::pending::<()>()).await;
        assert_eq!(result, Err(InternalError::Timeout));
    }
}
