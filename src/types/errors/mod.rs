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

mod booking;
mod internal;

pub use booking::Error as BookingError;
pub use internal::Error as InternalError;

use http::StatusCode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Booking(BookingError),
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not implemented")]
    NotImplemented,
}

impl ServerError {
    /// Status code and machine readable error code sent to the client.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Booking(err) => match err {
                BookingError::InvalidDateRange => (StatusCode::BAD_REQUEST, "invalid_date_range"),
                BookingError::UnknownRoom => (StatusCode::NOT_FOUND, "unknown_room"),
                BookingError::RoomUnavailable => (StatusCode::CONFLICT, "room_unavailable"),
                BookingError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::NotImplemented => (StatusCode::NOT_IMPLEMENTED, "not_implemented"),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    error_description: String,
}

impl axum::response::IntoResponse for ServerError {
    type Body = axum::body::Full<hyper::body::Bytes>;

    type BodyError = <Self::Body as axum::body::HttpBody>::Error;

    fn into_response(self) -> http::Response<Self::Body> {
        let (status, error) = self.status();
        // Internal failures stay opaque to the client; the details are logged by the handler.
        let error_description = match &self {
            Self::Internal(_) | Self::Booking(BookingError::Internal(_)) => {
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };
        let mut response = axum::Json(ErrorBody {
            error,
            error_description,
        })
        .into_response();
        *response.status_mut() = status;

        response
    }
}

impl From<BookingError> for ServerError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Internal(err) => Self::Internal(err),
            err => Self::Booking(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use serde_json::Value;

    async fn body_json(err: ServerError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn booking_errors_map_to_distinct_statuses() {
        let cases = [
            (BookingError::InvalidDateRange, StatusCode::BAD_REQUEST),
            (BookingError::UnknownRoom, StatusCode::NOT_FOUND),
            (BookingError::RoomUnavailable, StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status().0, status);
        }
    }

    #[test]
    fn internal_booking_errors_are_unwrapped() {
        let err = ServerError::from(BookingError::Internal(InternalError::Timeout));
        assert_eq!(err, ServerError::Internal(InternalError::Timeout));
        assert_eq!(err.status().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn response_carries_validator_message() {
        let (status, body) = body_json(BookingError::RoomUnavailable.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "room_unavailable");
        assert_eq!(
            body["error_description"],
            "room is not available for the selected dates"
        );
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let err = ServerError::Internal(InternalError::Storage("disk on fire".to_string()));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal");
        assert_eq!(body["error_description"], "internal server error");
    }

    #[tokio::test]
    async fn not_implemented() {
        let (status, body) = body_json(ServerError::NotImplemented).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error"], "not_implemented");
    }
}
