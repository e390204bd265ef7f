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

use crate::types::errors::ServerError;
use crate::types::order::BookingRequest;
use async_trait::async_trait;
use axum::body::Body;
use axum::extract::FromRequest;
use axum::extract::RequestParts;
use hyper::body::Bytes;

/// JSON body of a booking request. Unlike `axum::Json`, malformed bodies are rejected with a
/// `ServerError` so clients get the same error format as for every other failure.
#[derive(Debug)]
pub struct BookingPayload(pub BookingRequest);

#[async_trait]
impl FromRequest<Body> for BookingPayload {
    type Rejection = ServerError;

    async fn from_request(req: &mut RequestParts<Body>) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req)
            .await
            .map_err(|_| ServerError::Validation("failed to read request body".to_string()))?;
        let request = serde_json::from_slice(&body)
            .map_err(|err| ServerError::Validation(err.to_string()))?;
        Ok(Self(request))
    }
}
