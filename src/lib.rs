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

pub mod booking;
pub mod catalog;
pub mod config;
mod extractors;
mod orders;
pub mod store;
pub mod types;

use axum::routing::{get, post};
use axum::{AddExtensionLayer, Router};
use booking::BookingValidator;
use catalog::MemoryRoomCatalog;
use config::server::Config;
use http::{Request, Response};
use hyper::Body;
use std::sync::Arc;
use std::time::Duration;
use store::MemoryOrderStore;
use store::OrderStore;
use tower_http::trace::TraceLayer;
use tracing::{debug, debug_span, Span};

async fn health_check() -> &'static str {
    "I'm alive!"
}

#[derive(Clone)]
pub struct State {
    pub config: Arc<Config>,
    pub orders: Arc<dyn OrderStore>,
    pub bookings: Arc<BookingValidator>,
}

impl State {
    /// Builds in-memory stores, with the room catalog taken from the configuration.
    pub fn new(config: Config) -> Self {
        let catalog = Arc::new(MemoryRoomCatalog::new(config.rooms.iter().cloned()));
        let orders: Arc<dyn OrderStore> = Arc::new(MemoryOrderStore::new());
        let bookings = Arc::new(BookingValidator::new(catalog, orders.clone()));
        Self {
            config: Arc::new(config),
            orders,
            bookings,
        }
    }
}

pub fn app(state: State) -> Router<hyper::Body> {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/orders", post(orders::create))
        .route(
            "/orders/:id",
            get(orders::get)
                .put(orders::update)
                .delete(orders::delete),
        )
        .layer(AddExtensionLayer::new(state))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    debug_span!(
                        "Request",
                        status_code = tracing::field::Empty,
                        ms = tracing::field::Empty,
                        method = tracing::field::display(request.method()),
                        path = tracing::field::display(request.uri().path()),
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status_code", &tracing::field::display(response.status()));
                    span.record("ms", &tracing::field::display(latency.as_millis()));

                    debug!("response processed")
                }),
        )
}
