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

use super::defaults;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::collections::HashSet;
use std::time::Duration;

use crate::types::room::Room;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Network configuration
    #[serde(default)]
    pub network: Network,
    /// Rooms which can be booked
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Network {
    /// Server address
    #[serde(default = "defaults::server_listen_address")]
    pub address: std::net::IpAddr,
    /// Server port
    #[serde(default = "defaults::server_port")]
    pub port: u16,
    /// Maximum time spent handling a single request.
    #[serde(
        default = "defaults::request_timeout",
        deserialize_with = "de_duration_seconds",
        serialize_with = "ser_duration_seconds",
        rename = "request-timeout-seconds"
    )]
    pub request_timeout: Duration,
    /// How long in-flight requests may take to finish on shutdown.
    #[serde(
        default = "defaults::shutdown_timeout",
        deserialize_with = "de_duration_seconds",
        serialize_with = "ser_duration_seconds",
        rename = "shutdown-timeout-seconds"
    )]
    pub shutdown_timeout: Duration,
}

impl super::Config for Config {
    const DEFAULT_TOML: &'static str = include_str!("../../default.toml");

    const DEFAULT_FILE: &'static str = "server.toml";

    fn validate(&self) -> Result<(), String> {
        if self.network.request_timeout.is_zero() {
            return Err("request-timeout-seconds must be greater than zero".to_string());
        }

        let mut seen = HashSet::new();
        for room in &self.rooms {
            if room.hotel_id.is_empty() || room.room_type_id.is_empty() {
                return Err(format!("Room with empty id: {:?}", room));
            }
            if !seen.insert(room.key()) {
                return Err(format!("Duplicate room: {}", room.key()));
            }
        }

        Ok(())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self {
            address: defaults::server_listen_address(),
            port: defaults::server_port(),
            request_timeout: defaults::request_timeout(),
            shutdown_timeout: defaults::shutdown_timeout(),
        }
    }
}

/// Deserialize an integer as a number of seconds.
fn de_duration_seconds<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    let seconds = u64::deserialize(d)?;
    Ok(Duration::from_secs(seconds))
}

fn ser_duration_seconds<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(duration.as_secs())
}
