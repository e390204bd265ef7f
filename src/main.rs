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

use roombook::config::server::Config;
use roombook::config::Config as _;
use roombook::config::Error as ConfigError;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    const HIDE_TIMESTAMP_ENV: &str = "ROOMBOOK_HIDE_TIMESTAMP";

    roombook::config::init_logging(env::var_os(HIDE_TIMESTAMP_ENV).is_some())?;
    let config_path = env::var("ROOMBOOK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Config::default_path());

    debug!("Config path: {:?}", config_path);

    let config = match Config::read_or_write_defaults(&config_path) {
        Ok(config) => config,
        Err(ConfigError::IO(err)) => {
            warn!(
                "Config file at {:?} could not be read or created ({}), using defaults",
                config_path, err
            );
            Config::parse(Config::DEFAULT_TOML)?
        }
        Err(err) => return Err(err.into()),
    };
    debug!("Config: {:#?}", config);

    let address = SocketAddr::new(config.network.address, config.network.port);
    let shutdown_timeout = config.network.shutdown_timeout;
    let state = roombook::State::new(config);

    let handle = axum_server::Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone(), shutdown_timeout));

    info!("Starting server at {}", address);
    axum_server::bind(address)
        .handle(handle)
        .serve(roombook::app(state).into_make_service())
        .await?;
    info!("Server stopped");

    Ok(())
}

/// Waits for Ctrl-C or SIGTERM, then stops accepting connections and gives in-flight requests up
/// to `timeout` to finish.
async fn shutdown_on_signal(handle: axum_server::Handle, timeout: std::time::Duration) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server");
    handle.graceful_shutdown(Some(timeout));
}
