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

pub mod defaults;
pub mod server;

use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    env::{self, VarError},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{info, Level};

pub trait Config: DeserializeOwned + Serialize {
    const DEFAULT_TOML: &'static str;
    const DEFAULT_FILE: &'static str;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn write_defaults(path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        file.write_all(Self::DEFAULT_TOML.as_bytes())?;
        Ok(())
    }

    /// Parses the configuration, substituting `${NAME}` with the value of environment variable
    /// `NAME`.
    fn parse(s: &str) -> Result<Self, Error> {
        let re = Regex::new(r"\$\{([a-zA-Z_]+)\}").expect("variable pattern is valid");
        let mut missing = None;
        let s = re.replace_all(s, |caps: &regex::Captures| {
            let name = &caps[1];
            match env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });
        if let Some(name) = missing {
            return Err(Error::MissingVariable(name));
        }
        let config: Self = toml::from_str(&s)?;
        config.validate().map_err(Error::Validation)?;

        Ok(config)
    }

    fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Reads the configuration at `path`. If there is no file yet, the defaults are written there
    /// first.
    fn read_or_write_defaults(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        match Self::read(path) {
            Err(Error::IO(err)) if err.kind() == io::ErrorKind::NotFound => {
                Self::write_defaults(path)?;
                info!("Wrote default config to {:?}", path);
                Self::parse(Self::DEFAULT_TOML)
            }
            result => result,
        }
    }

    fn default_path() -> PathBuf {
        xdg::BaseDirectories::with_prefix("roombook")
            .map(|dirs| dirs.get_config_home().join(Self::DEFAULT_FILE))
            .unwrap_or_else(|_| PathBuf::from(Self::DEFAULT_FILE))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    IO(#[from] io::Error),
    #[error("toml deserialize: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("validation: {0}")]
    Validation(String),
    #[error("environment variable {0} is not set or not valid unicode")]
    MissingVariable(String),
}

/// Installs the global `tracing` subscriber. The level is read from `ROOMBOOK_LOG`, defaulting to
/// `info`.
pub fn init_logging(hide_timestamp: bool) -> Result<(), Error> {
    const LOG_ENV: &str = "ROOMBOOK_LOG";

    let env_filter = match env::var(LOG_ENV) {
        Ok(env) => env,
        Err(VarError::NotPresent) => "info".to_string(),
        Err(VarError::NotUnicode(_)) => return Err(Error::MissingVariable(LOG_ENV.to_string())),
    };
    let level = Level::from_str(&env_filter)
        .map_err(|err| Error::Validation(format!("invalid `{}`: {}", LOG_ENV, err)))?;

    if hide_timestamp {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .init()
    } else {
        tracing_subscriber::fmt().with_max_level(level).init()
    };
    Ok(())
}
