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

use crate::types::room::RoomKey;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::OwnedMutexGuard;

/// One async mutex per room, created on first use.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<RoomKey, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no one else holds the lock for `key`, and takes it until the guard is dropped.
    pub async fn lock(&self, key: &RoomKey) -> OwnedMutexGuard<()> {
        // The map entry must be released before awaiting, or other keys in the same shard would
        // block.
        let mutex = self.locks.entry(key.clone()).or_default().clone();
        mutex.lock_owned().await
    }
}
