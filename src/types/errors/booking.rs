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

use super::InternalError;

/// Reasons a booking can be refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A date is missing, or `from` is not strictly before `to`.
    #[error("invalid date range: `from` must be set and before `to`")]
    InvalidDateRange,
    /// The hotel doesn't offer the requested room type.
    #[error("room not found")]
    UnknownRoom,
    /// The room is already booked for part of the requested stay.
    #[error("room is not available for the selected dates")]
    RoomUnavailable,
    /// A catalog or store failure, not further classified.
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}
