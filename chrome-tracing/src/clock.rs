// Copyright (C) 2025 Category Labs, Inc.
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
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Time sources for the recorder.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::recorder::TimeSource;

/// Wall clock time in microseconds since the UNIX epoch.
///
/// A clock set before the epoch reads as zero.
pub fn wall_clock_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or_default()
}

/// The time source used when none is configured.
pub fn system() -> TimeSource {
    Arc::new(wall_clock_micros)
}

/// A time source that always reports `ts`.
pub fn fixed(ts: u64) -> TimeSource {
    Arc::new(move || ts)
}
