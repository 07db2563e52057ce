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

//! Streaming assembly of several recorders into one JSON array.

use std::io::Write;

use tracing::debug;

use crate::recorder::{ChromeTracing, TraceOptions};
use crate::Result;

/// Writes trace fragments into a single JSON array.
///
/// Each fragment is the body of one recorder's array. The first non-empty
/// fragment opens the array, later ones are joined with `,`, and
/// [`finish`](Self::finish) closes it. Empty fragments are skipped so the
/// output stays a valid array.
pub struct FragmentWriter<W: Write> {
    writer: W,
    fragments: usize,
}

impl<W: Write> FragmentWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            fragments: 0,
        }
    }

    /// Appends every event currently held by `recorder`.
    pub fn push(&mut self, recorder: &ChromeTracing) -> Result<&mut Self> {
        let body = recorder.traces(&TraceOptions::default())?;
        self.push_body(&body)
    }

    /// Appends an already rendered array body, as returned by
    /// [`ChromeTracing::traces`] with default options.
    pub fn push_body(&mut self, body: &str) -> Result<&mut Self> {
        if body.is_empty() {
            debug!("skipping empty fragment");
            return Ok(self);
        }
        let opening: &[u8] = if self.fragments == 0 { b"[" } else { b"," };
        self.writer.write_all(opening)?;
        self.writer.write_all(body.as_bytes())?;
        self.fragments += 1;
        Ok(self)
    }

    /// Number of non-empty fragments written so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Closes the array and hands back the flushed writer.
    pub fn finish(mut self) -> Result<W> {
        if self.fragments == 0 {
            self.writer.write_all(b"[")?;
        }
        self.writer.write_all(b"]")?;
        self.writer.flush()?;
        debug!(fragments = self.fragments, "chrome trace stitched");
        Ok(self.writer)
    }
}
