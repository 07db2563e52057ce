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

use crate::config::StitchConfig;
use chrome_tracing::{strip_array_brackets, FragmentWriter};
use eyre::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Reduces the contents of a fragment file to an array body.
///
/// Files holding a whole array (`json()` output) lose their outer brackets;
/// files already holding a body (`traces()` output) pass through. Without
/// whitespace trimming, an array followed by a newline is not recognised as
/// a whole array and is kept verbatim.
pub fn fragment_body<'a>(contents: &'a str, config: &StitchConfig) -> &'a str {
    let contents = if config.trim_whitespace {
        contents.trim()
    } else {
        contents
    };
    if contents.starts_with('[') && contents.ends_with(']') {
        strip_array_brackets(contents)
    } else {
        contents
    }
}

/// Writes the fragments stored in `inputs`, in order, as one JSON array.
pub fn stitch<W: Write>(inputs: &[PathBuf], config: &StitchConfig, mut writer: W) -> Result<W> {
    if !config.pretty {
        let mut fragments = FragmentWriter::new(writer);
        append(&mut fragments, inputs, config)?;
        return Ok(fragments.finish()?);
    }

    let mut fragments = FragmentWriter::new(Vec::new());
    append(&mut fragments, inputs, config)?;
    let compact = fragments.finish()?;
    let trace: serde_json::Value =
        serde_json::from_slice(&compact).wrap_err("stitched trace is not valid json")?;
    serde_json::to_writer_pretty(&mut writer, &trace)?;
    writer.flush()?;
    Ok(writer)
}

fn append<W: Write>(
    fragments: &mut FragmentWriter<W>,
    inputs: &[PathBuf],
    config: &StitchConfig,
) -> Result<()> {
    for path in inputs {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read fragment path={}", path.display()))?;
        let body = fragment_body(&contents, config);
        tracing::debug!(path = %path.display(), bytes = body.len(), "appending fragment");
        fragments.push_body(body)?;
    }
    Ok(())
}
