// ABOUTME: Export stage: date range arithmetic, CSV rendering and output destination
// ABOUTME: Rows are written only after the query fully succeeded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use tracing::info;

use crate::errors::OutputError;
use crate::models::ActivityRow;

/// CSV rendering
pub mod csv;
/// Inclusive date ranges
pub mod date_range;

pub use csv::{render_row, CsvExporter};
pub use date_range::DateRange;

/// Where the CSV goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output
    Stdout,
    /// File created (or truncated) at this path
    File(PathBuf),
}

impl OutputTarget {
    /// File when a path was given, stdout otherwise
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Whether the CSV shares stdout with user-facing output
    #[must_use]
    pub const fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout)
    }

    /// Write header and rows to the destination
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Open`] if the file can not be created and
    /// [`OutputError::Write`] on write failures.
    pub fn write_rows<I>(&self, rows: I) -> Result<usize, OutputError>
    where
        I: IntoIterator<Item = ActivityRow>,
    {
        let written = match self {
            Self::Stdout => CsvExporter::new(io::stdout().lock()).write_rows(rows)?,
            Self::File(path) => {
                let file = File::create(path).map_err(|source| OutputError::Open {
                    path: path.clone(),
                    source,
                })?;
                CsvExporter::new(BufWriter::new(file)).write_rows(rows)?
            }
        };
        info!(rows = written, target = ?self, "CSV export written");
        Ok(written)
    }
}
