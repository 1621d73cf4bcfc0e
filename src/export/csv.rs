// ABOUTME: CSV rendering of activity rows with the fixed Date,Steps,Calories,Elevation header
// ABOUTME: Missing fields render empty; fields with separators or quotes are quoted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use std::borrow::Cow;
use std::io::Write;

use crate::constants::export::CSV_HEADER;
use crate::errors::OutputError;
use crate::models::ActivityRow;

/// Writes the header and one line per row
pub struct CsvExporter<W: Write> {
    writer: W,
}

impl<W: Write> CsvExporter<W> {
    /// Wrap a destination
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the header, every row, then flush; returns the row count
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Write`] if the destination fails.
    pub fn write_rows<I>(&mut self, rows: I) -> Result<usize, OutputError>
    where
        I: IntoIterator<Item = ActivityRow>,
    {
        writeln!(self.writer, "{CSV_HEADER}")?;
        let mut count = 0;
        for row in rows {
            writeln!(self.writer, "{}", render_row(&row))?;
            count += 1;
        }
        self.writer.flush()?;
        Ok(count)
    }

    /// Give the destination back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// One CSV line, without the line terminator
#[must_use]
pub fn render_row(row: &ActivityRow) -> String {
    row.fields()
        .map(|field| field.map_or_else(String::new, |text| escape(&text).into_owned()))
        .join(",")
}

fn escape(raw: &str) -> Cow<'_, str> {
    if raw.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", raw.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(raw)
    }
}
