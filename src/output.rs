//! The flat CSV output format.

use crate::errors::{self, Result};
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;
use std::io::Write;

/// Column order of the output file.
pub const HEADER: [&str; 8] = [
    "ID", "TOKEN", "LEMMA", "SENTENCE", "author", "title", "language", "passage",
];

/// One matched token occurrence, ready for serialization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "TOKEN")]
    pub token: String,
    #[serde(rename = "LEMMA")]
    pub lemma: String,
    #[serde(rename = "SENTENCE")]
    pub sentence: String,
    pub author: String,
    pub title: String,
    pub language: String,
    pub passage: String,
}

/// Write the header and all rows to `sink`, returning the row count.
///
/// An empty row sequence still produces the header line. Fields containing
/// the delimiter, a quote or a newline are quoted per the usual CSV rules.
/// Consumes the sequence in a single pass.
pub fn write_csv<W, I>(sink: W, rows: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = ResultRow>,
{
    // Header written explicitly so that the empty result set still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(HEADER).map_err(output_err)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row).map_err(output_err)?;
        count += 1;
    }
    writer.flush().map_err(output_err)?;
    Ok(count)
}

fn output_err(e: impl fmt::Display) -> Box<dyn error::Error> {
    errors::output_error(format!("cannot write output: {e}"))
}
