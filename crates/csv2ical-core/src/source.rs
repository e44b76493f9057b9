//! Streaming CSV row source.
//!
//! Wraps a `csv::Reader` over any `Read` and yields one [`RawRow`] per record,
//! lazily and in input order. In header mode the first line is consumed as the
//! header set and every following record is paired with it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};

use crate::error::{ConvertError, Result};
use crate::mapping::RawRow;

/// CSV reader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Field delimiter (default: `b','`).
    pub delimiter: u8,
    /// Whether the first line holds column names.
    pub has_headers: bool,
    /// Strip surrounding whitespace from every field.
    pub trim: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            trim: true,
        }
    }
}

/// Lazy sequence of CSV rows.
///
/// Yields `(line, row)` where `line` is the 1-based input line the record
/// starts on. Ragged records are passed through as-is; a short record simply
/// has fewer addressable columns.
pub struct RowSource<R: Read> {
    records: StringRecordsIntoIter<R>,
    headers: Option<Vec<String>>,
}

impl RowSource<File> {
    /// Open a CSV file.
    pub fn from_path(path: &Path, options: &SourceOptions) -> Result<Self> {
        let file = File::open(path).map_err(|source| ConvertError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, options)
    }
}

impl<R: Read> RowSource<R> {
    /// Build a row source from any reader. In header mode this reads the
    /// header line immediately.
    pub fn from_reader(reader: R, options: &SourceOptions) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(options.has_headers)
            .delimiter(options.delimiter)
            .flexible(true)
            .trim(if options.trim { Trim::All } else { Trim::None })
            .from_reader(reader);

        let headers = if options.has_headers {
            Some(rdr.headers()?.iter().map(str::to_string).collect())
        } else {
            None
        };

        Ok(Self {
            records: rdr.into_records(),
            headers,
        })
    }

    /// The header line, in header mode.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<(u64, RawRow)>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let row = match &self.headers {
            Some(headers) => RawRow::named(headers, &record.iter().collect::<Vec<_>>()),
            None => RawRow::Positional(record.iter().map(str::to_string).collect()),
        };

        Some(Ok((line, row)))
    }
}
