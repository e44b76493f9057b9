//! Column addressing — maps CSV columns onto the five event fields.
//!
//! A [`ColumnMapping`] assigns one column ordinal to each of Subject, Start,
//! End, Description and Location. How an ordinal is resolved depends on the
//! row shape:
//!
//! - **Positional rows** (no header line): the ordinal is the literal field
//!   index in the record.
//! - **Named rows** (header mode): the ordinal selects the Nth header name
//!   observed for the row, and the value is then looked up under that name.
//!   This is an ordinal over the header set, not a lookup by column title, so
//!   duplicate header names collapse into a single slot.
//!
//! Indices past the end of a row resolve to an empty string, never an error.
//! Indices need not be unique or ordered: pointing two fields at the same
//! column simply duplicates its value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Column ordinals for `(subject, start, end, description, location)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub subject: usize,
    pub start: usize,
    pub end: usize,
    pub description: usize,
    pub location: usize,
}

impl ColumnMapping {
    pub fn new(
        subject: usize,
        start: usize,
        end: usize,
        description: usize,
        location: usize,
    ) -> Self {
        Self {
            subject,
            start,
            end,
            description,
            location,
        }
    }

    /// The ordinals in field order.
    pub fn as_array(&self) -> [usize; 5] {
        [
            self.subject,
            self.start,
            self.end,
            self.description,
            self.location,
        ]
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::new(0, 1, 2, 3, 4)
    }
}

impl fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.subject, self.start, self.end, self.description, self.location
        )
    }
}

/// Parses `"0,1,2,3,4"`. The brace-wrapped form `"{0,1,2,3,4}"` is accepted too.
impl FromStr for ColumnMapping {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed);

        let indices = inner
            .split(',')
            .map(|part| {
                part.trim().parse::<usize>().map_err(|_| {
                    ConvertError::InvalidConfig(format!(
                        "column index '{}' in '{}' is not a non-negative integer",
                        part.trim(),
                        s
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        match indices.as_slice() {
            &[subject, start, end, description, location] => {
                Ok(Self::new(subject, start, end, description, location))
            }
            other => Err(ConvertError::InvalidConfig(format!(
                "expected 5 column indices (subject,start,end,description,location), got {}",
                other.len()
            ))),
        }
    }
}

/// One CSV record as delivered by the row source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow {
    /// Field values in column order.
    Positional(Vec<String>),
    /// `(header, value)` pairs in first-seen header order, one entry per
    /// distinct header name.
    Named(Vec<(String, String)>),
}

impl RawRow {
    /// Pair a record with the header line.
    ///
    /// A repeated header name keeps the position where it was first seen and
    /// takes the value of its last occurrence. Headers beyond the end of a
    /// short record are left out of the row.
    pub fn named<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(values) {
            let header = header.as_ref();
            match pairs.iter_mut().find(|(name, _)| name == header) {
                Some(slot) => slot.1 = value.as_ref().to_string(),
                None => pairs.push((header.to_string(), value.as_ref().to_string())),
            }
        }
        RawRow::Named(pairs)
    }

    /// Resolve a column ordinal to its value, if the row has one.
    pub fn get(&self, ordinal: usize) -> Option<&str> {
        match self {
            RawRow::Positional(values) => values.get(ordinal).map(String::as_str),
            RawRow::Named(pairs) => {
                let header = resolve_header(pairs, ordinal)?;
                lookup(pairs, header)
            }
        }
    }

    /// Number of addressable columns in this row.
    pub fn len(&self) -> usize {
        match self {
            RawRow::Positional(values) => values.len(),
            RawRow::Named(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The Nth header name observed in the row.
fn resolve_header(pairs: &[(String, String)], ordinal: usize) -> Option<&str> {
    pairs.get(ordinal).map(|(name, _)| name.as_str())
}

fn lookup<'a>(pairs: &'a [(String, String)], header: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(name, _)| name == header)
        .map(|(_, value)| value.as_str())
}

/// The five event fields read out of one row, as raw strings.
///
/// Absent or out-of-range columns are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressedFields {
    pub subject: String,
    pub start_raw: String,
    pub end_raw: String,
    pub description: String,
    pub location: String,
}

/// Read the mapped columns out of a row.
pub fn address_row(row: &RawRow, mapping: &ColumnMapping) -> AddressedFields {
    let field = |ordinal: usize| row.get(ordinal).unwrap_or_default().to_string();

    AddressedFields {
        subject: field(mapping.subject),
        start_raw: field(mapping.start),
        end_raw: field(mapping.end),
        description: field(mapping.description),
        location: field(mapping.location),
    }
}
