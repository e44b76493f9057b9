//! Row validation — decides whether addressed fields form a usable record.
//!
//! A row is accepted only when its start value looks like data (non-empty,
//! digit-leading) and both start and end interpret as instants. Everything
//! else is skipped with a [`SkipReason`]; nothing here is fatal.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::date::{starts_with_digit, DateInterpreter};
use crate::mapping::AddressedFields;

/// Why a row produced no event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("start date is empty")]
    MissingStart,

    /// The start column does not begin with a digit, which is what an
    /// unskipped header line looks like.
    #[error("start value '{0}' does not begin with a digit")]
    LooksLikeHeader(String),

    #[error("start date '{0}' is not a valid date")]
    InvalidStart(String),

    #[error("end date '{0}' is not a valid date")]
    InvalidEnd(String),
}

/// Start and end instants of an accepted row.
///
/// `end` may precede `start`; ordering is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Accept a row by returning its parsed interval, or reject it.
pub fn validate_row(
    fields: &AddressedFields,
    interpreter: &DateInterpreter,
) -> Result<ParsedInterval, SkipReason> {
    let start_raw = fields.start_raw.trim();
    if start_raw.is_empty() {
        return Err(SkipReason::MissingStart);
    }
    if !starts_with_digit(start_raw) {
        return Err(SkipReason::LooksLikeHeader(fields.start_raw.clone()));
    }

    let start = interpreter
        .interpret(start_raw)
        .ok_or_else(|| SkipReason::InvalidStart(fields.start_raw.clone()))?;
    let end = interpreter
        .interpret(&fields.end_raw)
        .ok_or_else(|| SkipReason::InvalidEnd(fields.end_raw.clone()))?;

    Ok(ParsedInterval { start, end })
}
