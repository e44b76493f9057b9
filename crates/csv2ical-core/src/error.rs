//! Error types for CSV-to-ICS conversion.
//!
//! Only fatal conditions live here. A row that cannot become an event is not
//! an error; it is reported through [`crate::validate::SkipReason`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input file could not be opened.
    #[error("cannot read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV stream broke while rows were being read.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// The ICS document could not be written to its destination.
    #[error("cannot write output {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rejected before the pipeline starts (bad delimiter, column list, pattern).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An ICS document could not be parsed back into events.
    #[error("ICS parse error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout csv2ical-core.
pub type Result<T> = std::result::Result<T, ConvertError>;
