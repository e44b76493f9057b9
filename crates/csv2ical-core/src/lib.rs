//! # csv2ical-core
//!
//! Turns tabular event data (CSV rows) into an iCalendar (RFC 5545) document.
//!
//! Each row flows through the same fixed steps: its columns are addressed into
//! the five event fields, the start and end values are interpreted as instants,
//! rows that are not genuine records are skipped, and the rest are assembled
//! into [`CalendarEvent`]s that are rendered as one `VCALENDAR`.
//!
//! ## Quick start
//!
//! ```rust
//! use csv2ical_core::{ConversionConfig, Converter, TimeAnchor};
//!
//! let config = ConversionConfig {
//!     anchor: TimeAnchor::Utc,
//!     ..ConversionConfig::default()
//! };
//! let converter = Converter::new(config).unwrap();
//!
//! let csv = "\"Meeting\",\"2025-01-15 09:00\",\"2025-01-15 10:00\",\"Discuss Q1\",\"Room 1\"\n";
//! let conversion = converter.convert_reader(csv.as_bytes()).unwrap();
//! assert_eq!(conversion.result().events_created, 1);
//!
//! let ics = converter.render(&conversion.events);
//! assert!(ics.contains("DTSTART:20250115T090000Z"));
//! ```
//!
//! ## Modules
//!
//! - [`mapping`] — column addressing (`ColumnMapping`, `RawRow` → `AddressedFields`)
//! - [`date`] — strict-pattern and auto-detecting date interpretation
//! - [`validate`] — record/header discrimination and skip reasons
//! - [`event`] — `CalendarEvent` assembly
//! - [`source`] — streaming CSV row source
//! - [`calendar`] — ICS rendering and read-back
//! - [`pipeline`] — configuration and the row-by-row conversion loop
//! - [`error`] — fatal error types

pub mod calendar;
pub mod date;
pub mod error;
pub mod event;
pub mod mapping;
pub mod pipeline;
pub mod source;
pub mod validate;

pub use calendar::{read_events, render_calendar, CalendarMetadata};
pub use date::{DateFormat, DateInterpreter, TimeAnchor};
pub use error::ConvertError;
pub use event::{assemble_event, CalendarEvent};
pub use mapping::{address_row, AddressedFields, ColumnMapping, RawRow};
pub use pipeline::{
    parse_delimiter, Conversion, ConversionConfig, ConversionResult, Converter, SkippedRow,
};
pub use source::{RowSource, SourceOptions};
pub use validate::{validate_row, ParsedInterval, SkipReason};
