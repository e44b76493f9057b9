//! The conversion loop — rows in, calendar events out.
//!
//! A [`Converter`] is built once from an explicit [`ConversionConfig`] and then
//! walks a row sequence strictly in order. Every row is addressed, validated and
//! (if accepted) assembled into a [`CalendarEvent`]. Rejected rows are counted
//! and recorded as [`SkippedRow`]s; only a broken input stream or an unwritable
//! destination stops a run.

use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::calendar::{render_calendar, CalendarMetadata};
use crate::date::{DateFormat, DateInterpreter, TimeAnchor};
use crate::error::{ConvertError, Result};
use crate::event::{assemble_event, CalendarEvent};
use crate::mapping::{address_row, ColumnMapping, RawRow};
use crate::source::{RowSource, SourceOptions};
use crate::validate::{validate_row, SkipReason};

/// Everything a run needs, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Field delimiter (default: `b','`).
    pub delimiter: u8,
    /// Whether the first line holds column names (default: false).
    pub has_headers: bool,
    /// Strip surrounding whitespace from fields (default: true).
    pub trim: bool,
    /// Which columns feed which event fields (default: `0,1,2,3,4`).
    pub mapping: ColumnMapping,
    /// Explicit date pattern; `None` means auto-detect.
    pub date_format: Option<String>,
    /// How offset-less times become instants (default: local time).
    pub anchor: TimeAnchor,
    /// Calendar-level identity for the output document.
    pub metadata: CalendarMetadata,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            trim: true,
            mapping: ColumnMapping::default(),
            date_format: None,
            anchor: TimeAnchor::default(),
            metadata: CalendarMetadata::default(),
        }
    }
}

impl ConversionConfig {
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            delimiter: self.delimiter,
            has_headers: self.has_headers,
            trim: self.trim,
        }
    }
}

/// Parse a delimiter argument: one ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    let delimiter = match raw {
        "tab" | "\\t" | "\t" => b'\t',
        _ => match raw.as_bytes() {
            &[byte] if byte.is_ascii() => byte,
            _ => {
                return Err(ConvertError::InvalidConfig(format!(
                    "delimiter must be a single ASCII character, got '{}'",
                    raw
                )))
            }
        },
    };
    check_delimiter(delimiter)?;
    Ok(delimiter)
}

fn check_delimiter(delimiter: u8) -> Result<()> {
    if matches!(delimiter, b'"' | b'\n' | b'\r') {
        return Err(ConvertError::InvalidConfig(format!(
            "{:?} cannot be used as a delimiter",
            delimiter as char
        )));
    }
    Ok(())
}

/// Final tally of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub events_created: usize,
    pub rows_skipped: usize,
}

/// A row that produced no event, with where and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based input line of the record.
    pub line: u64,
    pub reason: SkipReason,
}

/// Events and diagnostics collected from a row sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub events: Vec<CalendarEvent>,
    pub skipped: Vec<SkippedRow>,
}

impl Conversion {
    pub fn result(&self) -> ConversionResult {
        ConversionResult {
            events_created: self.events.len(),
            rows_skipped: self.skipped.len(),
        }
    }
}

/// Validated configuration plus the compiled date interpreter.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConversionConfig,
    interpreter: DateInterpreter,
}

impl Converter {
    /// Check the configuration and compile the date pattern.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidConfig` for an unusable delimiter or date pattern.
    pub fn new(config: ConversionConfig) -> Result<Self> {
        check_delimiter(config.delimiter)?;
        let format = config
            .date_format
            .as_deref()
            .map(DateFormat::parse)
            .transpose()?;
        let interpreter = DateInterpreter::new(format, config.anchor);
        Ok(Self {
            config,
            interpreter,
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Address, validate and assemble a single row.
    pub fn process_row(&self, row: &RawRow) -> std::result::Result<CalendarEvent, SkipReason> {
        let fields = address_row(row, &self.config.mapping);
        debug!(
            "subject={:?} start={:?} end={:?} description={:?} location={:?}",
            fields.subject, fields.start_raw, fields.end_raw, fields.description, fields.location
        );
        let interval = validate_row(&fields, &self.interpreter)?;
        Ok(assemble_event(fields, interval))
    }

    /// Consume a row sequence in order. The first row-source error aborts the
    /// run; rejected rows never do.
    pub fn convert_rows<I>(&self, rows: I) -> Result<Conversion>
    where
        I: IntoIterator<Item = Result<(u64, RawRow)>>,
    {
        let mut conversion = Conversion::default();
        let mut header_hint_shown = false;

        for item in rows {
            let (line, row) = item?;
            match self.process_row(&row) {
                Ok(event) => conversion.events.push(event),
                Err(reason) => {
                    warn!("skipping line {}: {}", line, reason);
                    if matches!(reason, SkipReason::LooksLikeHeader(_))
                        && !self.config.has_headers
                        && !header_hint_shown
                    {
                        warn!("if the first line of the CSV holds column names, pass -H");
                        header_hint_shown = true;
                    }
                    conversion.skipped.push(SkippedRow { line, reason });
                }
            }
        }

        let result = conversion.result();
        info!(
            "created {} events ({} rows skipped)",
            result.events_created, result.rows_skipped
        );
        Ok(conversion)
    }

    /// Read CSV text from any reader and convert it.
    pub fn convert_reader<R: Read>(&self, reader: R) -> Result<Conversion> {
        let source = RowSource::from_reader(reader, &self.config.source_options())?;
        self.convert_rows(source)
    }

    /// Render events with this run's calendar metadata.
    pub fn render(&self, events: &[CalendarEvent]) -> String {
        render_calendar(events, &self.config.metadata)
    }

    /// Convert a CSV file into an ICS file.
    ///
    /// The output is written only after the whole input has been consumed, so
    /// a failing input leaves the destination untouched.
    ///
    /// # Errors
    /// `InputUnreadable`/`Csv` when the input cannot be read, `OutputUnwritable`
    /// when the document cannot be written.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConversionResult> {
        let source = RowSource::from_path(input, &self.config.source_options())?;
        let conversion = self.convert_rows(source)?;
        let ics = self.render(&conversion.events);

        info!("saving to file: {}", output.display());
        std::fs::write(output, ics).map_err(|source| ConvertError::OutputUnwritable {
            path: output.to_path_buf(),
            source,
        })?;

        Ok(conversion.result())
    }
}
