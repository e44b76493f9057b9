//! Date interpretation — raw CSV strings into absolute instants.
//!
//! Two modes:
//!
//! - **Explicit pattern**: the input must match the pattern exactly. A mismatch
//!   is an invalid date; there is no fallback to auto-detection.
//! - **Auto-detect**: a fixed list of common ISO-like and slash-separated
//!   representations is tried in order.
//!
//! Values without an offset are anchored with a [`TimeAnchor`], except ISO
//! date-only values (`2025-01-15`), which are always UTC midnight. Invalid input
//! is an ordinary outcome (`None`), never an error.

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// How values that carry no UTC offset are turned into instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeAnchor {
    /// Wall-clock time in the system's local timezone.
    #[default]
    Local,
    /// The value is already UTC.
    Utc,
}

impl TimeAnchor {
    /// Anchor a naive date-time. Local times inside a DST gap have no instant;
    /// ambiguous ones (DST fold) take the earlier instant.
    pub fn resolve(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            TimeAnchor::Utc => Some(Utc.from_utc_datetime(&naive)),
            TimeAnchor::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// Offset-aware representations, tried before the naive ones.
/// `%#z` also accepts a bare `Z`.
const AUTO_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%dT%H:%M%#z",
];

/// Naive date-time representations recognised by auto-detection.
const AUTO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y%m%dT%H%M%S",
];

/// ISO date-only representations; these resolve to UTC midnight.
const AUTO_UTC_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Other date-only representations; these resolve to anchored midnight.
const AUTO_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y"];

/// A compiled explicit date pattern.
///
/// Patterns containing `%` are taken as chrono strftime patterns verbatim.
/// Anything else is read as a moment-style token pattern such as
/// `DD/MM/YYYY HH:mm` and translated once, here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    strftime: String,
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "date format pattern is empty".to_string(),
            ));
        }
        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            translate_tokens(pattern)?
        };
        Ok(Self { strftime })
    }

    /// The equivalent chrono strftime pattern.
    pub fn strftime(&self) -> &str {
        &self.strftime
    }
}

/// Moment tokens, longest first so that `YYYY` wins over `YY`.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%m"),
    ("DD", "%d"),
    ("D", "%d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("H", "%H"),
    ("hh", "%I"),
    ("h", "%I"),
    ("mm", "%M"),
    ("m", "%M"),
    ("ss", "%S"),
    ("s", "%S"),
    ("SSS", "%3f"),
    ("A", "%p"),
    ("a", "%p"),
    ("ZZ", "%z"),
    ("Z", "%:z"),
];

fn translate_tokens(pattern: &str) -> Result<String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        // `[...]` is an escaped literal run.
        if c == '[' {
            let close = rest.find(']').ok_or_else(|| {
                ConvertError::InvalidConfig(format!(
                    "unterminated '[' literal in date format '{}'",
                    pattern
                ))
            })?;
            push_literal(&mut out, &rest[1..close]);
            rest = &rest[close + 1..];
            continue;
        }

        for (token, directive) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(directive);
                rest = tail;
                continue 'outer;
            }
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    Ok(out)
}

fn push_literal(out: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

/// Parses raw date strings under one configuration.
#[derive(Debug, Clone, Default)]
pub struct DateInterpreter {
    format: Option<DateFormat>,
    anchor: TimeAnchor,
}

impl DateInterpreter {
    pub fn new(format: Option<DateFormat>, anchor: TimeAnchor) -> Self {
        Self { format, anchor }
    }

    /// Interpret `raw` as an instant, truncated to whole seconds.
    ///
    /// Returns `None` for anything that is not a date: empty strings, values
    /// that do not start with a digit (header labels such as `Start Date`),
    /// and values that fail the configured pattern or every auto-detect form.
    pub fn interpret(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if !starts_with_digit(raw) {
            return None;
        }

        let instant = match &self.format {
            Some(format) => self.parse_with(raw, format.strftime()),
            None => self.parse_auto(raw),
        }?;

        Some(instant.trunc_subsecs(0))
    }

    /// Strict parse under one strftime pattern: offset-aware first, then a
    /// naive date-time, then a bare date at midnight.
    fn parse_with(&self, raw: &str, strftime: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(raw, strftime) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, strftime) {
            return self.anchor.resolve(naive);
        }
        NaiveDate::parse_from_str(raw, strftime)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|naive| self.anchor.resolve(naive))
    }

    fn parse_auto(&self, raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        for fmt in AUTO_OFFSET_FORMATS {
            if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(raw, fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }

        for fmt in AUTO_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                return self.anchor.resolve(naive);
            }
        }

        for fmt in AUTO_UTC_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return date
                    .and_hms_opt(0, 0, 0)
                    .and_then(|naive| TimeAnchor::Utc.resolve(naive));
            }
        }

        for fmt in AUTO_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return date
                    .and_hms_opt(0, 0, 0)
                    .and_then(|naive| self.anchor.resolve(naive));
            }
        }

        None
    }
}

/// True when the first character is an ASCII digit.
pub fn starts_with_digit(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_moment_tokens() {
        let fmt = DateFormat::parse("DD/MM/YYYY HH:mm").unwrap();
        assert_eq!(fmt.strftime(), "%d/%m/%Y %H:%M");
    }

    #[test]
    fn bracketed_literals_are_copied() {
        let fmt = DateFormat::parse("YYYY-MM-DD[T]HH:mm").unwrap();
        assert_eq!(fmt.strftime(), "%Y-%m-%dT%H:%M");
    }

    #[test]
    fn strftime_patterns_pass_through() {
        let fmt = DateFormat::parse("%d.%m.%Y %H:%M").unwrap();
        assert_eq!(fmt.strftime(), "%d.%m.%Y %H:%M");
    }

    #[test]
    fn unterminated_literal_is_rejected() {
        assert!(DateFormat::parse("YYYY[T").is_err());
    }
}
