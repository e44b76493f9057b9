//! Calendar event assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mapping::AddressedFields;
use crate::validate::ParsedInterval;

/// One calendar entry, built from exactly one accepted CSV row.
///
/// Text fields are copied verbatim; escaping for the ICS format happens in
/// [`crate::calendar`]. Absent description or location is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub location: String,
}

/// Build the event for a validated row.
pub fn assemble_event(fields: AddressedFields, interval: ParsedInterval) -> CalendarEvent {
    CalendarEvent {
        summary: fields.subject,
        start: interval.start,
        end: interval.end,
        description: fields.description,
        location: fields.location,
    }
}
