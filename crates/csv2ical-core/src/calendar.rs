//! ICS rendering and read-back via the `icalendar` crate.
//!
//! Rendering produces one `VCALENDAR` holding a `VEVENT` per [`CalendarEvent`],
//! with instants written in UTC (`...Z`). Reading parses such a document back
//! into events so conversions can be checked end to end.

use chrono::{DateTime, Utc};
use icalendar::{
    parser::{read_calendar, unfold, Component as ParsedComponent},
    Calendar, CalendarDateTime, Component, DatePerhapsTime, EventLike, Property,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::event::CalendarEvent;

/// Calendar-level identity written into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMetadata {
    /// PRODID company part.
    pub company: String,
    /// PRODID product part.
    pub product: String,
    /// PRODID language part.
    pub language: String,
    /// Display name (`X-WR-CALNAME`).
    pub name: String,
    /// Right-hand side of generated UIDs.
    pub domain: String,
    /// URL attached to every event, if any.
    pub url: Option<String>,
}

impl Default for CalendarMetadata {
    fn default() -> Self {
        Self {
            company: "csv2ical".to_string(),
            product: "csv2ical".to_string(),
            language: "EN".to_string(),
            name: "CSV2iCal Calendar".to_string(),
            domain: "csv2ical".to_string(),
            url: None,
        }
    }
}

impl CalendarMetadata {
    /// `-//company//product//LANGUAGE`
    pub fn prodid(&self) -> String {
        format!(
            "-//{}//{}//{}",
            self.company,
            self.product,
            self.language.to_uppercase()
        )
    }
}

/// Render events as an ICS document. Zero events yields a valid empty calendar.
pub fn render_calendar(events: &[CalendarEvent], metadata: &CalendarMetadata) -> String {
    // `Calendar::new` would prefill its own PRODID.
    let mut cal = Calendar::empty();
    cal.append_property(Property::new("VERSION", "2.0"));
    cal.append_property(Property::new("PRODID", metadata.prodid()));
    cal.append_property(Property::new("CALSCALE", "GREGORIAN"));
    cal.append_property(Property::new("X-WR-CALNAME", &metadata.name));

    for (index, event) in events.iter().enumerate() {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event_uid(index, event, metadata));
        ics_event.starts(event.start);
        ics_event.ends(event.end);

        // Empty text fields are left out and read back as "".
        if !event.summary.is_empty() {
            ics_event.summary(&event.summary);
        }
        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }
        if !event.location.is_empty() {
            ics_event.location(&event.location);
        }
        if let Some(ref url) = metadata.url {
            ics_event.add_property("URL", url);
        }

        cal.push(ics_event.done());
    }

    cal.done().to_string()
}

/// Deterministic UID: `<n>-<start>@<domain>`.
fn event_uid(index: usize, event: &CalendarEvent, metadata: &CalendarMetadata) -> String {
    format!(
        "{}-{}@{}",
        index + 1,
        event.start.format("%Y%m%dT%H%M%SZ"),
        metadata.domain
    )
}

/// Parse an ICS document back into events, in document order.
///
/// Text values come back unescaped by the parser. Missing SUMMARY,
/// DESCRIPTION or LOCATION read back as empty strings.
/// Floating and TZID-qualified times are taken as UTC wall-clock values.
pub fn read_events(ics: &str) -> Result<Vec<CalendarEvent>> {
    let unfolded = unfold(ics);
    let calendar =
        read_calendar(&unfolded).map_err(|e| ConvertError::Serialize(e.to_string()))?;

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_vevent)
        .collect()
}

fn parse_vevent(vevent: &ParsedComponent<'_>) -> Result<CalendarEvent> {
    let text = |name: &str| {
        vevent
            .find_prop(name)
            .map(|p| p.val.to_string())
            .unwrap_or_default()
    };

    Ok(CalendarEvent {
        summary: text("SUMMARY"),
        start: instant_prop(vevent, "DTSTART")?,
        end: instant_prop(vevent, "DTEND")?,
        description: text("DESCRIPTION"),
        location: text("LOCATION"),
    })
}

fn instant_prop(vevent: &ParsedComponent<'_>, name: &str) -> Result<DateTime<Utc>> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| ConvertError::Serialize(format!("VEVENT without {}", name)))?;
    let value = DatePerhapsTime::try_from(prop)
        .map_err(|_| ConvertError::Serialize(format!("unreadable {} value", name)))?;

    match value {
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Ok(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => Ok(naive.and_utc()),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, .. }) => {
            Ok(date_time.and_utc())
        }
        DatePerhapsTime::Date(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ConvertError::Serialize(format!("unreadable {} date", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prodid_uses_uppercase_language() {
        let metadata = CalendarMetadata {
            language: "en".to_string(),
            ..CalendarMetadata::default()
        };
        assert_eq!(metadata.prodid(), "-//csv2ical//csv2ical//EN");
    }

    #[test]
    fn empty_calendar_is_well_formed() {
        let ics = render_calendar(&[], &CalendarMetadata::default());
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("PRODID:-//csv2ical//csv2ical//EN\r\n"));
        assert!(ics.contains("X-WR-CALNAME:CSV2iCal Calendar"));
        assert!(!ics.contains("BEGIN:VEVENT"));
        assert!(ics.trim_end().ends_with("END:VCALENDAR"));
    }

    #[test]
    fn long_prodid_is_folded() {
        let metadata = CalendarMetadata {
            company: "A Very Long Company Name Incorporated International".to_string(),
            product: "Enterprise Scheduling Suite".to_string(),
            ..CalendarMetadata::default()
        };
        let ics = render_calendar(&[], &metadata);

        assert!(ics.split("\r\n").all(|line| line.len() <= 75));
        let unfolded = ics.replace("\r\n ", "");
        assert!(unfolded.contains(&format!("PRODID:{}\r\n", metadata.prodid())));
    }
}
