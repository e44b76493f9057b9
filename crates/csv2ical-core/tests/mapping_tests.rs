//! Tests for column addressing in positional and header mode.

use csv2ical_core::{address_row, AddressedFields, ColumnMapping, RawRow};

fn positional(values: &[&str]) -> RawRow {
    RawRow::Positional(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn default_mapping_reads_columns_in_order() {
    let row = positional(&["Meeting", "2025-01-15 09:00", "2025-01-15 10:00", "Discuss Q1", "Room 1"]);
    let fields = address_row(&row, &ColumnMapping::default());

    assert_eq!(
        fields,
        AddressedFields {
            subject: "Meeting".to_string(),
            start_raw: "2025-01-15 09:00".to_string(),
            end_raw: "2025-01-15 10:00".to_string(),
            description: "Discuss Q1".to_string(),
            location: "Room 1".to_string(),
        }
    );
}

#[test]
fn reordered_mapping_follows_ordinals() {
    let row = positional(&["Room 1", "Discuss Q1", "2025-01-15 10:00", "2025-01-15 09:00", "Meeting"]);
    let mapping = ColumnMapping::new(4, 3, 2, 1, 0);
    let fields = address_row(&row, &mapping);

    assert_eq!(fields.subject, "Meeting");
    assert_eq!(fields.start_raw, "2025-01-15 09:00");
    assert_eq!(fields.end_raw, "2025-01-15 10:00");
    assert_eq!(fields.description, "Discuss Q1");
    assert_eq!(fields.location, "Room 1");
}

#[test]
fn index_past_last_field_is_empty_string() {
    let row = positional(&["Meeting", "2025-01-15 09:00", "2025-01-15 10:00"]);
    let fields = address_row(&row, &ColumnMapping::new(0, 1, 2, 3, 40));

    assert_eq!(fields.description, "");
    assert_eq!(fields.location, "");
}

#[test]
fn empty_row_addresses_every_field_as_empty() {
    let row = RawRow::Positional(Vec::new());
    assert!(row.is_empty());

    let fields = address_row(&row, &ColumnMapping::default());
    assert_eq!(fields.subject, "");
    assert_eq!(fields.start_raw, "");
}

#[test]
fn duplicate_indices_duplicate_values() {
    let row = positional(&["Standup", "2025-01-15 09:00", "2025-01-15 09:15"]);
    let fields = address_row(&row, &ColumnMapping::new(0, 1, 2, 0, 0));

    assert_eq!(fields.description, "Standup");
    assert_eq!(fields.location, "Standup");
}

#[test]
fn header_mode_resolves_ordinal_over_header_names() {
    let row = RawRow::named(
        &["Location", "Subject", "Start", "End", "Notes"],
        &["Room 1", "Meeting", "2025-01-15 09:00", "2025-01-15 10:00", "Q1"],
    );
    let fields = address_row(&row, &ColumnMapping::new(1, 2, 3, 4, 0));

    assert_eq!(fields.subject, "Meeting");
    assert_eq!(fields.start_raw, "2025-01-15 09:00");
    assert_eq!(fields.location, "Room 1");
}

#[test]
fn header_mode_is_not_a_name_lookup() {
    // Column titles that look like field names have no effect; only position counts.
    let row = RawRow::named(
        &["Start Date", "Subject"],
        &["2025-01-15 09:00", "Meeting"],
    );
    let fields = address_row(&row, &ColumnMapping::new(1, 0, 0, 2, 3));

    assert_eq!(fields.subject, "Meeting");
    assert_eq!(fields.start_raw, "2025-01-15 09:00");
}

#[test]
fn header_mode_collapses_repeated_names() {
    // "Date" appears twice: it occupies ordinal 1 with the later value, and
    // "Place" moves up to ordinal 2.
    let row = RawRow::named(
        &["Title", "Date", "Date", "Place"],
        &["Meeting", "2025-01-15 09:00", "2025-01-15 10:00", "Room 1"],
    );

    assert_eq!(row.len(), 3);
    assert_eq!(row.get(1), Some("2025-01-15 10:00"));
    assert_eq!(row.get(2), Some("Room 1"));
    assert_eq!(row.get(3), None);
}

#[test]
fn header_mode_short_record_yields_empty_trailing_fields() {
    let row = RawRow::named(
        &["Subject", "Start", "End", "Description", "Location"],
        &["Meeting", "2025-01-15 09:00", "2025-01-15 10:00"],
    );
    let fields = address_row(&row, &ColumnMapping::default());

    assert_eq!(fields.end_raw, "2025-01-15 10:00");
    assert_eq!(fields.description, "");
    assert_eq!(fields.location, "");
}

#[test]
fn mapping_parses_plain_and_braced_lists() {
    let expected = ColumnMapping::new(0, 1, 2, 3, 4);
    assert_eq!("0,1,2,3,4".parse::<ColumnMapping>().unwrap(), expected);
    assert_eq!("{0,1,2,3,4}".parse::<ColumnMapping>().unwrap(), expected);
    assert_eq!(" 0, 1 ,2,3 , 4 ".parse::<ColumnMapping>().unwrap(), expected);
}

#[test]
fn mapping_rejects_negative_or_non_numeric_indices() {
    assert!("0,-1,2,3,4".parse::<ColumnMapping>().is_err());
    assert!("a,b,c,d,e".parse::<ColumnMapping>().is_err());
    assert!("".parse::<ColumnMapping>().is_err());
}
