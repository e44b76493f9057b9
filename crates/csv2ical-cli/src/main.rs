//! `csv2ical` CLI — convert CSV event rows into an iCalendar (ICS) file.
//!
//! ## Usage
//!
//! ```sh
//! # Positional columns: Subject, Start Date, End Date, Description, Location
//! csv2ical -i events.csv -o events.ics
//!
//! # Semicolon-separated file whose first line holds column names
//! csv2ical -i export.csv -o export.ics -d ";" -H
//!
//! # Columns in a different order, explicit day-first dates
//! csv2ical -i sample.csv -o sample.ics --rows 2,0,1,4,3 --dateformat "DD/MM/YYYY HH:mm"
//!
//! # Print the tally as JSON
//! csv2ical -i events.csv -o events.ics --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csv2ical_core::{
    parse_delimiter, CalendarMetadata, ColumnMapping, ConversionConfig, Converter, TimeAnchor,
};
use env_logger::Env;
use log::info;

#[derive(Parser)]
#[command(
    name = "csv2ical",
    version,
    about = "Convert CSV event rows into an iCalendar (ICS) file"
)]
struct Cli {
    /// Input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Output ICS file
    #[arg(short, long)]
    output: PathBuf,

    /// Field delimiter, if your data uses an alternate one such as ";" (use "tab" for TAB)
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// The first line of the CSV holds column names
    #[arg(short = 'H', long)]
    headers: bool,

    /// Column numbers for Subject, Start Date, End Date, Description, Location
    #[arg(long, default_value = "0,1,2,3,4")]
    rows: ColumnMapping,

    /// Date format, e.g. "DD/MM/YYYY HH:mm" or "%d/%m/%Y %H:%M" (auto-detected if omitted)
    #[arg(long)]
    dateformat: Option<String>,

    /// Treat dates without an offset as UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Keep surrounding whitespace in CSV fields
    #[arg(long)]
    no_trim: bool,

    /// Calendar display name
    #[arg(long, default_value = "CSV2iCal Calendar")]
    calendar_name: String,

    /// PRODID company
    #[arg(long, default_value = "csv2ical")]
    company: String,

    /// PRODID product
    #[arg(long, default_value = "csv2ical")]
    product: String,

    /// PRODID language
    #[arg(long, default_value = "EN")]
    language: String,

    /// Domain used in generated event UIDs
    #[arg(long, default_value = "csv2ical")]
    domain: String,

    /// URL attached to every event
    #[arg(long)]
    url: Option<String>,

    /// Print the conversion tally as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = build_config(&cli)?;
    let converter = Converter::new(config).context("Invalid configuration")?;

    info!(
        "converting {} (columns {})",
        cli.input.display(),
        converter.config().mapping
    );
    let result = converter
        .convert_file(&cli.input, &cli.output)
        .context("Conversion failed")?;

    if cli.json {
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let delimiter = parse_delimiter(&cli.delimiter).context("Invalid --delimiter")?;

    Ok(ConversionConfig {
        delimiter,
        has_headers: cli.headers,
        trim: !cli.no_trim,
        mapping: cli.rows,
        date_format: cli.dateformat.clone(),
        anchor: if cli.utc {
            TimeAnchor::Utc
        } else {
            TimeAnchor::Local
        },
        metadata: CalendarMetadata {
            company: cli.company.clone(),
            product: cli.product.clone(),
            language: cli.language.clone(),
            name: cli.calendar_name.clone(),
            domain: cli.domain.clone(),
            url: cli.url.clone(),
        },
    })
}
