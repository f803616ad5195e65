use std::{
    collections::HashSet,
    io::{
        self,
        Read,
    },
    sync::LazyLock,
};

use anyhow::{
    anyhow,
    ensure,
    Context,
    Result,
};
use chrono::Weekday;
use clap::{
    Parser,
    ValueEnum,
};
use radio_report_services::{
    aggregate::DEFAULT_TOP,
    parse_weekday,
    HourRange,
    Source,
    WEEK,
};
use regex::Regex;
use tracing::warn;

/// Explore which songs and artists a radio station plays on the days and hours you listen
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Playback log csv: a local path, an http(s) url, or `-` to read stdin
    ///
    /// Needs `timestamp`, `artist` and `song` columns; `artwork_url` or
    /// `artwork_large` are picked up when present. Defaults to the station's
    /// yearly export.
    #[arg(env = "RADIO_REPORT_SOURCE")]
    pub source: Option<String>,

    /// Days of the week to include, comma separated, or `all` / `none`
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    pub days: Vec<String>,

    /// Inclusive range of hours to include, each between 0 and 24. eg: 9-17
    #[arg(short = 'H', long, default_value = "14-22", value_parser = parse_hours)]
    pub hours: HourRange,

    /// How many songs and artists to rank
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP)]
    pub top: usize,

    /// How to print the report
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Keep the log loaded and adjust the filters from a prompt
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Text,
    Json,
}


/// Resolves day names, ignoring any that are not a weekday
pub(crate) fn weekdays<S: AsRef<str>>(names: &[S]) -> HashSet<Weekday> {
    let mut days = HashSet::new();
    for name in names {
        let name: &str = name.as_ref().trim();
        match name.to_ascii_lowercase().as_str() {
            "all" => days.extend(WEEK),
            "none" | "" => {},
            _ => match parse_weekday(name) {
                Some(day) => {
                    days.insert(day);
                },
                None => warn!("Ignoring unknown day `{name}`"),
            },
        }
    }
    days
}

pub(crate) fn parse_hours(range: &str) -> Result<HourRange> {
    static RANGE_REGEX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\s*[-:]\s*(\d{1,2})\s*$").unwrap());

    let caps = RANGE_REGEX.captures(range).ok_or(anyhow!("expected START-END, eg: 14-22"))?;
    let bound = |i: usize| -> Result<u32> {
        let hour: u32 = caps[i].parse()?;
        ensure!(hour <= HourRange::MAX, "hour {hour} is outside 0-{}", HourRange::MAX);
        Ok(hour)
    };

    let hours = HourRange::new(bound(1)?, bound(2)?);
    if hours.start > hours.end {
        warn!("Hour range {range} is reversed and will match nothing");
    }
    Ok(hours)
}

/// Maps a user supplied location to a source; `-` reads all of stdin up front
pub(crate) fn resolve_source(location: Option<&str>) -> Result<Source> {
    Ok(match location.map(str::trim) {
        None | Some("") => Source::fallback(),
        Some("-") => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes).context("stdin")?;
            Source::upload("<stdin>", bytes)
        },
        Some(location) => Source::locate(location),
    })
}
