use std::io;

use csv::{
    ReaderBuilder,
    StringRecord,
};
use tracing::{
    debug,
    info,
};

use crate::{
    schema::Schema,
    timestamp::parse_timestamp,
    Dataset,
    LoadError,
    PlaybackRecord,
};

/// Reads and cleans a delimited playback log.
///
/// Every timestamp is validated, filler included, before any row is dropped.
///
/// # Errors
///
/// Fails on a missing required column, an unparseable timestamp, or malformed
/// csv. Nothing is returned from a partially read log.
pub fn read_plays<R: io::Read>(rdr: R) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new().from_reader(rdr);
    let schema = Schema::detect(rdr.headers()?)?;
    debug!(?schema, "Detected playback log columns");

    let mut plays = Vec::new();
    let mut excluded = 0usize;
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let play = extract(&schema, &record)?;
        if play.is_filler() {
            excluded += 1;
        } else {
            plays.push(play);
        }
    }

    info!(
        rows = plays.len() + excluded,
        plays = plays.len(),
        excluded,
        artwork = %schema.artwork,
        "Loaded playback log"
    );
    Ok(Dataset::new(plays, schema.artwork, excluded))
}

fn extract(schema: &Schema, record: &StringRecord) -> Result<PlaybackRecord, LoadError> {
    let field = |idx: usize| record.get(idx).unwrap_or_default();

    let raw_ts = field(schema.timestamp);
    let timestamp = parse_timestamp(raw_ts).ok_or_else(|| LoadError::InvalidTimestamp {
        line: record.position().map_or(0, |p| p.line()),
        value: raw_ts.to_owned(),
    })?;

    let play = PlaybackRecord::new(timestamp, field(schema.artist), field(schema.song));
    Ok(match schema.artwork.index().map(field).map(str::trim) {
        Some(url) if !url.is_empty() => play.with_artwork(url),
        _ => play,
    })
}


#[cfg(test)]
mod tests;
