use std::{
    fs::File,
    io::BufReader,
};

pub use radio_report_core::*;
use reqwest::blocking::Response;
use tracing::info;

pub mod aggregate;
mod cache;
mod error;
mod filter;
mod load;
mod record;
pub mod schema;
mod source;
mod timestamp;

pub use cache::DatasetCache;
pub use error::LoadError;
pub use filter::{
    filter,
    HourRange,
    Selection,
};
pub use load::read_plays;
pub use record::{
    Dataset,
    PlaybackRecord,
    NETWORK_ARTIST,
    PROMO_SONG,
};
pub use source::{
    Source,
    SourceKey,
    FALLBACK_URL,
};
pub use timestamp::parse_timestamp;


/// Reads and cleans the playback log at `source`
///
/// # Errors
///
/// This function will return an error if the source cannot be read or fetched,
/// or if its contents are not a valid playback log.
pub fn load(source: &Source) -> Result<Dataset, LoadError> {
    match source {
        Source::Path(path) => {
            let rdr = File::open(path).map(BufReader::new).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            read_plays(rdr)
        },
        Source::Url(url) => read_plays(fetch(url)?),
        Source::Upload { bytes, .. } => read_plays(&bytes[..]),
    }
}

fn fetch(url: &str) -> Result<Response, LoadError> {
    info!(url, "Fetching playback log");
    reqwest::blocking::get(url)
        .and_then(Response::error_for_status)
        .map_err(|source| LoadError::Fetch {
            url: url.to_owned(),
            source,
        })
}
