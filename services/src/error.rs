use std::{
    io,
    path::PathBuf,
};

use thiserror::Error;

/// Failures that abort loading a playback log. No partial dataset survives any of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("line {line}: unparseable timestamp `{value}`")]
    InvalidTimestamp { line: u64, value: String },

    #[error("malformed csv data")]
    Csv(#[from] csv::Error),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
