use std::{
    fmt,
    fs,
    path::PathBuf,
    sync::Arc,
    time::SystemTime,
};

use sha2::{
    Digest,
    Sha256,
};

use crate::LoadError;

/// Yearly export used when no log is supplied
pub const FALLBACK_URL: &str = "https://b2.richardcooney.com/wmradiodata_yr.csv";


/// Where a playback log is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
    /// Contents handed over in memory, eg: piped on stdin
    Upload { name: String, bytes: Arc<[u8]> },
}

impl Source {
    pub fn fallback() -> Self { Source::Url(FALLBACK_URL.to_owned()) }

    /// Treats `http://` and `https://` locations as remote, anything else as a local path
    pub fn locate(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(location.to_owned())
        } else {
            Source::Path(location.into())
        }
    }

    pub fn upload(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Source::Upload {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Identity used to decide whether a cached dataset still matches this source.
    ///
    /// Files are identified by location and modification stamp, so an edited
    /// file yields a new key. Uploads are identified by content.
    ///
    /// # Errors
    ///
    /// Fails if a local file's metadata cannot be read.
    pub fn key(&self) -> Result<SourceKey, LoadError> {
        Ok(match self {
            Source::Path(path) => {
                let io_err = |source| LoadError::Io {
                    path: path.clone(),
                    source,
                };
                let path = fs::canonicalize(path).map_err(io_err)?;
                let meta = fs::metadata(&path).map_err(io_err)?;
                SourceKey::File {
                    modified: meta.modified().ok(),
                    len: meta.len(),
                    path,
                }
            },
            Source::Url(url) => SourceKey::Url(url.clone()),
            Source::Upload { bytes, .. } => SourceKey::Upload(Sha256::digest(bytes).into()),
        })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
            Source::Upload { name, bytes } => write!(f, "{name} ({} bytes)", bytes.len()),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    File {
        path: PathBuf,
        modified: Option<SystemTime>,
        len: u64,
    },
    Url(String),
    Upload([u8; 32]),
}
