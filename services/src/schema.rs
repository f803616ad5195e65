use std::fmt;

use csv::StringRecord;

use crate::LoadError;

pub const TIMESTAMP: &str = "timestamp";
pub const ARTIST: &str = "artist";
pub const SONG: &str = "song";
/// Preferred artwork column
pub const ARTWORK_URL: &str = "artwork_url";
/// Older exports name the artwork column after the image size
pub const ARTWORK_LARGE: &str = "artwork_large";


/// Where, if anywhere, a log keeps its artwork urls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArtworkColumn {
    Present { name: &'static str, index: usize },
    #[default]
    Absent,
}

impl ArtworkColumn {
    pub fn index(&self) -> Option<usize> {
        match *self {
            ArtworkColumn::Present { index, .. } => Some(index),
            ArtworkColumn::Absent => None,
        }
    }
}

impl fmt::Display for ArtworkColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtworkColumn::Present { name, .. } => f.write_str(name),
            ArtworkColumn::Absent => f.write_str("none"),
        }
    }
}


/// Column positions resolved from a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub timestamp: usize,
    pub artist: usize,
    pub song: usize,
    pub artwork: ArtworkColumn,
}

impl Schema {
    /// Resolves required and optional columns by name.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] naming the first required column
    /// that is absent.
    pub fn detect(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn(name));

        let artwork = [ARTWORK_URL, ARTWORK_LARGE]
            .into_iter()
            .find_map(|name| find(name).map(|index| ArtworkColumn::Present { name, index }))
            .unwrap_or_default();

        Ok(Self {
            timestamp: require(TIMESTAMP)?,
            artist: require(ARTIST)?,
            song: require(SONG)?,
            artwork,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord { StringRecord::from(names.to_vec()) }

    #[test]
    fn test_required_columns() {
        let schema = Schema::detect(&headers(&["song", "timestamp", "artist"])).expect("Failed to detect schema");
        assert_eq!(schema, Schema {
            timestamp: 1,
            artist: 2,
            song: 0,
            artwork: ArtworkColumn::Absent,
        });
    }

    #[test]
    fn test_missing_column() {
        let err = Schema::detect(&headers(&["timestamp", "song"])).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ARTIST)));
    }

    #[test]
    fn test_legacy_artwork() {
        let schema = Schema::detect(&headers(&["timestamp", "artist", "song", "artwork_large"])).unwrap();
        assert_eq!(schema.artwork, ArtworkColumn::Present {
            name: ARTWORK_LARGE,
            index: 3,
        });
    }

    #[test]
    fn test_canonical_artwork_wins() {
        let schema =
            Schema::detect(&headers(&["artwork_large", "timestamp", "artist", "song", "artwork_url"])).unwrap();
        assert_eq!(schema.artwork, ArtworkColumn::Present {
            name: ARTWORK_URL,
            index: 4,
        });
    }
}
