use chrono::NaiveDateTime;
use radio_report_core::PlayData;

use crate::schema::ArtworkColumn;

/// Artist the station uses for its own idents and ads
pub const NETWORK_ARTIST: &str = "The WMW Radio Network";
/// Song title marking a promo slot
pub const PROMO_SONG: &str = "Promo";


/// A single song play from a cleaned playback log.
///
/// Fields are fixed at construction, so the weekday and hour exposed through
/// [`PlayData`] always agree with the timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRecord {
    timestamp: NaiveDateTime,
    artist: String,
    song: String,
    artwork_url: Option<String>,
}

impl PlaybackRecord {
    pub fn new(timestamp: NaiveDateTime, artist: impl Into<String>, song: impl Into<String>) -> Self {
        Self {
            timestamp,
            artist: artist.into(),
            song: song.into(),
            artwork_url: None,
        }
    }

    #[must_use]
    pub fn with_artwork(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Ads, idents and promos rather than music
    pub fn is_filler(&self) -> bool { self.artist == NETWORK_ARTIST || self.song == PROMO_SONG }
}

impl PlayData for PlaybackRecord {
    #[inline]
    fn played_at(&self) -> NaiveDateTime { self.timestamp }

    #[inline]
    fn artist(&self) -> &str { &self.artist }

    #[inline]
    fn song(&self) -> &str { &self.song }

    #[inline]
    fn artwork_url(&self) -> Option<&str> { self.artwork_url.as_deref() }
}


/// The cleaned, read-only contents of one playback log
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    plays: Vec<PlaybackRecord>,
    artwork: ArtworkColumn,
    excluded: usize,
}

impl Dataset {
    pub(crate) fn new(plays: Vec<PlaybackRecord>, artwork: ArtworkColumn, excluded: usize) -> Self {
        Self { plays, artwork, excluded }
    }

    pub fn plays(&self) -> &[PlaybackRecord] { &self.plays }

    pub fn len(&self) -> usize { self.plays.len() }

    pub fn is_empty(&self) -> bool { self.plays.is_empty() }

    /// Which source column artwork urls were read from
    pub fn artwork_column(&self) -> &ArtworkColumn { &self.artwork }

    /// Number of filler rows dropped while loading
    pub fn excluded(&self) -> usize { self.excluded }
}

/// Collects plays into a dataset, dropping filler the same way loading does
impl FromIterator<PlaybackRecord> for Dataset {
    fn from_iter<T: IntoIterator<Item = PlaybackRecord>>(iter: T) -> Self {
        let mut excluded = 0;
        let plays = iter
            .into_iter()
            .filter(|p| {
                let keep = !p.is_filler();
                excluded += usize::from(!keep);
                keep
            })
            .collect();
        Self::new(plays, ArtworkColumn::Absent, excluded)
    }
}
