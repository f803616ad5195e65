use std::collections::{
    BTreeMap,
    HashSet,
};

use chrono::{
    Datelike,
    NaiveDate,
    NaiveDateTime,
    Weekday,
};
use indexmap::IndexMap;
use radio_report_core::{
    weekday_name,
    Field,
    PlayData,
    WEEK,
};
use serde::Serialize;

/// Default length of the ranked song and artist lists
pub const DEFAULT_TOP: usize = 30;

const MS_PER_HOUR: f64 = 3_600_000.0;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_plays: usize,
    pub unique_songs: usize,
    pub unique_artists: usize,
}

/// Blank cells are counted as plays but never as a song or artist
pub fn summarize<P: PlayData>(plays: &[P]) -> Summary {
    let distinct = |field| plays.iter().filter_map(|p| present(p, field)).collect::<HashSet<_>>().len();
    Summary {
        total_plays: plays.len(),
        unique_songs: distinct(Field::Song),
        unique_artists: distinct(Field::Artist),
    }
}

fn present<P: PlayData>(play: &P, field: Field) -> Option<&str> {
    Some(play.field(field)).filter(|v| !v.trim().is_empty())
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub value: String,
    pub count: usize,
}

/// The `n` most frequent values of `field`, most played first.
///
/// Equal counts keep the order in which values first appear. Blank values are skipped.
pub fn top_n<P: PlayData>(plays: &[P], field: Field, n: usize) -> Vec<RankedCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in plays.iter().filter_map(|p| present(p, field)) {
        *counts.entry(value).or_default() += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked
        .into_iter()
        .take(n)
        .map(|(value, count)| RankedCount {
            value: value.to_owned(),
            count,
        })
        .collect()
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongGap {
    pub song: String,
    /// `None` until a song has been played at least twice
    pub average_hours: Option<f64>,
}

/// Mean number of hours between consecutive plays of each of `songs`
pub fn average_gaps<P, S>(plays: &[P], songs: &[S]) -> Vec<SongGap>
where
    P: PlayData,
    S: AsRef<str>,
{
    songs
        .iter()
        .map(|song| {
            let song: &str = song.as_ref();
            let mut times: Vec<_> = plays.iter().filter(|p| p.song() == song).map(|p| p.played_at()).collect();
            times.sort_unstable();
            SongGap {
                song: song.to_owned(),
                average_hours: mean_gap_hours(&times),
            }
        })
        .collect()
}

fn mean_gap_hours(sorted: &[NaiveDateTime]) -> Option<f64> {
    let gaps = sorted.len().checked_sub(1).filter(|&n| n > 0)?;
    let total: f64 = sorted
        .windows(2)
        .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / MS_PER_HOUR)
        .sum();
    Some(total / gaps as f64)
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongArtwork {
    pub song: String,
    pub url: Option<String>,
}

/// Artwork of the first play of each song; songs without any come back with no url
pub fn top_artwork<P, S>(plays: &[P], songs: &[S]) -> Vec<SongArtwork>
where
    P: PlayData,
    S: AsRef<str>,
{
    songs
        .iter()
        .map(|song| {
            let song: &str = song.as_ref();
            SongArtwork {
                song: song.to_owned(),
                url: plays
                    .iter()
                    .find(|p| p.song() == song)
                    .and_then(|p| p.artwork_url())
                    .map(str::to_owned),
            }
        })
        .collect()
}


/// Play counts per weekday and hour. Only pairs that were played are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayHourCounts {
    counts: BTreeMap<(u32, u32), usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatCell {
    pub day: &'static str,
    pub hour: u32,
    pub count: usize,
}

impl DayHourCounts {
    pub fn get(&self, day: Weekday, hour: u32) -> Option<usize> {
        self.counts.get(&(day.num_days_from_monday(), hour)).copied()
    }

    /// Played pairs, Monday first then by hour
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u32, usize)> + '_ {
        self.counts
            .iter()
            .map(|(&(day, hour), &count)| (WEEK[day as usize], hour, count))
    }

    pub fn cells(&self) -> Vec<HeatCell> {
        self.iter()
            .map(|(day, hour, count)| HeatCell {
                day: weekday_name(day),
                hour,
                count,
            })
            .collect()
    }

    /// Dense Monday..Sunday by 0..24 table with unplayed pairs as zero
    pub fn grid(&self) -> [[usize; 24]; 7] {
        let mut grid = [[0; 24]; 7];
        for (&(day, hour), &count) in &self.counts {
            grid[day as usize][hour as usize] = count;
        }
        grid
    }

    pub fn total(&self) -> usize { self.counts.values().sum() }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
}

pub fn day_hour_counts<P: PlayData>(plays: &[P]) -> DayHourCounts {
    let mut counts = BTreeMap::new();
    for play in plays {
        *counts.entry((play.day_of_week().num_days_from_monday(), play.hour())).or_default() += 1;
    }
    DayHourCounts { counts }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub plays: usize,
}

/// Plays per calendar day from the first to the last played date, days without plays included
pub fn daily_counts<P: PlayData>(plays: &[P]) -> Vec<DailyCount> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for play in plays {
        *by_date.entry(play.play_date()).or_default() += 1;
    }

    let (Some(&first), Some(&last)) = (by_date.keys().next(), by_date.keys().next_back()) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| DailyCount {
            date,
            plays: by_date.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
