use std::io::{
    self,
    Write,
};

use radio_report_services::{
    aggregate::{
        average_gaps,
        daily_counts,
        day_hour_counts,
        summarize,
        top_artwork,
        top_n,
        DailyCount,
        HeatCell,
        RankedCount,
        SongArtwork,
        SongGap,
        Summary,
    },
    filter,
    weekday_name,
    Dataset,
    Field,
    Selection,
    Source,
    WEEK,
};
use serde::Serialize;

const NO_ARTWORK: &str = "(no artwork)";
const NO_GAP: &str = "n/a";
const BAR_WIDTH: usize = 40;


/// Everything shown for one selection of days and hours
#[derive(Debug, Serialize)]
pub(crate) struct Report {
    source: String,
    days: Vec<&'static str>,
    hours: [u32; 2],
    summary: Summary,
    top_songs: Vec<RankedCount>,
    top_artists: Vec<RankedCount>,
    artwork: Vec<SongArtwork>,
    hours_between_plays: Vec<SongGap>,
    heatmap: Vec<HeatCell>,
    #[serde(skip)]
    grid: [[usize; 24]; 7],
    daily: Vec<DailyCount>,
}

impl Report {
    pub fn build(source: &Source, data: &Dataset, selection: &Selection, top: usize) -> Self {
        let plays = filter(data.plays(), selection);

        let top_songs = top_n(&plays, Field::Song, top);
        let song_names: Vec<_> = top_songs.iter().map(|r| r.value.as_str()).collect();
        let heat = day_hour_counts(&plays);

        Self {
            source: source.to_string(),
            days: WEEK
                .into_iter()
                .filter(|d| selection.days.contains(d))
                .map(weekday_name)
                .collect(),
            hours: [selection.hours.start, selection.hours.end],
            summary: summarize(&plays),
            top_artists: top_n(&plays, Field::Artist, top),
            artwork: top_artwork(&plays, &song_names),
            hours_between_plays: average_gaps(&plays, &song_names)
                .into_iter()
                .map(|gap| SongGap {
                    average_hours: gap.average_hours.map(round_hundredths),
                    ..gap
                })
                .collect(),
            heatmap: heat.cells(),
            grid: heat.grid(),
            daily: daily_counts(&plays),
            top_songs,
        }
    }

    pub fn summary(&self) -> &Summary { &self.summary }

    pub fn render_json<W: Write>(&self, out: W) -> serde_json::Result<()> { serde_json::to_writer_pretty(out, self) }

    pub fn render_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        let days = if self.days.is_empty() { "none".to_owned() } else { self.days.join(", ") };
        writeln!(out, "Source: {}", self.source)?;
        writeln!(out, "Days: {days}")?;
        writeln!(out, "Hours: {}-{}", self.hours[0], self.hours[1])?;

        writeln!(out, "\nSummary")?;
        writeln!(out, "  Total plays     {}", self.summary.total_plays)?;
        writeln!(out, "  Unique songs    {}", self.summary.unique_songs)?;
        writeln!(out, "  Unique artists  {}", self.summary.unique_artists)?;

        write_ranking(&mut out, "Songs", &self.top_songs)?;
        write_ranking(&mut out, "Artists", &self.top_artists)?;

        writeln!(out, "\nArtwork for top songs")?;
        for art in &self.artwork {
            writeln!(out, "  {}: {}", art.song, art.url.as_deref().unwrap_or(NO_ARTWORK))?;
        }

        writeln!(out, "\nAverage hours between plays")?;
        let width = column_width(self.hours_between_plays.iter().map(|g| g.song.as_str()));
        for gap in &self.hours_between_plays {
            match gap.average_hours {
                Some(hours) => writeln!(out, "  {:width$}  {hours:>8.2}", gap.song)?,
                None => writeln!(out, "  {:width$}  {NO_GAP:>8}", gap.song)?,
            }
        }

        self.write_heatmap(&mut out)?;

        writeln!(out, "\nPlays per day")?;
        let busiest = self.daily.iter().map(|d| d.plays).max().unwrap_or(0);
        for day in &self.daily {
            writeln!(out, "  {}  {:>5}  {}", day.date, day.plays, "#".repeat(scale(day.plays, busiest)))?;
        }
        Ok(())
    }

    fn write_heatmap<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nPlays by day and hour")?;
        write!(out, "  {:9}", "")?;
        for hour in 0..24 {
            write!(out, "{hour:>4}")?;
        }
        writeln!(out)?;

        for (day, row) in WEEK.into_iter().zip(&self.grid) {
            write!(out, "  {:9}", weekday_name(day))?;
            for &count in row {
                match count {
                    0 => write!(out, "{:>4}", ".")?,
                    n => write!(out, "{n:>4}")?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn write_ranking<W: Write>(out: &mut W, title: &str, ranked: &[RankedCount]) -> io::Result<()> {
    writeln!(out, "\nTop {} {title}", ranked.len())?;
    let width = column_width(ranked.iter().map(|r| r.value.as_str()));
    for (i, r) in ranked.iter().enumerate() {
        writeln!(out, "  {:>3}. {:width$}  {:>5}", i + 1, r.value, r.count)?;
    }
    Ok(())
}

fn column_width<'s>(values: impl Iterator<Item = &'s str>) -> usize { values.map(|v| v.chars().count()).max().unwrap_or(0) }

fn scale(value: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (value * BAR_WIDTH).div_ceil(max)
    }
}

fn round_hundredths(hours: f64) -> f64 { (hours * 100.0).round() / 100.0 }
