use std::collections::HashSet;

use chrono::Weekday;
use radio_report_core::{
    PlayData,
    WEEK,
};

/// Inclusive range of hours of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
}

impl HourRange {
    /// Largest value either bound may take
    pub const MAX: u32 = 24;

    pub const fn new(start: u32, end: u32) -> Self { Self { start, end } }

    pub const fn full() -> Self { Self::new(0, Self::MAX) }

    /// A reversed range contains nothing
    pub const fn contains(&self, hour: u32) -> bool { self.start <= hour && hour <= self.end }
}

impl Default for HourRange {
    fn default() -> Self { Self::new(14, 22) }
}


/// Which days and hours of the week to report on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub days: HashSet<Weekday>,
    pub hours: HourRange,
}

impl Selection {
    pub fn new(days: impl IntoIterator<Item = Weekday>, hours: HourRange) -> Self {
        Self {
            days: days.into_iter().collect(),
            hours,
        }
    }

    /// Every play, whatever day or hour
    pub fn everything() -> Self { Self::new(WEEK, HourRange::full()) }

    pub fn matches<P: PlayData>(&self, play: &P) -> bool {
        self.days.contains(&play.day_of_week()) && self.hours.contains(play.hour())
    }
}

impl Default for Selection {
    fn default() -> Self { Self::new(WEEK, HourRange::default()) }
}


/// Plays matching `selection`, in their original order
pub fn filter<'p, P: PlayData>(plays: &'p [P], selection: &Selection) -> Vec<&'p P> {
    plays.iter().filter(|p| selection.matches(*p)).collect()
}
