use std::fmt;

use chrono::{
    Datelike,
    NaiveDate,
    NaiveDateTime,
    Timelike,
    Weekday,
};
use serde::Serialize;

/// Monday through Sunday, in display order
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of `day`, independent of locale
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts full or three letter weekday names in any case
pub fn parse_weekday(name: &str) -> Option<Weekday> { name.trim().parse().ok() }


/// Categorical column of a play that can be ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Song,
    Artist,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Song => "song",
            Field::Artist => "artist",
        })
    }
}


pub trait PlayData {
    fn played_at(&self) -> NaiveDateTime;

    fn artist(&self) -> &str;
    fn song(&self) -> &str;

    fn artwork_url(&self) -> Option<&str> { None }

    fn day_of_week(&self) -> Weekday { self.played_at().weekday() }

    fn hour(&self) -> u32 { self.played_at().hour() }

    fn play_date(&self) -> NaiveDate { self.played_at().date() }

    fn field(&self, field: Field) -> &str {
        match field {
            Field::Song => self.song(),
            Field::Artist => self.artist(),
        }
    }
}

impl<P: PlayData + ?Sized> PlayData for &P {
    #[inline]
    fn played_at(&self) -> NaiveDateTime { (**self).played_at() }

    #[inline]
    fn artist(&self) -> &str { (**self).artist() }

    #[inline]
    fn song(&self) -> &str { (**self).song() }

    #[inline]
    fn artwork_url(&self) -> Option<&str> { (**self).artwork_url() }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_names() {
        let names: Vec<_> = WEEK.iter().copied().map(weekday_name).collect();
        assert_eq!(names, ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday(" sunday "), Some(Weekday::Sun));
        assert_eq!(parse_weekday("thu"), Some(Weekday::Thu));
        assert_eq!(parse_weekday("Funday"), None);
        assert_eq!(parse_weekday(""), None);
    }
}
