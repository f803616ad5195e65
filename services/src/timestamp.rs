use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
};

const OFFSET_FMTS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M%:z"];
const NAIVE_FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FMT: &str = "%Y-%m-%d";

/// Parses the textual timestamps found in playback logs.
///
/// Values carrying a UTC offset keep their own wall-clock time; the offset is
/// dropped rather than converted. A bare date means midnight.
pub fn parse_timestamp(val: &str) -> Option<NaiveDateTime> {
    let val = val.trim();
    DateTime::parse_from_rfc3339(val)
        .ok()
        .or_else(|| OFFSET_FMTS.iter().find_map(|fmt| DateTime::parse_from_str(val, fmt).ok()))
        .map(|dt| dt.naive_local())
        .or_else(|| NAIVE_FMTS.iter().find_map(|fmt| NaiveDateTime::parse_from_str(val, fmt).ok()))
        .or_else(|| {
            NaiveDate::parse_from_str(val, DATE_FMT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}


#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_naive_formats() {
        assert_eq!(parse_timestamp("2024-03-04 10:15:30"), Some(at(10, 15, 30)));
        assert_eq!(parse_timestamp("2024-03-04T10:15:30"), Some(at(10, 15, 30)));
        assert_eq!(parse_timestamp("2024-03-04 10:15"), Some(at(10, 15, 0)));
        assert_eq!(parse_timestamp("  2024-03-04 10:15  "), Some(at(10, 15, 0)));
        assert_eq!(parse_timestamp("2024-03-04"), Some(at(0, 0, 0)));
    }

    #[test]
    fn test_fractional_seconds() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_milli_opt(10, 15, 30, 250).unwrap();
        assert_eq!(parse_timestamp("2024-03-04 10:15:30.250"), Some(expected));
    }

    #[test]
    fn test_offsets_keep_wall_clock() {
        assert_eq!(parse_timestamp("2024-03-04T10:15:30Z"), Some(at(10, 15, 30)));
        assert_eq!(parse_timestamp("2024-03-04T10:15:30-05:00"), Some(at(10, 15, 30)));
        assert_eq!(parse_timestamp("2024-03-04 22:15:30+02:00"), Some(at(22, 15, 30)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-01 00:00:00"), None);
        assert_eq!(parse_timestamp("2024-03-04 25:00"), None);
    }
}
