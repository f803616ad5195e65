use chrono::{
    NaiveDate,
    Weekday,
};
use radio_report_core::PlayData;

use super::*;
use crate::{
    record::{
        NETWORK_ARTIST,
        PROMO_SONG,
    },
    schema::{
        ArtworkColumn,
        ARTWORK_LARGE,
        ARTWORK_URL,
    },
};

const SAMPLE: &str = "\
timestamp,artist,song,artwork_large
2024-03-04 10:15:00,Lansdowne,Burn Brighter,https://img.example/burn.jpg
2024-03-04 10:19:00,The WMW Radio Network,Station ID,
2024-03-04 10:20:00,Someone,Promo,
2024-03-05 15:01:00,The Cab,Angel With A Shotgun,
";

#[test]
fn test_load_sample() {
    let data = read_plays(SAMPLE.as_bytes()).expect("Failed to load sample");
    assert_eq!(data.len(), 2);
    assert_eq!(data.excluded(), 2);
    assert_eq!(data.artwork_column(), &ArtworkColumn::Present {
        name: ARTWORK_LARGE,
        index: 3,
    });

    let first = &data.plays()[0];
    assert_eq!(
        first.played_at(),
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(10, 15, 0).unwrap()
    );
    assert_eq!(first.artist(), "Lansdowne");
    assert_eq!(first.song(), "Burn Brighter");
    assert_eq!(first.artwork_url(), Some("https://img.example/burn.jpg"));
    assert_eq!(first.day_of_week(), Weekday::Mon);
    assert_eq!(first.hour(), 10);

    let second = &data.plays()[1];
    assert_eq!(second.artwork_url(), None);
    assert_eq!(second.day_of_week(), Weekday::Tue);
    assert_eq!(second.hour(), 15);
}

#[test]
fn test_filler_never_survives() {
    let data = read_plays(SAMPLE.as_bytes()).unwrap();
    assert!(data.plays().iter().all(|p| p.artist() != NETWORK_ARTIST && p.song() != PROMO_SONG));
}

#[test]
fn test_no_artwork_column() {
    let csv = "timestamp,artist,song\n2024-03-04 10:15:00,A,x\n";
    let data = read_plays(csv.as_bytes()).unwrap();
    assert_eq!(data.artwork_column(), &ArtworkColumn::Absent);
    assert_eq!(data.plays()[0].artwork_url(), None);
}

#[test]
fn test_canonical_artwork_preferred() {
    let csv = "timestamp,artist,song,artwork_large,artwork_url\n2024-03-04 10:15:00,A,x,large.jpg,url.jpg\n";
    let data = read_plays(csv.as_bytes()).unwrap();
    assert_eq!(data.artwork_column(), &ArtworkColumn::Present {
        name: ARTWORK_URL,
        index: 4,
    });
    assert_eq!(data.plays()[0].artwork_url(), Some("url.jpg"));
}

#[test]
fn test_missing_required_column() {
    let csv = "timestamp,song\n2024-03-04 10:15:00,x\n";
    let err = read_plays(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn("artist")), "{err:?}");
}

#[test]
fn test_bad_timestamp_names_line() {
    let csv = "timestamp,artist,song\n2024-03-04 10:15:00,A,x\nnot a time,B,y\n";
    match read_plays(csv.as_bytes()) {
        Err(LoadError::InvalidTimestamp { line, value }) => {
            assert_eq!(line, 3);
            assert_eq!(value, "not a time");
        },
        other => panic!("Expected timestamp error, got {other:?}"),
    }
}

#[test]
fn test_bad_timestamp_on_filler_still_fails() {
    let csv = "timestamp,artist,song\nsoon,The WMW Radio Network,Station ID\n";
    assert!(matches!(read_plays(csv.as_bytes()), Err(LoadError::InvalidTimestamp { .. })));
}

#[test]
fn test_ragged_row() {
    let csv = "timestamp,artist,song\n2024-03-04 10:15:00,A\n";
    assert!(matches!(read_plays(csv.as_bytes()), Err(LoadError::Csv(_))));
}

#[test]
fn test_header_only() {
    let data = read_plays("timestamp,artist,song\n".as_bytes()).unwrap();
    assert!(data.is_empty());
    assert_eq!(data.excluded(), 0);
}
