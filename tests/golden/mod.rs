use nanotime::{
    civil::{Month, Weekday},
    tz::Location,
    Time,
};

/// The broken down form of a time that the tables below check against.
#[derive(Debug)]
struct Parsed {
    year: i64,
    month: Month,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    nanosecond: i32,
    weekday: Weekday,
    offset: i32,
    zone: &'static str,
}

macro_rules! parsed {
    (
        $year:expr, $month:ident, $day:expr,
        $hour:expr, $minute:expr, $second:expr, $nanosecond:expr,
        $weekday:ident, $offset:expr, $zone:expr $(,)?
    ) => {
        Parsed {
            year: $year,
            month: Month::$month,
            day: $day,
            hour: $hour,
            minute: $minute,
            second: $second,
            nanosecond: $nanosecond,
            weekday: Weekday::$weekday,
            offset: $offset,
            zone: $zone,
        }
    };
}

const PST: i32 = -8 * 60 * 60;
const PDT: i32 = -7 * 60 * 60;

fn utc_tests() -> Vec<(i64, Parsed)> {
    vec![
        (0, parsed!(1970, January, 1, 0, 0, 0, 0, Thursday, 0, "UTC")),
        (
            1221681866,
            parsed!(2008, September, 17, 20, 4, 26, 0, Wednesday, 0, "UTC"),
        ),
        (
            -1221681866,
            parsed!(1931, April, 16, 3, 55, 34, 0, Thursday, 0, "UTC"),
        ),
        (
            -11644473600,
            parsed!(1601, January, 1, 0, 0, 0, 0, Monday, 0, "UTC"),
        ),
        (
            599529660,
            parsed!(1988, December, 31, 0, 1, 0, 0, Saturday, 0, "UTC"),
        ),
        (
            978220860,
            parsed!(2000, December, 31, 0, 1, 0, 0, Sunday, 0, "UTC"),
        ),
    ]
}

fn nano_utc_tests() -> Vec<(i64, Parsed)> {
    vec![
        (
            0,
            parsed!(
                1970, January, 1, 0, 0, 0, 100_000_000, Thursday, 0, "UTC",
            ),
        ),
        (
            1221681866,
            parsed!(
                2008, September, 17, 20, 4, 26, 200_000_000, Wednesday, 0,
                "UTC",
            ),
        ),
    ]
}

fn local_tests() -> Vec<(i64, Parsed)> {
    vec![
        (0, parsed!(1969, December, 31, 16, 0, 0, 0, Wednesday, PST, "PST")),
        (
            1221681866,
            parsed!(2008, September, 17, 13, 4, 26, 0, Wednesday, PDT, "PDT"),
        ),
        (
            2159200800,
            parsed!(2038, June, 3, 11, 0, 0, 0, Thursday, PDT, "PDT"),
        ),
        (
            2152173599,
            parsed!(2038, March, 14, 1, 59, 59, 0, Sunday, PST, "PST"),
        ),
        (
            2152173600,
            parsed!(2038, March, 14, 3, 0, 0, 0, Sunday, PDT, "PDT"),
        ),
        (
            2152173601,
            parsed!(2038, March, 14, 3, 0, 1, 0, Sunday, PDT, "PDT"),
        ),
        (
            2172733199,
            parsed!(2038, November, 7, 1, 59, 59, 0, Sunday, PDT, "PDT"),
        ),
        (
            2172733200,
            parsed!(2038, November, 7, 1, 0, 0, 0, Sunday, PST, "PST"),
        ),
        (
            2172733201,
            parsed!(2038, November, 7, 1, 0, 1, 0, Sunday, PST, "PST"),
        ),
    ]
}

fn nano_local_tests() -> Vec<(i64, Parsed)> {
    vec![
        (
            0,
            parsed!(
                1969, December, 31, 16, 0, 0, 100_000_000, Wednesday, PST,
                "PST",
            ),
        ),
        (
            1221681866,
            parsed!(
                2008, September, 17, 13, 4, 26, 300_000_000, Wednesday, PDT,
                "PDT",
            ),
        ),
    ]
}

fn pacific() -> Location {
    Location::posix("America/Los_Angeles", "PST8PDT,M3.2.0,M11.1.0").unwrap()
}

/// Asserts that every accessor of `t` agrees with `want`, both through the
/// aggregate accessors and the individual ones.
fn assert_same(t: &Time, want: &Parsed) {
    let date = t.date();
    let clock = t.clock();
    let zone = t.zone();
    assert_eq!(
        (date.year(), date.month(), date.day()),
        (want.year, want.month, want.day),
        "date of {t}",
    );
    assert_eq!(
        (clock.hour(), clock.minute(), clock.second()),
        (want.hour, want.minute, want.second),
        "clock of {t}",
    );
    assert_eq!(
        (zone.name(), zone.offset()),
        (want.zone, want.offset),
        "zone of {t}",
    );

    assert_eq!(t.year(), want.year, "year of {t}");
    assert_eq!(t.month(), want.month, "month of {t}");
    assert_eq!(t.day(), want.day, "day of {t}");
    assert_eq!(t.hour(), want.hour, "hour of {t}");
    assert_eq!(t.minute(), want.minute, "minute of {t}");
    assert_eq!(t.second(), want.second, "second of {t}");
    assert_eq!(t.nanosecond(), want.nanosecond, "nanosecond of {t}");
    assert_eq!(t.weekday(), want.weekday, "weekday of {t}");
}

#[test]
fn seconds_to_utc() {
    for (sec, golden) in utc_tests() {
        let t = Time::from_unix(sec, 0).utc();
        assert_eq!(t.unix(), sec);
        assert_same(&t, &golden);
    }
}

#[test]
fn nanoseconds_to_utc() {
    for (sec, golden) in nano_utc_tests() {
        let nsec = sec * 1_000_000_000 + i64::from(golden.nanosecond);
        let t = Time::from_unix(0, nsec).utc();
        assert_eq!(t.unix_nano(), nsec);
        assert_same(&t, &golden);
    }
}

#[test]
fn seconds_to_local() {
    let _ = crate::Logger::init();
    let loc = pacific();
    for (sec, golden) in local_tests() {
        let t = Time::from_unix(sec, 0).in_location(&loc);
        assert_eq!(t.unix(), sec);
        assert_same(&t, &golden);
    }
}

#[test]
fn nanoseconds_to_local() {
    let loc = pacific();
    for (sec, golden) in nano_local_tests() {
        let nsec = sec * 1_000_000_000 + i64::from(golden.nanosecond);
        let t = Time::from_unix(0, nsec).in_location(&loc);
        assert_eq!(t.unix_nano(), nsec);
        assert_same(&t, &golden);
    }
}

/// Building each golden time back up from its fields yields the same
/// instant.
#[test]
fn fields_to_seconds() {
    let loc = pacific();
    let cases = utc_tests()
        .into_iter()
        .map(|(sec, golden)| (sec, golden, Location::UTC))
        .chain(
            local_tests()
                .into_iter()
                .map(|(sec, golden)| (sec, golden, loc.clone())),
        );
    for (sec, golden, loc) in cases {
        // The first second of the fall back hour is ambiguous, and the
        // earlier (daylight) reading wins.
        if golden.month == Month::November && golden.hour == 1 {
            continue;
        }
        let t = Time::date_in(
            golden.year,
            i64::from(golden.month.number()),
            i64::from(golden.day),
            i64::from(golden.hour),
            i64::from(golden.minute),
            i64::from(golden.second),
            i64::from(golden.nanosecond),
            &loc,
        );
        assert_eq!(t.unix(), sec, "{t}");
    }
}

#[test]
fn display() {
    let loc = pacific();
    let t = Time::from_unix(2152173600, 0).in_location(&loc);
    assert_eq!(t.to_string(), "2038-03-14 03:00:00 -0700 PDT");
    let t = Time::from_unix(1221681866, 300_000_000).in_location(&loc);
    assert_eq!(t.to_string(), "2008-09-17 13:04:26.3 -0700 PDT");
}
