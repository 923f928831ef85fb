use std::cell::Cell;

use nanotime::{
    tz::{Database, Location, Zone, ZoneTransition},
    ClockReading, ClockSource, Duration, Time,
};

/// A clock whose wall and monotonic readings are advanced by hand.
#[derive(Debug)]
struct ManualClock {
    unix_seconds: Cell<i64>,
    monotonic: Cell<i64>,
}

impl ManualClock {
    fn new(unix_seconds: i64, monotonic: i64) -> ManualClock {
        ManualClock {
            unix_seconds: Cell::new(unix_seconds),
            monotonic: Cell::new(monotonic),
        }
    }

    /// Moves the monotonic clock forward and the wall clock by `wall`,
    /// which need not agree with the monotonic step.
    fn advance(&self, mono: Duration, wall: i64) {
        self.monotonic.set(self.monotonic.get() + mono.nanoseconds());
        self.unix_seconds.set(self.unix_seconds.get() + wall);
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> ClockReading {
        ClockReading {
            unix_seconds: self.unix_seconds.get(),
            nanoseconds: 0,
            monotonic: self.monotonic.get(),
        }
    }
}

#[test]
fn elapsed_ignores_wall_clock_steps() {
    let clock = ManualClock::new(1221681866, 1_000);
    let start = Time::now_with(&clock);
    // The wall clock is stepped back an hour while one second elapses.
    clock.advance(Duration::SECOND, -3600);
    let end = Time::now_with(&clock);

    assert_eq!(end.duration_since(&start), Duration::SECOND);
    assert!(end.after(&start));
    // Without the monotonic readings, the wall clocks disagree.
    let wall = end.without_monotonic().duration_since(&start);
    assert_eq!(wall, Duration::from_secs(-3599));
}

#[test]
fn clock_without_monotonic() {
    let clock = ManualClock::new(1221681866, 0);
    let t = Time::now_with(&clock);
    assert_eq!(t.monotonic(), None);
    assert_eq!(t.unix(), 1221681866);
}

#[test]
fn monotonic_is_stripped_by_presentation_changes() {
    let clock = ManualClock::new(1221681866, 42);
    let t = Time::now_with(&clock);
    assert_eq!(t.monotonic(), Some(42));
    assert_eq!(t.utc().monotonic(), None);
    assert_eq!(t.in_location(&Location::UTC).monotonic(), None);
    assert_eq!(t.truncate(Duration::ZERO).monotonic(), None);
    assert_eq!(t.round(Duration::ZERO).monotonic(), None);
    assert_eq!(t.add_date(0, 0, 0).monotonic(), None);
    // Adding a duration keeps the reading, shifted.
    let later = t.clone() + Duration::MICROSECOND;
    assert_eq!(later.monotonic(), Some(1_042));
}

#[test]
fn system_clock_now() {
    let a = Time::now();
    let b = Time::now();
    assert!(a.monotonic().is_some());
    assert!(!b.before(&a));
    assert!(b.duration_since(&a) >= Duration::ZERO);
    assert!(a.since() >= Duration::ZERO);
    assert!(a.until() <= Duration::ZERO);
}

#[test]
fn duration_arithmetic_saturates() {
    assert_eq!(Duration::MAX + Duration::NANOSECOND, Duration::MAX);
    assert_eq!(Duration::MIN - Duration::NANOSECOND, Duration::MIN);
    assert_eq!(-Duration::MIN, Duration::MAX);
    assert_eq!(Duration::MIN.abs(), Duration::MAX);
    assert_eq!(i64::MAX * Duration::HOUR, Duration::MAX);
    assert_eq!(Duration::HOUR * -3, Duration::from_secs(-3 * 3600));
}

#[test]
fn duration_display() {
    let d = 90 * Duration::MINUTE + 500 * Duration::MILLISECOND;
    assert_eq!(d.to_string(), "1h30m0.5s");
    assert_eq!((-d).to_string(), "-1h30m0.5s");
    assert_eq!(Duration::ZERO.to_string(), "0s");
    assert_eq!((1500 * Duration::NANOSECOND).to_string(), "1.5µs");
}

#[test]
fn time_arithmetic_round_trip() {
    let t = Time::date_in(2008, 9, 17, 20, 4, 26, 0, &Location::UTC);
    let d = 36 * Duration::HOUR + 7 * Duration::NANOSECOND;
    let later = &t + d;
    assert_eq!(later.to_string(), "2008-09-19 08:04:26.000000007 +0000 UTC");
    assert_eq!(&later - &t, d);
    assert_eq!(later - d, t);
}

#[test]
fn database_lookup() {
    let db = Database::new();
    let zones = vec![
        Zone::new("LMT", -28378, false),
        Zone::new("PDT", -25200, true),
        Zone::new("PST", -28800, false),
    ];
    let transitions = vec![
        ZoneTransition::new(-2717640000, 2),
        ZoneTransition::new(-1633269600, 1),
        ZoneTransition::new(-1615129200, 2),
    ];
    let loc = Location::new(
        "America/Los_Angeles",
        zones,
        transitions,
        Some("PST8PDT,M3.2.0,M11.1.0"),
    )
    .unwrap();
    db.insert(loc);
    db.insert(Location::fixed("Etc/GMT-14", 14 * 3600));
    assert_eq!(db.names(), vec!["America/Los_Angeles", "Etc/GMT-14"]);

    let la = db.get("America/Los_Angeles").unwrap();
    // Before the first transition, the local mean time applies.
    let t = Time::from_unix(-2717640001, 0).in_location(&la);
    assert_eq!(t.zone().name(), "LMT");
    // After the last transition, the extend rule takes over.
    let t = Time::from_unix(1221681866, 0).in_location(&la);
    assert_eq!(t.to_string(), "2008-09-17 13:04:26 -0700 PDT");
    assert!(t.is_dst());

    let kiritimati = db.get("Etc/GMT-14").unwrap();
    let t = Time::from_unix(0, 0).in_location(&kiritimati);
    assert_eq!(t.to_string(), "1970-01-01 14:00:00 +1400 Etc/GMT-14");

    let err = db.get("Europe/Nowhere").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn zone_bounds_follow_rule() {
    let loc = Location::posix("US/Pacific", "PST8PDT,M3.2.0,M11.1.0").unwrap();
    let t = Time::from_unix(1221681866, 0).in_location(&loc);
    let (start, end) = t.zone_bounds();
    assert_eq!(start.as_ref().map(|t| t.unix()), Some(1205056800));
    assert_eq!(end.map(|t| t.unix()), Some(1225616400));
    assert_eq!(
        start.map(|t| t.to_string()).as_deref(),
        Some("2008-03-09 03:00:00 -0700 PDT"),
    );

    let (start, end) = Time::ZERO.zone_bounds();
    assert!(start.is_none());
    assert!(end.is_none());
}
