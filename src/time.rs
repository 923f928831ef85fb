use core::{
    cmp::Ordering,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use crate::{
    civil::{Clock, Date, IsoWeek, Month, Weekday},
    clock::{ClockSource, SystemClock},
    duration::{less_than_half, Duration},
    tz::{Location, Zone},
    util::{
        common::{
            clock_from_absolute, date_from_absolute, days_since_epoch,
            is_leap_year, iso_week_from_absolute, normalize,
            weekday_from_absolute, year_day_from_absolute, DAYS_BEFORE,
        },
        epoch::{
            absolute_to_unix, unix_to_absolute, ALPHA, INTERNAL_TO_UNIX,
            MAX_WALL, MIN_WALL, OMEGA, SECONDS_PER_DAY, SECONDS_PER_HOUR,
            SECONDS_PER_MINUTE, UNIX_TO_INTERNAL, WALL_TO_INTERNAL,
        },
    },
};

/// Set in `wall` when the time carries a monotonic clock reading.
const HAS_MONOTONIC: u64 = 1 << 63;
const NSEC_MASK: u64 = (1 << 30) - 1;
const NSEC_SHIFT: u32 = 30;
const NANOS_PER_SEC: i64 = 1_000_000_000;

/// An instant in time with nanosecond precision.
///
/// A `Time` carries a [`Location`] that decides how it is presented as
/// calendar fields. The location never affects which instant a time
/// denotes: two times in different locations compare equal when they refer
/// to the same instant.
///
/// Times returned by [`Time::now`] additionally carry a reading of the
/// monotonic clock. When both operands of [`Time::duration_since`] or of a
/// comparison carry one, only the monotonic readings are used. Operations
/// that change the presentation of a time, like [`Time::in_location`],
/// [`Time::truncate`] and [`Time::round`], return times without a monotonic
/// reading. Adding a [`Duration`] preserves it.
///
/// The zero value, [`Time::ZERO`], is January 1, year 1, 00:00:00 UTC.
///
/// # Example
///
/// ```
/// use nanotime::{civil::{Month, Weekday}, tz::Location, Duration, Time};
///
/// let t = Time::date_in(2009, 11, 10, 23, 0, 0, 0, &Location::UTC);
/// assert_eq!(t.month(), Month::November);
/// assert_eq!(t.weekday(), Weekday::Tuesday);
///
/// let t = t + 2 * Duration::HOUR;
/// assert_eq!(t.to_string(), "2009-11-11 01:00:00 +0000 UTC");
/// ```
///
/// # Representation
///
/// Without a monotonic reading, `wall` holds only the nanoseconds and `ext`
/// holds signed seconds since year 1. With one, `wall` packs a 33 bit count
/// of seconds since 1885 above the nanoseconds, and `ext` holds the
/// monotonic reading. Times outside of 1885 through 2157 can't hold a
/// monotonic reading.
#[derive(Clone)]
pub struct Time {
    wall: u64,
    ext: i64,
    loc: Location,
}

impl Time {
    /// The zero time: January 1, year 1, 00:00:00 UTC.
    pub const ZERO: Time = Time { wall: 0, ext: 0, loc: Location::UTC };

    /// Returns the current time in the local location, with a monotonic
    /// reading.
    pub fn now() -> Time {
        Time::now_with(&SystemClock)
    }

    /// Returns the current time according to the given clock, in the local
    /// location.
    ///
    /// The time carries a monotonic reading when the clock provides a
    /// non-zero one and the wall clock falls in the range that supports it.
    pub fn now_with<C: ClockSource + ?Sized>(clock: &C) -> Time {
        let reading = clock.now();
        let (sec, nsec) = normalize(
            reading.unix_seconds,
            i64::from(reading.nanoseconds),
            NANOS_PER_SEC,
        );
        let mut t = Time::unix_time(sec, nsec as i32, Location::local());
        if reading.monotonic != 0 {
            t.set_mono(reading.monotonic);
        }
        t
    }

    /// Returns the time `sec` seconds and `nsec` nanoseconds after the Unix
    /// epoch, in the local location.
    ///
    /// `nsec` may be outside of `0..1_000_000_000` and is carried into the
    /// seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::Time;
    ///
    /// let t = Time::from_unix(1, -1).utc();
    /// assert_eq!(t.to_string(), "1970-01-01 00:00:00.999999999 +0000 UTC");
    /// assert_eq!(t.unix(), 0);
    /// assert_eq!(t.nanosecond(), 999_999_999);
    /// ```
    pub fn from_unix(sec: i64, nsec: i64) -> Time {
        let (sec, nsec) = normalize(sec, nsec, NANOS_PER_SEC);
        Time::unix_time(sec, nsec as i32, Location::local())
    }

    /// Returns the time `msec` milliseconds after the Unix epoch, in the
    /// local location.
    pub fn from_unix_milli(msec: i64) -> Time {
        Time::from_unix(msec / 1_000, (msec % 1_000) * 1_000_000)
    }

    /// Returns the time `usec` microseconds after the Unix epoch, in the
    /// local location.
    pub fn from_unix_micro(usec: i64) -> Time {
        Time::from_unix(usec / 1_000_000, (usec % 1_000_000) * 1_000)
    }

    /// Returns the time with the given calendar fields in `loc`.
    ///
    /// Every field may be outside of its usual range and is normalized by
    /// carrying into the next larger field, so October 32 becomes
    /// November 1.
    ///
    /// When the fields name a local time that is skipped or repeated by a
    /// transition of `loc`, the result is correct in one of the two zones
    /// involved, without guaranteeing which.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Time};
    ///
    /// let t = Time::date_in(2008, 10, 32, 24, 0, -1, 0, &Location::UTC);
    /// assert_eq!(t.to_string(), "2008-11-01 23:59:59 +0000 UTC");
    ///
    /// let tz = Location::posix("US/Pacific", "PST8PDT")?;
    /// let t = Time::date_in(2008, 9, 17, 13, 4, 26, 0, &tz);
    /// assert_eq!(t.unix(), 1221681866);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn date_in(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        min: i64,
        sec: i64,
        nsec: i64,
        loc: &Location,
    ) -> Time {
        let (year, month) = normalize(year, month.wrapping_sub(1), 12);
        let (sec, nsec) = normalize(sec, nsec, NANOS_PER_SEC);
        let (min, sec) = normalize(min, sec, 60);
        let (hour, min) = normalize(hour, min, 60);
        let (day, hour) = normalize(day, hour, 24);

        let mut days = days_since_epoch(year)
            .wrapping_add(DAYS_BEFORE[month as usize] as u64);
        if is_leap_year(year) && month >= Month::March.index() as i64 {
            days = days.wrapping_add(1);
        }
        days = days.wrapping_add(day.wrapping_sub(1) as u64);
        let abs = days.wrapping_mul(SECONDS_PER_DAY as u64).wrapping_add(
            (hour * SECONDS_PER_HOUR + min * SECONDS_PER_MINUTE + sec) as u64,
        );
        let mut unix = absolute_to_unix(abs);

        // The fields are local, but lookups take UTC. Look up the fields as
        // if they were UTC first, then correct once if the adjusted instant
        // lands outside of the zone found.
        let info = loc.lookup(unix);
        if info.offset != 0 {
            let mut offset = info.offset;
            let utc = unix.wrapping_sub(i64::from(offset));
            if utc < info.start || utc >= info.end {
                offset = loc.lookup(utc).offset;
            }
            unix = unix.wrapping_sub(i64::from(offset));
        }
        let mut t = Time::unix_time(unix, nsec as i32, Location::UTC);
        t.set_loc(loc);
        t
    }

    fn unix_time(sec: i64, nsec: i32, loc: Location) -> Time {
        Time {
            wall: nsec as u64,
            ext: sec.wrapping_add(UNIX_TO_INTERNAL),
            loc,
        }
    }

    fn has_mono(&self) -> bool {
        self.wall & HAS_MONOTONIC != 0
    }

    fn nsec(&self) -> i32 {
        (self.wall & NSEC_MASK) as i32
    }

    /// Returns seconds since the zero time.
    fn sec(&self) -> i64 {
        if self.has_mono() {
            let packed = self.wall << 1 >> (NSEC_SHIFT + 1);
            return WALL_TO_INTERNAL + packed as i64;
        }
        self.ext
    }

    fn unix_sec(&self) -> i64 {
        self.sec().wrapping_add(INTERNAL_TO_UNIX)
    }

    fn add_sec(&mut self, d: i64) {
        if self.has_mono() {
            let sec = (self.wall << 1 >> (NSEC_SHIFT + 1)) as i64;
            match sec.checked_add(d) {
                Some(dsec) if (0..1 << 33).contains(&dsec) => {
                    self.wall = self.wall & NSEC_MASK
                        | (dsec as u64) << NSEC_SHIFT
                        | HAS_MONOTONIC;
                    return;
                }
                // The wall second no longer fits in the packed field.
                _ => self.strip_mono(),
            }
        }
        self.ext = self
            .ext
            .checked_add(d)
            .unwrap_or(if d > 0 { i64::MAX } else { -i64::MAX });
    }

    fn strip_mono(&mut self) {
        if self.has_mono() {
            self.ext = self.sec();
            self.wall &= NSEC_MASK;
        }
    }

    /// Attaches a monotonic reading. This does nothing when the wall clock
    /// is outside of the packed range.
    fn set_mono(&mut self, mono: i64) {
        if !self.has_mono() {
            let sec = self.ext;
            if sec < MIN_WALL || MAX_WALL < sec {
                return;
            }
            let packed = ((sec - MIN_WALL) as u64) << NSEC_SHIFT;
            self.wall |= HAS_MONOTONIC | packed;
        }
        self.ext = mono;
    }

    /// Any location named `UTC` is stored as [`Location::UTC`].
    fn set_loc(&mut self, loc: &Location) {
        self.strip_mono();
        self.loc =
            if loc.name() == "UTC" { Location::UTC } else { loc.clone() };
    }

    /// Returns the absolute seconds of this time shifted into its location.
    fn abs(&self) -> u64 {
        let unix = self.unix_sec();
        let offset = self.loc.offset(unix);
        unix_to_absolute(unix.wrapping_add(i64::from(offset)))
    }

    /// Returns the monotonic reading of this time, if it has one.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::Time;
    ///
    /// assert!(Time::now().monotonic().is_some());
    /// assert!(Time::now().utc().monotonic().is_none());
    /// assert!(Time::from_unix(0, 0).monotonic().is_none());
    /// ```
    pub fn monotonic(&self) -> Option<i64> {
        if self.has_mono() {
            Some(self.ext)
        } else {
            None
        }
    }

    /// Returns this time without its monotonic reading.
    pub fn without_monotonic(&self) -> Time {
        let mut t = self.clone();
        t.strip_mono();
        t
    }

    /// Returns the location of this time.
    pub fn location(&self) -> &Location {
        &self.loc
    }

    /// Returns this time presented in `loc`.
    ///
    /// A location named `UTC` is always presented as [`Location::UTC`],
    /// whatever zones it was built with.
    pub fn in_location(&self, loc: &Location) -> Time {
        let mut t = self.clone();
        t.set_loc(loc);
        t
    }

    /// Returns this time presented in UTC.
    pub fn utc(&self) -> Time {
        self.in_location(&Location::UTC)
    }

    /// Returns this time presented in the local location.
    pub fn local(&self) -> Time {
        self.in_location(&Location::local())
    }

    /// Returns the zone in effect at this time in its location.
    pub fn zone(&self) -> Zone {
        self.loc.lookup(self.unix_sec()).zone()
    }

    /// Returns the bounds of the window in which the zone of this time is in
    /// effect, as times in the same location.
    ///
    /// The start is inclusive and the end exclusive. A bound is `None` when
    /// the window extends to the beginning or end of time.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Time};
    ///
    /// let tz = Location::posix("US/Pacific", "PST8PDT")?;
    /// let t = Time::date_in(2008, 9, 17, 0, 0, 0, 0, &tz);
    /// let (start, end) = t.zone_bounds();
    /// assert_eq!(
    ///     start.unwrap().to_string(),
    ///     "2008-03-09 03:00:00 -0700 PDT",
    /// );
    /// assert_eq!(end.unwrap().to_string(), "2008-11-02 01:00:00 -0800 PST");
    ///
    /// assert_eq!(t.utc().zone_bounds(), (None, None));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn zone_bounds(&self) -> (Option<Time>, Option<Time>) {
        let info = self.loc.lookup(self.unix_sec());
        let bound = |unix: i64, open: i64| {
            if unix == open {
                return None;
            }
            Some(Time::unix_time(unix, 0, self.loc.clone()))
        };
        (bound(info.start, ALPHA), bound(info.end, OMEGA))
    }

    /// Returns true if this time falls in a daylight saving zone.
    pub fn is_dst(&self) -> bool {
        self.loc.lookup(self.unix_sec()).is_dst
    }

    /// Returns true if this is the zero time, in any location.
    pub fn is_zero(&self) -> bool {
        self.sec() == 0 && self.nsec() == 0
    }

    /// Returns the number of seconds since the Unix epoch.
    pub fn unix(&self) -> i64 {
        self.unix_sec()
    }

    /// Returns the number of milliseconds since the Unix epoch.
    ///
    /// The result is unspecified when it doesn't fit in an `i64`.
    pub fn unix_milli(&self) -> i64 {
        self.unix_sec()
            .wrapping_mul(1_000)
            .wrapping_add(i64::from(self.nsec()) / 1_000_000)
    }

    /// Returns the number of microseconds since the Unix epoch.
    ///
    /// The result is unspecified when it doesn't fit in an `i64`.
    pub fn unix_micro(&self) -> i64 {
        self.unix_sec()
            .wrapping_mul(1_000_000)
            .wrapping_add(i64::from(self.nsec()) / 1_000)
    }

    /// Returns the number of nanoseconds since the Unix epoch.
    ///
    /// The result is unspecified when it doesn't fit in an `i64`, i.e.,
    /// for times before 1678 or after 2262.
    pub fn unix_nano(&self) -> i64 {
        self.unix_sec()
            .wrapping_mul(NANOS_PER_SEC)
            .wrapping_add(i64::from(self.nsec()))
    }

    /// Returns the calendar date of this time in its location.
    pub fn date(&self) -> Date {
        let date = date_from_absolute(self.abs());
        Date::new(date.year, date.month, date.day)
    }

    /// Returns the year of this time in its location.
    pub fn year(&self) -> i64 {
        year_day_from_absolute(self.abs()).0
    }

    /// Returns the month of this time in its location.
    pub fn month(&self) -> Month {
        date_from_absolute(self.abs()).month
    }

    /// Returns the day of the month of this time in its location.
    pub fn day(&self) -> i8 {
        date_from_absolute(self.abs()).day
    }

    /// Returns the day of the year of this time in its location, in the
    /// range `1..=366`.
    pub fn year_day(&self) -> i16 {
        (year_day_from_absolute(self.abs()).1 + 1) as i16
    }

    /// Returns the day of the week of this time in its location.
    pub fn weekday(&self) -> Weekday {
        weekday_from_absolute(self.abs())
    }

    /// Returns the ISO 8601 week of this time in its location.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Time};
    ///
    /// // A Sunday, in the last week of the previous ISO year.
    /// let t = Time::date_in(2006, 1, 1, 0, 0, 0, 0, &Location::UTC);
    /// let week = t.iso_week();
    /// assert_eq!((week.year(), week.week()), (2005, 52));
    /// ```
    pub fn iso_week(&self) -> IsoWeek {
        let (year, week) = iso_week_from_absolute(self.abs());
        IsoWeek::new(year, week)
    }

    /// Returns the time of day of this time in its location.
    pub fn clock(&self) -> Clock {
        let (hour, minute, second) = clock_from_absolute(self.abs());
        Clock::new(hour, minute, second)
    }

    /// Returns the hour of this time in its location.
    pub fn hour(&self) -> i8 {
        clock_from_absolute(self.abs()).0
    }

    /// Returns the minute of this time in its location.
    pub fn minute(&self) -> i8 {
        clock_from_absolute(self.abs()).1
    }

    /// Returns the second of this time in its location.
    pub fn second(&self) -> i8 {
        clock_from_absolute(self.abs()).2
    }

    /// Returns the nanosecond within the second, in `0..1_000_000_000`.
    pub fn nanosecond(&self) -> i32 {
        self.nsec()
    }

    /// Returns this time plus `d`. This is what the `+` operator does.
    ///
    /// The wall clock saturates at the earliest and latest representable
    /// seconds. The monotonic reading, if any, is shifted along with the
    /// wall clock. It is dropped when shifting it would overflow.
    pub fn saturating_add(&self, d: Duration) -> Time {
        let d = d.nanoseconds();
        let mut dsec = d / NANOS_PER_SEC;
        let mut nsec = self.nsec() + (d % NANOS_PER_SEC) as i32;
        if nsec >= NANOS_PER_SEC as i32 {
            dsec += 1;
            nsec -= NANOS_PER_SEC as i32;
        } else if nsec < 0 {
            dsec -= 1;
            nsec += NANOS_PER_SEC as i32;
        }

        let mut t = self.clone();
        t.wall = t.wall & !NSEC_MASK | nsec as u64;
        t.add_sec(dsec);
        if t.has_mono() {
            match t.ext.checked_add(d) {
                Some(ext) => t.ext = ext,
                None => t.strip_mono(),
            }
        }
        t
    }

    /// Returns the duration from `earlier` to this time.
    ///
    /// If both times carry a monotonic reading, those readings are
    /// subtracted instead of the wall clocks. The result saturates at
    /// [`Duration::MIN`] and [`Duration::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Duration, Time};
    ///
    /// let a = Time::date_in(2000, 1, 1, 0, 0, 0, 0, &Location::UTC);
    /// let b = Time::date_in(2000, 1, 1, 12, 0, 0, 0, &Location::UTC);
    /// assert_eq!(b.duration_since(&a), 12 * Duration::HOUR);
    /// assert_eq!(a.duration_since(&b), -12 * Duration::HOUR);
    /// assert_eq!(Time::ZERO.duration_since(&b), Duration::MIN);
    /// ```
    pub fn duration_since(&self, earlier: &Time) -> Duration {
        if self.has_mono() && earlier.has_mono() {
            return sub_mono(self.ext, earlier.ext);
        }
        let nanos = i128::from(self.sec()) * i128::from(NANOS_PER_SEC)
            + i128::from(self.nsec())
            - i128::from(earlier.sec()) * i128::from(NANOS_PER_SEC)
            - i128::from(earlier.nsec());
        match i64::try_from(nanos) {
            Ok(nanos) => Duration::from_nanos(nanos),
            Err(_) if nanos < 0 => Duration::MIN,
            Err(_) => Duration::MAX,
        }
    }

    /// Returns the duration elapsed since this time.
    pub fn since(&self) -> Duration {
        Time::now().duration_since(self)
    }

    /// Returns the duration remaining until this time.
    pub fn until(&self) -> Duration {
        self.duration_since(&Time::now())
    }

    /// Returns the time with the given number of years, months and days
    /// added to the calendar fields of this time, normalized as
    /// [`Time::date_in`] does.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Time};
    ///
    /// let t = Time::date_in(2011, 1, 31, 12, 0, 0, 0, &Location::UTC);
    /// // February 31 normalizes to March 3.
    /// assert_eq!(t.add_date(0, 1, 0).date().to_string(), "2011-03-03");
    /// assert_eq!(t.add_date(-1, 0, 1).date().to_string(), "2010-02-01");
    /// ```
    pub fn add_date(&self, years: i64, months: i64, days: i64) -> Time {
        let abs = self.abs();
        let date = date_from_absolute(abs);
        let (hour, min, sec) = clock_from_absolute(abs);
        Time::date_in(
            date.year.wrapping_add(years),
            i64::from(date.month.number()).wrapping_add(months),
            i64::from(date.day).wrapping_add(days),
            i64::from(hour),
            i64::from(min),
            i64::from(sec),
            i64::from(self.nsec()),
            &self.loc,
        )
    }

    /// Compares two instants. Monotonic readings are used when both times
    /// have one.
    pub fn compare(&self, other: &Time) -> Ordering {
        if self.has_mono() && other.has_mono() {
            return self.ext.cmp(&other.ext);
        }
        self.sec()
            .cmp(&other.sec())
            .then_with(|| self.nsec().cmp(&other.nsec()))
    }

    /// Returns true if this time is after `other`.
    pub fn after(&self, other: &Time) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Returns true if this time is before `other`.
    pub fn before(&self, other: &Time) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Returns true if both times denote the same instant, regardless of
    /// their locations. This is what `==` does.
    pub fn equal(&self, other: &Time) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Returns this time rounded down to a multiple of `d` since the zero
    /// time, without a monotonic reading.
    ///
    /// Rounding operates on the absolute instant, not on the presentation
    /// in its location, so truncating to an hour in a location with a half
    /// hour offset won't land on a whole local hour.
    ///
    /// If `d` is zero or negative, the time is returned unchanged apart from
    /// losing its monotonic reading.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Duration, Time};
    ///
    /// let t = Time::date_in(
    ///     2012, 12, 7, 12, 15, 30, 918273645, &Location::UTC,
    /// );
    /// assert_eq!(
    ///     t.truncate(Duration::MINUTE).to_string(),
    ///     "2012-12-07 12:15:00 +0000 UTC",
    /// );
    /// assert_eq!(
    ///     t.truncate(Duration::MILLISECOND).to_string(),
    ///     "2012-12-07 12:15:30.918 +0000 UTC",
    /// );
    /// ```
    pub fn truncate(&self, d: Duration) -> Time {
        let t = self.without_monotonic();
        if d.nanoseconds() <= 0 {
            return t;
        }
        let r = t.remainder(d);
        t.saturating_add(-r)
    }

    /// Returns this time rounded to the nearest multiple of `d` since the
    /// zero time, without a monotonic reading. Halfway values round up.
    ///
    /// If `d` is zero or negative, the time is returned unchanged apart from
    /// losing its monotonic reading.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Duration, Time};
    ///
    /// let t = Time::date_in(
    ///     2012, 12, 7, 12, 15, 30, 918273645, &Location::UTC,
    /// );
    /// assert_eq!(
    ///     t.round(Duration::SECOND).to_string(),
    ///     "2012-12-07 12:15:31 +0000 UTC",
    /// );
    /// assert_eq!(
    ///     t.round(Duration::HOUR).to_string(),
    ///     "2012-12-07 12:00:00 +0000 UTC",
    /// );
    /// ```
    pub fn round(&self, d: Duration) -> Time {
        let t = self.without_monotonic();
        if d.nanoseconds() <= 0 {
            return t;
        }
        let r = t.remainder(d);
        if less_than_half(r.nanoseconds(), d.nanoseconds()) {
            return t.saturating_add(-r);
        }
        t.saturating_add(d - r)
    }

    /// Returns the non-negative remainder of nanoseconds since the zero time
    /// divided by `d`. `d` must be positive.
    fn remainder(&self, d: Duration) -> Duration {
        let nanos = i128::from(self.sec()) * i128::from(NANOS_PER_SEC)
            + i128::from(self.nsec());
        let r = nanos.rem_euclid(i128::from(d.nanoseconds()));
        // The remainder is less than `d`, so it fits.
        Duration::from_nanos(r as i64)
    }
}

/// Subtracts two monotonic readings, saturating on overflow.
fn sub_mono(t: i64, u: i64) -> Duration {
    match t.checked_sub(u) {
        Some(d) => Duration::from_nanos(d),
        None if t > u => Duration::MAX,
        None => Duration::MIN,
    }
}

impl Default for Time {
    fn default() -> Time {
        Time::ZERO
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Time) -> bool {
        self.equal(other)
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Time) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Add<Duration> for Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Time {
        Time::saturating_add(&self, rhs)
    }
}

impl<'a> Add<Duration> for &'a Time {
    type Output = Time;

    fn add(self, rhs: Duration) -> Time {
        Time::saturating_add(self, rhs)
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        *self = Time::saturating_add(self, rhs);
    }
}

impl Sub<Duration> for Time {
    type Output = Time;

    fn sub(self, rhs: Duration) -> Time {
        Time::saturating_add(&self, -rhs)
    }
}

impl<'a> Sub<Duration> for &'a Time {
    type Output = Time;

    fn sub(self, rhs: Duration) -> Time {
        Time::saturating_add(self, -rhs)
    }
}

impl SubAssign<Duration> for Time {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = Time::saturating_add(self, -rhs);
    }
}

impl Sub for Time {
    type Output = Duration;

    fn sub(self, rhs: Time) -> Duration {
        self.duration_since(&rhs)
    }
}

impl<'a> Sub<&'a Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: &'a Time) -> Duration {
        self.duration_since(rhs)
    }
}

impl<'a, 'b> Sub<&'b Time> for &'a Time {
    type Output = Duration;

    fn sub(self, rhs: &'b Time) -> Duration {
        self.duration_since(rhs)
    }
}

/// Renders the time as `2006-01-02 15:04:05.999999999 -0700 MST`.
///
/// Trailing zeros of the fraction are omitted, along with the `.` when the
/// fraction is zero. The zone abbreviation is replaced by the numeric offset
/// when the zone has no name. When the time carries a monotonic reading, it
/// is appended as ` m=±<seconds>.<nanoseconds>`.
impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let unix = self.unix_sec();
        let info = self.loc.lookup(unix);
        let abs = unix_to_absolute(unix.wrapping_add(i64::from(info.offset)));
        let date = date_from_absolute(abs);
        let (hour, minute, second) = clock_from_absolute(abs);

        crate::fmt::write_year(f, date.year)?;
        write!(
            f,
            "-{:02}-{:02} {hour:02}:{minute:02}:{second:02}",
            date.month.number(),
            date.day,
        )?;
        crate::fmt::write_fraction(f, self.nsec() as u64, 9)?;
        f.write_str(" ")?;
        crate::fmt::write_offset(f, info.offset)?;
        f.write_str(" ")?;
        if info.name.is_empty() {
            crate::fmt::write_offset(f, info.offset)?;
        } else {
            f.write_str(&info.name)?;
        }

        if self.has_mono() {
            let sign = if self.ext < 0 { '-' } else { '+' };
            let mono = self.ext.unsigned_abs();
            let nanos = NANOS_PER_SEC as u64;
            write!(f, " m={sign}{}.{:09}", mono / nanos, mono % nanos)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        // Keep to a range whose seconds and nanoseconds sum comfortably fits
        // in an `i128` and whose years are printable.
        let sec = i64::arbitrary(g) % (1 << 50);
        let nsec = i64::from(u32::arbitrary(g) % 1_000_000_000);
        Time::from_unix(sec, nsec).utc()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Time>> {
        let nsec = i64::from(self.nsec());
        Box::new(
            self.unix()
                .shrink()
                .map(move |sec| Time::from_unix(sec, nsec).utc()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::ClockReading;

    use super::*;

    struct Fixed(ClockReading);

    impl ClockSource for Fixed {
        fn now(&self) -> ClockReading {
            self.0
        }
    }

    fn fixed(unix_seconds: i64, nanoseconds: i32, monotonic: i64) -> Fixed {
        Fixed(ClockReading { unix_seconds, nanoseconds, monotonic })
    }

    fn utc(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        min: i64,
        sec: i64,
        nsec: i64,
    ) -> Time {
        Time::date_in(year, month, day, hour, min, sec, nsec, &Location::UTC)
    }

    fn pacific() -> Location {
        Location::posix("US/Pacific", "PST8PDT,M3.2.0,M11.1.0").unwrap()
    }

    #[test]
    fn zero_time() {
        let t = Time::ZERO;
        assert!(t.is_zero());
        assert_eq!(t.to_string(), "0001-01-01 00:00:00 +0000 UTC");
        assert_eq!(t.year(), 1);
        assert_eq!(t.weekday(), Weekday::Monday);
        assert_eq!(t.unix(), -62135596800);
        assert!(Time::default().is_zero());
        assert!(Time::ZERO.in_location(&pacific()).is_zero());
    }

    #[test]
    fn unix_normalizes_nanoseconds() {
        let t = Time::from_unix(0, -1);
        assert_eq!((t.unix(), t.nanosecond()), (-1, 999_999_999));
        let t = Time::from_unix(0, 2_500_000_000);
        assert_eq!((t.unix(), t.nanosecond()), (2, 500_000_000));
        let t = Time::from_unix(5, -2_500_000_000);
        assert_eq!((t.unix(), t.nanosecond()), (2, 500_000_000));
    }

    #[test]
    fn unix_units() {
        let t = Time::from_unix_milli(-1);
        assert_eq!((t.unix(), t.nanosecond()), (-1, 999_000_000));
        assert_eq!(t.unix_milli(), -1);

        let t = Time::from_unix_micro(1_234_567);
        assert_eq!((t.unix(), t.nanosecond()), (1, 234_567_000));
        assert_eq!(t.unix_micro(), 1_234_567);
        assert_eq!(t.unix_nano(), 1_234_567_000);
    }

    #[test]
    fn date_in_normalizes() {
        let t = utc(2011, 13, 1, 0, 0, 0, 0);
        assert_eq!(t.date().to_string(), "2012-01-01");
        let t = utc(2011, 0, 1, 0, 0, 0, 0);
        assert_eq!(t.date().to_string(), "2010-12-01");
        let t = utc(2012, 3, 0, 0, 0, 0, 0);
        assert_eq!(t.date().to_string(), "2012-02-29");
        let t = utc(2012, 1, 1, 0, 0, 0, -1);
        assert_eq!(t.to_string(), "2011-12-31 23:59:59.999999999 +0000 UTC");
        let t = utc(2012, 1, 1, -1, 60, 3600, 0);
        assert_eq!(t.to_string(), "2012-01-01 01:00:00 +0000 UTC");

        let t = utc(2000, 2, 29, 12, 0, 0, 0);
        assert_eq!(t.date().to_string(), "2000-02-29");
        assert_eq!(t.year_day(), 60);
        // 1900 is not a leap year.
        let t = utc(1900, 2, 29, 12, 0, 0, 0);
        assert_eq!(t.date().to_string(), "1900-03-01");
        assert_eq!(t.year_day(), 60);
    }

    #[test]
    fn locations_named_utc_are_utc() {
        let fake = Location::fixed("UTC", 3600);
        let t = Time::from_unix(0, 0).in_location(&fake);
        assert!(t.location().is_utc());
        assert_eq!(t.to_string(), "1970-01-01 00:00:00 +0000 UTC");

        let t = Time::date_in(1970, 1, 1, 0, 0, 0, 0, &fake);
        assert!(t.location().is_utc());
        assert_eq!(t.unix(), -3600);

        let tz = pacific();
        let t = Time::from_unix(0, 0).in_location(&tz);
        assert_eq!(t.location().name(), "US/Pacific");
    }

    #[test]
    fn date_in_across_transitions() {
        let tz = pacific();
        // Skipped by the spring transition: lands in standard time.
        let t = Time::date_in(2011, 3, 13, 2, 30, 0, 0, &tz);
        assert_eq!(t.to_string(), "2011-03-13 01:30:00 -0800 PST");
        // Repeated by the fall transition: the first one is chosen.
        let t = Time::date_in(2011, 11, 6, 1, 30, 0, 0, &tz);
        assert_eq!(t.to_string(), "2011-11-06 01:30:00 -0700 PDT");
        // Just after the spring transition.
        let t = Time::date_in(2011, 3, 13, 3, 0, 0, 0, &tz);
        assert_eq!(t.to_string(), "2011-03-13 03:00:00 -0700 PDT");
    }

    #[test]
    fn calendar_fields() {
        let t = utc(2008, 9, 17, 20, 4, 26, 123);
        assert_eq!(t.year(), 2008);
        assert_eq!(t.month(), Month::September);
        assert_eq!(t.day(), 17);
        assert_eq!(t.year_day(), 261);
        assert_eq!(t.weekday(), Weekday::Wednesday);
        assert_eq!(t.hour(), 20);
        assert_eq!(t.minute(), 4);
        assert_eq!(t.second(), 26);
        assert_eq!(t.nanosecond(), 123);
        assert_eq!(t.clock().to_string(), "20:04:26");
        assert_eq!(t.iso_week().to_string(), "2008-W38");

        assert_eq!(utc(2008, 12, 31, 0, 0, 0, 0).year_day(), 366);
        assert_eq!(utc(2007, 12, 31, 0, 0, 0, 0).iso_week().week(), 1);
        assert_eq!(utc(2007, 12, 31, 0, 0, 0, 0).iso_week().year(), 2008);
        assert_eq!(utc(2010, 1, 3, 0, 0, 0, 0).iso_week().year(), 2009);
        assert_eq!(utc(2010, 1, 3, 0, 0, 0, 0).iso_week().week(), 53);
    }

    #[test]
    fn add_carries_nanoseconds() {
        let t = utc(2000, 1, 1, 0, 0, 0, 999_999_999);
        let u = t.saturating_add(Duration::NANOSECOND);
        assert_eq!(u.to_string(), "2000-01-01 00:00:01 +0000 UTC");
        let u = t.saturating_add(-Duration::SECOND);
        assert_eq!(u.to_string(), "1999-12-31 23:59:59.999999999 +0000 UTC");
        let u = utc(2000, 1, 1, 0, 0, 0, 0) - Duration::NANOSECOND;
        assert_eq!(u.nanosecond(), 999_999_999);
    }

    #[test]
    fn add_saturates_seconds() {
        let t = Time::ZERO + Duration::MAX + Duration::MAX;
        assert!(t.after(&(Time::ZERO + Duration::MAX)));
        let far = Time::ZERO.saturating_add(Duration::MIN);
        assert!(far.before(&Time::ZERO));
        assert_eq!(Time::ZERO.duration_since(&far), Duration::MAX);
    }

    #[test]
    fn monotonic_readings() {
        let clock = fixed(1221681866, 5, 1_000);
        let t = Time::now_with(&clock);
        assert_eq!(t.monotonic(), Some(1_000));
        assert_eq!(t.unix(), 1221681866);
        assert_eq!(t.nanosecond(), 5);

        let u = t.saturating_add(Duration::SECOND);
        assert_eq!(u.monotonic(), Some(1_000 + 1_000_000_000));
        assert_eq!(u.unix(), 1221681867);
        assert_eq!(u.duration_since(&t), Duration::SECOND);

        // Monotonic readings win over wall clocks when both are present.
        let skewed = Time::now_with(&fixed(0, 0, 3_000));
        assert_eq!(skewed.duration_since(&t), 2_000 * Duration::NANOSECOND);
        assert!(skewed.after(&t));
        assert!(!skewed.equal(&t.without_monotonic()));

        assert!(t.utc().monotonic().is_none());
        assert!(t.round(Duration::ZERO).monotonic().is_none());
        assert!(t.truncate(Duration::SECOND).monotonic().is_none());
        assert!(t.in_location(&Location::UTC).monotonic().is_none());
    }

    #[test]
    fn monotonic_requires_packable_wall() {
        // 1884 is before the earliest packable wall second.
        let t = Time::now_with(&fixed(-2_700_000_000, 0, 42));
        assert_eq!(t.monotonic(), None);
        let t = Time::now_with(&fixed(0, 0, 0));
        assert_eq!(t.monotonic(), None);

        // Adding past 2157 drops the reading.
        let t = Time::now_with(&fixed(0, 0, 42));
        let u = t.saturating_add(200 * 365 * 24 * Duration::HOUR);
        assert_eq!(u.monotonic(), None);
        assert_eq!(u.duration_since(&t), 200 * 365 * 24 * Duration::HOUR);
    }

    #[test]
    fn monotonic_display() {
        let t = Time::now_with(&fixed(0, 0, -1_500_000_000)).utc();
        assert_eq!(t.to_string(), "1970-01-01 00:00:00 +0000 UTC");
        let t = Time::now_with(&fixed(0, 0, 1_500_000_001));
        assert!(
            t.to_string().ends_with(" m=+1.500000001"),
            "{t}",
        );
        let mut t = Time::now_with(&fixed(0, 0, 1));
        t.set_mono(-2_000_000_000);
        assert!(t.to_string().ends_with(" m=-2.000000000"), "{t}");
    }

    #[test]
    fn sub_mono_saturates() {
        assert_eq!(sub_mono(i64::MAX, -1), Duration::MAX);
        assert_eq!(sub_mono(i64::MIN, 1), Duration::MIN);
        assert_eq!(sub_mono(5, 7), -2 * Duration::NANOSECOND);
    }

    #[test]
    fn comparisons() {
        let a = utc(2000, 1, 1, 0, 0, 0, 1);
        let b = utc(2000, 1, 1, 0, 0, 0, 2);
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(a < b);
        assert_eq!(a.compare(&a.in_location(&pacific())), Ordering::Equal);
        assert_eq!(a, a.in_location(&pacific()));
        assert_ne!(a, b);
    }

    #[test]
    fn truncate_and_round() {
        let t = utc(2012, 12, 7, 12, 15, 30, 918_273_645);
        let cases = [
            (Duration::NANOSECOND, "12:15:30.918273645", "12:15:30.918273645"),
            (
                2 * Duration::NANOSECOND,
                "12:15:30.918273644",
                "12:15:30.918273646",
            ),
            (10 * Duration::MICROSECOND, "12:15:30.91827", "12:15:30.91827"),
            (Duration::SECOND, "12:15:30", "12:15:31"),
            (2 * Duration::SECOND, "12:15:30", "12:15:30"),
            (Duration::MINUTE, "12:15:00", "12:16:00"),
            (15 * Duration::MINUTE, "12:15:00", "12:15:00"),
            (Duration::HOUR, "12:00:00", "12:00:00"),
        ];
        for (d, want_truncated, want_rounded) in cases {
            let got = t.truncate(d).to_string();
            assert_eq!(got, format!("2012-12-07 {want_truncated} +0000 UTC"));
            let got = t.round(d).to_string();
            assert_eq!(got, format!("2012-12-07 {want_rounded} +0000 UTC"));
        }
        assert_eq!(t.truncate(-Duration::SECOND), t);
        // Before the zero time, the remainder is still taken downward.
        let t = Time::ZERO - Duration::NANOSECOND;
        let want = Time::ZERO - Duration::SECOND;
        assert_eq!(t.truncate(Duration::SECOND), want);
        assert_eq!(t.round(Duration::SECOND), Time::ZERO);
    }

    #[test]
    fn add_date_normalizes() {
        let t = utc(2011, 1, 31, 1, 2, 3, 4);
        let u = t.add_date(0, 1, 0);
        assert_eq!(u.to_string(), "2011-03-03 01:02:03.000000004 +0000 UTC");
        let u = t.add_date(1, 0, -31);
        assert_eq!(u.to_string(), "2011-12-31 01:02:03.000000004 +0000 UTC");
    }

    #[test]
    fn zone_queries() {
        let tz = pacific();
        let summer = Time::from_unix(1221681866, 0).in_location(&tz);
        assert_eq!(summer.zone(), Zone::new("PDT", -25200, true));
        assert!(summer.is_dst());
        let winter = Time::from_unix(0, 0).in_location(&tz);
        assert_eq!(winter.zone(), Zone::new("PST", -28800, false));
        assert!(!winter.is_dst());

        let (start, end) = summer.zone_bounds();
        assert_eq!(start.map(|t| t.unix()), Some(1205056800));
        assert_eq!(end.map(|t| t.unix()), Some(1225616400));

        let fixed = Location::fixed("", 5 * 3600 + 45 * 60);
        let t = Time::from_unix(0, 0).in_location(&fixed);
        assert_eq!(t.to_string(), "1970-01-01 05:45:00 +0545 +0545");
        assert_eq!(t.zone_bounds(), (None, None));
    }

    #[test]
    fn display_snapshots() {
        let t = utc(2006, 1, 2, 15, 4, 5, 999_999_999);
        insta::assert_snapshot!(t, @"2006-01-02 15:04:05.999999999 +0000 UTC");
        let t = utc(-1, 12, 31, 23, 59, 59, 500_000_000);
        insta::assert_snapshot!(t, @"-0001-12-31 23:59:59.5 +0000 UTC");
        let t = t.in_location(&Location::fixed("MST", -7 * 3600));
        insta::assert_debug_snapshot!(t, @"-0001-12-31 16:59:59.5 -0700 MST");
    }

    quickcheck::quickcheck! {
        fn prop_unix_roundtrip(t: Time) -> bool {
            let u = Time::from_unix(t.unix(), i64::from(t.nanosecond()));
            u == t
        }

        fn prop_fields_roundtrip(t: Time) -> bool {
            let date = t.date();
            let clock = t.clock();
            let u = Time::date_in(
                date.year(),
                i64::from(date.month().number()),
                i64::from(date.day()),
                i64::from(clock.hour()),
                i64::from(clock.minute()),
                i64::from(clock.second()),
                i64::from(t.nanosecond()),
                &Location::UTC,
            );
            u == t
        }

        fn prop_add_then_sub(t: Time, d: Duration) -> bool {
            let u = t.saturating_add(d);
            u.duration_since(&t) == d && u.saturating_add(-d) == t
                || d == Duration::MIN
        }

        fn prop_truncate_below_round_within(t: Time, d: Duration) -> bool {
            if d.nanoseconds() <= 0 {
                return t.truncate(d) == t && t.round(d) == t;
            }
            let trunc = t.truncate(d);
            let round = t.round(d);
            !trunc.after(&t)
                && t.duration_since(&trunc) < d
                && (round == trunc || round.duration_since(&trunc) == d)
        }

        fn prop_pacific_fields_roundtrip(t: Time) -> bool {
            // Times in the repeated hour of a fall transition have two
            // readings, so compare fields rather than instants.
            let tz = pacific();
            let t = t.in_location(&tz);
            let (date, clock) = (t.date(), t.clock());
            let u = Time::date_in(
                date.year(),
                i64::from(date.month().number()),
                i64::from(date.day()),
                i64::from(clock.hour()),
                i64::from(clock.minute()),
                i64::from(clock.second()),
                0,
                &tz,
            );
            u.date() == date && u.clock() == clock
        }
    }
}
