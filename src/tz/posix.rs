/*!
Parsing and evaluation of POSIX `TZ` rules.

A rule looks like `PST8PDT,M3.2.0,M11.1.0`: a standard abbreviation and
offset, then optionally a daylight saving abbreviation, its offset and the
two transition dates. Locations use a rule to answer lookups for instants
past their last explicit transition, and the local location may be built
from one directly.

The grammar accepted here is the one from POSIX with the IANA version 3
extension permitting transition times from `-167` through `167` hours:

```text
std offset [dst [offset] [,start[/time],end[/time]]]
```

An abbreviation is either three or more ASCII letters, or three or more
ASCII alphanumerics, `+` or `-` wrapped in `<` and `>`. Offsets are given as
the amount to add to local time to get UTC, which is the negation of the
offsets used everywhere else in this crate. When the daylight saving offset
is absent it is one hour ahead of standard time, and when the transition
dates are absent they default to `M3.2.0,M11.1.0`. The separator before the
transition dates may be `;` as well as `,`.
*/

use std::{cell::Cell, sync::Arc};

use crate::{
    civil::{Month, Weekday},
    error::IntoError,
    tz::ZoneInfo,
    util::{
        common::{
            days_in, days_since_epoch, is_leap_year, month_at,
            weekday_at, weekday_from_absolute, year_day_from_absolute,
            DAYS_BEFORE,
        },
        epoch::{
            absolute_to_unix, unix_to_absolute, OMEGA, SECONDS_PER_DAY,
            SECONDS_PER_HOUR,
        },
    },
};

macro_rules! err {
    ($($tt:tt)*) => {{
        self::Error(format!($($tt)*))
    }}
}

/// An error that can occur when parsing a POSIX `TZ` rule.
#[derive(Clone, Debug)]
pub(crate) struct Error(String);

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl IntoError for Error {
    fn into_error(self) -> crate::Error {
        crate::Error::posix_tz(self)
    }
}

/// A parsed POSIX `TZ` rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PosixTimeZone {
    std: PosixZone,
    dst: Option<PosixDst>,
}

/// An abbreviation paired with its offset east of UTC, in seconds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PosixZone {
    pub(crate) name: Arc<str>,
    pub(crate) offset: i32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct PosixDst {
    zone: PosixZone,
    start: PosixRule,
    end: PosixRule,
}

/// A transition: a day of the year plus a local time of day in seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PosixRule {
    day: PosixDay,
    time: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PosixDay {
    /// `Jn`: one based day of the year in `1..=365`. February 29 is never
    /// counted, so day 60 is always March 1.
    JulianNoLeap(i16),
    /// `n`: zero based day of the year in `0..=365`, counting February 29
    /// in leap years.
    JulianLeap(i16),
    /// `Mm.w.d`: weekday `d` of week `w` of month `m`. Week `5` means the
    /// last such weekday of the month.
    WeekdayOfMonth { month: Month, week: i8, weekday: Weekday },
}

impl PosixTimeZone {
    /// Parses a complete POSIX `TZ` rule.
    pub(crate) fn parse(rule: &str) -> Result<PosixTimeZone, Error> {
        let parser = Parser::new(rule);
        let tz = parser.parse_time_zone()?;
        if !parser.is_done() {
            return Err(err!(
                "unexpected trailing data {:?} after POSIX time zone rule",
                parser.remaining(),
            ));
        }
        Ok(tz)
    }

    /// Returns the standard time abbreviation and offset.
    pub(crate) fn std(&self) -> &PosixZone {
        &self.std
    }

    /// Returns the daylight saving abbreviation and offset, if this rule
    /// has one.
    pub(crate) fn dst(&self) -> Option<&PosixZone> {
        self.dst.as_ref().map(|dst| &dst.zone)
    }

    /// Returns the zone in effect at the given Unix second.
    ///
    /// Without daylight saving time, standard time is in effect from
    /// `last_transition` until the end of time. Otherwise the window
    /// returned is exact near the transitions of the calendar year
    /// containing `unix`, and is clamped to that year elsewhere.
    pub(crate) fn zone_info(
        &self,
        last_transition: i64,
        unix: i64,
    ) -> ZoneInfo {
        let Some(ref dst) = self.dst else {
            return self.std.info(last_transition, OMEGA, false);
        };

        let abs = unix_to_absolute(unix);
        let (year, yday) = year_day_from_absolute(abs);
        let ysec = i64::from(yday) * SECONDS_PER_DAY
            + unix.rem_euclid(SECONDS_PER_DAY);
        let year_start = absolute_to_unix(
            days_since_epoch(year).wrapping_mul(SECONDS_PER_DAY as u64),
        );
        let year_len = if is_leap_year(year) {
            366 * SECONDS_PER_DAY
        } else {
            365 * SECONDS_PER_DAY
        };

        let mut start = dst.start.year_seconds(year, self.std.offset);
        let mut end = dst.end.year_seconds(year, dst.zone.offset);
        let mut outer = (&self.std, false);
        let mut inner = (&dst.zone, true);
        // In the southern hemisphere daylight saving time spans the new
        // year, so the zone in effect mid-year is standard time.
        if end < start {
            core::mem::swap(&mut start, &mut end);
            core::mem::swap(&mut outer, &mut inner);
        }

        let (zone, is_dst) =
            if ysec < start || ysec >= end { outer } else { inner };
        let (lo, hi) = if ysec < start {
            (0, start)
        } else if ysec >= end {
            (end, year_len)
        } else {
            (start, end)
        };
        let (lo, hi) =
            (year_start.wrapping_add(lo), year_start.wrapping_add(hi));
        zone.info(lo, hi, is_dst)
    }
}

impl PosixZone {
    fn info(&self, start: i64, end: i64, is_dst: bool) -> ZoneInfo {
        ZoneInfo {
            name: Arc::clone(&self.name),
            offset: self.offset,
            start,
            end,
            is_dst,
        }
    }
}

impl PosixRule {
    /// The default rule for the start of daylight saving time: the second
    /// Sunday in March at 02:00.
    const DEFAULT_START: PosixRule = PosixRule {
        day: PosixDay::WeekdayOfMonth {
            month: Month::March,
            week: 2,
            weekday: Weekday::Sunday,
        },
        time: 2 * SECONDS_PER_HOUR as i32,
    };

    /// The default rule for the end of daylight saving time: the first
    /// Sunday in November at 02:00.
    const DEFAULT_END: PosixRule = PosixRule {
        day: PosixDay::WeekdayOfMonth {
            month: Month::November,
            week: 1,
            weekday: Weekday::Sunday,
        },
        time: 2 * SECONDS_PER_HOUR as i32,
    };

    /// Returns the seconds since the start of `year` (in UTC) at which this
    /// transition happens, given the offset in effect before it.
    fn year_seconds(&self, year: i64, offset: i32) -> i64 {
        let day = match self.day {
            PosixDay::JulianNoLeap(n) => {
                let mut day = i64::from(n) - 1;
                if is_leap_year(year) && n >= 60 {
                    day += 1;
                }
                day
            }
            PosixDay::JulianLeap(n) => i64::from(n),
            PosixDay::WeekdayOfMonth { month, week, weekday } => {
                let mut first = i64::from(DAYS_BEFORE[month.index()]);
                if is_leap_year(year) && month.number() > 2 {
                    first += 1;
                }
                let first_abs = days_since_epoch(year)
                    .wrapping_add(first as u64)
                    .wrapping_mul(SECONDS_PER_DAY as u64);
                let first_weekday = weekday_from_absolute(first_abs);
                let mut day = i64::from(
                    weekday.to_sunday_zero_offset()
                        - first_weekday.to_sunday_zero_offset(),
                )
                .rem_euclid(7);
                let len = i64::from(days_in(month, year));
                for _ in 1..week {
                    if day + 7 >= len {
                        break;
                    }
                    day += 7;
                }
                first + day
            }
        };
        day * SECONDS_PER_DAY + i64::from(self.time) - i64::from(offset)
    }
}

/// A cursor over the bytes of a rule.
///
/// Every `parse_*` routine expects the cursor at the first byte of the thing
/// it parses and leaves it immediately after.
#[derive(Debug)]
struct Parser<'s> {
    tz: &'s [u8],
    pos: Cell<usize>,
}

impl<'s> Parser<'s> {
    fn new(tz: &'s str) -> Parser<'s> {
        Parser { tz: tz.as_bytes(), pos: Cell::new(0) }
    }

    fn parse_time_zone(&self) -> Result<PosixTimeZone, Error> {
        let name = self
            .parse_abbreviation()
            .map_err(|e| err!("invalid standard time abbreviation: {e}"))?;
        let offset = self
            .parse_offset()
            .map_err(|e| err!("invalid standard time offset: {e}"))?;
        let std = PosixZone { name, offset };
        if self.is_done() {
            return Ok(PosixTimeZone { std, dst: None });
        }

        let name = self
            .parse_abbreviation()
            .map_err(|e| err!("invalid daylight saving abbreviation: {e}"))?;
        let offset = match self.maybe_byte() {
            None | Some(b',' | b';') => {
                std.offset + SECONDS_PER_HOUR as i32
            }
            Some(_) => self.parse_offset().map_err(|e| {
                err!("invalid daylight saving offset: {e}")
            })?,
        };
        let zone = PosixZone { name, offset };
        if self.is_done() {
            let (start, end) =
                (PosixRule::DEFAULT_START, PosixRule::DEFAULT_END);
            return Ok(PosixTimeZone {
                std,
                dst: Some(PosixDst { zone, start, end }),
            });
        }

        if !matches!(self.byte(), b',' | b';') {
            return Err(err!(
                "expected ',' before daylight saving rule, found {:?}",
                char::from(self.byte()),
            ));
        }
        self.bump();
        let start = self
            .parse_rule()
            .map_err(|e| err!("invalid daylight saving start: {e}"))?;
        if self.maybe_byte() != Some(b',') {
            return Err(err!(
                "expected ',' after daylight saving start, found {:?}",
                self.remaining(),
            ));
        }
        self.bump();
        let end = self
            .parse_rule()
            .map_err(|e| err!("invalid daylight saving end: {e}"))?;
        Ok(PosixTimeZone { std, dst: Some(PosixDst { zone, start, end }) })
    }

    fn parse_abbreviation(&self) -> Result<Arc<str>, Error> {
        let quoted = self.maybe_byte() == Some(b'<');
        if quoted {
            self.bump();
        }
        let start = self.pos();
        while let Some(b) = self.maybe_byte() {
            let ok = if quoted {
                b.is_ascii_alphanumeric() || b == b'+' || b == b'-'
            } else {
                b.is_ascii_alphabetic()
            };
            if !ok {
                break;
            }
            self.bump();
        }
        // Only ASCII bytes were consumed, so this slice is valid UTF-8.
        let name = String::from_utf8_lossy(&self.tz[start..self.pos()]);
        if quoted {
            if self.maybe_byte() != Some(b'>') {
                return Err(err!(
                    "quoted abbreviation {name:?} is missing closing '>'"
                ));
            }
            self.bump();
        }
        if name.len() < 3 {
            return Err(err!(
                "abbreviation {name:?} is shorter than 3 characters"
            ));
        }
        Ok(Arc::from(name))
    }

    /// Parses `[+|-]hh[:mm[:ss]]` and returns it negated, i.e., as seconds
    /// east of UTC.
    fn parse_offset(&self) -> Result<i32, Error> {
        Ok(-self.parse_hms(24)?)
    }

    /// Parses `date[/time]`.
    fn parse_rule(&self) -> Result<PosixRule, Error> {
        let day = self.parse_day()?;
        let mut time = 2 * SECONDS_PER_HOUR as i32;
        if self.maybe_byte() == Some(b'/') {
            self.bump();
            time = self
                .parse_hms(167)
                .map_err(|e| err!("invalid transition time: {e}"))?;
        }
        Ok(PosixRule { day, time })
    }

    fn parse_day(&self) -> Result<PosixDay, Error> {
        match self.maybe_byte() {
            Some(b'J') => {
                self.bump();
                let n = self.parse_number("Julian day", 1, 365)?;
                Ok(PosixDay::JulianNoLeap(n as i16))
            }
            Some(b'M') => {
                self.bump();
                let month = self.parse_number("month", 1, 12)?;
                self.expect_byte(b'.')?;
                let week = self.parse_number("week", 1, 5)?;
                self.expect_byte(b'.')?;
                let weekday = self.parse_number("weekday", 0, 6)?;
                Ok(PosixDay::WeekdayOfMonth {
                    month: month_at(month as usize - 1),
                    week: week as i8,
                    weekday: weekday_at(weekday as usize),
                })
            }
            Some(b'0'..=b'9') => {
                let n = self.parse_number("day of year", 0, 365)?;
                Ok(PosixDay::JulianLeap(n as i16))
            }
            Some(b) => Err(err!(
                "expected 'J', 'M' or a digit to start a date, found {:?}",
                char::from(b),
            )),
            None => Err(err!("expected a date, found end of rule")),
        }
    }

    /// Parses a signed `hh[:mm[:ss]]` with hours up to `max_hour`.
    fn parse_hms(&self, max_hour: i32) -> Result<i32, Error> {
        let sign = match self.maybe_byte() {
            Some(b'-') => {
                self.bump();
                -1
            }
            Some(b'+') => {
                self.bump();
                1
            }
            _ => 1,
        };
        let mut secs = self.parse_number("hour", 0, max_hour)? * 3600;
        if self.maybe_byte() == Some(b':') {
            self.bump();
            secs += self.parse_number("minute", 0, 59)? * 60;
            if self.maybe_byte() == Some(b':') {
                self.bump();
                secs += self.parse_number("second", 0, 59)?;
            }
        }
        Ok(sign * secs)
    }

    /// Parses up to three decimal digits as a number in `min..=max`.
    fn parse_number(
        &self,
        what: &str,
        min: i32,
        max: i32,
    ) -> Result<i32, Error> {
        let start = self.pos();
        let mut n: i32 = 0;
        while let Some(b @ b'0'..=b'9') = self.maybe_byte() {
            if self.pos() - start >= 3 {
                return Err(err!("{what} has too many digits"));
            }
            n = n * 10 + i32::from(b - b'0');
            self.bump();
        }
        if self.pos() == start {
            return Err(err!("expected digits for {what}"));
        }
        if !(min..=max).contains(&n) {
            return Err(err!("{what} {n} is not in range {min}..={max}"));
        }
        Ok(n)
    }

    fn expect_byte(&self, expected: u8) -> Result<(), Error> {
        if self.maybe_byte() != Some(expected) {
            return Err(err!(
                "expected {:?}, found {:?}",
                char::from(expected),
                self.remaining(),
            ));
        }
        self.bump();
        Ok(())
    }

    fn bump(&self) {
        self.pos.set(self.pos() + 1);
    }

    fn is_done(&self) -> bool {
        self.pos() >= self.tz.len()
    }

    /// Returns the current byte. The parser must not be done.
    fn byte(&self) -> u8 {
        self.tz[self.pos()]
    }

    fn maybe_byte(&self) -> Option<u8> {
        self.tz.get(self.pos()).copied()
    }

    fn pos(&self) -> usize {
        self.pos.get()
    }

    fn remaining(&self) -> String {
        String::from_utf8_lossy(&self.tz[self.pos().min(self.tz.len())..])
            .into_owned()
    }
}
