/*!
The calendar engine.

Every routine here operates on *absolute* seconds (see `util::epoch`).
Since the absolute epoch precedes every supported instant, all of the
divisions below are on unsigned integers and naturally round down. The
routines are deliberately total: inputs far outside the supported range of
years wrap instead of panicking, and their results are meaningless.

The date decomposition peels off 400, 100, 4 and 1 year cycles in turn.
The last 100 year cycle of a 400 year cycle, and the last year of a 4 year
cycle, are each one day longer than the others. Dividing by the length of
the shorter cycle therefore yields `4` on the final day of such a cycle,
which `n -= n >> 2` corrects back down to `3`.
*/

use crate::{
    civil::{Month, Weekday},
    util::epoch::{
        ABSOLUTE_ZERO_YEAR, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS,
        DAYS_PER_4_YEARS, SECONDS_PER_DAY, SECONDS_PER_HOUR,
        SECONDS_PER_MINUTE, SECONDS_PER_WEEK,
    },
};

/// The number of days in a non-leap year before the first day of each
/// month, indexed by zero based month. The final entry is the length of a
/// non-leap year.
pub(crate) const DAYS_BEFORE: [i32; 13] = [
    0,
    31,
    31 + 28,
    31 + 28 + 31,
    31 + 28 + 31 + 30,
    31 + 28 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

/// A calendar date decomposed from absolute seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AbsoluteDate {
    pub(crate) year: i64,
    /// Zero based day of the year.
    pub(crate) yday: i32,
    pub(crate) month: Month,
    pub(crate) day: i8,
}

/// Returns the month at the given zero based index, wrapping every 12.
pub(crate) fn month_at(index: usize) -> Month {
    MONTHS[index % 12]
}

/// Returns the weekday at the given offset from Sunday, wrapping every 7.
pub(crate) fn weekday_at(offset: usize) -> Weekday {
    WEEKDAYS[offset % 7]
}

/// Returns true if and only if the given year is a leap year.
pub(crate) fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month of the given year.
pub(crate) fn days_in(month: Month, year: i64) -> i8 {
    if month == Month::February && is_leap_year(year) {
        return 29;
    }
    let m = month.index();
    // Each entry is at most 31.
    (DAYS_BEFORE[m + 1] - DAYS_BEFORE[m]) as i8
}

/// Returns the year and zero based day of year for the given absolute
/// seconds.
///
/// This is the cheap half of a date decomposition. Callers needing the
/// month and day should use `date_from_absolute`.
pub(crate) fn year_day_from_absolute(abs: u64) -> (i64, i32) {
    let mut d = abs / SECONDS_PER_DAY as u64;

    let mut n = d / DAYS_PER_400_YEARS as u64;
    let mut y = 400 * n;
    d -= DAYS_PER_400_YEARS as u64 * n;

    n = d / DAYS_PER_100_YEARS as u64;
    n -= n >> 2;
    y += 100 * n;
    d -= DAYS_PER_100_YEARS as u64 * n;

    // The last 4 year cycle of a century is missing its leap day, which
    // doesn't affect this step.
    n = d / DAYS_PER_4_YEARS as u64;
    y += 4 * n;
    d -= DAYS_PER_4_YEARS as u64 * n;

    n = d / 365;
    n -= n >> 2;
    y += n;
    d -= 365 * n;

    // `y` is at most 2^64 / (365 * 86400), so it always fits.
    ((y as i64) + ABSOLUTE_ZERO_YEAR, d as i32)
}

/// Returns the full calendar date for the given absolute seconds.
pub(crate) fn date_from_absolute(abs: u64) -> AbsoluteDate {
    let (year, yday) = year_day_from_absolute(abs);
    let mut day = yday;
    if is_leap_year(year) {
        if day == 31 + 29 - 1 {
            return AbsoluteDate {
                year,
                yday,
                month: Month::February,
                day: 29,
            };
        } else if day > 31 + 29 - 1 {
            // Past the leap day, so pretend it wasn't there.
            day -= 1;
        }
    }
    // Guess the month assuming every month has 31 days. The guess is low
    // by at most one.
    let mut month = (day / 31) as usize;
    let end = DAYS_BEFORE[month + 1];
    let begin = if day >= end {
        month += 1;
        end
    } else {
        DAYS_BEFORE[month]
    };
    AbsoluteDate {
        year,
        yday,
        month: month_at(month),
        day: (day - begin + 1) as i8,
    }
}

/// Returns the day of the week for the given absolute seconds.
pub(crate) fn weekday_from_absolute(abs: u64) -> Weekday {
    // January 1 of the absolute year was a Monday.
    let monday = Weekday::Monday.to_sunday_zero_offset() as u64;
    let sec = abs.wrapping_add(monday * SECONDS_PER_DAY as u64)
        % SECONDS_PER_WEEK as u64;
    weekday_at((sec / SECONDS_PER_DAY as u64) as usize)
}

/// Returns the ISO 8601 year and week number for the given absolute
/// seconds.
///
/// Weeks start on Monday and week 1 is the week containing the year's
/// first Thursday, so the ISO year of any day is the calendar year of the
/// Thursday in its week.
pub(crate) fn iso_week_from_absolute(abs: u64) -> (i64, i8) {
    let thursday = Weekday::Thursday.to_sunday_zero_offset();
    let mut d = thursday - weekday_from_absolute(abs).to_sunday_zero_offset();
    // Sunday is the last day of an ISO week.
    if d == 4 {
        d = -3;
    }
    let abs = abs.wrapping_add((i64::from(d) * SECONDS_PER_DAY) as u64);
    let (year, yday) = year_day_from_absolute(abs);
    (year, (yday / 7 + 1) as i8)
}

/// Returns the hour, minute and second within the day for the given
/// absolute seconds.
pub(crate) fn clock_from_absolute(abs: u64) -> (i8, i8, i8) {
    let mut sec = (abs % SECONDS_PER_DAY as u64) as i64;
    let hour = sec / SECONDS_PER_HOUR;
    sec -= hour * SECONDS_PER_HOUR;
    let minute = sec / SECONDS_PER_MINUTE;
    sec -= minute * SECONDS_PER_MINUTE;
    (hour as i8, minute as i8, sec as i8)
}

/// Returns the number of days from the absolute epoch to January 1 of the
/// given year.
pub(crate) fn days_since_epoch(year: i64) -> u64 {
    let mut y = year.wrapping_sub(ABSOLUTE_ZERO_YEAR) as u64;

    let mut n = y / 400;
    y -= 400 * n;
    let mut d = (DAYS_PER_400_YEARS as u64).wrapping_mul(n);

    n = y / 100;
    y -= 100 * n;
    d = d.wrapping_add(DAYS_PER_100_YEARS as u64 * n);

    n = y / 4;
    y -= 4 * n;
    d = d.wrapping_add(DAYS_PER_4_YEARS as u64 * n);

    d.wrapping_add(365 * y)
}

/// Returns `(hi, lo)` rewritten so that `0 <= lo < base`, carrying whole
/// multiples of `base` into `hi`.
///
/// The carry rounds toward negative infinity, so `normalize(1, -1, 60)` is
/// `(0, 59)`. `base` must be positive.
pub(crate) fn normalize(hi: i64, lo: i64, base: i64) -> (i64, i64) {
    debug_assert!(base > 0);
    (hi.wrapping_add(lo.div_euclid(base)), lo.rem_euclid(base))
}
