/*!
Constants describing the three epochs used throughout this crate.

* The *absolute* epoch is January 1 of year `ABSOLUTE_ZERO_YEAR`. It lies so
far in the past that every supported instant is a non-negative number of
seconds after it, which lets calendar math use plain unsigned division.
* The *internal* epoch is January 1 of year 1. This is the zero value of
`Time`.
* The *Unix* epoch is January 1, 1970.

All three are at 00:00:00 UTC.
*/

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub(crate) const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

pub(crate) const DAYS_PER_400_YEARS: i64 = 365 * 400 + 97;
pub(crate) const DAYS_PER_100_YEARS: i64 = 365 * 100 + 24;
pub(crate) const DAYS_PER_4_YEARS: i64 = 365 * 4 + 1;

/// The year of the absolute epoch. It is a whole number of 400 year cycles
/// before year 1.
pub(crate) const ABSOLUTE_ZERO_YEAR: i64 = -292277022399;

/// The year of the internal epoch.
pub(crate) const INTERNAL_YEAR: i64 = 1;

pub(crate) const ABSOLUTE_TO_INTERNAL: i64 = (ABSOLUTE_ZERO_YEAR
    - INTERNAL_YEAR)
    / 400
    * DAYS_PER_400_YEARS
    * SECONDS_PER_DAY;
pub(crate) const INTERNAL_TO_ABSOLUTE: i64 = -ABSOLUTE_TO_INTERNAL;

pub(crate) const UNIX_TO_INTERNAL: i64 =
    (1969 * 365 + 1969 / 4 - 1969 / 100 + 1969 / 400) * SECONDS_PER_DAY;
pub(crate) const INTERNAL_TO_UNIX: i64 = -UNIX_TO_INTERNAL;

/// Seconds from the internal epoch to January 1, 1885, the earliest wall
/// clock second that fits in the packed representation of `Time`.
pub(crate) const WALL_TO_INTERNAL: i64 =
    (1884 * 365 + 1884 / 4 - 1884 / 100 + 1884 / 400) * SECONDS_PER_DAY;

/// The smallest and largest internal seconds representable in the 33 bit
/// packed field (years 1885 through 2157).
pub(crate) const MIN_WALL: i64 = WALL_TO_INTERNAL;
pub(crate) const MAX_WALL: i64 = WALL_TO_INTERNAL + ((1 << 33) - 1);

/// The beginning and end of time, used as open validity bounds by zone
/// lookups.
pub(crate) const ALPHA: i64 = i64::MIN;
pub(crate) const OMEGA: i64 = i64::MAX;

/// Converts Unix seconds (already adjusted by a zone offset) to absolute
/// seconds.
///
/// Like the rest of the absolute scale, this wraps for inputs far outside
/// the range of years this crate can present.
pub(crate) fn unix_to_absolute(unix: i64) -> u64 {
    unix.wrapping_add(UNIX_TO_INTERNAL + INTERNAL_TO_ABSOLUTE) as u64
}

/// Converts absolute seconds back to Unix seconds.
pub(crate) fn absolute_to_unix(abs: u64) -> i64 {
    (abs as i64).wrapping_add(ABSOLUTE_TO_INTERNAL + INTERNAL_TO_UNIX)
}
