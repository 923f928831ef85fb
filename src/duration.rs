use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::error::{duration::Error as E, Error};

/// A signed span of elapsed time, stored as a 64-bit count of nanoseconds.
///
/// The representable range is roughly 292 years in either direction. All
/// arithmetic on durations saturates at [`Duration::MIN`] and
/// [`Duration::MAX`] instead of wrapping or panicking, with the saturation
/// bound chosen to match the sign of the true result.
///
/// Durations are usually built by multiplying one of the unit constants:
///
/// ```
/// use nanotime::Duration;
///
/// let d = 2 * Duration::HOUR + 30 * Duration::MINUTE;
/// assert_eq!(d.hours(), 2.5);
/// assert_eq!(d.to_string(), "2h30m0s");
/// ```
///
/// # Comparison with `std::time::Duration`
///
/// This duration can be negative, since it is the result of subtracting one
/// [`Time`](crate::Time) from another. Conversions in both directions are
/// provided via `TryFrom`.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Duration(i64);

impl Duration {
    /// A duration of zero time.
    pub const ZERO: Duration = Duration(0);

    /// The minimum possible duration, a little more than 292 years in the
    /// past.
    pub const MIN: Duration = Duration(i64::MIN);

    /// The maximum possible duration, a little more than 292 years in the
    /// future.
    pub const MAX: Duration = Duration(i64::MAX);

    /// A duration of one nanosecond.
    pub const NANOSECOND: Duration = Duration(1);

    /// A duration of one microsecond.
    pub const MICROSECOND: Duration = Duration(1_000);

    /// A duration of one millisecond.
    pub const MILLISECOND: Duration = Duration(1_000_000);

    /// A duration of one second.
    pub const SECOND: Duration = Duration(1_000_000_000);

    /// A duration of one minute.
    pub const MINUTE: Duration = Duration(60 * 1_000_000_000);

    /// A duration of one hour.
    pub const HOUR: Duration = Duration(60 * 60 * 1_000_000_000);

    /// Creates a duration from a number of nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Duration {
        Duration(nanos)
    }

    /// Creates a duration from a number of seconds, saturating when the
    /// result doesn't fit.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::Duration;
    ///
    /// assert_eq!(Duration::from_secs(90), 90 * Duration::SECOND);
    /// assert_eq!(Duration::from_secs(i64::MAX), Duration::MAX);
    /// ```
    #[inline]
    pub const fn from_secs(secs: i64) -> Duration {
        Duration(secs.saturating_mul(Duration::SECOND.0))
    }

    /// Returns true if this duration is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this duration is strictly less than zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Adds two durations, saturating on overflow.
    ///
    /// This is what the `+` operator does.
    #[inline]
    pub const fn saturating_add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }

    /// Subtracts `rhs` from this duration, saturating on overflow.
    ///
    /// This is what the `-` operator does.
    #[inline]
    pub const fn saturating_sub(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies this duration by an integer, saturating on overflow.
    #[inline]
    pub const fn saturating_mul(self, rhs: i64) -> Duration {
        Duration(self.0.saturating_mul(rhs))
    }

    /// Returns the result of rounding this duration toward zero to a
    /// multiple of `m`.
    ///
    /// If `m` is zero or negative, this duration is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::Duration;
    ///
    /// let d = 7 * Duration::HOUR;
    /// assert_eq!(d.truncate(2 * Duration::HOUR), 6 * Duration::HOUR);
    /// assert_eq!((-d).truncate(2 * Duration::HOUR), -6 * Duration::HOUR);
    /// assert_eq!(d.truncate(Duration::ZERO), d);
    /// ```
    pub fn truncate(self, m: Duration) -> Duration {
        if m.0 <= 0 {
            return self;
        }
        Duration(self.0 - self.0 % m.0)
    }

    /// Returns the result of rounding this duration to the nearest multiple
    /// of `m`, with halfway values rounded away from zero.
    ///
    /// If the result would overflow, then [`Duration::MIN`] or
    /// [`Duration::MAX`] is returned. If `m` is zero or negative, this
    /// duration is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::Duration;
    ///
    /// let d = 90 * Duration::MINUTE;
    /// assert_eq!(d.round(Duration::HOUR), 2 * Duration::HOUR);
    /// assert_eq!((-d).round(Duration::HOUR), -2 * Duration::HOUR);
    /// assert_eq!(Duration::MAX.round(Duration::HOUR), Duration::MAX);
    /// ```
    pub fn round(self, m: Duration) -> Duration {
        if m.0 <= 0 {
            return self;
        }
        let r = self.0 % m.0;
        if self.0 < 0 {
            let r = -r;
            if less_than_half(r, m.0) {
                return Duration(self.0 + r);
            }
            return self
                .0
                .checked_sub(m.0 - r)
                .map_or(Duration::MIN, Duration);
        }
        if less_than_half(r, m.0) {
            return Duration(self.0 - r);
        }
        self.0.checked_add(m.0 - r).map_or(Duration::MAX, Duration)
    }

    /// Returns the absolute value of this duration.
    ///
    /// Since the true absolute value of [`Duration::MIN`] isn't
    /// representable, it maps to [`Duration::MAX`].
    #[inline]
    pub const fn abs(self) -> Duration {
        Duration(self.0.saturating_abs())
    }

    /// Returns this duration as an integer number of nanoseconds.
    #[inline]
    pub const fn nanoseconds(self) -> i64 {
        self.0
    }

    /// Returns this duration as an integer number of microseconds, truncated
    /// toward zero.
    #[inline]
    pub const fn microseconds(self) -> i64 {
        self.0 / Duration::MICROSECOND.0
    }

    /// Returns this duration as an integer number of milliseconds, truncated
    /// toward zero.
    #[inline]
    pub const fn milliseconds(self) -> i64 {
        self.0 / Duration::MILLISECOND.0
    }

    /// Returns this duration as a floating point number of seconds.
    pub fn seconds(self) -> f64 {
        self.as_float(Duration::SECOND)
    }

    /// Returns this duration as a floating point number of minutes.
    pub fn minutes(self) -> f64 {
        self.as_float(Duration::MINUTE)
    }

    /// Returns this duration as a floating point number of hours.
    pub fn hours(self) -> f64 {
        self.as_float(Duration::HOUR)
    }

    /// Converts to a floating point count of `unit` by splitting into a
    /// whole and fractional part first. Converting the nanoseconds directly
    /// would lose precision for large durations.
    fn as_float(self, unit: Duration) -> f64 {
        let whole = self.0 / unit.0;
        let frac = self.0 % unit.0;
        whole as f64 + frac as f64 / unit.0 as f64
    }
}

/// Returns `x < y / 2` without losing the remainder of the division.
///
/// Both `x` and `y` must be non-negative.
pub(crate) fn less_than_half(x: i64, y: i64) -> bool {
    debug_assert!(x >= 0 && y >= 0);
    (x as u64) + (x as u64) < (y as u64)
}

impl Neg for Duration {
    type Output = Duration;

    #[inline]
    fn neg(self) -> Duration {
        Duration(self.0.checked_neg().unwrap_or(i64::MAX))
    }
}

impl Add for Duration {
    type Output = Duration;

    #[inline]
    fn add(self, rhs: Duration) -> Duration {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Duration {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl Sub for Duration {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Duration) -> Duration {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Duration {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    #[inline]
    fn mul(self, rhs: i64) -> Duration {
        self.saturating_mul(rhs)
    }
}

impl Mul<Duration> for i64 {
    type Output = Duration;

    #[inline]
    fn mul(self, rhs: Duration) -> Duration {
        rhs.saturating_mul(self)
    }
}

/// Renders this duration as hours, minutes and seconds.
///
/// Durations of at least one second use the form `72h3m0.5s`, omitting
/// leading units that are zero. Shorter durations use the largest of `ms`,
/// `µs` or `ns` that keeps the leading digit non-zero, such as `1.5ms`.
/// Trailing zeros in the fraction are always omitted, and zero renders as
/// `0s`.
///
/// # Example
///
/// ```
/// use nanotime::Duration;
///
/// assert_eq!(Duration::ZERO.to_string(), "0s");
/// assert_eq!((1100 * Duration::NANOSECOND).to_string(), "1.1µs");
/// assert_eq!((4 * Duration::MINUTE).to_string(), "4m0s");
/// assert_eq!(Duration::MIN.to_string(), "-2562047h47m16.854775808s");
/// ```
impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let nanos = self.0.unsigned_abs();
        if nanos < Duration::SECOND.0 as u64 {
            let (unit, digits) = match nanos {
                0 => return f.write_str("0s"),
                1..=999 => ("ns", 0),
                1_000..=999_999 => ("µs", 3),
                _ => ("ms", 6),
            };
            let scale = 10u64.pow(digits);
            write!(f, "{}", nanos / scale)?;
            crate::fmt::write_fraction(f, nanos % scale, digits)?;
            return f.write_str(unit);
        }

        let secs = nanos / Duration::SECOND.0 as u64;
        let frac = nanos % Duration::SECOND.0 as u64;
        let (hours, minutes, secs) = (secs / 3600, secs / 60 % 60, secs % 60);
        // Days are not used since their length varies.
        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if hours > 0 || minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{secs}")?;
        crate::fmt::write_fraction(f, frac, 9)?;
        f.write_str("s")
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl TryFrom<Duration> for std::time::Duration {
    type Error = Error;

    fn try_from(d: Duration) -> Result<std::time::Duration, Error> {
        if d.is_negative() {
            return Err(Error::range("nanoseconds", d.0, 0, i64::MAX)
                .context(E::ConvertNegative));
        }
        Ok(std::time::Duration::from_nanos(d.0.unsigned_abs()))
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(d: std::time::Duration) -> Result<Duration, Error> {
        let nanos = i64::try_from(d.as_nanos()).map_err(|_| {
            Error::range(
                "seconds",
                d.as_secs(),
                0,
                i64::MAX / Duration::SECOND.0,
            )
            .context(E::ConvertTooBig)
        })?;
        Ok(Duration(nanos))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        Duration(i64::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Duration>> {
        Box::new(self.0.shrink().map(Duration))
    }
}
