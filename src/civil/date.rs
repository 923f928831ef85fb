use crate::civil::Month;

/// A calendar date: a year, month and day of month.
///
/// This is what [`Time::date`](crate::Time::date) returns.
///
/// # Example
///
/// ```
/// use nanotime::{civil::Month, tz::Location, Time};
///
/// let t = Time::date_in(2000, 2, 29, 12, 0, 0, 0, &Location::UTC);
/// let date = t.date();
/// assert_eq!(date.year(), 2000);
/// assert_eq!(date.month(), Month::February);
/// assert_eq!(date.day(), 29);
/// assert_eq!(date.to_string(), "2000-02-29");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Date {
    year: i64,
    month: Month,
    day: i8,
}

impl Date {
    pub(crate) fn new(year: i64, month: Month, day: i8) -> Date {
        Date { year, month, day }
    }

    /// Returns the year. Years before year 1 are zero or negative.
    #[inline]
    pub fn year(self) -> i64 {
        self.year
    }

    /// Returns the month.
    #[inline]
    pub fn month(self) -> Month {
        self.month
    }

    /// Returns the day of the month, in the range `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month.number(), self.day)
    }
}
