/// An ISO 8601 week: the week-numbering year and the week within it.
///
/// The week-numbering year can differ from the calendar year for days near
/// January 1. For example, January 1, 2005 falls in week 53 of 2004.
///
/// # Example
///
/// ```
/// use nanotime::{tz::Location, Time};
///
/// let t = Time::date_in(2005, 1, 1, 0, 0, 0, 0, &Location::UTC);
/// let week = t.iso_week();
/// assert_eq!((week.year(), week.week()), (2004, 53));
/// assert_eq!(week.to_string(), "2004-W53");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct IsoWeek {
    year: i64,
    week: i8,
}

impl IsoWeek {
    pub(crate) fn new(year: i64, week: i8) -> IsoWeek {
        IsoWeek { year, week }
    }

    /// Returns the ISO week-numbering year.
    #[inline]
    pub fn year(self) -> i64 {
        self.year
    }

    /// Returns the week number, in the range `1..=53`.
    #[inline]
    pub fn week(self) -> i8 {
        self.week
    }
}

impl core::fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        crate::fmt::write_year(f, self.year)?;
        write!(f, "-W{:02}", self.week)
    }
}
