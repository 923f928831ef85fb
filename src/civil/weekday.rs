use std::borrow::Cow;

/// A day of the week.
///
/// The discriminant of each variant is its number of days since Sunday, so
/// `Weekday::Sunday as i8 == 0`.
///
/// # Example
///
/// ```
/// use nanotime::civil::Weekday;
///
/// assert_eq!(Weekday::Wednesday.to_sunday_zero_offset(), 3);
/// assert_eq!(Weekday::Wednesday.to_string(), "Wednesday");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(i8)]
#[allow(missing_docs)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

const NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

impl Weekday {
    /// Returns the weekday `offset` days after Sunday.
    ///
    /// This returns `None` when `offset` is outside the range `0..=6`.
    pub fn from_sunday_zero_offset(offset: i64) -> Option<Weekday> {
        use self::Weekday::*;

        let weekday = match offset {
            0 => Sunday,
            1 => Monday,
            2 => Tuesday,
            3 => Wednesday,
            4 => Thursday,
            5 => Friday,
            6 => Saturday,
            _ => return None,
        };
        Some(weekday)
    }

    /// Returns the number of days since Sunday, in the range `0..=6`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Returns the ISO 8601 weekday number, where Monday is `1` and Sunday
    /// is `7`.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Monday.to_monday_one_offset(), 1);
    /// assert_eq!(Weekday::Sunday.to_monday_one_offset(), 7);
    /// ```
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        match self {
            Weekday::Sunday => 7,
            day => day as i8,
        }
    }

    /// Returns the English name of this weekday.
    #[inline]
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Returns the first three letters of the English name of this weekday.
    #[inline]
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Returns the English name of the weekday `offset` days after Sunday.
    ///
    /// Offsets outside of `0..=6` never fail. Instead, they render as a
    /// placeholder that shows the offending value.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::civil::Weekday;
    ///
    /// assert_eq!(Weekday::name_for(6), "Saturday");
    /// assert_eq!(Weekday::name_for(7), "%!Weekday(7)");
    /// ```
    pub fn name_for(offset: i64) -> Cow<'static, str> {
        match Weekday::from_sunday_zero_offset(offset) {
            Some(weekday) => Cow::Borrowed(weekday.name()),
            None => Cow::Owned(format!("%!Weekday({offset})")),
        }
    }

    /// Returns the following weekday, wrapping from Saturday to Sunday.
    pub fn next(self) -> Weekday {
        crate::util::common::weekday_at(self as usize + 1)
    }

    /// Returns the preceding weekday, wrapping from Sunday to Saturday.
    pub fn previous(self) -> Weekday {
        crate::util::common::weekday_at(self as usize + 6)
    }
}

impl core::fmt::Display for Weekday {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
