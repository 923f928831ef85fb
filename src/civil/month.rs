use std::borrow::Cow;

/// A month of the Gregorian calendar.
///
/// The discriminant of each variant is its conventional number, so
/// `Month::January as i8 == 1`.
///
/// # Example
///
/// ```
/// use nanotime::civil::Month;
///
/// assert_eq!(Month::September.number(), 9);
/// assert_eq!(Month::September.to_string(), "September");
/// assert_eq!(Month::from_number(13), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(i8)]
#[allow(missing_docs)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

const NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Month {
    /// Returns the month corresponding to the given number, where January
    /// is `1`.
    ///
    /// This returns `None` when `number` is outside the range `1..=12`.
    pub fn from_number(number: i64) -> Option<Month> {
        use self::Month::*;

        let month = match number {
            1 => January,
            2 => February,
            3 => March,
            4 => April,
            5 => May,
            6 => June,
            7 => July,
            8 => August,
            9 => September,
            10 => October,
            11 => November,
            12 => December,
            _ => return None,
        };
        Some(month)
    }

    /// Returns the number of this month, where January is `1`.
    #[inline]
    pub fn number(self) -> i8 {
        self as i8
    }

    /// Returns the English name of this month.
    #[inline]
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Returns the first three letters of the English name of this month.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::civil::Month;
    ///
    /// assert_eq!(Month::February.short_name(), "Feb");
    /// ```
    #[inline]
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Returns the English name of the month numbered `number`.
    ///
    /// Numbers outside of `1..=12` never fail. Instead, they render as a
    /// placeholder that shows the offending value.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::civil::Month;
    ///
    /// assert_eq!(Month::name_for(3), "March");
    /// assert_eq!(Month::name_for(13), "%!Month(13)");
    /// ```
    pub fn name_for(number: i64) -> Cow<'static, str> {
        match Month::from_number(number) {
            Some(month) => Cow::Borrowed(month.name()),
            None => Cow::Owned(format!("%!Month({number})")),
        }
    }

    /// Returns the month following this one, wrapping from December to
    /// January.
    pub fn next(self) -> Month {
        crate::util::common::month_at(self.index() + 1)
    }

    /// Returns the month preceding this one, wrapping from January to
    /// December.
    pub fn previous(self) -> Month {
        crate::util::common::month_at(self.index() + 11)
    }

    /// Returns the zero based index of this month.
    #[inline]
    pub(crate) fn index(self) -> usize {
        (self as i8 - 1) as usize
    }
}

impl core::fmt::Display for Month {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
