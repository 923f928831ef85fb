/// A time of day with second precision: an hour, minute and second.
///
/// This is what [`Time::clock`](crate::Time::clock) returns. Use
/// [`Time::nanosecond`](crate::Time::nanosecond) for the fraction of the
/// second.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Clock {
    hour: i8,
    minute: i8,
    second: i8,
}

impl Clock {
    pub(crate) fn new(hour: i8, minute: i8, second: i8) -> Clock {
        Clock { hour, minute, second }
    }

    /// Returns the hour, in the range `0..=23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute, in the range `0..=59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second, in the range `0..=59`.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }
}

impl core::fmt::Display for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
