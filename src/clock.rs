use std::{
    sync::OnceLock,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// A single reading of a clock.
///
/// The wall clock reading is split into whole seconds and nanoseconds since
/// the Unix epoch. The monotonic reading is a count of nanoseconds from an
/// arbitrary fixed origin. Only differences between monotonic readings from
/// the same source are meaningful. A monotonic reading of `0` means the
/// source has no monotonic clock.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ClockReading {
    /// Seconds since the Unix epoch.
    pub unix_seconds: i64,
    /// Nanoseconds within the second, in `0..1_000_000_000`.
    pub nanoseconds: i32,
    /// Nanoseconds since the origin of the monotonic clock, or `0`.
    pub monotonic: i64,
}

/// A source of the current time.
///
/// [`Time::now`](crate::Time::now) reads [`SystemClock`]. Tests and
/// simulations can supply their own source to
/// [`Time::now_with`](crate::Time::now_with).
///
/// # Example
///
/// ```
/// use nanotime::{ClockReading, ClockSource, Time};
///
/// struct Frozen;
///
/// impl ClockSource for Frozen {
///     fn now(&self) -> ClockReading {
///         ClockReading {
///             unix_seconds: 1221681866,
///             nanoseconds: 0,
///             monotonic: 5_000_000_000,
///         }
///     }
/// }
///
/// let t = Time::now_with(&Frozen);
/// assert_eq!(t.unix(), 1221681866);
/// assert_eq!(t.monotonic(), Some(5_000_000_000));
/// ```
pub trait ClockSource {
    /// Returns the current reading of this clock.
    fn now(&self) -> ClockReading;
}

impl<'a, C: ClockSource + ?Sized> ClockSource for &'a C {
    fn now(&self) -> ClockReading {
        (**self).now()
    }
}

/// The operating system's clocks.
///
/// The wall clock comes from [`SystemTime`]. The monotonic clock counts
/// nanoseconds elapsed, as measured by [`Instant`], since the first reading
/// taken by this process, plus one so that it is never zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> ClockReading {
        static START: OnceLock<Instant> = OnceLock::new();
        let start = *START.get_or_init(Instant::now);
        let elapsed = Instant::now().duration_since(start);
        let monotonic = i64::try_from(elapsed.as_nanos())
            .unwrap_or(i64::MAX - 1)
            .saturating_add(1);

        let (unix_seconds, nanoseconds) =
            match SystemTime::now().duration_since(UNIX_EPOCH) {
                Ok(d) => (
                    i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
                    d.subsec_nanos() as i32,
                ),
                // The system clock is set before 1970.
                Err(err) => {
                    let d = err.duration();
                    let secs =
                        -i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
                    match d.subsec_nanos() {
                        0 => (secs, 0),
                        n => {
                            let nanos = 1_000_000_000 - n as i32;
                            (secs.saturating_sub(1), nanos)
                        }
                    }
                }
            };
        ClockReading { unix_seconds, nanoseconds, monotonic }
    }
}
