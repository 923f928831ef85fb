/*!
Nanotime is a civil time and duration library.

The central type is [`Time`], an instant with nanosecond precision that
carries a wall clock reading, an optional monotonic clock reading and a
[`Location`] used when presenting it as calendar fields. [`Duration`] is a
signed count of nanoseconds whose arithmetic saturates instead of wrapping.

# Example

```
use nanotime::{civil::Month, tz::Location, Duration, Time};

let t = Time::date_in(2008, 9, 17, 20, 4, 26, 0, &Location::UTC);
assert_eq!(t.year(), 2008);
assert_eq!(t.month(), Month::September);
assert_eq!(t.to_string(), "2008-09-17 20:04:26 +0000 UTC");

let later = &t + 90 * Duration::MINUTE;
assert_eq!(later - &t, Duration::from_secs(5400));
```

# Monotonic readings

Times returned by [`Time::now`] carry a monotonic clock reading alongside the
wall clock. When both operands of a comparison or subtraction carry one,
the monotonic readings are used, which makes elapsed time measurements
immune to wall clock adjustments. Any operation that changes the
presentation of a time, such as [`Time::in_location`], strips it.

# Crate features

* **std** (enabled by default) - Enables the standard library. This crate
currently requires it.
* **logging** - Emits log messages via the [`log`] crate. This mostly
covers how the local location is resolved from the `TZ` environment
variable.
* **serde** - Implements `Serialize` and `Deserialize` for [`Duration`],
[`civil::Month`] and [`civil::Weekday`].

[`log`]: https://docs.rs/log
*/

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(not(feature = "std"))]
compile_error!("nanotime currently requires the `std` crate feature");

pub use crate::{
    clock::{ClockReading, ClockSource, SystemClock},
    duration::Duration,
    error::Error,
    time::Time,
};

#[macro_use]
mod logging;

pub mod civil;
mod clock;
mod duration;
mod error;
pub mod fmt;
mod time;
pub mod tz;
mod util;
