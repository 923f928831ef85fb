/*!
Rendering helpers shared by the `Display` implementations in this crate, and
optional [Serde] integration.

Parsing and formatting of arbitrary layouts is not supported. Every type
renders in exactly one fixed format.

[Serde]: https://serde.rs/
*/

use core::fmt::Write;

#[cfg(feature = "serde")]
pub mod serde;

/// Writes a year padded to at least four digits, with a leading `-` for
/// years before year 0.
pub(crate) fn write_year<W: Write>(w: &mut W, year: i64) -> core::fmt::Result {
    if year < 0 {
        w.write_char('-')?;
    }
    write!(w, "{:04}", year.unsigned_abs())
}

/// Writes `.` followed by the `digits` digit fraction `value` with its
/// trailing zeros removed.
///
/// Nothing at all is written when `value` is zero.
pub(crate) fn write_fraction<W: Write>(
    w: &mut W,
    mut value: u64,
    mut digits: u32,
) -> core::fmt::Result {
    debug_assert!(value < 10u64.pow(digits));
    while digits > 0 && value % 10 == 0 {
        value /= 10;
        digits -= 1;
    }
    if digits == 0 {
        return Ok(());
    }
    write!(w, ".{value:0width$}", width = digits as usize)
}

/// Writes a UTC offset given in seconds as `+hhmm` or `-hhmm`.
///
/// Seconds are truncated, so `-30` seconds renders as `+0000`.
pub(crate) fn write_offset<W: Write>(
    w: &mut W,
    offset: i32,
) -> core::fmt::Result {
    let minutes = offset / 60;
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.unsigned_abs();
    write!(w, "{sign}{:02}{:02}", minutes / 60, minutes % 60)
}
