/*!
This module provides helpers to use with [Serde].

[`Duration`](crate::Duration) serializes as a signed integer number of
nanoseconds. [`Month`](crate::civil::Month) serializes as its number
(January is `1`) and [`Weekday`](crate::civil::Weekday) as its offset from
Sunday. These implementations are always available when the `serde` crate
feature is enabled.

A [`Time`](crate::Time) has no default serialization, since it carries a
location and possibly a monotonic reading that can't survive a round trip.
Instead, the modules below are meant to be used with Serde's
[`with` attribute] to transmit a `Time` as an integer number of seconds,
milliseconds, microseconds or nanoseconds since the Unix epoch. Deserialized
times are always in UTC and never carry a monotonic reading.

* [`time`]
    * [`nanotime::fmt::serde::time::second::required`](self::time::second::required)
    * [`nanotime::fmt::serde::time::second::optional`](self::time::second::optional)
    * [`nanotime::fmt::serde::time::millisecond::required`](self::time::millisecond::required)
    * [`nanotime::fmt::serde::time::millisecond::optional`](self::time::millisecond::optional)
    * [`nanotime::fmt::serde::time::microsecond::required`](self::time::microsecond::required)
    * [`nanotime::fmt::serde::time::microsecond::optional`](self::time::microsecond::optional)
    * [`nanotime::fmt::serde::time::nanosecond::required`](self::time::nanosecond::required)
    * [`nanotime::fmt::serde::time::nanosecond::optional`](self::time::nanosecond::optional)

# Example

```
use nanotime::Time;

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    #[serde(with = "nanotime::fmt::serde::time::second::required")]
    time: Time,
}

let json = r#"{"time":1517644800}"#;
let got: Record = serde_json::from_str(&json)?;
assert_eq!(got.time, Time::from_unix(1517644800, 0));
assert_eq!(serde_json::to_string(&got)?, json);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[Serde]: https://serde.rs/
[`with` attribute]: https://serde.rs/field-attrs.html#with
*/

use crate::{
    civil::{Month, Weekday},
    Duration,
};

impl serde::Serialize for Duration {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.nanoseconds())
    }
}

impl<'de> serde::Deserialize<'de> for Duration {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        let nanos = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}

impl serde::Serialize for Month {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.number())
    }
}

impl<'de> serde::Deserialize<'de> for Month {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Month, D::Error> {
        let n = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Month::from_number(n).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "month number {n} is not in the required range of 1..=12",
            ))
        })
    }
}

impl serde::Serialize for Weekday {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.to_sunday_zero_offset())
    }
}

impl<'de> serde::Deserialize<'de> for Weekday {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Weekday, D::Error> {
        let n = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Weekday::from_sunday_zero_offset(n).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "weekday offset {n} is not in the required range of 0..=6",
            ))
        })
    }
}

/// Convenience routines for (de)serializing [`Time`](crate::Time) as raw
/// integer values since the Unix epoch.
pub mod time {
    macro_rules! unix_integer {
        ($name:ident, $unit:literal, $get:ident, $make:expr) => {
            #[doc = concat!(
                "(De)serialize an integer number of ", $unit,
                " from the Unix epoch.",
            )]
            pub mod $name {
                #[doc = concat!(
                    "(De)serialize a required integer number of ", $unit,
                    " from the Unix epoch.",
                )]
                pub mod required {
                    #[doc = concat!(
                        "Serialize a required integer number of ", $unit,
                        " since the Unix epoch.",
                    )]
                    #[inline]
                    pub fn serialize<S: serde::Serializer>(
                        time: &crate::Time,
                        se: S,
                    ) -> Result<S::Ok, S::Error> {
                        se.serialize_i64(time.$get())
                    }

                    #[doc = concat!(
                        "Deserialize a required integer number of ", $unit,
                        " since the Unix epoch.",
                    )]
                    #[inline]
                    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                        de: D,
                    ) -> Result<crate::Time, D::Error> {
                        let v = <i64 as serde::Deserialize>::deserialize(de)?;
                        let make: fn(i64) -> crate::Time = $make;
                        Ok(make(v))
                    }
                }

                #[doc = concat!(
                    "(De)serialize an optional integer number of ", $unit,
                    " from the Unix epoch.",
                )]
                pub mod optional {
                    #[doc = concat!(
                        "Serialize an optional integer number of ", $unit,
                        " since the Unix epoch.",
                    )]
                    #[inline]
                    pub fn serialize<S: serde::Serializer>(
                        time: &Option<crate::Time>,
                        se: S,
                    ) -> Result<S::Ok, S::Error> {
                        match *time {
                            None => se.serialize_none(),
                            Some(ref t) => se.serialize_i64(t.$get()),
                        }
                    }

                    #[doc = concat!(
                        "Deserialize an optional integer number of ", $unit,
                        " since the Unix epoch.",
                    )]
                    #[inline]
                    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
                        de: D,
                    ) -> Result<Option<crate::Time>, D::Error> {
                        let v =
                            <Option<i64> as serde::Deserialize>::deserialize(
                                de,
                            )?;
                        let make: fn(i64) -> crate::Time = $make;
                        Ok(v.map(make))
                    }
                }
            }
        };
    }

    unix_integer!(second, "seconds", unix, |v| {
        crate::Time::from_unix(v, 0).utc()
    });
    unix_integer!(millisecond, "milliseconds", unix_milli, |v| {
        crate::Time::from_unix_milli(v).utc()
    });
    unix_integer!(microsecond, "microseconds", unix_micro, |v| {
        crate::Time::from_unix_micro(v).utc()
    });
    unix_integer!(nanosecond, "nanoseconds", unix_nano, |v| {
        crate::Time::from_unix(0, v).utc()
    });
}

#[cfg(test)]
mod tests {
    use crate::{
        civil::{Month, Weekday},
        Duration, Time,
    };

    #[test]
    fn duration_as_nanoseconds() {
        let d = 90 * Duration::MINUTE + Duration::NANOSECOND;
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "5400000000001");
        let got: Duration = serde_json::from_str(&json).unwrap();
        assert_eq!(got, d);
        let got: Duration = serde_json::from_str("-1").unwrap();
        assert_eq!(got, -Duration::NANOSECOND);
    }

    #[test]
    fn month_and_weekday_as_numbers() {
        assert_eq!(serde_json::to_string(&Month::September).unwrap(), "9");
        assert_eq!(serde_json::to_string(&Weekday::Sunday).unwrap(), "0");
        let got: Month = serde_json::from_str("12").unwrap();
        assert_eq!(got, Month::December);
        let got: Weekday = serde_json::from_str("6").unwrap();
        assert_eq!(got, Weekday::Saturday);

        let err = serde_json::from_str::<Month>("13").unwrap_err();
        assert!(err.to_string().contains("1..=12"), "{err}");
        let err = serde_json::from_str::<Weekday>("7").unwrap_err();
        assert!(err.to_string().contains("0..=6"), "{err}");
    }

    #[test]
    fn time_second_required() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(with = "crate::fmt::serde::time::second::required")]
            time: Time,
        }

        let json = r#"{"time":1517644800}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.time, Time::from_unix(1517644800, 0));
        assert_eq!(got.time.location().name(), "UTC");
        assert_eq!(serde_json::to_string(&got).unwrap(), json);
    }

    #[test]
    fn time_millisecond_optional() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(with = "crate::fmt::serde::time::millisecond::optional")]
            time: Option<Time>,
        }

        let json = r#"{"time":1517644800123}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.time, Some(Time::from_unix(1517644800, 123_000_000)));
        assert_eq!(serde_json::to_string(&got).unwrap(), json);

        let json = r#"{"time":null}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.time, None);
        assert_eq!(serde_json::to_string(&got).unwrap(), json);
    }

    #[test]
    fn time_microsecond_required() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(with = "crate::fmt::serde::time::microsecond::required")]
            time: Time,
        }

        let json = r#"{"time":-1517644800123456}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.time, Time::from_unix(-1517644801, 876_544_000));
        assert_eq!(serde_json::to_string(&got).unwrap(), json);
    }

    #[test]
    fn time_nanosecond_required() {
        #[derive(Debug, serde::Deserialize, serde::Serialize)]
        struct Data {
            #[serde(with = "crate::fmt::serde::time::nanosecond::required")]
            time: Time,
        }

        let json = r#"{"time":1517644800123456789}"#;
        let got: Data = serde_json::from_str(&json).unwrap();
        assert_eq!(got.time, Time::from_unix(1517644800, 123_456_789));
        assert_eq!(serde_json::to_string(&got).unwrap(), json);
    }
}
