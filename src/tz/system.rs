use std::{ffi::OsStr, sync::OnceLock};

use crate::{
    error::{tz::Error as E, ErrorContext},
    tz::{posix::PosixTimeZone, Location},
};

/// Returns the local location, resolving it from the `TZ` environment
/// variable on first use.
pub(crate) fn local() -> &'static Location {
    static LOCAL: OnceLock<Location> = OnceLock::new();
    LOCAL.get_or_init(|| {
        let tz = std::env::var_os("TZ");
        from_env_value(tz.as_deref())
    })
}

fn from_env_value(tz: Option<&OsStr>) -> Location {
    let Some(tz) = tz else {
        debug!("TZ environment variable is not set, using UTC");
        return Location::UTC;
    };
    let Some(tz) = tz.to_str() else {
        warn!("TZ environment variable {tz:?} is not UTF-8, using UTC");
        return Location::UTC;
    };
    let rule = tz.strip_prefix(':').unwrap_or(tz);
    if rule.is_empty() || rule == "UTC" {
        debug!("TZ={tz:?} selects UTC");
        return Location::UTC;
    }
    match PosixTimeZone::parse(rule).context(E::InvalidLocalRule) {
        Ok(posix) => {
            debug!("using POSIX rule TZ={rule:?} for local location");
            Location::from_posix("Local", rule, posix)
        }
        Err(err) => {
            warn!("{err}, using UTC for local location");
            Location::UTC
        }
    }
}
