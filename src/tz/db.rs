use std::sync::{RwLock, RwLockReadGuard};

use crate::{
    error::{tz::Error as E, Error},
    tz::{posix::PosixTimeZone, Location},
};

/// A registry of locations, looked up by name.
///
/// This crate does not read zoneinfo files. Instead, callers register the
/// locations they have built with [`Database::insert`]. A few names are
/// always available:
///
/// * The empty string and `UTC` resolve to [`Location::UTC`].
/// * `Local` resolves to [`Location::local`].
/// * Any valid POSIX `TZ` rule, such as `EST5EDT`, resolves to a location
/// described by that rule and named after it.
///
/// A database may be shared between threads.
///
/// # Example
///
/// ```
/// use nanotime::tz::{Database, Location};
///
/// let db = Database::new();
/// db.insert(Location::fixed("Asia/Kolkata", 5 * 3600 + 30 * 60));
///
/// assert_eq!(db.get("Asia/Kolkata")?.name(), "Asia/Kolkata");
/// assert_eq!(db.get("")?.name(), "UTC");
/// assert_eq!(db.get("CET-1CEST")?.name(), "CET-1CEST");
/// assert!(db.get("Asia/Calcutta").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Database {
    /// Sorted by name.
    locations: RwLock<Vec<Location>>,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Database {
        Database::default()
    }

    /// Registers a location under its name, replacing any location
    /// previously registered with the same name.
    pub fn insert(&self, location: Location) {
        let mut locations =
            self.locations.write().unwrap_or_else(|err| err.into_inner());
        match locations
            .binary_search_by(|loc| loc.name().cmp(location.name()))
        {
            Ok(i) => locations[i] = location,
            Err(i) => locations.insert(i, location),
        }
    }

    /// Returns the location with the given name.
    ///
    /// # Errors
    ///
    /// This returns an error when the name is neither registered nor one of
    /// the special names described on [`Database`].
    pub fn get(&self, name: &str) -> Result<Location, Error> {
        match name {
            "" | "UTC" => return Ok(Location::UTC),
            "Local" => return Ok(Location::local()),
            _ => {}
        }
        {
            let locations = self.read();
            if let Ok(i) =
                locations.binary_search_by(|loc| loc.name().cmp(name))
            {
                return Ok(locations[i].clone());
            }
        }
        match PosixTimeZone::parse(name) {
            Ok(tz) => {
                trace!("resolved {name:?} as a POSIX TZ rule");
                Ok(Location::from_posix(name, name, tz))
            }
            Err(_) => Err(Error::from(E::not_found(name))),
        }
    }

    /// Returns the names of every registered location, in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.read().iter().map(|loc| loc.name().to_string()).collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Location>> {
        self.locations.read().unwrap_or_else(|err| err.into_inner())
    }
}
