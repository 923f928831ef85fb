/*!
Locations and the zones they switch between.

A [`Location`] maps every instant to the [`Zone`] in effect at that instant:
an abbreviation such as `CEST`, an offset east of UTC and whether the zone
observes daylight saving time. Locations are built from a table of zones plus
a sorted list of [`ZoneTransition`]s, optionally followed by a POSIX `TZ`
rule that takes over after the last transition.

Locations are immutable and cheap to clone. Every [`Time`](crate::Time)
holds one to decide how it is presented.

# Example

```
use nanotime::{tz::{Location, Zone}, Time};

let tz = Location::posix("US/Pacific", "PST8PDT,M3.2.0,M11.1.0")?;
let t = Time::from_unix(1221681866, 0).in_location(&tz);
assert_eq!(t.to_string(), "2008-09-17 13:04:26 -0700 PDT");
assert_eq!(t.zone(), Zone::new("PDT", -7 * 60 * 60, true));

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use std::sync::{Arc, RwLock};

use crate::{
    error::{tz::Error as E, Error, ErrorContext},
    util::epoch::{ALPHA, OMEGA},
};

use self::posix::PosixTimeZone;

pub use self::db::Database;

mod db;
pub(crate) mod posix;
mod system;

/// A zone that a location may be in: an abbreviation, an offset and
/// whether it is a daylight saving zone.
///
/// # Example
///
/// ```
/// use nanotime::tz::Zone;
///
/// let zone = Zone::new("CEST", 2 * 60 * 60, true);
/// assert_eq!(zone.name(), "CEST");
/// assert_eq!(zone.offset(), 7200);
/// assert!(zone.is_dst());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Zone {
    name: Arc<str>,
    offset: i32,
    is_dst: bool,
}

impl Zone {
    /// Creates a new zone with the given abbreviation and offset in seconds
    /// east of UTC.
    pub fn new(name: &str, offset: i32, is_dst: bool) -> Zone {
        Zone { name: Arc::from(name), offset, is_dst }
    }

    /// Returns the abbreviation of this zone, e.g., `CET`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the offset of this zone in seconds east of UTC.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Returns true if this zone observes daylight saving time.
    pub fn is_dst(&self) -> bool {
        self.is_dst
    }

    fn info(&self, start: i64, end: i64) -> ZoneInfo {
        ZoneInfo {
            name: Arc::clone(&self.name),
            offset: self.offset,
            start,
            end,
            is_dst: self.is_dst,
        }
    }
}

/// The instant at which a location switches to a different zone.
///
/// The standard and UTC flags record how the transition time was originally
/// specified in zone source files. They are kept for completeness and don't
/// influence lookups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ZoneTransition {
    when: i64,
    index: usize,
    is_std: bool,
    is_utc: bool,
}

impl ZoneTransition {
    /// Creates a transition to the zone at `index` that happens at the given
    /// Unix second.
    pub fn new(when: i64, index: usize) -> ZoneTransition {
        ZoneTransition { when, index, is_std: false, is_utc: false }
    }

    /// Sets the flags recording whether the transition time was given in
    /// standard time and in UTC.
    pub fn with_flags(self, is_std: bool, is_utc: bool) -> ZoneTransition {
        ZoneTransition { is_std, is_utc, ..self }
    }

    /// Returns the Unix second at which this transition happens.
    pub fn when(&self) -> i64 {
        self.when
    }

    /// Returns the index of the zone that takes effect.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the transition time was given in standard time.
    pub fn is_std(&self) -> bool {
        self.is_std
    }

    /// Returns true if the transition time was given in UTC.
    pub fn is_utc(&self) -> bool {
        self.is_utc
    }
}

/// The result of looking up a Unix second in a location.
///
/// The zone described is in effect for every Unix second in `start..end`.
/// `ALPHA` and `OMEGA` stand in for the beginning and end of time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ZoneInfo {
    pub(crate) name: Arc<str>,
    pub(crate) offset: i32,
    pub(crate) start: i64,
    pub(crate) end: i64,
    pub(crate) is_dst: bool,
}

impl ZoneInfo {
    fn utc() -> ZoneInfo {
        ZoneInfo {
            name: Arc::from("UTC"),
            offset: 0,
            start: ALPHA,
            end: OMEGA,
            is_dst: false,
        }
    }

    fn contains(&self, unix: i64) -> bool {
        self.start <= unix && unix < self.end
    }

    pub(crate) fn zone(&self) -> Zone {
        Zone {
            name: Arc::clone(&self.name),
            offset: self.offset,
            is_dst: self.is_dst,
        }
    }
}

/// A named set of zones and the rules for when each applies.
///
/// The zero value, [`Location::UTC`], is always in UTC. Other locations are
/// built with [`Location::new`], [`Location::fixed`] or [`Location::posix`],
/// retrieved from a [`Database`], or obtained from the host environment with
/// [`Location::local`].
///
/// Lookups remember the zone most recently resolved along with the window
/// of time it is valid for, so that repeated lookups of nearby instants skip
/// the search through transitions.
#[derive(Clone)]
pub struct Location {
    inner: Option<Arc<LocationInner>>,
}

struct LocationInner {
    name: Box<str>,
    zones: Vec<Zone>,
    transitions: Vec<ZoneTransition>,
    extend: Option<(Box<str>, PosixTimeZone)>,
    first_zone: usize,
    cache: RwLock<Option<ZoneInfo>>,
}

impl Location {
    /// The UTC location.
    pub const UTC: Location = Location { inner: None };

    /// Creates a location from a table of zones and a list of transitions
    /// between them.
    ///
    /// Instants before the first transition use a zone chosen from the table:
    /// the first zone if no transition refers to it, otherwise the nearest
    /// standard time zone preceding the first transition's zone, otherwise
    /// the first standard time zone, otherwise the first zone. Instants at or
    /// after the last transition consult `extend`, when given, as a POSIX
    /// `TZ` rule.
    ///
    /// # Errors
    ///
    /// This returns an error if a transition refers to a zone that doesn't
    /// exist, if transitions are not sorted by time or if `extend` is not a
    /// valid rule.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::{Location, Zone, ZoneTransition}, Time};
    ///
    /// let zones = vec![
    ///     Zone::new("LMT", -17762, false),
    ///     Zone::new("EST", -5 * 3600, false),
    /// ];
    /// let transitions = vec![ZoneTransition::new(-2717650800, 1)];
    /// let tz = Location::new("America/New_York", zones, transitions, None)?;
    ///
    /// let t = Time::date_in(1800, 1, 1, 0, 0, 0, 0, &tz);
    /// assert_eq!(t.zone().name(), "LMT");
    /// let t = Time::date_in(1900, 1, 1, 0, 0, 0, 0, &tz);
    /// assert_eq!(t.zone().name(), "EST");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(
        name: &str,
        zones: Vec<Zone>,
        transitions: Vec<ZoneTransition>,
        extend: Option<&str>,
    ) -> Result<Location, Error> {
        for (i, tx) in transitions.iter().enumerate() {
            if tx.index >= zones.len() {
                return Err(Error::from(E::TransitionZoneIndex {
                    transition: i,
                    index: tx.index,
                    zones: zones.len(),
                }));
            }
            if i > 0 && tx.when < transitions[i - 1].when {
                return Err(Error::from(E::TransitionsUnsorted {
                    transition: i,
                }));
            }
        }
        let extend = match extend {
            None => None,
            Some(rule) => {
                let tz = PosixTimeZone::parse(rule)
                    .with_context(|| E::invalid_extend_rule(name))?;
                Some((Box::from(rule), tz))
            }
        };
        let first_zone = first_zone(&zones, &transitions);
        let inner = LocationInner {
            name: Box::from(name),
            zones,
            transitions,
            extend,
            first_zone,
            cache: RwLock::new(None),
        };
        Ok(Location { inner: Some(Arc::new(inner)) })
    }

    /// Returns a location that is always in a zone with the given name and
    /// offset east of UTC in seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::Location, Time};
    ///
    /// let tz = Location::fixed("IST", 5 * 3600 + 30 * 60);
    /// let t = Time::from_unix(0, 0).in_location(&tz);
    /// assert_eq!(t.to_string(), "1970-01-01 05:30:00 +0530 IST");
    /// ```
    pub fn fixed(name: &str, offset: i32) -> Location {
        let zone = Zone::new(name, offset, false);
        let cached = zone.info(ALPHA, OMEGA);
        let inner = LocationInner {
            name: Box::from(name),
            zones: vec![zone],
            transitions: vec![ZoneTransition::new(ALPHA, 0)],
            extend: None,
            first_zone: 0,
            cache: RwLock::new(Some(cached)),
        };
        Location { inner: Some(Arc::new(inner)) }
    }

    /// Returns a location whose zones are described entirely by a POSIX
    /// `TZ` rule, such as `CET-1CEST,M3.5.0,M10.5.0/3`.
    ///
    /// # Errors
    ///
    /// This returns an error if the rule is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::{tz::{Location, Zone}, Time};
    ///
    /// let rule = "CET-1CEST,M3.5.0,M10.5.0/3";
    /// let tz = Location::posix("Europe/Berlin", rule)?;
    /// let t = Time::date_in(2024, 7, 1, 12, 0, 0, 0, &tz);
    /// assert_eq!(t.zone(), Zone::new("CEST", 2 * 3600, true));
    /// assert!(t.is_dst());
    ///
    /// assert!(Location::posix("Nowhere", "X").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn posix(name: &str, rule: &str) -> Result<Location, Error> {
        let tz = PosixTimeZone::parse(rule)
            .with_context(|| E::invalid_extend_rule(name))?;
        Ok(Location::from_posix(name, rule, tz))
    }

    pub(crate) fn from_posix(
        name: &str,
        rule: &str,
        tz: PosixTimeZone,
    ) -> Location {
        let std = tz.std();
        let mut zones = vec![Zone {
            name: Arc::clone(&std.name),
            offset: std.offset,
            is_dst: false,
        }];
        if let Some(dst) = tz.dst() {
            zones.push(Zone {
                name: Arc::clone(&dst.name),
                offset: dst.offset,
                is_dst: true,
            });
        }
        let inner = LocationInner {
            name: Box::from(name),
            zones,
            transitions: vec![ZoneTransition::new(ALPHA, 0)],
            extend: Some((Box::from(rule), tz)),
            first_zone: 0,
            cache: RwLock::new(None),
        };
        Location { inner: Some(Arc::new(inner)) }
    }

    /// Returns the location of the host, as configured by the `TZ`
    /// environment variable.
    ///
    /// The variable is consulted once per process. When it is unset or
    /// empty, the local location is UTC. Otherwise it must be a POSIX `TZ`
    /// rule, optionally prefixed by a `:`, and the location is named
    /// `Local`. Any other value falls back to UTC.
    pub fn local() -> Location {
        self::system::local().clone()
    }

    /// Returns the name of this location.
    ///
    /// # Example
    ///
    /// ```
    /// use nanotime::tz::Location;
    ///
    /// assert_eq!(Location::UTC.name(), "UTC");
    /// assert_eq!(Location::fixed("X", 60).name(), "X");
    /// ```
    pub fn name(&self) -> &str {
        match self.inner {
            None => "UTC",
            Some(ref inner) => &inner.name,
        }
    }

    /// Returns the zones of this location.
    pub fn zones(&self) -> &[Zone] {
        match self.inner {
            None => &[],
            Some(ref inner) => &inner.zones,
        }
    }

    /// Returns the transitions of this location, sorted by time.
    ///
    /// Locations built by [`Location::fixed`] and [`Location::posix`] have
    /// a single transition to their first zone at the earliest
    /// representable Unix second, `i64::MIN`.
    pub fn transitions(&self) -> &[ZoneTransition] {
        match self.inner {
            None => &[],
            Some(ref inner) => &inner.transitions,
        }
    }

    /// Returns the POSIX `TZ` rule consulted after the last transition, if
    /// there is one.
    pub fn extend(&self) -> Option<&str> {
        self.inner.as_ref()?.extend.as_ref().map(|(rule, _)| &**rule)
    }

    pub(crate) fn is_utc(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns the zone in effect at the given Unix second, along with the
    /// window of Unix seconds for which it stays in effect.
    pub(crate) fn lookup(&self, unix: i64) -> ZoneInfo {
        match self.inner {
            None => ZoneInfo::utc(),
            Some(ref inner) => inner.lookup(unix),
        }
    }

    /// Returns only the offset in effect at the given Unix second.
    ///
    /// This skips cloning the zone name on a cache hit.
    pub(crate) fn offset(&self, unix: i64) -> i32 {
        let Some(ref inner) = self.inner else { return 0 };
        if inner.zones.is_empty() {
            return 0;
        }
        if let Ok(cache) = inner.cache.try_read() {
            if let Some(ref info) = *cache {
                if info.contains(unix) {
                    return info.offset;
                }
            }
        }
        inner.lookup(unix).offset
    }
}

impl LocationInner {
    fn lookup(&self, unix: i64) -> ZoneInfo {
        if self.zones.is_empty() {
            return ZoneInfo::utc();
        }
        if let Some(info) = self.cached(unix) {
            return info;
        }
        trace!("zone cache miss in {} at Unix second {unix}", self.name);
        let info = self.resolve(unix);
        if let Ok(mut cache) = self.cache.try_write() {
            *cache = Some(info.clone());
        }
        info
    }

    fn cached(&self, unix: i64) -> Option<ZoneInfo> {
        let cache = self.cache.try_read().ok()?;
        cache.as_ref().filter(|info| info.contains(unix)).cloned()
    }

    fn resolve(&self, unix: i64) -> ZoneInfo {
        let after = self.transitions.partition_point(|tx| tx.when <= unix);
        let Some(last) = after.checked_sub(1) else {
            let end = self.transitions.first().map_or(OMEGA, |tx| tx.when);
            return self.zones[self.first_zone].info(ALPHA, end);
        };
        let tx = &self.transitions[last];
        match self.transitions.get(after) {
            Some(next) => self.zones[tx.index].info(tx.when, next.when),
            None => match self.extend {
                Some((_, ref rule)) => {
                    // The rule's window may reach back into the year before
                    // the last transition, where the table still applies.
                    let mut info = rule.zone_info(tx.when, unix);
                    info.start = info.start.max(tx.when);
                    info
                }
                None => self.zones[tx.index].info(tx.when, OMEGA),
            },
        }
    }
}

/// Picks the zone for instants before the first transition.
fn first_zone(zones: &[Zone], transitions: &[ZoneTransition]) -> usize {
    if !transitions.iter().any(|tx| tx.index == 0) {
        return 0;
    }
    if let Some(first) = transitions.first() {
        if zones[first.index].is_dst {
            let std = (0..first.index).rev().find(|&i| !zones[i].is_dst);
            if let Some(i) = std {
                return i;
            }
        }
    }
    zones.iter().position(|zone| !zone.is_dst).unwrap_or(0)
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::fmt::Debug for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let Some(ref inner) = self.inner else {
            return f.debug_tuple("Location").field(&"UTC").finish();
        };
        f.debug_struct("Location")
            .field("name", &inner.name)
            .field("zones", &inner.zones.len())
            .field("transitions", &inner.transitions.len())
            .field("extend", &self.extend())
            .finish()
    }
}

impl Default for Location {
    fn default() -> Location {
        Location::UTC
    }
}
