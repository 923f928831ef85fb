use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    InvalidExtendRule {
        location: Box<str>,
    },
    InvalidLocalRule,
    NotFound {
        name: Box<str>,
    },
    TransitionZoneIndex {
        transition: usize,
        index: usize,
        zones: usize,
    },
    TransitionsUnsorted {
        transition: usize,
    },
}

impl Error {
    pub(crate) fn not_found(name: &str) -> Error {
        Error::NotFound { name: name.into() }
    }

    pub(crate) fn invalid_extend_rule(location: &str) -> Error {
        Error::InvalidExtendRule { location: location.into() }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Tz(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            InvalidExtendRule { ref location } => write!(
                f,
                "invalid POSIX TZ rule for location `{location}`",
            ),
            InvalidLocalRule => f.write_str(
                "`TZ` environment variable is not a valid POSIX TZ rule",
            ),
            NotFound { ref name } => {
                write!(f, "failed to find location `{name}` in database")
            }
            TransitionZoneIndex { transition, index, zones } => write!(
                f,
                "transition {transition} refers to zone index {index}, \
                 but only {zones} zones are defined",
            ),
            TransitionsUnsorted { transition } => write!(
                f,
                "transition {transition} occurs before the transition \
                 preceding it, but transitions must be sorted ascending",
            ),
        }
    }
}
