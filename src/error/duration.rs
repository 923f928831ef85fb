use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ConvertNegative,
    ConvertTooBig,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Duration(err).into()
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
            ConvertNegative => f.write_str(
                "cannot convert negative duration to unsigned \
                 `std::time::Duration`",
            ),
            ConvertTooBig => f.write_str(
                "`std::time::Duration` is too big to fit in a signed \
                 64-bit count of nanoseconds",
            ),
        }
    }
}
