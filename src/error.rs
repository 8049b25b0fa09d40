//! Driver errors

use core::fmt;

/// Everything an LCD operation can fail with
///
/// `E` is the error type of the I2C transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// An argument is out of range, e.g. a CGRAM index above 7 or an address above 0x7F
    InvalidArgument,
    /// The handle has not finished [`init`](crate::lcd::Lcd::init) yet
    NotInitialized,
    /// [`init`](crate::lcd::Lcd::init) was called on a handle that is already running,
    /// use [`reinit`](crate::lcd::Lcd::reinit) to run the init sequence again
    AlreadyInitialized,
    /// Reserved, this driver never reports it
    Busy,
    /// Reserved, this driver never reports it
    Timeout,
    /// The I2C transport failed, the write was not acknowledged
    Bus(E),
    /// A `core::fmt` formatter returned an error
    Format,
}

impl<E> From<fmt::Error> for Error<E> {
    fn from(_: fmt::Error) -> Self {
        Error::Format
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::NotInitialized => f.write_str("LCD not initialized"),
            Error::AlreadyInitialized => f.write_str("LCD already initialized"),
            Error::Busy => f.write_str("LCD busy"),
            Error::Timeout => f.write_str("LCD timeout"),
            Error::Bus(e) => write!(f, "I2C bus error: {:?}", e),
            Error::Format => f.write_str("formatting error"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::InvalidArgument => defmt::write!(fmt, "invalid argument"),
            Error::NotInitialized => defmt::write!(fmt, "LCD not initialized"),
            Error::AlreadyInitialized => defmt::write!(fmt, "LCD already initialized"),
            Error::Busy => defmt::write!(fmt, "LCD busy"),
            Error::Timeout => defmt::write!(fmt, "LCD timeout"),
            Error::Bus(_e) => defmt::write!(fmt, "I2C bus error"),
            Error::Format => defmt::write!(fmt, "formatting error"),
        }
    }
}
