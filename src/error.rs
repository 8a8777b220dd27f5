use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::result::Result as StdResult;

/// Errors which can occur during target setup, frame building and transfer.
#[derive(Debug)]
pub enum Error {
    /// No device on any bus matched the profile's vendor and product ids.
    TargetNotFound,

    /// A matching device was found but could not be opened.
    OpenFailed(rusb::Error),

    /// The device was opened but its bulk interface could not be claimed.
    ClaimInterface(rusb::Error),

    /// The image file could not be opened or read.
    File(std::io::Error),

    /// The image is too large for the frame's 32-bit total-length field.
    FileTooLarge(u64),

    /// A bulk write transferred fewer bytes than requested. The transfer is
    /// aborted at this point; there is no retry or resume.
    ShortWrite {
        /// Bytes handed to the endpoint for this chunk.
        requested: usize,
        /// Bytes the endpoint actually accepted.
        written: usize,
    },

    /// An error occurred during the raw USB communication.
    Usb(rusb::Error),
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> StdResult<(), fmt::Error> {
        match self {
            Error::TargetNotFound => fmt.write_str("Target usb device not found"),
            Error::OpenFailed(err) => write!(fmt, "Cannot open device: {}", err),
            Error::ClaimInterface(err) => write!(fmt, "Cannot claim interface: {}", err),
            Error::File(err) => write!(fmt, "Cannot read image file: {}", err),
            Error::FileTooLarge(size) => {
                write!(fmt, "Image of {} bytes overflows the frame length field", size)
            }
            Error::ShortWrite { requested, written } => {
                write!(fmt, "Bulk write transferred {} of {} bytes", written, requested)
            }
            Error::Usb(err) => write!(fmt, "USB error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::OpenFailed(err) | Error::ClaimInterface(err) | Error::Usb(err) => Some(err),
            Error::File(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusb::Error> for Error {
    fn from(error: rusb::Error) -> Self {
        Error::Usb(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::File(error)
    }
}

/// Shorthand for a Result with the crate's own Error type.
pub type Result<T> = StdResult<T, Error>;
