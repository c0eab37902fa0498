use std::fmt;
use std::io;

/// Errors surfaced by the mosaic host
#[derive(Debug)]
pub enum MosaicError {
    /// Terminal or file I/O failed
    Io(io::Error),
    /// Snapshot could not be encoded
    Encode(png::EncodingError),
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Encode(err) => write!(f, "PNG encoding error: {err}"),
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<io::Error> for MosaicError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<png::EncodingError> for MosaicError {
    fn from(err: png::EncodingError) -> Self {
        Self::Encode(err)
    }
}
