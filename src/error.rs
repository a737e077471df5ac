use std::collections::TryReserveError;

/// All failure modes of the codec.
///
/// Encoding failures are `AllocationFailure`, `InvalidInput` and
/// `RangeError`; decoding adds `InvalidSize` and `MalformedData`. Low-level
/// primitives never partially mutate state on failure, so any `Err` leaves
/// the involved buffers exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Buffer growth failed; propagated as-is, nothing partially written.
    #[error("buffer allocation failed")]
    AllocationFailure,
    /// Payload rejected: a byte outside the segment mode's character set,
    /// an unsupported mode, or data too long for the requested version.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A cursor/length contract was violated (programming error, not bad
    /// wire data).
    #[error("out of range: {0}")]
    RangeError(&'static str),
    /// Decode-side: the module bitmap dimensions do not describe any
    /// Model 2 symbol.
    #[error("invalid symbol size {0}")]
    InvalidSize(usize),
    /// Decode-side: the symbol's contents are inconsistent (format/version
    /// info fails its BCH check, or a decoded field overflows its range).
    #[error("malformed symbol data: {0}")]
    MalformedData(&'static str),
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
