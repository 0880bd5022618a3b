//! Store error types

use super::codec::CodecError;
use crate::platform::PlatformError;
use core::fmt;

/// Errors from store persistence operations
///
/// Only `apply` and `clear(true)` report errors. `begin` absorbs every
/// failure and reports it through `BeginOutcome` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Storage device failed
    Platform(PlatformError),
    /// Encoded document does not fit the storage region
    CapacityExceeded {
        /// Encoded size in bytes
        required: usize,
        /// Region size in bytes
        capacity: usize,
    },
    /// Document could not be encoded
    Codec(CodecError),
    /// Encoded document contains a null byte, which would end it early
    EmbeddedNul,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Platform(e) => write!(f, "storage error: {}", e),
            StoreError::CapacityExceeded { required, capacity } => write!(
                f,
                "document needs {} bytes, region holds {}",
                required, capacity
            ),
            StoreError::Codec(e) => write!(f, "codec error: {}", e),
            StoreError::EmbeddedNul => write!(f, "encoded document contains a null byte"),
        }
    }
}

impl From<PlatformError> for StoreError {
    fn from(error: PlatformError) -> Self {
        StoreError::Platform(error)
    }
}

impl From<CodecError> for StoreError {
    fn from(error: CodecError) -> Self {
        StoreError::Codec(error)
    }
}
