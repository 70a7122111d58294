//! Input model error types

use thiserror::Error;

/// Errors produced while decoding raw platform codes into the typed
/// event model. Classification and routing themselves never fail; the
/// only fallible boundary is the raw-integer decode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// The platform reported a pointer action code we do not model
    #[error("unknown pointer action code: {0}")]
    UnknownAction(u32),

    /// The platform reported a source bitmask with no recognized class
    #[error("unknown input source class: {0:#x}")]
    UnknownSource(u32),
}

/// Result type for event decoding
pub type Result<T> = std::result::Result<T, EventError>;
