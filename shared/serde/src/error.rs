use thiserror::Error;

/// Returned whenever a read runs past the end of the buffer or decodes a value
/// that cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to deserialize value from bit stream")]
pub struct SerdeErr;
