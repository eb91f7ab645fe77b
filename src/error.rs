use thiserror::Error;

/// Errors surfaced by the public scheme operations. Statistical failures
/// (singular scramblers, unreachable syndromes) are handled internally and
/// never reach this type.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("bit vector has length {found}, expected {expected}")]
    InvalidLength { expected: usize, found: usize },
    #[error("parameter out of range: {0}")]
    InvalidParameter(String),
}
