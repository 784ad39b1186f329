use thiserror::Error;

/// Errors reported by [`List`](crate::List) and its adapters.
///
/// A failing operation never mutates the list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("list is empty: cannot {operation}")]
    EmptyContainer { operation: &'static str },
    #[error("position not found in the list")]
    PositionNotFound,
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("array size must be a positive integer")]
    InvalidSize,
    #[error("list of length {len} does not fit an array of size {capacity}")]
    LengthMismatch { capacity: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
