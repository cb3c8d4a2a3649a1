use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RbTreeError {
    #[error("rb_tree length {len} + {additional} exceeds max_len {max_len}")]
    LengthExceeded { len: usize, additional: usize, max_len: usize },
    #[error("failed to allocate a tree node: {0}")]
    Alloc(#[from] TryReserveError),
}
