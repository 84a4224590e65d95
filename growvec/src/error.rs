use thiserror::Error;

/// Error types for `GrowVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// The storage layer could not provide a new block; the vector is
    /// unchanged
    #[error(transparent)]
    Storage(#[from] rawblock::RawBlockError),
    /// A position argument fell outside the valid range for the operation
    #[error("Index out of bounds: index {index} is beyond vector length {length}")]
    IndexOutOfBounds {
        /// Index that was passed
        index: usize,
        /// Current length of the vector
        length: usize,
    },
    /// The operation requires at least one element
    #[error("Operation on an empty vector")]
    EmptyVector,
}
