use thiserror::Error;

/// Error types for list operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ListError {
    /// A position argument fell outside the valid range for the operation
    #[error("Index out of bounds: index {index} is beyond list length {length}")]
    IndexOutOfBounds {
        /// Index that was passed
        index: usize,
        /// Current length of the list
        length: usize,
    },
    /// The operation requires at least one element
    #[error("Operation on an empty list")]
    EmptyList,
}
