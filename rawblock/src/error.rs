use thiserror::Error;

/// Error types for `RawBlock` allocation
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RawBlockError {
    /// The global allocator could not provide the requested block
    #[error("Allocation failed: could not obtain {bytes} bytes for {capacity} elements")]
    AllocFailed {
        /// Size of the failed request in bytes
        bytes: usize,
        /// Capacity that was requested, in elements
        capacity: usize,
    },
    /// The requested capacity does not fit in a single allocation
    #[error("Capacity overflow: cannot lay out {capacity} elements")]
    CapacityOverflow {
        /// Capacity that was requested, in elements
        capacity: usize,
    },
    /// Zero-sized element types have no meaningful storage block
    #[error("Zero-sized element types are not supported")]
    ZeroSizedType,
}
