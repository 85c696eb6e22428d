use std::collections::TryReserveError;

/// The failure modes of [`List`] operations.
///
/// "Not found" results (an empty list, a value no node matches) are *not*
/// errors; they are reported as `None` by the operations concerned. `Error`
/// covers the cases where the caller broke an operation's contract or the
/// allocator refused to hand out node storage. Every error is returned
/// synchronously and leaves the list exactly as it was before the call.
///
/// [`List`]: crate::List
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A position argument fell outside the operation's valid range.
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// An output buffer is too small to receive every element.
    ///
    /// The capacity contract is checked before any element is copied, so
    /// the buffer is untouched when this is returned.
    #[error("buffer of capacity {capacity} cannot hold {required} elements")]
    CapacityTooSmall { required: usize, capacity: usize },

    /// Node or list storage could not be obtained.
    #[error("list storage allocation failed")]
    Alloc(#[from] TryReserveError),
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_messages() {
        let err = Error::OutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for list of length 3");

        let err = Error::CapacityTooSmall {
            required: 4,
            capacity: 2,
        };
        assert_eq!(err.to_string(), "buffer of capacity 2 cannot hold 4 elements");
    }
}
