use thiserror::Error;

/// Reasons a capacity request cannot be satisfied.
///
/// Only the fallible entry points ([`Buffer::try_reserve`] and
/// [`Buffer::try_resize`]) return this; every other operation treats it as a
/// programmer error and panics before touching the buffer.
///
/// [`Buffer::try_reserve`]: crate::Buffer::try_reserve
/// [`Buffer::try_resize`]: crate::Buffer::try_resize
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// The requested size, or the capacity derived from it, does not fit in
    /// `isize::MAX` bytes.
    #[error("capacity overflow: {requested} bytes requested")]
    CapacityOverflow {
        /// Logical size the caller asked for.
        requested: usize,
    },
    /// The allocator refused a request for `size` bytes.
    #[error("memory allocation of {size} bytes failed")]
    AllocationFailed {
        /// Size of the rejected allocation.
        size: usize,
    },
}
