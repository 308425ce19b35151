//! Backing storage for [`Buffer`](crate::Buffer): nothing, a 32-byte inline
//! array, or a boxed heap slice.

use alloc::{boxed::Box, vec::Vec};

use crate::{error::CapacityError, growth::INLINE_CAPACITY};

/// Backing bytes of a [`Buffer`](crate::Buffer).
///
/// The active variant is implied by the allocated size: nothing before the
/// first write, the inline array up to [`INLINE_CAPACITY`] bytes, a boxed
/// slice beyond that.
#[derive(Clone)]
pub(crate) enum Storage {
    Unallocated,
    Inline([u8; INLINE_CAPACITY]),
    Heap(Box<[u8]>),
}

impl Storage {
    #[inline]
    pub(crate) fn allocated(&self) -> usize {
        match self {
            Storage::Unallocated => 0,
            Storage::Inline(bytes) => bytes.len(),
            Storage::Heap(bytes) => bytes.len(),
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Unallocated => &[],
            Storage::Inline(bytes) => bytes,
            Storage::Heap(bytes) => bytes,
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Unallocated => &mut [],
            Storage::Inline(bytes) => bytes,
            Storage::Heap(bytes) => bytes,
        }
    }

    /// Builds inline storage holding a copy of `live`.
    pub(crate) fn inline_from(live: &[u8]) -> Self {
        let mut bytes = [0; INLINE_CAPACITY];
        bytes[..live.len()].copy_from_slice(live);
        Storage::Inline(bytes)
    }

    /// Allocates `size` zeroed heap bytes and copies `live` to the front.
    pub(crate) fn heap_from(live: &[u8], size: usize) -> Result<Self, CapacityError> {
        debug_assert!(live.len() <= size);
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| CapacityError::AllocationFailed { size })?;
        bytes.extend_from_slice(live);
        bytes.resize(size, 0);
        Ok(Storage::Heap(bytes.into_boxed_slice()))
    }
}
