//! Capacity arithmetic for [`Buffer`](crate::Buffer).
//!
//! The buffer asks this module what to do whenever a write would exceed the
//! storage it already owns. Three outcomes are possible:
//!
//! - the request fits the current allocation and nothing moves;
//! - the request is small enough for the inline array embedded in the buffer;
//! - the request needs the heap, in which case a new size is picked from one of
//!   two regimes:
//!   - up to half a page, the request is doubled and rounded up to a cache
//!     line, keeping appends amortized O(1);
//!   - past that, the request grows by half of the current allocation and is
//!     rounded up to a whole page.
//!
//! Everything here is `const` so the thresholds can be checked at compile time
//! and tested without allocating.

use crate::error::CapacityError;

/// Size of the inline array embedded in every buffer.
pub const INLINE_CAPACITY: usize = 32;

/// Heap allocations in the small regime are rounded up to this many bytes.
pub const CACHE_LINE: usize = 64;

/// Heap allocations in the large regime are rounded up to this many bytes.
pub const PAGE_SIZE: usize = 4096;

/// Largest request still served by the doubling regime.
pub const SMALL_REGIME_LIMIT: usize = PAGE_SIZE / 2;

const MAX_ALLOCATION: usize = isize::MAX as usize;

// The doubling regime must always produce more than the inline array holds,
// otherwise a spill could land back in inline storage.
const _: () = assert!(INLINE_CAPACITY >= CACHE_LINE / 2);
const _: () = assert!(CACHE_LINE.is_power_of_two() && PAGE_SIZE.is_power_of_two());

/// Storage transition required to hold a requested number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    /// The current allocation already holds the request.
    Fits,
    /// Move into the inline array.
    Inline,
    /// Allocate this many bytes on the heap.
    Heap(usize),
}

/// Rounds `n` up to the next multiple of `align`, which must be a power of
/// two.
const fn round_up(n: usize, align: usize) -> Option<usize> {
    match n.checked_add(align - 1) {
        Some(n) => Some(n & !(align - 1)),
        None => None,
    }
}

/// Decides how storage of size `allocated` must change to hold `requested`
/// bytes.
pub(crate) const fn plan(requested: usize, allocated: usize) -> Result<Growth, CapacityError> {
    if allocated >= requested {
        return Ok(Growth::Fits);
    }
    if requested <= INLINE_CAPACITY {
        return Ok(Growth::Inline);
    }

    let target = if requested <= SMALL_REGIME_LIMIT {
        // `requested` is at most half a page here, doubling cannot overflow
        round_up(requested * 2, CACHE_LINE)
    } else {
        match requested.checked_add(allocated / 2) {
            Some(n) => round_up(n, PAGE_SIZE),
            None => None,
        }
    };

    match target {
        Some(size) if size <= MAX_ALLOCATION => Ok(Growth::Heap(size)),
        _ => Err(CapacityError::CapacityOverflow { requested }),
    }
}
