//! The growable byte buffer.
//!
//! A [`Buffer`] tracks three sizes:
//!
//! - the *allocated* size of its storage,
//! - the *window* reported by [`Buffer::cap`], which [`Buffer::resize`] may
//!   narrow below the allocation without giving memory back,
//! - the logical length of valid content at the front of the window.
//!
//! Every append first makes sure the window holds the new length, asking the
//! [`growth`](crate::growth) policy for a bigger storage when it does not, and
//! then copies straight into the storage.

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::BStr;
use log::trace;

use crate::{
    error::CapacityError,
    growth::{self, Growth, INLINE_CAPACITY},
    storage::Storage,
};

/// Extra room requested when a single byte does not fit, so byte-at-a-time
/// writers do not hit the growth policy on every call.
const BYTE_HEADROOM: usize = 8;

/// A growable byte accumulator with 32 bytes of inline storage.
///
/// Content is only ever appended at the end or truncated from the end. The
/// first [`INLINE_CAPACITY`](crate::growth::INLINE_CAPACITY) bytes live inside
/// the `Buffer` value itself; larger contents move to the heap.
///
/// # Examples
///
/// ```
/// use quotebuf::Buffer;
///
/// let mut buf = Buffer::new();
/// buf.write_str("{");
/// buf.write_quote("name", false);
/// buf.write_byte(b':');
/// buf.write_quote("Ada", false);
/// buf.write_str("}");
/// assert_eq!(buf.as_bytes(), br#"{"name":"Ada"}"#);
/// assert!(!buf.spilled());
/// ```
#[derive(Clone)]
pub struct Buffer {
    storage: Storage,
    window: usize,
    len: usize,
}

impl Buffer {
    /// Creates an empty buffer. Nothing is allocated until the first write.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: Storage::Unallocated,
            window: 0,
            len: 0,
        }
    }

    /// Number of valid bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no valid bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity.
    ///
    /// This is the size of the writable window, which is the whole storage
    /// unless [`resize`](Self::resize) narrowed it.
    #[inline]
    #[must_use]
    pub fn cap(&self) -> usize {
        self.window
    }

    /// Returns `true` once the content has moved from the inline array to
    /// the heap.
    #[inline]
    #[must_use]
    pub fn spilled(&self) -> bool {
        matches!(self.storage, Storage::Heap(_))
    }

    /// The valid bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_slice()[..self.len]
    }

    /// The valid bytes as a byte string, convenient for display and
    /// debugging of content that may not be UTF-8.
    #[inline]
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// Copies the valid bytes into a `String`, replacing invalid UTF-8 with
    /// `U+FFFD`.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    /// Copies the valid bytes into a `Vec`.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Forgets all content. The storage is kept and the window reopened to
    /// the full allocation.
    pub fn reset(&mut self) {
        self.len = 0;
        self.window = self.storage.allocated();
    }

    /// Drops the last `n` bytes. Trimming more than [`len`](Self::len) leaves
    /// the buffer empty.
    pub fn trim(&mut self, n: usize) {
        self.len = self.len.saturating_sub(n);
    }

    /// Sets the capacity window to at least `n` bytes.
    ///
    /// When the storage already holds `n` bytes the window becomes exactly
    /// `n` and the length is clamped to it. Otherwise the storage grows
    /// following the growth policy and every valid byte is carried over.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` or the allocation
    /// fails. See [`try_resize`](Self::try_resize).
    #[track_caller]
    pub fn resize(&mut self, n: usize) {
        if let Err(err) = self.try_resize(n) {
            capacity_panic(err);
        }
    }

    /// Fallible version of [`resize`](Self::resize). The buffer is unchanged
    /// when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the new capacity overflows or cannot be
    /// allocated.
    pub fn try_resize(&mut self, n: usize) -> Result<(), CapacityError> {
        let allocated = self.storage.allocated();
        match growth::plan(n, allocated)? {
            Growth::Fits => {
                self.window = n;
                self.len = self.len.min(n);
            }
            Growth::Inline => {
                trace!("buffer moving to inline storage for {n} bytes");
                self.storage = Storage::inline_from(self.as_bytes());
                self.window = INLINE_CAPACITY;
            }
            Growth::Heap(size) => {
                trace!("buffer growing from {allocated} to {size} bytes for {n} bytes");
                self.storage = Storage::heap_from(self.as_bytes(), size)?;
                self.window = size;
            }
        }
        Ok(())
    }

    /// Appends `n` bytes and hands them back for the caller to fill in.
    ///
    /// The returned range is borrowed from the buffer, so it cannot outlive
    /// the next mutation, which may move the storage. Its initial content is
    /// unspecified.
    ///
    /// ```
    /// use quotebuf::Buffer;
    ///
    /// let mut buf = Buffer::new();
    /// buf.write_str("id=");
    /// buf.reserve(4).copy_from_slice(b"0042");
    /// assert_eq!(buf.as_bytes(), b"id=0042");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the new length overflows `isize::MAX` or the allocation
    /// fails. See [`try_reserve`](Self::try_reserve).
    #[track_caller]
    pub fn reserve(&mut self, n: usize) -> &mut [u8] {
        match self.try_reserve(n) {
            Ok(range) => range,
            Err(err) => capacity_panic(err),
        }
    }

    /// Fallible version of [`reserve`](Self::reserve). The buffer is
    /// unchanged when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the new length overflows or cannot be
    /// allocated.
    pub fn try_reserve(&mut self, n: usize) -> Result<&mut [u8], CapacityError> {
        let start = self.len;
        let end = start
            .checked_add(n)
            .ok_or(CapacityError::CapacityOverflow { requested: n })?;
        if end > self.window {
            self.try_resize(end)?;
        }
        self.len = end;
        Ok(&mut self.storage.as_mut_slice()[start..end])
    }

    /// Appends one byte.
    #[inline]
    pub fn write_byte(&mut self, c: u8) {
        if self.len >= self.window {
            self.resize(self.len + BYTE_HEADROOM);
        }
        self.storage.as_mut_slice()[self.len] = c;
        self.len += 1;
    }

    /// Appends `bytes`, returning how many were written (always all of
    /// them).
    #[inline]
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        self.reserve(bytes.len()).copy_from_slice(bytes);
        bytes.len()
    }

    /// Appends the UTF-8 bytes of `s`, returning how many were written
    /// (always all of them).
    #[inline]
    pub fn write_str(&mut self, s: &str) -> usize {
        self.write(s.as_bytes())
    }
}

#[cold]
#[track_caller]
fn capacity_panic(err: CapacityError) -> ! {
    panic!("{err}")
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("bytes", &self.as_bstr())
            .field("len", &self.len)
            .field("cap", &self.window)
            .finish()
    }
}

/// Shows the content as text, with invalid UTF-8 replaced by `U+FFFD`.
impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Buffer::write_str(self, s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        let mut utf8 = [0; 4];
        Buffer::write_str(self, c.encode_utf8(&mut utf8));
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(Buffer::write(self, buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        Buffer::write(self, buf);
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Buffer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_bytes())
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Extend<u8> for Buffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for c in iter {
            self.write_byte(c);
        }
    }
}

impl<'a> Extend<&'a u8> for Buffer {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buf: Buffer) -> Self {
        buf.into_vec()
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Buffer {}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for Buffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for Buffer {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Buffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
