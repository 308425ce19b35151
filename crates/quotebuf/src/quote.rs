//! JSON string quoting.
//!
//! [`Buffer::write_quote`] copies a string between double quotes, replacing
//! the characters JSON cannot carry verbatim with backslash escapes:
//!
//! | input | output |
//! |-------|--------|
//! | `"`   | `\"`   |
//! | `\`   | `\\`   |
//! | `/`   | `\/`   |
//! | U+0008 | `\b`  |
//! | U+000C | `\f`  |
//! | U+000A | `\n`  |
//! | U+000D | `\r`  |
//! | U+0009 | `\t`  |
//!
//! Escaping `/` is not required by JSON but keeps the output safe to embed in
//! HTML `<script>` blocks. Other ASCII bytes, including the remaining control
//! characters, are copied as-is.
//!
//! With `unicode` set, every non-ASCII character becomes a `\uXXXX` escape in
//! lowercase hex, and characters outside the Basic Multilingual Plane become a
//! surrogate pair of two escapes, so the output is pure ASCII.
//!
//! Unescaped characters are copied in runs: the encoder remembers where the
//! current run started and copies it in one go right before the next escape,
//! in the same reservation as the escape itself.

use crate::Buffer;

/// Marker for ASCII bytes that are copied unchanged.
const NO_ESCAPE: u8 = 0;

/// For each ASCII byte, the character following the backslash in its escape,
/// or [`NO_ESCAPE`].
static ESCAPES: [u8; 128] = {
    let mut table = [NO_ESCAPE; 128];
    table[b'"' as usize] = b'"';
    table[b'\\' as usize] = b'\\';
    table[b'/' as usize] = b'/';
    table[0x08] = b'b';
    table[0x0c] = b'f';
    table[b'\n' as usize] = b'n';
    table[b'\r' as usize] = b'r';
    table[b'\t' as usize] = b't';
    table
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Length of one `\uXXXX` escape.
const UNICODE_ESCAPE_LEN: usize = 6;

/// Writes `\uXXXX` for one UTF-16 code unit into `dst`, which must be six
/// bytes long.
#[inline]
fn put_unicode_escape(dst: &mut [u8], unit: u16) {
    let unit = usize::from(unit);
    dst.copy_from_slice(&[
        b'\\',
        b'u',
        HEX_DIGITS[(unit >> 12) & 0xf],
        HEX_DIGITS[(unit >> 8) & 0xf],
        HEX_DIGITS[(unit >> 4) & 0xf],
        HEX_DIGITS[unit & 0xf],
    ]);
}

impl Buffer {
    /// Appends `s` as a quoted JSON string.
    ///
    /// When `unicode` is `false`, non-ASCII characters are copied as UTF-8;
    /// when `true`, they are written as `\uXXXX` escapes. Characters above
    /// U+FFFF become a UTF-16 surrogate pair of two escapes rather than a
    /// single escape of their low 16 bits.
    ///
    /// ```
    /// use quotebuf::Buffer;
    ///
    /// let mut buf = Buffer::new();
    /// buf.write_quote("a\nb", false);
    /// assert_eq!(buf, r#""a\nb""#);
    ///
    /// buf.reset();
    /// buf.write_quote("你好", true);
    /// assert_eq!(buf, r#""\u4f60\u597d""#);
    /// ```
    pub fn write_quote(&mut self, s: &str, unicode: bool) {
        let bytes = s.as_bytes();
        self.write_byte(b'"');

        let mut run = 0;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b.is_ascii() {
                let escape = ESCAPES[usize::from(b)];
                if escape != NO_ESCAPE {
                    self.write_run_and_escape(&bytes[run..i], escape);
                    run = i + 1;
                }
                i += 1;
            } else if unicode {
                // only full characters or ASCII bytes are skipped in this
                // mode, so `i` sits on a character boundary
                let Some(c) = s[i..].chars().next() else {
                    break;
                };
                self.write_run_and_unicode_escape(&bytes[run..i], c);
                i += c.len_utf8();
                run = i;
            } else {
                i += 1;
            }
        }

        let tail = &bytes[run..];
        let dst = self.reserve(tail.len() + 1);
        dst[..tail.len()].copy_from_slice(tail);
        dst[tail.len()] = b'"';
    }

    /// Copies the pending literal run followed by `\<escape>`.
    #[inline]
    fn write_run_and_escape(&mut self, run: &[u8], escape: u8) {
        let dst = self.reserve(run.len() + 2);
        let (literal, seq) = dst.split_at_mut(run.len());
        literal.copy_from_slice(run);
        seq[0] = b'\\';
        seq[1] = escape;
    }

    /// Copies the pending literal run followed by the `\uXXXX` escape(s) of
    /// `c`.
    fn write_run_and_unicode_escape(&mut self, run: &[u8], c: char) {
        let mut units = [0; 2];
        let units = c.encode_utf16(&mut units);
        let dst = self.reserve(run.len() + units.len() * UNICODE_ESCAPE_LEN);
        let (literal, seq) = dst.split_at_mut(run.len());
        literal.copy_from_slice(run);
        for (escape, &unit) in seq.chunks_exact_mut(UNICODE_ESCAPE_LEN).zip(units.iter()) {
            put_unicode_escape(escape, unit);
        }
    }
}

/// Character-at-a-time quoting with the same rules as
/// [`Buffer::write_quote`], kept as an oracle for tests and fuzzing.
#[cfg(any(test, feature = "fuzzing"))]
#[doc(hidden)]
#[must_use]
pub fn reference_quote(s: &str, unicode: bool) -> alloc::string::String {
    use alloc::string::String;
    use core::fmt::Write;

    let mut out = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if unicode && !c.is_ascii() => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
