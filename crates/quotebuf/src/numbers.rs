//! Integer and float formatting straight into a [`Buffer`].

use core::fmt::Write;

use crate::Buffer;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Enough for `u64::MAX` in base 2 plus a sign.
const MAX_DIGITS: usize = 65;

/// Notation used by [`Buffer::append_float`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFormat {
    /// The shortest decimal that reads back as the same value, without an
    /// exponent (`0.1`, `1`, `1000000`).
    #[default]
    Shortest,
    /// Decimal with exactly this many fractional digits (`1.23`).
    Fixed(usize),
    /// Scientific notation (`1.2345e3`), with this many fractional digits in
    /// the mantissa or as few as needed to round-trip.
    Exponent(Option<usize>),
}

/// Writes the digits of `v` in `radix` to the end of `out` and returns them.
#[allow(clippy::cast_possible_truncation)]
fn format_radix(mut v: u64, radix: u32, negative: bool, out: &mut [u8; MAX_DIGITS]) -> &[u8] {
    assert!(
        (2..=36).contains(&radix),
        "radix must be in 2..=36, got {radix}"
    );
    let radix = u64::from(radix);
    let mut pos = MAX_DIGITS;
    loop {
        pos -= 1;
        out[pos] = DIGITS[(v % radix) as usize];
        v /= radix;
        if v == 0 {
            break;
        }
    }
    if negative {
        pos -= 1;
        out[pos] = b'-';
    }
    &out[pos..]
}

impl Buffer {
    /// Appends `v` in base `radix`, with lowercase letters for digits above 9.
    ///
    /// ```
    /// use quotebuf::Buffer;
    ///
    /// let mut buf = Buffer::new();
    /// buf.append_int(-255, 16);
    /// assert_eq!(buf, "-ff");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    #[track_caller]
    pub fn append_int(&mut self, v: i64, radix: u32) {
        let mut digits = [0; MAX_DIGITS];
        self.write(format_radix(v.unsigned_abs(), radix, v < 0, &mut digits));
    }

    /// Appends `v` in base `radix`, with lowercase letters for digits above 9.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    #[track_caller]
    pub fn append_uint(&mut self, v: u64, radix: u32) {
        let mut digits = [0; MAX_DIGITS];
        self.write(format_radix(v, radix, false, &mut digits));
    }

    /// Appends `v` in the given notation. Non-finite values are written as
    /// `NaN`, `inf` and `-inf`.
    ///
    /// ```
    /// use quotebuf::{Buffer, FloatFormat};
    ///
    /// let mut buf = Buffer::new();
    /// buf.append_float(0.1, FloatFormat::Shortest);
    /// buf.write_byte(b' ');
    /// buf.append_float(1.23456, FloatFormat::Fixed(2));
    /// assert_eq!(buf, "0.1 1.23");
    /// ```
    pub fn append_float(&mut self, v: f64, format: FloatFormat) {
        let result = match format {
            FloatFormat::Shortest => write!(self, "{v}"),
            FloatFormat::Fixed(precision) => write!(self, "{v:.precision$}"),
            FloatFormat::Exponent(None) => write!(self, "{v:e}"),
            FloatFormat::Exponent(Some(precision)) => write!(self, "{v:.precision$e}"),
        };
        debug_assert!(result.is_ok());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 10, "0")]
    #[case(42, 10, "42")]
    #[case(-42, 10, "-42")]
    #[case(-255, 16, "-ff")]
    #[case(35, 36, "z")]
    #[case(5, 2, "101")]
    #[case(i64::MAX, 10, "9223372036854775807")]
    #[case(i64::MIN, 10, "-9223372036854775808")]
    fn ints(#[case] v: i64, #[case] radix: u32, #[case] expected: &str) {
        let mut buf = Buffer::new();
        buf.append_int(v, radix);
        assert_eq!(buf, expected);
    }

    #[test]
    fn extreme_binary_values_fit_the_digit_buffer() {
        let mut buf = Buffer::new();
        buf.append_int(i64::MIN, 2);
        assert_eq!(buf.len(), MAX_DIGITS);
        assert_eq!(buf.as_bytes()[0], b'-');
        assert_eq!(buf.as_bytes()[1], b'1');
        assert!(buf.as_bytes()[2..].iter().all(|&b| b == b'0'));

        buf.reset();
        buf.append_uint(u64::MAX, 2);
        assert_eq!(buf.len(), 64);
        assert!(buf.as_bytes().iter().all(|&b| b == b'1'));
    }

    #[test]
    fn uints_use_every_radix() {
        let mut buf = Buffer::new();
        for radix in 2..=36 {
            buf.reset();
            buf.append_uint(u64::from(radix) - 1, radix);
            let expected = char::from_digit(radix - 1, radix).unwrap();
            assert_eq!(buf.as_bytes(), [u8::try_from(expected).unwrap()]);
        }
    }

    #[test]
    #[should_panic(expected = "radix must be in 2..=36")]
    fn rejects_bad_radix() {
        Buffer::new().append_uint(1, 37);
    }

    #[rstest]
    #[case(0.1, FloatFormat::Shortest, "0.1")]
    #[case(1.0, FloatFormat::Shortest, "1")]
    #[case(-0.0, FloatFormat::Shortest, "-0")]
    #[case(1e21, FloatFormat::Shortest, "1000000000000000000000")]
    #[case(1.23456, FloatFormat::Fixed(2), "1.23")]
    #[case(2.7, FloatFormat::Fixed(0), "3")]
    #[case(1234.5, FloatFormat::Exponent(None), "1.2345e3")]
    #[case(1234.5, FloatFormat::Exponent(Some(2)), "1.23e3")]
    #[case(f64::NAN, FloatFormat::Shortest, "NaN")]
    #[case(f64::INFINITY, FloatFormat::Fixed(3), "inf")]
    #[case(f64::NEG_INFINITY, FloatFormat::Exponent(None), "-inf")]
    fn floats(#[case] v: f64, #[case] format: FloatFormat, #[case] expected: &str) {
        let mut buf = Buffer::new();
        buf.append_float(v, format);
        assert_eq!(buf, expected);
    }
}
