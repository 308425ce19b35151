//! A growable byte buffer for building serialized output.
//!
//! [`Buffer`] is an append-only byte accumulator tuned for encoders that build
//! one record at a time: the first 32 bytes live inline, larger contents grow
//! on the heap in cache-line and then page sized steps (see [`growth`]), and
//! [`Buffer::write_quote`] writes escaped JSON string literals without going
//! through intermediate strings.
//!
//! ```rust
//! use quotebuf::{Buffer, FloatFormat};
//!
//! let mut buf = Buffer::new();
//! buf.write_str("{");
//! buf.write_quote("path", false);
//! buf.write_str(":");
//! buf.write_quote("/tmp/naïve", true);
//! buf.write_str(",");
//! buf.write_quote("size", false);
//! buf.write_str(":");
//! buf.append_float(1.5, FloatFormat::Shortest);
//! buf.write_str("}");
//!
//! assert_eq!(buf, r#"{"path":"\/tmp\/na\u00efve","size":1.5}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod error;
pub mod growth;
mod numbers;
mod quote;
mod storage;

#[cfg(test)]
mod tests;

pub use buffer::Buffer;
pub use error::CapacityError;
pub use numbers::FloatFormat;
#[cfg(feature = "fuzzing")]
pub use quote::reference_quote;
