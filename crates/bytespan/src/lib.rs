//! # bytespan
//!
//! Bounded, non-owning views over byte buffers and the small algorithm
//! library built on top of them.
//!
//! ## The Two Views
//!
//! A [`Span`] is a read-only window `&[u8]` over memory owned by the caller.
//! It is `Copy`, so it is passed around by value the way a pointer/length
//! pair would be. A [`SpanMut`] is the writable counterpart over `&mut [u8]`.
//! Mutating operations consume a `SpanMut` and hand back the part of the
//! destination they did not write, so appends chain naturally:
//!
//! ```
//! use bytespan::{Span, SpanMut};
//!
//! let mut buffer = [0u8; 16];
//! let remainder = SpanMut::new(&mut buffer)
//!     .copy(Span::from("key"))
//!     .copy_u8(b'=');
//! let remainder = bytespan::u32toa(remainder, 42).unwrap();
//! let used = 16 - remainder.len();
//! assert_eq!(&buffer[..used], b"key=42");
//! ```
//!
//! The library never allocates, never performs I/O and never keeps a view
//! past the call that received it.
//!
//! ## Contracts vs Errors
//!
//! There are two failure channels and they are kept apart:
//!
//! - **Contract failures** are caller bugs: slicing past the end, a base of
//!   `None` with a non-zero length, an empty delimiter. They always panic
//!   (see [`contract`]), in release builds too.
//! - **Recoverable errors** come from input data: a number that does not
//!   parse, a destination that is too small, replace indices from an
//!   untrusted source. They are returned as [`SpanError`].
//!
//! ## Module Structure
//!
//! ```text
//! bytespan/
//! ├── lib.rs        # This file - public API re-exports
//! ├── contract.rs   # precondition! macro, the fatal channel
//! ├── error.rs      # SpanError, the recoverable channel
//! ├── span.rs       # Span / SpanMut construction, slicing, equality
//! ├── search.rs     # find, expect_literal, scan_until
//! ├── copy.rs       # copy, copy_u8, copy_within, to_cstr, replace
//! ├── writer.rs     # SpanWriter check-then-write builder
//! ├── number/
//! │   ├── parse.rs  # atou32 / atou64 / atoi32 / atoi64 / atod
//! │   └── format.rs # u32toa / u64toa / i32toa / i64toa / dtoa
//! └── text.rs       # trimming, token, tokens, url_encode
//! ```

#![forbid(unsafe_code)]

pub mod contract;
pub mod copy;
pub mod error;
pub mod number;
pub mod search;
pub mod span;
pub mod text;
pub mod writer;

pub use copy::{replace, to_cstr};
pub use error::{Result, SpanError};
pub use number::{
    MAX_SAFE_INTEGER, MAX_SUPPORTED_FRACTIONAL_DIGITS, atod, atoi32, atoi64, atou32, atou64, dtoa,
    i32toa, i64toa, u32toa, u64toa,
};
pub use search::{expect_literal, find, find_index, scan_until};
pub use span::{MAX_SPAN_SIZE, Span, SpanMut};
pub use text::{Tokens, token, tokens, url_encode};
pub use writer::SpanWriter;
