use std::ffi::CStr;
use std::fmt;

use crate::precondition;

/// Largest length a span may have. Sizes travel as signed 32-bit values in
/// the C-shaped APIs that embed these views.
pub const MAX_SPAN_SIZE: usize = i32::MAX as usize;

/// A read-only byte range `[0, len)` over memory the span does not own.
///
/// Spans are cheap to copy and may alias each other freely. Equality
/// compares content, never addresses.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span<'a> {
    bytes: &'a [u8],
}

impl<'a> Span<'a> {
    /// The null span: no base and a length of zero.
    pub const fn empty() -> Self {
        Span { bytes: &[] }
    }

    /// Views the whole of `bytes`.
    #[track_caller]
    pub fn new(bytes: &'a [u8]) -> Self {
        precondition!(
            bytes.len() <= MAX_SPAN_SIZE,
            "span length {} exceeds {MAX_SPAN_SIZE}",
            bytes.len()
        );
        Span { bytes }
    }

    /// Builds a span from an optional base and a length.
    ///
    /// A missing base is only valid together with a length of zero, and the
    /// length may not run past the end of the base.
    #[track_caller]
    pub fn init(base: Option<&'a [u8]>, len: usize) -> Self {
        match base {
            None => {
                precondition!(len == 0, "span without a base must be empty, got length {len}");
                Span::empty()
            }
            Some(bytes) => {
                precondition!(
                    len <= bytes.len(),
                    "span length {len} runs past its base of {} bytes",
                    bytes.len()
                );
                Span::new(&bytes[..len])
            }
        }
    }

    /// Covers `bytes` up to, not including, the first NUL byte.
    ///
    /// Panics if there is no terminator.
    #[track_caller]
    pub fn from_nul_terminated(bytes: &'a [u8]) -> Self {
        let terminator = bytes.iter().position(|&b| b == 0);
        precondition!(terminator.is_some(), "text is not NUL-terminated");
        Span::new(&bytes[..terminator.unwrap_or_default()])
    }

    pub fn from_cstr(text: &'a CStr) -> Self {
        Span::new(text.to_bytes())
    }

    pub const fn len(self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn as_bytes(self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the sub-span `[start, end)`.
    ///
    /// # Panics
    /// Unless `start <= end <= self.len()`.
    #[track_caller]
    pub fn slice(self, start: usize, end: usize) -> Span<'a> {
        check_range(start, end, self.len());
        Span {
            bytes: &self.bytes[start..end],
        }
    }

    #[track_caller]
    pub fn slice_to_end(self, start: usize) -> Span<'a> {
        self.slice(start, self.len())
    }

    pub fn is_content_equal(self, other: Span<'_>) -> bool {
        self.bytes == other.bytes
    }

    /// Compares with ASCII letters folded to lowercase. Spans of different
    /// length are simply unequal.
    pub fn is_content_equal_ignoring_case(self, other: Span<'_>) -> bool {
        self.bytes.eq_ignore_ascii_case(other.bytes)
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Span::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Span<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Span::new(bytes)
    }
}

impl<'a> From<&'a str> for Span<'a> {
    fn from(text: &'a str) -> Self {
        Span::new(text.as_bytes())
    }
}

impl<'a> From<&'a CStr> for Span<'a> {
    fn from(text: &'a CStr) -> Self {
        Span::from_cstr(text)
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span(\"{}\")", self.bytes.escape_ascii())
    }
}

/// A writable byte range over memory the span does not own.
///
/// Writing operations consume the view and return the part they did not
/// touch, which keeps the borrow of the caller's buffer in one place.
#[derive(Default, PartialEq, Eq)]
pub struct SpanMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SpanMut<'a> {
    #[track_caller]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        precondition!(
            bytes.len() <= MAX_SPAN_SIZE,
            "span length {} exceeds {MAX_SPAN_SIZE}",
            bytes.len()
        );
        SpanMut { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_span(&self) -> Span<'_> {
        Span { bytes: &*self.bytes }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.bytes
    }

    pub fn into_bytes(self) -> &'a mut [u8] {
        self.bytes
    }

    /// A shorter-lived view over the same bytes, leaving `self` usable
    /// afterwards.
    pub fn reborrow(&mut self) -> SpanMut<'_> {
        SpanMut {
            bytes: &mut *self.bytes,
        }
    }

    /// Narrows the view to `[start, end)`.
    ///
    /// # Panics
    /// Unless `start <= end <= self.len()`.
    #[track_caller]
    pub fn slice(self, start: usize, end: usize) -> SpanMut<'a> {
        check_range(start, end, self.len());
        let bytes = self.bytes;
        SpanMut {
            bytes: &mut bytes[start..end],
        }
    }

    #[track_caller]
    pub fn slice_to_end(self, start: usize) -> SpanMut<'a> {
        let len = self.len();
        self.slice(start, len)
    }
}

impl<'a> From<&'a mut [u8]> for SpanMut<'a> {
    fn from(bytes: &'a mut [u8]) -> Self {
        SpanMut::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a mut [u8; N]> for SpanMut<'a> {
    fn from(bytes: &'a mut [u8; N]) -> Self {
        SpanMut::new(bytes)
    }
}

impl fmt::Debug for SpanMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpanMut(\"{}\")", self.bytes.escape_ascii())
    }
}

#[track_caller]
fn check_range(start: usize, end: usize, len: usize) {
    precondition!(
        start <= end && end <= len,
        "slice [{start}, {end}) out of bounds for span of length {len}"
    );
}
