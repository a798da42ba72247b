//! Writing into caller-owned buffers.
//!
//! `Span` sources and `SpanMut` destinations can never overlap (the borrow
//! checker sees to that), so moves inside one buffer go through
//! [`SpanMut::copy_within`], which behaves like `memmove`.

use std::ops::Range;

use crate::{Result, Span, SpanError, SpanMut, precondition};

impl<'a> SpanMut<'a> {
    /// Copies `source` to the front of this span and returns the unwritten
    /// remainder.
    ///
    /// The destination is meant to be at least as long as `source`. When it
    /// is not, the copy is cut short at the end of the destination instead of
    /// failing.
    pub fn copy(self, source: Span<'_>) -> SpanMut<'a> {
        if source.is_empty() {
            return self;
        }
        let count = source.len().min(self.len());
        let bytes = self.into_bytes();
        bytes[..count].copy_from_slice(&source.as_bytes()[..count]);
        SpanMut::new(&mut bytes[count..])
    }

    /// Writes one byte and returns the remainder. An empty destination is
    /// returned untouched.
    pub fn copy_u8(self, byte: u8) -> SpanMut<'a> {
        if self.is_empty() {
            return self;
        }
        let bytes = self.into_bytes();
        bytes[0] = byte;
        SpanMut::new(&mut bytes[1..])
    }

    /// Moves the bytes in `source` so they start at `destination`, correctly
    /// for overlapping ranges. Bytes that would land past the end are dropped.
    ///
    /// Returns how many bytes were moved.
    ///
    /// # Panics
    /// If `source` is not within the span or `destination > self.len()`.
    #[track_caller]
    pub fn copy_within(&mut self, source: Range<usize>, destination: usize) -> usize {
        let len = self.len();
        precondition!(
            source.start <= source.end && source.end <= len,
            "copy source {source:?} out of bounds for span of length {len}"
        );
        precondition!(
            destination <= len,
            "copy destination {destination} out of bounds for span of length {len}"
        );
        let count = source.len().min(len - destination);
        self.as_bytes_mut()
            .copy_within(source.start..source.start + count, destination);
        count
    }
}

/// Copies `source` into `destination` as a NUL-terminated string.
///
/// At most `destination.len() - 1` content bytes are written so the
/// terminator always fits. Returns the number of content bytes.
///
/// # Panics
/// If `destination` is empty.
#[track_caller]
pub fn to_cstr(destination: SpanMut<'_>, source: Span<'_>) -> usize {
    precondition!(
        !destination.is_empty(),
        "C string destination must hold at least the terminator"
    );
    let count = source.len().min(destination.len() - 1);
    destination.copy(source.slice(0, count)).copy_u8(0);
    count
}

/// Replaces `[start, end)` of the first `current_size` bytes of
/// `destination` with `replacement`, shifting what follows.
///
/// The indices usually come from outside, so bad ones are an
/// [`SpanError::ArgumentError`] rather than a panic. The result must fit in
/// `destination`; bytes past the new logical size are left as they were.
pub fn replace(
    destination: SpanMut<'_>,
    current_size: usize,
    start: usize,
    end: usize,
    replacement: Span<'_>,
) -> Result<()> {
    let capacity = destination.len();
    if start > end || end > current_size || current_size > capacity {
        log::debug!(
            "replace: range [{start}, {end}) invalid for content of {current_size} bytes in {capacity}"
        );
        return Err(SpanError::ArgumentError);
    }

    let replaced_size = end - start;
    let size_after_replace = current_size - replaced_size + replacement.len();
    if size_after_replace > capacity {
        log::debug!("replace: result of {size_after_replace} bytes exceeds capacity {capacity}");
        return Err(SpanError::ArgumentError);
    }

    // Appending at the end: nothing to shift.
    if start == current_size {
        destination.slice_to_end(start).copy(replacement);
        return Ok(());
    }
    // Replacing everything: nothing to keep.
    if replaced_size == current_size {
        destination.copy(replacement);
        return Ok(());
    }

    // The tail has to reach its new place before the replacement is written
    // over the bytes it used to occupy.
    let mut destination = destination;
    destination.copy_within(end..current_size, start + replacement.len());
    destination.slice_to_end(start).copy(replacement);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn copy_returns_remainder() {
        let mut buffer = [b'.'; 8];
        let rest = SpanMut::new(&mut buffer).copy(Span::from("abc"));
        assert_eq!(rest.len(), 5);
        assert_eq!(&buffer, b"abc.....");
    }

    #[test]
    fn copy_exact_fit_leaves_empty_remainder() {
        let mut buffer = [0u8; 3];
        let rest = SpanMut::new(&mut buffer).copy(Span::from("xyz"));
        assert!(rest.is_empty());
        assert_eq!(&buffer, b"xyz");
    }

    #[test]
    fn copy_caps_at_destination_length() {
        let mut buffer = [0u8; 2];
        let rest = SpanMut::new(&mut buffer).copy(Span::from("xyz"));
        assert!(rest.is_empty());
        assert_eq!(&buffer, b"xy");
    }

    #[test]
    fn copy_empty_source_is_noop() {
        let mut buffer = [7u8; 2];
        let rest = SpanMut::new(&mut buffer).copy(Span::empty());
        assert_eq!(rest.len(), 2);
        assert_eq!(buffer, [7, 7]);
    }

    #[test]
    fn copy_into_empty_destination() {
        let rest = SpanMut::default().copy(Span::from("abc"));
        assert!(rest.is_empty());
    }

    #[test]
    fn copy_u8_chains() {
        let mut buffer = [0u8; 3];
        let rest = SpanMut::new(&mut buffer)
            .copy_u8(b'a')
            .copy_u8(b'b')
            .copy_u8(b'c')
            .copy_u8(b'd');
        assert!(rest.is_empty());
        assert_eq!(&buffer, b"abc");
    }

    #[rstest]
    #[case(0..4, 2, "ababcdgh")]
    #[case(2..6, 0, "cdefefgh")]
    #[case(0..8, 3, "abcabcde")]
    #[case(3..3, 0, "abcdefgh")]
    #[case(1..2, 8, "abcdefgh")]
    fn copy_within_handles_overlap(
        #[case] source: Range<usize>,
        #[case] destination: usize,
        #[case] expected: &str,
    ) {
        let mut buffer = *b"abcdefgh";
        SpanMut::new(&mut buffer).copy_within(source, destination);
        assert_eq!(std::str::from_utf8(&buffer).unwrap(), expected);
    }

    #[test]
    fn copy_within_reports_moved_count() {
        let mut buffer = *b"abcdefgh";
        assert_eq!(SpanMut::new(&mut buffer).copy_within(0..8, 3), 5);
    }

    #[test]
    #[should_panic(expected = "copy source")]
    fn copy_within_rejects_source_out_of_bounds() {
        let mut buffer = [0u8; 4];
        SpanMut::new(&mut buffer).copy_within(2..5, 0);
    }

    #[test]
    #[should_panic(expected = "copy destination")]
    fn copy_within_rejects_destination_out_of_bounds() {
        let mut buffer = [0u8; 4];
        SpanMut::new(&mut buffer).copy_within(0..1, 5);
    }

    #[rstest]
    #[case(8, "hello", "hello\0", 5)]
    #[case(6, "hello", "hello\0", 5)]
    #[case(4, "hello", "hel\0", 3)]
    #[case(1, "hello", "\0", 0)]
    #[case(3, "", "\0", 0)]
    fn to_cstr_truncates_and_terminates(
        #[case] max_size: usize,
        #[case] source: &str,
        #[case] expected: &str,
        #[case] written: usize,
    ) {
        let mut buffer = vec![b'#'; max_size];
        let count = to_cstr(SpanMut::new(&mut buffer), Span::from(source));
        assert_eq!(count, written);
        assert_eq!(&buffer[..expected.len()], expected.as_bytes());
        assert!(buffer[expected.len()..].iter().all(|&b| b == b'#'));
    }

    #[test]
    #[should_panic(expected = "at least the terminator")]
    fn to_cstr_rejects_empty_destination() {
        to_cstr(SpanMut::default(), Span::from("x"));
    }

    fn replaced(
        content: &str,
        capacity: usize,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> Result<String> {
        let mut buffer = vec![0u8; capacity];
        buffer[..content.len()].copy_from_slice(content.as_bytes());
        replace(
            SpanMut::new(&mut buffer),
            content.len(),
            start,
            end,
            Span::from(replacement),
        )?;
        let new_size = content.len() - (end - start) + replacement.len();
        Ok(String::from_utf8(buffer[..new_size].to_vec()).unwrap())
    }

    #[rstest]
    #[case("hello world", 20, 6, 11, "there!", "hello there!")]
    #[case("hello world", 20, 0, 5, "goodbye", "goodbye world")]
    #[case("hello world", 11, 0, 5, "howdy", "howdy world")]
    #[case("hello world", 20, 0, 5, "yo", "yo world")]
    #[case("hello world", 20, 5, 5, ",", "hello, world")]
    #[case("hello world", 20, 11, 11, "!", "hello world!")]
    #[case("hello world", 20, 0, 11, "bye", "bye")]
    #[case("hello world", 11, 5, 11, "", "hello")]
    #[case("abc", 3, 0, 3, "xyz", "xyz")]
    #[case("", 4, 0, 0, "abcd", "abcd")]
    #[case("abcdef", 6, 1, 5, "", "af")]
    fn replace_shifts_tail(
        #[case] content: &str,
        #[case] capacity: usize,
        #[case] start: usize,
        #[case] end: usize,
        #[case] replacement: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            replaced(content, capacity, start, end, replacement).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("hello", 10, 3, 2, "x")]
    #[case("hello", 10, 0, 6, "x")]
    #[case("hello", 10, 6, 6, "x")]
    #[case("hello", 5, 5, 5, "!")]
    #[case("hello", 6, 0, 1, "abc")]
    fn replace_rejects_bad_arguments(
        #[case] content: &str,
        #[case] capacity: usize,
        #[case] start: usize,
        #[case] end: usize,
        #[case] replacement: &str,
    ) {
        let mut buffer = vec![0u8; capacity.max(content.len())];
        buffer[..content.len()].copy_from_slice(content.as_bytes());
        let result = replace(
            SpanMut::new(&mut buffer[..capacity]),
            content.len(),
            start,
            end,
            Span::from(replacement),
        );
        assert_eq!(result, Err(SpanError::ArgumentError));
        assert_eq!(&buffer[..content.len()], content.as_bytes());
    }

    #[test]
    fn replace_rejects_size_beyond_capacity() {
        let mut buffer = [0u8; 4];
        let result = replace(SpanMut::new(&mut buffer), 5, 0, 0, Span::empty());
        assert_eq!(result, Err(SpanError::ArgumentError));
    }
}
