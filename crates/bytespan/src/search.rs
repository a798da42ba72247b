use crate::{Result, Span, SpanError};

/// Returns the offset of the first occurrence of `target` in `source`.
///
/// Brute force, O(|source| * |target|) with no auxiliary memory. An empty
/// `target` matches at offset 0 and a `target` longer than `source` is never
/// found.
pub fn find(source: Span<'_>, target: Span<'_>) -> Option<usize> {
    let (source, target) = (source.as_bytes(), target.as_bytes());
    if target.is_empty() {
        return Some(0);
    }
    if source.len() < target.len() {
        return None;
    }
    source
        .windows(target.len())
        .position(|window| window == target)
}

/// [`find`] with the conventional `-1` for "not found".
pub fn find_index(source: Span<'_>, target: Span<'_>) -> i32 {
    // Spans never exceed i32::MAX, so the offset always fits.
    find(source, target).map_or(-1, |offset| offset as i32)
}

/// Consumes `expected` from the front of `span`.
///
/// `span` only moves when the whole literal matched.
pub fn expect_literal(span: &mut Span<'_>, expected: Span<'_>) -> Result<()> {
    if expected.len() > span.len() {
        return Err(SpanError::EndOfInput);
    }
    if !span.slice(0, expected.len()).is_content_equal(expected) {
        return Err(SpanError::UnexpectedCharacter);
    }
    *span = span.slice_to_end(expected.len());
    Ok(())
}

/// Offers every suffix of `span` to `predicate`, front to back, and returns
/// the index of the first one it accepts.
///
/// An error from the predicate stops the scan and is returned unchanged.
pub fn scan_until<'a, F>(span: Span<'a>, mut predicate: F) -> Result<usize>
where
    F: FnMut(Span<'a>) -> Result<bool>,
{
    for index in 0..span.len() {
        if predicate(span.slice_to_end(index))? {
            return Ok(index);
        }
    }
    Err(SpanError::ItemNotFound)
}

impl Span<'_> {
    pub fn find(self, target: Span<'_>) -> Option<usize> {
        find(self, target)
    }
}
