use crate::{Result, Span, SpanError, SpanMut, find, precondition};

/// Space, tab, line feed and carriage return. Nothing else counts.
fn is_white_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

impl<'a> Span<'a> {
    pub fn trim_white_space(self) -> Span<'a> {
        self.trim_white_space_start().trim_white_space_end()
    }

    pub fn trim_white_space_start(self) -> Span<'a> {
        let start = self
            .as_bytes()
            .iter()
            .position(|&b| !is_white_space(b))
            .unwrap_or(self.len());
        self.slice_to_end(start)
    }

    pub fn trim_white_space_end(self) -> Span<'a> {
        let end = self
            .as_bytes()
            .iter()
            .rposition(|&b| !is_white_space(b))
            .map_or(0, |last| last + 1);
        self.slice(0, end)
    }
}

/// Splits `source` at the first `delimiter`.
///
/// Returns the bytes before the delimiter and stores the bytes after it in
/// `remainder`. Without a delimiter the whole of `source` is returned and
/// `remainder` becomes empty. An empty `source` returns an empty span and
/// leaves `remainder` alone.
///
/// # Panics
/// If `delimiter` is empty.
#[track_caller]
pub fn token<'a>(source: Span<'a>, delimiter: Span<'_>, remainder: &mut Span<'a>) -> Span<'a> {
    precondition!(!delimiter.is_empty(), "token delimiter must not be empty");
    if source.is_empty() {
        return Span::empty();
    }
    match find(source, delimiter) {
        Some(index) => {
            *remainder = source.slice_to_end(index + delimiter.len());
            source.slice(0, index)
        }
        None => {
            *remainder = Span::empty();
            source
        }
    }
}

/// Iterator over the pieces of `source` between `delimiter`s.
///
/// Empty pieces between adjacent delimiters are yielded; iteration stops
/// once nothing is left, so a trailing delimiter adds no final empty piece.
///
/// # Panics
/// If `delimiter` is empty.
#[track_caller]
pub fn tokens<'a, 'd>(source: Span<'a>, delimiter: Span<'d>) -> Tokens<'a, 'd> {
    precondition!(!delimiter.is_empty(), "token delimiter must not be empty");
    Tokens {
        rest: source,
        delimiter,
    }
}

#[derive(Debug, Clone)]
pub struct Tokens<'a, 'd> {
    rest: Span<'a>,
    delimiter: Span<'d>,
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let source = self.rest;
        Some(token(source, self.delimiter, &mut self.rest))
    }
}

/// RFC 3986 unreserved characters pass through; everything else is encoded.
fn should_url_encode(byte: u8) -> bool {
    !(byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~'))
}

const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

fn encode_into(destination: &mut [u8], source: &[u8]) -> usize {
    let mut written = 0;
    for &byte in source {
        if should_url_encode(byte) {
            destination[written] = b'%';
            destination[written + 1] = UPPER_HEX[usize::from(byte >> 4)];
            destination[written + 2] = UPPER_HEX[usize::from(byte & 0x0F)];
            written += 3;
        } else {
            destination[written] = byte;
            written += 1;
        }
    }
    written
}

/// Percent-encodes `source` into `destination` and returns the encoded
/// length.
///
/// Each encoded byte costs two bytes beyond a plain copy. When the
/// destination cannot absorb that, [`SpanError::InsufficientSize`] is
/// returned before anything is written.
pub fn url_encode(destination: SpanMut<'_>, source: Span<'_>) -> Result<usize> {
    let source = source.as_bytes();
    if source.is_empty() {
        return Ok(0);
    }

    let capacity = destination.len();
    if capacity < source.len() {
        log::debug!(
            "url_encode: {} source bytes cannot fit in {capacity}",
            source.len()
        );
        return Err(SpanError::InsufficientSize);
    }

    // Measured in units of two bytes: '/' -> "%2F".
    let extra_space_have = (capacity - source.len()) / 2;
    if extra_space_have < source.len() {
        let extra_space_needed = source.iter().filter(|&&b| should_url_encode(b)).count();
        if extra_space_needed > extra_space_have {
            log::debug!(
                "url_encode: {extra_space_needed} bytes need encoding but room for {extra_space_have}"
            );
            return Err(SpanError::InsufficientSize);
        }
    }

    Ok(encode_into(destination.into_bytes(), source))
}
