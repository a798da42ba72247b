use crate::{Result, Span, SpanError, SpanMut};

/// Appends into a destination span, checking capacity before every write.
///
/// A failed append leaves both the destination bytes and the writer exactly
/// as they were, so callers can retry with a smaller piece or give up
/// without cleaning anything up.
///
/// ```
/// use bytespan::{SpanMut, SpanWriter};
///
/// let mut buffer = [0u8; 8];
/// let mut writer = SpanWriter::new(SpanMut::new(&mut buffer));
/// writer.append(b"n=")?;
/// writer.append_i32(-17)?;
/// assert_eq!(writer.written(), 5);
/// assert_eq!(&buffer[..5], b"n=-17");
/// # Ok::<(), bytespan::SpanError>(())
/// ```
#[derive(Debug, Default)]
pub struct SpanWriter<'a> {
    remaining: SpanMut<'a>,
    written: usize,
}

impl<'a> SpanWriter<'a> {
    pub fn new(destination: SpanMut<'a>) -> Self {
        SpanWriter {
            remaining: destination,
            written: 0,
        }
    }

    /// Bytes appended so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Capacity still available.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Gives back the unwritten part of the destination.
    pub fn into_remainder(self) -> SpanMut<'a> {
        self.remaining
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len())?;
        self.put(bytes);
        Ok(())
    }

    pub fn append_span(&mut self, span: Span<'_>) -> Result<()> {
        self.append(span.as_bytes())
    }

    pub fn append_u8(&mut self, byte: u8) -> Result<()> {
        self.append(&[byte])
    }

    /// Fails with [`SpanError::InsufficientSize`] unless `needed` more bytes fit.
    pub(crate) fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining.len() {
            log::trace!(
                "span writer needs {needed} bytes but only {} remain",
                self.remaining.len()
            );
            return Err(SpanError::InsufficientSize);
        }
        Ok(())
    }

    /// Writes without checking; callers go through [`Self::ensure`] first.
    pub(crate) fn put(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= self.remaining.len());
        let remaining = std::mem::take(&mut self.remaining);
        self.remaining = remaining.copy(Span::new(bytes));
        self.written += bytes.len();
    }
}
