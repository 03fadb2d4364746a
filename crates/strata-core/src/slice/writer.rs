use crate::slice::Slice;

///
/// SliceWriter
///
/// Growable byte accumulator with amortized O(1) append. Finishing the
/// writer hands out the final immutable slice; the buffer is never
/// mutated again after that point.
///

#[derive(Debug, Default)]
pub struct SliceWriter {
    buf: Vec<u8>,
}

impl SliceWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_slice(&mut self, slice: &Slice) {
        self.buf.extend_from_slice(slice.as_bytes());
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and freeze the accumulated bytes.
    #[must_use]
    pub fn finish(self) -> Slice {
        Slice::from(self.buf)
    }
}
