use crate::error::Error;

///
/// SliceReader
///
/// Cursor-based consumer over a fixed byte region. Reads advance the
/// cursor; a read past the remaining length fails with `OutOfBounds` and
/// leaves the cursor untouched. The reader never mutates the underlying
/// bytes, so many readers may share one encoded region concurrently.
///

#[derive(Debug)]
pub struct SliceReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> SliceReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset
    }

    /// Next byte without advancing the cursor.
    #[must_use]
    pub const fn peek(&self) -> Option<u8> {
        if self.offset < self.bytes.len() {
            Some(self.bytes[self.offset])
        } else {
            None
        }
    }

    pub const fn read_u8(&mut self) -> Result<u8, Error> {
        if self.offset >= self.bytes.len() {
            return Err(Error::OutOfBounds {
                requested: 1,
                remaining: 0,
            });
        }

        let byte = self.bytes[self.offset];
        self.offset += 1;

        Ok(byte)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], Error> {
        if count > self.remaining() {
            return Err(Error::OutOfBounds {
                requested: count,
                remaining: self.remaining(),
            });
        }

        let out = &self.bytes[self.offset..self.offset + count];
        self.offset += count;

        Ok(out)
    }

    /// Consume and return every remaining byte.
    pub const fn read_to_end(&mut self) -> &'a [u8] {
        let (_, rest) = self.bytes.split_at(self.offset);
        self.offset = self.bytes.len();

        rest
    }
}

#[cfg(test)]
mod tests {
    use super::SliceReader;
    use crate::error::Error;

    #[test]
    fn reads_advance_the_cursor() {
        let mut reader = SliceReader::new(&[0x01, 0x02, 0x03, 0x04]);

        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_bytes(2).unwrap(), &[0x02, 0x03]);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_to_end(), &[0x04]);
        assert!(reader.is_empty());
    }

    #[test]
    fn overrun_reports_requested_and_remaining() {
        let mut reader = SliceReader::new(&[0x01]);
        reader.read_u8().unwrap();

        let err = reader.read_bytes(3).expect_err("overrun must fail");
        match err {
            Error::OutOfBounds {
                requested,
                remaining,
            } => {
                assert_eq!(requested, 3);
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failed_read_leaves_cursor_in_place() {
        let mut reader = SliceReader::new(&[0x01, 0x02]);
        assert!(reader.read_bytes(5).is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bytes(2).unwrap(), &[0x01, 0x02]);
    }
}
