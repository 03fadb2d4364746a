//! Module: slice
//! Responsibility: immutable byte views plus the writer/reader primitives.
//! Does not own: any encoding semantics or store traversal.
//! Boundary: everything above this module treats slices as opaque bytes.

mod reader;
mod writer;

pub use reader::SliceReader;
pub use writer::SliceWriter;

use crate::error::Error;
use bytes::Bytes;
use derive_more::{Deref, From};
use std::fmt;

///
/// Slice
///
/// Immutable, cheaply-cloneable view over a contiguous byte region.
/// Equality and ordering are byte-wise; two slices are equal iff they have
/// the same length and the same bytes. Once constructed a slice never
/// exposes mutable aliasable state, so it is safe to share across
/// concurrently executing queries.
///

#[derive(Clone, Default, Deref, Eq, From, Hash, Ord, PartialEq, PartialOrd)]
#[deref(forward)]
pub struct Slice(Bytes);

impl Slice {
    /// The empty slice.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Bytes::new())
    }

    /// View over a static byte region without copying.
    #[must_use]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }

    /// Copy a byte region into an owned slice.
    #[must_use]
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.as_bytes().starts_with(prefix.as_bytes())
    }

    /// Concatenate two slices into a new owned slice.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(self.as_bytes());
        out.extend_from_slice(other.as_bytes());
        Self(Bytes::from(out))
    }

    /// Smallest key strictly greater than every key that has `self` as a
    /// prefix: trailing 0xFF bytes are truncated and the last remaining
    /// byte is incremented.
    ///
    /// A key with no byte below 0xFF has no such successor and is rejected
    /// with `InvalidArgument`.
    pub fn successor(&self) -> Result<Self, Error> {
        let bytes = self.as_bytes();
        let end = bytes
            .iter()
            .rposition(|&byte| byte != 0xFF)
            .ok_or_else(|| {
                Error::invalid_argument("key must contain at least one byte not equal to 0xFF")
            })?;

        let mut out = bytes[..=end].to_vec();
        out[end] += 1;

        Ok(Self(Bytes::from(out)))
    }
}

impl fmt::Debug for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slice(0x")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl AsRef<[u8]> for Slice {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Slice {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Slice {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from(bytes)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::Slice;
    use crate::error::Error;

    #[test]
    fn equality_is_byte_wise() {
        let a = Slice::from_static(b"abc");
        let b = Slice::copy_from(b"abc");
        let c = Slice::from_static(b"abd");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }

    #[test]
    fn successor_increments_last_byte() {
        let key = Slice::from_static(b"users/");
        let next = key.successor().expect("successor should exist");
        assert_eq!(next.as_bytes(), b"users0");
    }

    #[test]
    fn successor_truncates_trailing_ff_bytes() {
        let key = Slice::from_static(&[0x61, 0x01, 0xFF, 0xFF]);
        let next = key.successor().expect("successor should exist");
        assert_eq!(next.as_bytes(), &[0x61, 0x02]);
    }

    #[test]
    fn successor_rejects_unincrementable_keys() {
        for key in [Slice::empty(), Slice::from_static(&[0xFF, 0xFF])] {
            let err = key.successor().expect_err("no successor exists");
            assert!(matches!(err, Error::InvalidArgument { .. }));
        }
    }

    #[test]
    fn concat_preserves_both_sides() {
        let joined = Slice::from_static(b"ab").concat(&Slice::from_static(b"cd"));
        assert_eq!(joined.as_bytes(), b"abcd");
    }
}
