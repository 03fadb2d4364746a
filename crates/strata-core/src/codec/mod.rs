//! Module: codec
//! Responsibility: binding typed encode/decode logic to reusable objects.
//! Does not own: the order-preserving byte layouts (see `tuple`).
//! Boundary: anything needing a byte-level key or value goes through a
//! `KeyCodec`.

mod composite;
#[cfg(test)]
mod tests;

pub use composite::{
    Composite2, Composite3, Composite4, Composite5, Composite6, composite2, composite3,
    composite4, composite5, composite6,
};

use crate::{
    error::{DecodeError, Error},
    slice::{Slice, SliceReader, SliceWriter},
    tuple::{Element, read_element, write_element},
};
use std::sync::Arc;

///
/// KeyCodec
///
/// Capability object binding strongly-typed encode/decode logic for one
/// value type. Codecs are immutable and stateless after construction and
/// safe to call concurrently from multiple executions.
///
/// `write_key`/`read_key` operate mid-stream so composite codecs can
/// concatenate parts back-to-back; `encode_key`/`decode_key` wrap them for
/// whole-key use and enforce the key capacity limit.
///

pub trait KeyCodec<T>: Send + Sync {
    /// Append the encoded form of `value` to the writer.
    fn write_key(&self, writer: &mut SliceWriter, value: &T) -> Result<(), Error>;

    /// Read one value, advancing the reader past exactly the bytes the
    /// encoding consumed. Codecs that are not self-framing (identity,
    /// bound functions) consume everything remaining and are only valid
    /// as the final part of a composite key.
    fn read_key(&self, reader: &mut SliceReader<'_>) -> Result<T, Error>;

    /// Encode one whole key. Fails with `CapacityExceeded` before any I/O
    /// if the encoding is larger than the store's key limit.
    fn encode_key(&self, value: &T) -> Result<Slice, Error> {
        let mut writer = SliceWriter::new();
        self.write_key(&mut writer, value)?;

        if writer.len() > crate::MAX_KEY_BYTES {
            return Err(Error::CapacityExceeded {
                what: "encoded key",
                len: writer.len(),
                max: crate::MAX_KEY_BYTES,
            });
        }

        Ok(writer.finish())
    }

    /// Decode one whole key, rejecting trailing bytes.
    fn decode_key(&self, encoded: &Slice) -> Result<T, Error> {
        let mut reader = SliceReader::new(encoded.as_bytes());
        let value = self.read_key(&mut reader)?;

        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes {
                remaining: reader.remaining(),
            }
            .into());
        }

        Ok(value)
    }
}

impl<T, C: KeyCodec<T> + ?Sized> KeyCodec<T> for Arc<C> {
    fn write_key(&self, writer: &mut SliceWriter, value: &T) -> Result<(), Error> {
        (**self).write_key(writer, value)
    }

    fn read_key(&self, reader: &mut SliceReader<'_>) -> Result<T, Error> {
        (**self).read_key(reader)
    }
}

///
/// IdentityCodec
///
/// Encodes and decodes raw byte slices unchanged. Used when the key space
/// already is bytes. Reads to the end of the region, so it may only close
/// a composite key.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityCodec;

impl KeyCodec<Slice> for IdentityCodec {
    fn write_key(&self, writer: &mut SliceWriter, value: &Slice) -> Result<(), Error> {
        writer.write_slice(value);
        Ok(())
    }

    fn read_key(&self, reader: &mut SliceReader<'_>) -> Result<Slice, Error> {
        Ok(Slice::copy_from(reader.read_to_end()))
    }
}

///
/// BindCodec
///
/// Codec built from a pair of pure functions. Both functions must be
/// referentially transparent (no side effects, no shared mutable captured
/// state); the codec is shared freely across concurrent executions.
/// Like the identity codec it consumes the whole remaining region on read.
///

pub struct BindCodec<T, E, D>
where
    E: Fn(&T) -> Result<Slice, Error> + Send + Sync,
    D: Fn(&Slice) -> Result<T, Error> + Send + Sync,
{
    encode: E,
    decode: D,
    _marker: std::marker::PhantomData<fn() -> T>,
}

/// Bind a pair of pure functions into a single-type codec.
pub const fn bind<T, E, D>(encode: E, decode: D) -> BindCodec<T, E, D>
where
    E: Fn(&T) -> Result<Slice, Error> + Send + Sync,
    D: Fn(&Slice) -> Result<T, Error> + Send + Sync,
{
    BindCodec {
        encode,
        decode,
        _marker: std::marker::PhantomData,
    }
}

impl<T, E, D> KeyCodec<T> for BindCodec<T, E, D>
where
    E: Fn(&T) -> Result<Slice, Error> + Send + Sync,
    D: Fn(&Slice) -> Result<T, Error> + Send + Sync,
{
    fn write_key(&self, writer: &mut SliceWriter, value: &T) -> Result<(), Error> {
        let encoded = (self.encode)(value)?;
        writer.write_slice(&encoded);
        Ok(())
    }

    fn read_key(&self, reader: &mut SliceReader<'_>) -> Result<T, Error> {
        let encoded = Slice::copy_from(reader.read_to_end());
        (self.decode)(&encoded)
    }
}

// Self-framing scalar codecs over the order-preserving tuple-element
// layouts. These are safe in any position of a composite key.

macro_rules! element_codec {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $variant:ident, $expected:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl KeyCodec<$ty> for $name {
            fn write_key(&self, writer: &mut SliceWriter, value: &$ty) -> Result<(), Error> {
                write_element(writer, &Element::$variant(value.clone()));
                Ok(())
            }

            fn read_key(&self, reader: &mut SliceReader<'_>) -> Result<$ty, Error> {
                if let Element::$variant(value) = read_element(reader, 0)? {
                    Ok(value)
                } else {
                    Err(DecodeError::InvalidPayload {
                        element: 0,
                        context: concat!("expected ", $expected, " element"),
                    }
                    .into())
                }
            }
        }
    };
}

element_codec!(
    /// Order-preserving codec for signed 64-bit integers.
    IntCodec, i64, Int, "Int"
);
element_codec!(
    /// Order-preserving codec for UTF-8 text.
    TextCodec, String, Text, "Text"
);
element_codec!(
    /// Order-preserving codec for raw byte strings.
    BytesCodec, Vec<u8>, Bytes, "Bytes"
);
element_codec!(
    /// Codec for booleans (false sorts before true).
    BoolCodec, bool, Bool, "Bool"
);
