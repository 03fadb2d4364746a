//! Module: index
//! Responsibility: secondary-index handles and lookup-range lowering.
//! Does not own: index maintenance (writing entries is the embedder's
//! concern) or scan execution.
//! Boundary: `IndexLookup` expressions lower to ranges through this module.

use crate::{
    codec::KeyCodec,
    error::{DecodeError, Error},
    selector::KeySelectorPair,
    slice::{Slice, SliceReader, SliceWriter},
};
use std::{fmt, sync::Arc};

///
/// CompareOp
///
/// Comparison operators supported by index lookups. A closed set: an
/// unsupported operator is unrepresentable rather than a runtime failure
/// discovered on first use.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Human-readable operator symbol for diagnostics.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

///
/// Index
///
/// Handle for a secondary index keyed by a value type over entity ids.
/// Entry keys are `prefix + value + id`, so entries for one value are
/// contiguous and ordered by id, and entries across values are ordered by
/// the value's order-preserving encoding.
///
/// The value codec must be self-framing (a tuple-element or composite
/// codec); the id codec closes the key and may consume to the end.
/// Handles are immutable and safely shared across concurrent queries.
///

pub struct Index<TId, TValue> {
    name: String,
    prefix: Slice,
    value_codec: Arc<dyn KeyCodec<TValue>>,
    id_codec: Arc<dyn KeyCodec<TId>>,
}

impl<TId, TValue> Clone for Index<TId, TValue> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            value_codec: Arc::clone(&self.value_codec),
            id_codec: Arc::clone(&self.id_codec),
        }
    }
}

impl<TId, TValue> fmt::Debug for Index<TId, TValue> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl<TId, TValue> Index<TId, TValue> {
    /// Construct an index handle. The prefix anchors the index's own key
    /// space and must be non-empty (an empty prefix has no successor to
    /// bound its scans).
    pub fn new(
        name: impl Into<String>,
        prefix: Slice,
        value_codec: impl KeyCodec<TValue> + 'static,
        id_codec: impl KeyCodec<TId> + 'static,
    ) -> Result<Self, Error> {
        if prefix.is_empty() {
            return Err(Error::invalid_argument("index prefix cannot be empty"));
        }

        Ok(Self {
            name: name.into(),
            prefix,
            value_codec: Arc::new(value_codec),
            id_codec: Arc::new(id_codec),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn prefix(&self) -> &Slice {
        &self.prefix
    }

    /// Encode the indexed value alone (the entry-key fragment lookups
    /// anchor on).
    pub fn encode_value(&self, value: &TValue) -> Result<Slice, Error> {
        self.value_codec.encode_key(value)
    }

    /// Full entry key for one `(value, id)` pair.
    pub fn entry_key(&self, value: &TValue, id: &TId) -> Result<Slice, Error> {
        let mut writer = SliceWriter::new();
        writer.write_slice(&self.prefix);
        self.value_codec.write_key(&mut writer, value)?;
        self.id_codec.write_key(&mut writer, id)?;

        if writer.len() > crate::MAX_KEY_BYTES {
            return Err(Error::CapacityExceeded {
                what: "index entry key",
                len: writer.len(),
                max: crate::MAX_KEY_BYTES,
            });
        }

        Ok(writer.finish())
    }

    /// Decode one entry key back into its `(value, id)` pair.
    pub fn decode_entry(&self, key: &Slice) -> Result<(TValue, TId), Error> {
        if !key.starts_with(&self.prefix) {
            return Err(DecodeError::MissingPrefix { context: "index" }.into());
        }

        let mut reader = SliceReader::new(&key[self.prefix.len()..]);
        let value = self.value_codec.read_key(&mut reader)?;
        let id = self
            .id_codec
            .read_key(&mut reader)
            .map_err(|err| err.at_element(1))?;

        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes {
                remaining: reader.remaining(),
            }
            .into());
        }

        Ok((value, id))
    }

    /// The entity id owning one entry key.
    pub fn decode_id(&self, key: &Slice) -> Result<TId, Error> {
        Ok(self.decode_entry(key)?.1)
    }

    /// Lower a comparison against a pre-encoded value into the selector
    /// pair scanning exactly the satisfying entries, in ascending value
    /// order. Equality scans the value's own prefix range; ordered
    /// comparisons anchor at the value's encoding, with inclusivity
    /// decided by the operator.
    pub fn lookup_range(&self, op: CompareOp, encoded_value: &Slice) -> Result<KeySelectorPair, Error> {
        let anchor = self.prefix.concat(encoded_value);
        let index_end = self.prefix.successor()?;

        let (begin, end) = match op {
            CompareOp::Eq => (anchor.clone(), anchor.successor()?),
            CompareOp::Ge => (anchor, index_end),
            CompareOp::Gt => (anchor.successor()?, index_end),
            CompareOp::Le => (self.prefix.clone(), anchor.successor()?),
            CompareOp::Lt => (self.prefix.clone(), anchor),
        };

        Ok(KeySelectorPair::from_keys(begin, end))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{CompareOp, Index};
    use crate::{
        codec::{IntCodec, TextCodec},
        error::Error,
        slice::Slice,
    };

    fn age_index() -> Index<String, i64> {
        Index::new("by_age", Slice::from_static(b"idx/age/"), IntCodec, TextCodec)
            .expect("index construction should succeed")
    }

    #[test]
    fn entry_key_roundtrips() {
        let index = age_index();
        let key = index.entry_key(&42, &"alice".to_string()).unwrap();

        assert!(key.starts_with(index.prefix()));
        let (value, id) = index.decode_entry(&key).unwrap();
        assert_eq!(value, 42);
        assert_eq!(id, "alice");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let err = Index::<String, i64>::new("broken", Slice::empty(), IntCodec, TextCodec)
            .expect_err("empty prefix must fail");
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn ge_lookup_starts_at_the_encoded_value_inclusive() {
        // Worked example: `>= 42` resolves to a single ascending range
        // starting at the encoding of 42, inclusive.
        let index = age_index();
        let encoded = index.encode_value(&42).unwrap();
        let pair = index.lookup_range(CompareOp::Ge, &encoded).unwrap();

        assert_eq!(*pair.begin().key(), index.prefix().concat(&encoded));
        assert_eq!(*pair.end().key(), index.prefix().successor().unwrap());
    }

    #[test]
    fn operators_fix_inclusivity_via_prefix_successors() {
        let index = age_index();
        let encoded = index.encode_value(&7).unwrap();
        let anchor = index.prefix().concat(&encoded);

        let eq = index.lookup_range(CompareOp::Eq, &encoded).unwrap();
        assert_eq!(*eq.begin().key(), anchor);
        assert_eq!(*eq.end().key(), anchor.successor().unwrap());

        let gt = index.lookup_range(CompareOp::Gt, &encoded).unwrap();
        assert_eq!(*gt.begin().key(), anchor.successor().unwrap());

        let lt = index.lookup_range(CompareOp::Lt, &encoded).unwrap();
        assert_eq!(*lt.begin().key(), *index.prefix());
        assert_eq!(*lt.end().key(), anchor);

        let le = index.lookup_range(CompareOp::Le, &encoded).unwrap();
        assert_eq!(*le.end().key(), anchor.successor().unwrap());
    }
}
