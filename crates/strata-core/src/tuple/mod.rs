//! Module: tuple
//! Responsibility: order-preserving encoding of heterogeneous typed tuples.
//! Does not own: store traversal or codec binding.
//! Boundary: the byte layout produced here is persisted as store keys and
//! must remain stable across versions.

mod decode;
mod encode;
mod tag;

pub use tag::ElementTag;

pub(crate) use decode::read_element;
pub(crate) use encode::write_element;

use crate::{
    error::Error,
    selector::KeySelectorPair,
    slice::{Slice, SliceReader, SliceWriter},
};

///
/// Element
///
/// One typed tuple element. The derived ordering matches the
/// byte-lexicographic ordering of the encoded form exactly: variants are
/// declared in tag order and every payload encoding preserves its natural
/// order (see `tuple::encode`).
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Element {
    /// Absent marker. Sorts before every other element kind.
    Null,
    Bytes(Vec<u8>),
    Text(String),
    Tuple(Vec<Element>),
    Int(i64),
    Bool(bool),
}

impl Element {
    /// The type tag this element encodes under.
    #[must_use]
    pub const fn tag(&self) -> ElementTag {
        match self {
            Self::Null => ElementTag::Null,
            Self::Bytes(_) => ElementTag::Bytes,
            Self::Text(_) => ElementTag::Text,
            Self::Tuple(_) => ElementTag::Tuple,
            Self::Int(_) => ElementTag::Int,
            Self::Bool(_) => ElementTag::Bool,
        }
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Element {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

///
/// Tuple
///
/// Ordered list of typed elements packable into one order-preserving key.
/// Tuples are immutable descriptions; packing never mutates shared state
/// and the same tuple may be packed concurrently from many executions.
///

#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct Tuple(Vec<Element>);

impl Tuple {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append one element, returning the extended tuple.
    #[must_use]
    pub fn append(mut self, element: impl Into<Element>) -> Self {
        self.0.push(element.into());
        self
    }

    /// Encode every element in declared order into one key.
    ///
    /// The empty tuple packs to zero bytes. A packed key larger than
    /// `MAX_KEY_BYTES` is a `CapacityExceeded` construction error.
    pub fn pack(&self) -> Result<Slice, Error> {
        let mut writer = SliceWriter::new();
        for element in &self.0 {
            encode::write_element(&mut writer, element);
        }

        if writer.len() > crate::MAX_KEY_BYTES {
            return Err(Error::CapacityExceeded {
                what: "packed tuple key",
                len: writer.len(),
                max: crate::MAX_KEY_BYTES,
            });
        }

        Ok(writer.finish())
    }

    /// Decode a packed key back into its elements.
    pub fn unpack(encoded: &Slice) -> Result<Self, Error> {
        let mut reader = SliceReader::new(encoded.as_bytes());
        let mut elements = Vec::new();

        while !reader.is_empty() {
            let element = decode::read_element(&mut reader, elements.len())?;
            elements.push(element);
        }

        Ok(Self(elements))
    }

    /// Selector pair covering exactly the keys whose packed form starts
    /// with this tuple's packed form. Rejects the empty tuple, which has
    /// no meaningful prefix.
    pub fn to_selector_pair(&self) -> Result<KeySelectorPair, Error> {
        if self.is_empty() {
            return Err(Error::invalid_argument(
                "cannot build a range from an empty tuple",
            ));
        }

        KeySelectorPair::from_prefix(&self.pack()?)
    }
}

impl<E: Into<Element>> FromIterator<E> for Tuple {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Element>> for Tuple {
    fn from(elements: Vec<Element>) -> Self {
        Self(elements)
    }
}
