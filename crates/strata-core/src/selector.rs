//! Module: selector
//! Responsibility: logical positions in the store's key order.
//! Does not own: selector resolution, which belongs to the snapshot.
//! Boundary: range boundaries are always expressed through selectors so a
//! range never requires its boundary keys to exist.

use crate::{error::Error, slice::Slice};

///
/// KeySelector
///
/// Logical pointer into the store's key order: an anchor key, an
/// inclusive/exclusive flag, and an offset in keys. Resolution semantics
/// (the store's): start from the last key less than the anchor (or
/// less-than-or-equal when `or_equal` is set), then move `offset` keys
/// forward.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeySelector {
    key: Slice,
    or_equal: bool,
    offset: i32,
}

impl KeySelector {
    #[must_use]
    pub const fn new(key: Slice, or_equal: bool, offset: i32) -> Self {
        Self {
            key,
            or_equal,
            offset,
        }
    }

    /// The last key strictly before the anchor.
    #[must_use]
    pub const fn last_less_than(key: Slice) -> Self {
        Self::new(key, false, 0)
    }

    /// The last key at or before the anchor.
    #[must_use]
    pub const fn last_less_or_equal(key: Slice) -> Self {
        Self::new(key, true, 0)
    }

    /// The first key strictly after the anchor.
    #[must_use]
    pub const fn first_greater_than(key: Slice) -> Self {
        Self::new(key, true, 1)
    }

    /// The first key at or after the anchor.
    #[must_use]
    pub const fn first_greater_or_equal(key: Slice) -> Self {
        Self::new(key, false, 1)
    }

    #[must_use]
    pub const fn key(&self) -> &Slice {
        &self.key
    }

    #[must_use]
    pub const fn or_equal(&self) -> bool {
        self.or_equal
    }

    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }
}

///
/// KeySelectorPair
///
/// `(begin, end)` selectors defining the half-open range `[begin, end)`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeySelectorPair {
    begin: KeySelector,
    end: KeySelector,
}

impl KeySelectorPair {
    #[must_use]
    pub const fn new(begin: KeySelector, end: KeySelector) -> Self {
        Self { begin, end }
    }

    /// Half-open range over exactly the keys starting with `prefix`.
    pub fn from_prefix(prefix: &Slice) -> Result<Self, Error> {
        let end_key = prefix.successor()?;

        Ok(Self {
            begin: KeySelector::first_greater_or_equal(prefix.clone()),
            end: KeySelector::first_greater_or_equal(end_key),
        })
    }

    /// Half-open range `[begin_key, end_key)` over literal keys.
    #[must_use]
    pub const fn from_keys(begin_key: Slice, end_key: Slice) -> Self {
        Self {
            begin: KeySelector::first_greater_or_equal(begin_key),
            end: KeySelector::first_greater_or_equal(end_key),
        }
    }

    #[must_use]
    pub const fn begin(&self) -> &KeySelector {
        &self.begin
    }

    #[must_use]
    pub const fn end(&self) -> &KeySelector {
        &self.end
    }
}

///
/// TESTS
///
