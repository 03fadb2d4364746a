//! Module: store
//! Responsibility: the narrow read interface consumed from the store
//! client collaborator, plus an ordered in-memory snapshot.
//! Does not own: transactions, retries, conflict detection, or transport.
//! Boundary: everything above issues reads only through `ReadSnapshot`.

pub mod memory;

use crate::{error::Error, selector::KeySelectorPair, slice::Slice};
use async_trait::async_trait;

///
/// KeyValue
///
/// One raw key/value byte pair read from the store.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyValue {
    pub key: Slice,
    pub value: Slice,
}

impl KeyValue {
    #[must_use]
    pub const fn new(key: Slice, value: Slice) -> Self {
        Self { key, value }
    }
}

///
/// RangeOptions
///
/// Read options for one range scan: overall result limit, traversal
/// direction, and an optional per-batch size override. Batch size is a
/// performance tuning signal only and never changes result contents or
/// ordering.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RangeOptions {
    pub limit: Option<usize>,
    pub reverse: bool,
    pub batch_size: Option<usize>,
}

impl RangeOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limit: None,
            reverse: false,
            batch_size: None,
        }
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
}

///
/// RangeBatch
///
/// One batch of range results. `more` signals that the range has further
/// entries beyond this batch and the caller should issue a follow-up read
/// anchored past the last returned key.
///

#[derive(Clone, Debug, Default)]
pub struct RangeBatch {
    pub entries: Vec<KeyValue>,
    pub more: bool,
}

///
/// StoreLimits
///
/// Store-defined size limits, reported by the snapshot so encoders can
/// reject oversized keys/values before any I/O.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StoreLimits {
    pub max_key_bytes: usize,
    pub max_value_bytes: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_key_bytes: crate::MAX_KEY_BYTES,
            max_value_bytes: crate::MAX_VALUE_BYTES,
        }
    }
}

///
/// ReadSnapshot
///
/// Transactional snapshot read surface. Implementations resolve key
/// selectors against their own key order and return results in that
/// order (descending when `options.reverse` is set). `iteration` counts
/// follow-up reads of one logical scan, starting at 1; implementations
/// may use it to shape batch sizes.
///

#[async_trait]
pub trait ReadSnapshot: Send + Sync {
    async fn read_range(
        &self,
        range: &KeySelectorPair,
        options: &RangeOptions,
        iteration: usize,
    ) -> Result<RangeBatch, Error>;

    async fn read_single(&self, key: &Slice) -> Result<Option<Slice>, Error>;

    fn limits(&self) -> StoreLimits {
        StoreLimits::default()
    }
}
