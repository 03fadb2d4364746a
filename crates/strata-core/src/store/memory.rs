//! Module: store::memory
//! Responsibility: ordered in-memory snapshot with full selector support.
//! Does not own: durability or transactions; contents are fixed at build.
//! Boundary: serves tests and embedders that need store semantics without
//! a store.

use crate::{
    error::Error,
    selector::{KeySelector, KeySelectorPair},
    slice::Slice,
    store::{KeyValue, RangeBatch, RangeOptions, ReadSnapshot},
};
use async_trait::async_trait;
use std::collections::BTreeMap;

const DEFAULT_MEMORY_BATCH: usize = 256;

///
/// MemorySnapshot
///
/// Immutable ordered key/value snapshot backed by a BTreeMap. Implements
/// the same selector-resolution and batching contract as a real store
/// snapshot, so query execution over it is observationally equivalent.
///

#[derive(Clone, Debug, Default)]
pub struct MemorySnapshot {
    entries: BTreeMap<Slice, Slice>,
}

impl MemorySnapshot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<Slice>, value: impl Into<Slice>) {
        self.entries.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Slice>,
        V: Into<Slice>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Resolve a selector to a boundary position in [0, len]: start from
    // the last key at/before the anchor, then move `offset` keys forward.
    fn resolve(&self, keys: &[&Slice], selector: &KeySelector) -> usize {
        let satisfying = keys.partition_point(|key| {
            if selector.or_equal() {
                *key <= selector.key()
            } else {
                *key < selector.key()
            }
        });

        let resolved = satisfying as i64 - 1 + i64::from(selector.offset());
        resolved.clamp(0, keys.len() as i64) as usize
    }
}

#[async_trait]
impl ReadSnapshot for MemorySnapshot {
    async fn read_range(
        &self,
        range: &KeySelectorPair,
        options: &RangeOptions,
        _iteration: usize,
    ) -> Result<RangeBatch, Error> {
        let keys: Vec<&Slice> = self.entries.keys().collect();

        let begin = self.resolve(&keys, range.begin());
        let end = self.resolve(&keys, range.end());
        if begin >= end {
            return Ok(RangeBatch::default());
        }

        let span = &keys[begin..end];
        let limit = options.limit.unwrap_or(usize::MAX);
        let cap = limit.min(options.batch_size.unwrap_or(DEFAULT_MEMORY_BATCH));
        let taken = cap.min(span.len());

        let picked: Vec<&&Slice> = if options.reverse {
            span.iter().rev().take(taken).collect()
        } else {
            span.iter().take(taken).collect()
        };

        let entries = picked
            .into_iter()
            .map(|key| KeyValue::new((*key).clone(), self.entries[*key].clone()))
            .collect();

        Ok(RangeBatch {
            entries,
            more: taken < span.len() && taken < limit,
        })
    }

    async fn read_single(&self, key: &Slice) -> Result<Option<Slice>, Error> {
        Ok(self.entries.get(key).cloned())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::MemorySnapshot;
    use crate::{
        selector::{KeySelector, KeySelectorPair},
        slice::Slice,
        store::{RangeOptions, ReadSnapshot},
    };

    fn snapshot() -> MemorySnapshot {
        MemorySnapshot::from_pairs([
            (b"a".as_slice(), b"1".as_slice()),
            (b"b", b"2"),
            (b"c", b"3"),
            (b"d", b"4"),
        ])
    }

    fn keys_of(batch: &crate::store::RangeBatch) -> Vec<Vec<u8>> {
        batch.entries.iter().map(|kv| kv.key.to_vec()).collect()
    }

    #[tokio::test]
    async fn selector_pair_resolves_half_open_range() {
        let snap = snapshot();
        let pair = KeySelectorPair::from_keys(
            Slice::from_static(b"b"),
            Slice::from_static(b"d"),
        );

        let batch = snap
            .read_range(&pair, &RangeOptions::new(), 1)
            .await
            .unwrap();
        assert_eq!(keys_of(&batch), vec![b"b".to_vec(), b"c".to_vec()]);
        assert!(!batch.more);
    }

    #[tokio::test]
    async fn selectors_need_no_existing_anchor_key() {
        let snap = snapshot();
        // "bb" does not exist; first-greater-or-equal lands on "c".
        let pair = KeySelectorPair::new(
            KeySelector::first_greater_or_equal(Slice::from_static(b"bb")),
            KeySelector::first_greater_than(Slice::from_static(b"zz")),
        );

        let batch = snap
            .read_range(&pair, &RangeOptions::new(), 1)
            .await
            .unwrap();
        assert_eq!(keys_of(&batch), vec![b"c".to_vec(), b"d".to_vec()]);
    }

    #[tokio::test]
    async fn batching_reports_more_until_exhausted() {
        let snap = snapshot();
        let pair = KeySelectorPair::from_keys(Slice::empty(), Slice::from_static(b"zz"));
        let options = RangeOptions::new().with_batch_size(3);

        let first = snap.read_range(&pair, &options, 1).await.unwrap();
        assert_eq!(first.entries.len(), 3);
        assert!(first.more);

        let resumed = KeySelectorPair::new(
            KeySelector::first_greater_than(first.entries[2].key.clone()),
            pair.end().clone(),
        );
        let second = snap.read_range(&resumed, &options, 2).await.unwrap();
        assert_eq!(keys_of(&second), vec![b"d".to_vec()]);
        assert!(!second.more);
    }

    #[tokio::test]
    async fn limit_suppresses_more() {
        let snap = snapshot();
        let pair = KeySelectorPair::from_keys(Slice::empty(), Slice::from_static(b"zz"));
        let options = RangeOptions::new().with_limit(2).with_batch_size(2);

        let batch = snap.read_range(&pair, &options, 1).await.unwrap();
        assert_eq!(batch.entries.len(), 2);
        assert!(!batch.more);
    }

    #[tokio::test]
    async fn reverse_yields_descending_key_order() {
        let snap = snapshot();
        let pair = KeySelectorPair::from_keys(Slice::empty(), Slice::from_static(b"zz"));
        let options = RangeOptions::new().reversed();

        let batch = snap.read_range(&pair, &options, 1).await.unwrap();
        assert_eq!(
            keys_of(&batch),
            vec![b"d".to_vec(), b"c".to_vec(), b"b".to_vec(), b"a".to_vec()]
        );
    }

    #[tokio::test]
    async fn read_single_returns_exact_matches_only() {
        let snap = snapshot();
        let hit = snap.read_single(&Slice::from_static(b"b")).await.unwrap();
        assert_eq!(hit, Some(Slice::from_static(b"2")));

        let miss = snap.read_single(&Slice::from_static(b"bb")).await.unwrap();
        assert_eq!(miss, None);
    }
}
