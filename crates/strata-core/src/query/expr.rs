//! Module: query::expr
//! Responsibility: expression node types and their constructors, with
//! eager argument validation.
//! Does not own: execution (exec.rs).
//! Boundary: constructing a node never touches the store; anything a
//! constructor can check, it checks before returning.

use crate::{
    error::Error,
    index::{CompareOp, Index},
    query::{ExprShape, Sequence, ValueStream},
    selector::KeySelectorPair,
    slice::Slice,
    store::RangeOptions,
};
use futures::future::BoxFuture;
use std::sync::Arc;

///
/// ConstantExpr
///
/// A fixed in-memory sequence. Streams yield the values in order without
/// any store reads; useful as a test source and as a join operand.
///

#[derive(Clone, Debug)]
pub struct ConstantExpr<T> {
    pub(super) values: Vec<T>,
}

/// Single-element sequence around one already-known value.
pub fn constant<T>(value: T) -> ConstantExpr<T> {
    ConstantExpr {
        values: vec![value],
    }
}

/// Sequence of pre-materialized values, yielded in the given order.
pub fn constants<T>(values: Vec<T>) -> ConstantExpr<T> {
    ConstantExpr { values }
}

///
/// SourceExpr
///
/// An opaque external source. The factory is invoked once per execution,
/// so one expression can be streamed repeatedly.
///

pub struct SourceExpr<T> {
    pub(super) name: &'static str,
    pub(super) factory: Arc<dyn Fn() -> ValueStream<'static, T> + Send + Sync>,
}

impl<T> Clone for SourceExpr<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            factory: Arc::clone(&self.factory),
        }
    }
}

/// Sequence backed by a caller-supplied stream factory.
pub fn sequence<T, F>(name: &'static str, factory: F) -> SourceExpr<T>
where
    F: Fn() -> ValueStream<'static, T> + Send + Sync + 'static,
{
    SourceExpr {
        name,
        factory: Arc::new(factory),
    }
}

///
/// RangeExpr
///
/// A raw key range scan, yielding `KeyValue` pairs in key order
/// (descending when the options say so). The heart of every physical
/// read: index lookups lower to one of these.
///

#[derive(Clone, Debug)]
pub struct RangeExpr {
    pub(super) range: KeySelectorPair,
    pub(super) options: RangeOptions,
}

impl RangeExpr {
    #[must_use]
    pub const fn range(&self) -> &KeySelectorPair {
        &self.range
    }

    #[must_use]
    pub const fn options(&self) -> &RangeOptions {
        &self.options
    }
}

/// Scan one selector range.
#[must_use]
pub const fn range(range: KeySelectorPair, options: RangeOptions) -> RangeExpr {
    RangeExpr { range, options }
}

/// Scan every key sharing `prefix`. Fails if the prefix has no
/// strictly-greater key to bound the scan.
pub fn range_starts_with(prefix: &Slice, options: RangeOptions) -> Result<RangeExpr, Error> {
    Ok(RangeExpr {
        range: KeySelectorPair::from_prefix(prefix)?,
        options,
    })
}

///
/// IndexLookupExpr
///
/// One comparison against a secondary index, yielding decoded
/// `(value, id)` pairs in ascending value order. The value is encoded
/// and the scan range computed at construction, so an unencodable value
/// fails here rather than mid-stream.
///

#[derive(Clone)]
pub struct IndexLookupExpr<TId, TValue> {
    pub(super) index: Index<TId, TValue>,
    pub(super) op: CompareOp,
    pub(super) range: KeySelectorPair,
}

impl<TId, TValue> IndexLookupExpr<TId, TValue> {
    #[must_use]
    pub const fn range(&self) -> &KeySelectorPair {
        &self.range
    }
}

/// Look up index entries whose value satisfies `op` against `value`.
pub fn lookup<TId, TValue>(
    index: &Index<TId, TValue>,
    op: CompareOp,
    value: &TValue,
) -> Result<IndexLookupExpr<TId, TValue>, Error> {
    let encoded = index.encode_value(value)?;
    let range = index.lookup_range(op, &encoded)?;

    Ok(IndexLookupExpr {
        index: index.clone(),
        op,
        range,
    })
}

///
/// IntersectExpr
///
/// Merge-join intersection of two or more sources already ordered by the
/// extracted key. Yields the first source's element for every key
/// present in all sources.
///

pub struct IntersectExpr<K, T> {
    pub(super) sources: Vec<Arc<dyn Sequence<T>>>,
    pub(super) key_fn: Arc<dyn Fn(&T) -> K + Send + Sync>,
}

impl<K, T> Clone for IntersectExpr<K, T> {
    fn clone(&self) -> Self {
        Self {
            sources: self.sources.clone(),
            key_fn: Arc::clone(&self.key_fn),
        }
    }
}

/// Intersect ordered sources on an extracted key. At least two sources
/// are required; intersecting fewer is a construction error, not a
/// degenerate pass-through.
pub fn intersect<K, T, F>(
    sources: Vec<Arc<dyn Sequence<T>>>,
    key_fn: F,
) -> Result<IntersectExpr<K, T>, Error>
where
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    if sources.len() < 2 {
        return Err(Error::invalid_argument(
            "intersect requires at least two sources",
        ));
    }

    Ok(IntersectExpr {
        sources,
        key_fn: Arc::new(key_fn),
    })
}

///
/// TransformExpr
///
/// Per-element mapping, preserving order and cardinality.
///

pub struct TransformExpr<T, U> {
    pub(super) source: Arc<dyn Sequence<T>>,
    pub(super) map: Arc<dyn Fn(T) -> U + Send + Sync>,
}

impl<T, U> Clone for TransformExpr<T, U> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            map: Arc::clone(&self.map),
        }
    }
}

/// Map every element of `source` through `map`.
pub fn transform<T, U, F>(source: Arc<dyn Sequence<T>>, map: F) -> TransformExpr<T, U>
where
    F: Fn(T) -> U + Send + Sync + 'static,
{
    TransformExpr {
        source,
        map: Arc::new(map),
    }
}

///
/// FilterExpr
///
/// Per-element predicate, preserving the order of surviving elements.
///

pub struct FilterExpr<T> {
    pub(super) source: Arc<dyn Sequence<T>>,
    pub(super) predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Clone for FilterExpr<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

/// Keep the elements of `source` satisfying `predicate`.
pub fn filter<T, F>(source: Arc<dyn Sequence<T>>, predicate: F) -> FilterExpr<T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    FilterExpr {
        source,
        predicate: Arc::new(predicate),
    }
}

/// Reducer consuming one execution's stream down to a single value.
pub(super) type Reducer<T, R> =
    Arc<dyn for<'a> Fn(ValueStream<'a, T>) -> BoxFuture<'a, Result<R, Error>> + Send + Sync>;

///
/// SingleExpr
///
/// A whole-sequence reduction: not a `Sequence` itself but a terminal
/// node executed with `execute`. Named so explain output reads
/// `Single(count)` rather than an anonymous closure.
///

pub struct SingleExpr<T, R> {
    pub(super) source: Arc<dyn Sequence<T>>,
    pub(super) name: &'static str,
    pub(super) reducer: Reducer<T, R>,
}

impl<T, R> Clone for SingleExpr<T, R> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            name: self.name,
            reducer: Arc::clone(&self.reducer),
        }
    }
}

impl<T, R> SingleExpr<T, R> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn shape(&self) -> ExprShape {
        ExprShape::node("Single", self.name, vec![self.source.shape()])
    }
}

/// Reduce `source` with a named reducer.
pub fn single<T, R, F>(source: Arc<dyn Sequence<T>>, name: &'static str, reducer: F) -> SingleExpr<T, R>
where
    F: for<'a> Fn(ValueStream<'a, T>) -> BoxFuture<'a, Result<R, Error>> + Send + Sync + 'static,
{
    SingleExpr {
        source,
        name,
        reducer: Arc::new(reducer),
    }
}

fn reduce_count<'a, T>(mut stream: ValueStream<'a, T>) -> BoxFuture<'a, Result<usize, Error>>
where
    T: Send + 'static,
{
    use futures::{FutureExt, StreamExt};

    async move {
        let mut total = 0usize;
        while let Some(item) = stream.next().await {
            item?;
            total += 1;
        }
        Ok(total)
    }
    .boxed()
}

fn reduce_first<'a, T>(mut stream: ValueStream<'a, T>) -> BoxFuture<'a, Result<Option<T>, Error>>
where
    T: Send + 'static,
{
    use futures::{FutureExt, StreamExt};

    async move { stream.next().await.transpose() }.boxed()
}

fn reduce_any<'a, T>(mut stream: ValueStream<'a, T>) -> BoxFuture<'a, Result<bool, Error>>
where
    T: Send + 'static,
{
    use futures::{FutureExt, StreamExt};

    async move { Ok(stream.next().await.transpose()?.is_some()) }.boxed()
}

/// Count the elements of `source`, draining it fully.
pub fn count<T>(source: Arc<dyn Sequence<T>>) -> SingleExpr<T, usize>
where
    T: Send + 'static,
{
    single(source, "count", reduce_count)
}

/// First element of `source`, if any. Stops reading after one element.
pub fn first<T>(source: Arc<dyn Sequence<T>>) -> SingleExpr<T, Option<T>>
where
    T: Send + 'static,
{
    single(source, "first", reduce_first)
}

/// Whether `source` yields anything. Stops reading after one element.
pub fn any<T>(source: Arc<dyn Sequence<T>>) -> SingleExpr<T, bool>
where
    T: Send + 'static,
{
    single(source, "any", reduce_any)
}
