//! Module: query::exec
//! Responsibility: `Sequence` implementations — the streams behind every
//! expression node.
//! Does not own: node construction or validation (expr.rs).
//! Boundary: all store reads in the crate originate from `scan` below;
//! cancellation is checked before each of them.

use crate::{
    context::ExecutionContext,
    error::Error,
    query::{
        expr::{
            ConstantExpr, FilterExpr, IndexLookupExpr, IntersectExpr, RangeExpr, SingleExpr,
            SourceExpr, TransformExpr,
        },
        ExprShape, Sequence, ValueStream,
    },
    selector::{KeySelector, KeySelectorPair},
    store::{KeyValue, RangeOptions},
};
use async_stream::try_stream;
use futures::{future, stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, trace};

/// Stream one selector range as successive snapshot reads, advancing the
/// range past the last returned key between batches. Owns its range so
/// the stream only borrows the context.
fn scan(ctx: &ExecutionContext, range: KeySelectorPair, options: RangeOptions) -> ValueStream<'_, KeyValue> {
    Box::pin(try_stream! {
        let batch_size = options
            .batch_size
            .unwrap_or_else(|| ctx.hint().batch_size());
        let mut range = range;
        let mut remaining = options.limit;
        let mut iteration = 1usize;

        debug!(
            reverse = options.reverse,
            limit = ?options.limit,
            batch_size,
            "starting range scan"
        );

        loop {
            ctx.check_cancelled()?;

            let mut read = options.clone();
            read.batch_size = Some(batch_size);
            read.limit = remaining;

            let batch = ctx.snapshot().read_range(&range, &read, iteration).await?;
            trace!(
                iteration,
                entries = batch.entries.len(),
                more = batch.more,
                "range batch"
            );

            let mut last_key = None;
            for entry in batch.entries {
                last_key = Some(entry.key.clone());
                yield entry;

                if let Some(left) = remaining.as_mut() {
                    *left -= 1;
                    if *left == 0 {
                        return;
                    }
                }
            }

            if !batch.more {
                return;
            }
            let Some(last_key) = last_key else {
                return;
            };

            // Resume strictly past what was already yielded.
            if options.reverse {
                range = KeySelectorPair::new(
                    range.begin().clone(),
                    KeySelector::first_greater_or_equal(last_key),
                );
            } else {
                range = KeySelectorPair::new(
                    KeySelector::first_greater_than(last_key),
                    range.end().clone(),
                );
            }
            iteration += 1;
        }
    })
}

impl<T> Sequence<T> for ConstantExpr<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn shape(&self) -> ExprShape {
        ExprShape::leaf("Constant", self.values.len().to_string())
    }

    fn stream<'a>(&'a self, _ctx: &'a ExecutionContext) -> ValueStream<'a, T> {
        let values: Vec<Result<T, Error>> = self.values.iter().cloned().map(Ok).collect();
        Box::pin(stream::iter(values))
    }
}

impl<T> Sequence<T> for SourceExpr<T>
where
    T: Send + Sync + 'static,
{
    fn shape(&self) -> ExprShape {
        ExprShape::leaf("Sequence", self.name)
    }

    fn stream<'a>(&'a self, _ctx: &'a ExecutionContext) -> ValueStream<'a, T> {
        (self.factory)()
    }
}

impl Sequence<KeyValue> for RangeExpr {
    fn shape(&self) -> ExprShape {
        ExprShape::leaf(
            "Range",
            format!(
                "{:?} .. {:?}{}",
                self.range.begin().key(),
                self.range.end().key(),
                if self.options.reverse { " reverse" } else { "" }
            ),
        )
    }

    fn stream<'a>(&'a self, ctx: &'a ExecutionContext) -> ValueStream<'a, KeyValue> {
        scan(ctx, self.range.clone(), self.options.clone())
    }
}

impl<TId, TValue> Sequence<(TValue, TId)> for IndexLookupExpr<TId, TValue>
where
    TId: Send + Sync + 'static,
    TValue: Send + Sync + 'static,
{
    fn shape(&self) -> ExprShape {
        ExprShape::leaf(
            "IndexLookup",
            format!("{} {}", self.index.name(), self.op.symbol()),
        )
    }

    fn stream<'a>(&'a self, ctx: &'a ExecutionContext) -> ValueStream<'a, (TValue, TId)> {
        Box::pin(try_stream! {
            let mut entries = scan(ctx, self.range.clone(), RangeOptions::new());
            while let Some(entry) = entries.next().await {
                let entry = entry?;
                yield self.index.decode_entry(&entry.key)?;
            }
        })
    }
}

impl<K, T> Sequence<T> for IntersectExpr<K, T>
where
    K: Ord + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    fn shape(&self) -> ExprShape {
        ExprShape::node(
            "Intersect",
            format!("{} sources", self.sources.len()),
            self.sources.iter().map(|source| source.shape()).collect(),
        )
    }

    // N-way merge join over sources already ordered by the extracted
    // key. Holds one lookahead element per source; the first source's
    // element is the one emitted on a match. Any exhausted source ends
    // the intersection.
    fn stream<'a>(&'a self, ctx: &'a ExecutionContext) -> ValueStream<'a, T> {
        Box::pin(try_stream! {
            let mut streams: Vec<_> = self.sources.iter().map(|source| source.stream(ctx)).collect();
            let mut heads = Vec::with_capacity(streams.len());
            let mut keys = Vec::with_capacity(streams.len());

            for stream in &mut streams {
                match stream.next().await {
                    Some(item) => {
                        let item = item?;
                        keys.push((self.key_fn)(&item));
                        heads.push(item);
                    }
                    None => return,
                }
            }

            loop {
                ctx.check_cancelled()?;

                let mut max_idx = 0;
                for idx in 1..keys.len() {
                    if keys[idx] > keys[max_idx] {
                        max_idx = idx;
                    }
                }

                // Pull every lagging source up to the current maximum.
                // A source overshooting the maximum restarts the round
                // with itself as the new target.
                let mut advanced = false;
                for idx in 0..keys.len() {
                    while keys[idx] < keys[max_idx] {
                        advanced = true;
                        match streams[idx].next().await {
                            Some(item) => {
                                let item = item?;
                                keys[idx] = (self.key_fn)(&item);
                                heads[idx] = item;
                            }
                            None => return,
                        }
                    }
                }
                if advanced {
                    continue;
                }

                // All sources agree on the key.
                yield heads.swap_remove(0);

                heads.clear();
                keys.clear();
                for stream in &mut streams {
                    match stream.next().await {
                        Some(item) => {
                            let item = item?;
                            keys.push((self.key_fn)(&item));
                            heads.push(item);
                        }
                        None => return,
                    }
                }
            }
        })
    }
}

impl<T, U> Sequence<U> for TransformExpr<T, U>
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
{
    fn shape(&self) -> ExprShape {
        ExprShape::node("Transform", "", vec![self.source.shape()])
    }

    fn stream<'a>(&'a self, ctx: &'a ExecutionContext) -> ValueStream<'a, U> {
        let map = Arc::clone(&self.map);
        Box::pin(self.source.stream(ctx).map_ok(move |value| map(value)))
    }
}

impl<T> Sequence<T> for FilterExpr<T>
where
    T: Send + Sync + 'static,
{
    fn shape(&self) -> ExprShape {
        ExprShape::node("Filter", "", vec![self.source.shape()])
    }

    fn stream<'a>(&'a self, ctx: &'a ExecutionContext) -> ValueStream<'a, T> {
        let predicate = Arc::clone(&self.predicate);
        Box::pin(
            self.source
                .stream(ctx)
                .try_filter(move |value| future::ready(predicate(value))),
        )
    }
}

impl<T, R> SingleExpr<T, R> {
    /// Run the reduction against one execution of the source.
    pub async fn execute(&self, ctx: &ExecutionContext) -> Result<R, Error> {
        ctx.check_cancelled()?;
        (self.reducer)(self.source.stream(ctx)).await
    }
}
