//! Core runtime for Strata: ordered byte slices, order-preserving key
//! codecs, key selectors, snapshot reads, and the typed query engine,
//! with the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod codec;
pub mod context;
pub mod error;
pub mod index;
pub mod query;
pub mod selector;
pub mod slice;
pub mod store;
pub mod tuple;

///
/// CONSTANTS
///

/// Maximum encoded key size accepted by encoders.
///
/// Mirrors the key limit of the backing store so oversized keys fail at
/// encode time instead of surfacing as a store error mid-transaction.
pub const MAX_KEY_BYTES: usize = 10_000;

/// Maximum value size accepted before writes.
pub const MAX_VALUE_BYTES: usize = 100_000;

///
/// Prelude
///
/// Prelude contains the vocabulary of everyday use: slices, tuples,
/// codecs, selectors, and the query constructors. Store backends and
/// error internals stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        codec::{
            bind, composite2, composite3, composite4, composite5, composite6, BoolCodec,
            BytesCodec, IdentityCodec, IntCodec, KeyCodec, TextCodec,
        },
        context::{ExecutionContext, IterationHint},
        error::Error,
        index::{CompareOp, Index},
        query::{
            any, constant, constants, count, filter, first, intersect, lookup, range, range_starts_with,
            sequence, single, transform, Sequence,
        },
        selector::{KeySelector, KeySelectorPair},
        slice::{Slice, SliceReader, SliceWriter},
        store::{KeyValue, RangeOptions, ReadSnapshot},
        tuple::{Element, Tuple},
    };
}
