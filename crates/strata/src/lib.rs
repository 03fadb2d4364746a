//! ## Crate layout
//! - `core::slice`: immutable byte slices plus sequential writer/reader.
//! - `core::tuple`: order-preserving tuple encoding.
//! - `core::codec`: typed key codecs, identity/bind/composite.
//! - `core::selector`: key selectors and selector ranges.
//! - `core::store`: the snapshot read surface and an in-memory backend.
//! - `core::index`: secondary-index handles and lookup lowering.
//! - `core::query`: the expression tree and its async execution.
//!
//! The `prelude` module mirrors `strata_core::prelude` for everyday use.

pub use strata_core as core;

pub use strata_core::{
    error::Error, MAX_KEY_BYTES, MAX_VALUE_BYTES,
};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use strata_core::prelude::*;
}
