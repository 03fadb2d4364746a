//! Module: query
//! Responsibility: the typed query expression tree and its pull-based
//! async execution.
//! Does not own: key encoding (codec), selector lowering (index), or
//! snapshot reads (store).
//! Boundary: expressions are immutable descriptions; all I/O happens
//! inside the streams they start.

pub mod expr;

mod exec;


pub use expr::{
    any, constant, constants, count, filter, first, intersect, lookup, range, range_starts_with,
    sequence, single, transform, ConstantExpr, FilterExpr, IndexLookupExpr, IntersectExpr,
    RangeExpr, SingleExpr, SourceExpr, TransformExpr,
};

use crate::{context::ExecutionContext, error::Error};
use futures::stream::BoxStream;
use std::fmt;

/// Pull-based stream of query results. Errors are terminal: after an
/// `Err` item the stream yields nothing further.
pub type ValueStream<'a, T> = BoxStream<'a, Result<T, Error>>;

///
/// Sequence
///
/// A node in the query expression tree, yielding values of one type.
/// Describing a sequence performs no I/O; `stream` starts one execution
/// against the context's snapshot, and a sequence may be streamed any
/// number of times.
///

pub trait Sequence<T>: Send + Sync {
    /// Structural description for diagnostics and explain output.
    fn shape(&self) -> ExprShape;

    /// Start one execution of this sequence.
    fn stream<'a>(&'a self, ctx: &'a ExecutionContext) -> ValueStream<'a, T>;
}

///
/// ExprShape
///
/// Structural summary of an expression tree: node kind, a short detail
/// string, and child shapes. Rendered as an indented tree by `Display`.
///

#[derive(Clone, Debug)]
pub struct ExprShape {
    kind: &'static str,
    detail: String,
    children: Vec<ExprShape>,
}

impl ExprShape {
    #[must_use]
    pub fn leaf(kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn node(kind: &'static str, detail: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            children,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        if self.detail.is_empty() {
            writeln!(f, "{}", self.kind)?;
        } else {
            writeln!(f, "{}({})", self.kind, self.detail)?;
        }
        for child in &self.children {
            child.render(f, depth + 1)?;
        }

        Ok(())
    }
}

impl fmt::Display for ExprShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
