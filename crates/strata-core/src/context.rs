//! Module: context
//! Responsibility: per-execution state shared by every operator in a
//! query — the snapshot, the cancellation token, and the iteration hint.
//! Does not own: snapshot implementations or operator logic.
//! Boundary: contexts are created by callers and borrowed by streams for
//! the duration of one execution.

use crate::{error::Error, store::ReadSnapshot};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Batch size used when a query expects to drain its sources.
const FULL_SCAN_BATCH: usize = 256;

/// Upper bound on a caller-supplied exact batch size.
const MAX_EXACT_BATCH: usize = 4096;

///
/// IterationHint
///
/// Caller's expectation of how much of the result will be consumed.
/// Operators size their read batches from it; it never changes which
/// rows a query yields, only how they are fetched.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum IterationHint {
    /// The whole result set will be consumed.
    #[default]
    FullScan,

    /// Only the first row matters (`first`, `any`).
    FirstOnly,

    /// Roughly this many rows will be consumed.
    Exact(usize),
}

impl IterationHint {
    /// Rows to request per snapshot read.
    #[must_use]
    pub const fn batch_size(self) -> usize {
        match self {
            Self::FullScan => FULL_SCAN_BATCH,
            Self::FirstOnly => 1,
            Self::Exact(n) => {
                if n == 0 {
                    1
                } else if n > MAX_EXACT_BATCH {
                    MAX_EXACT_BATCH
                } else {
                    n
                }
            }
        }
    }
}

///
/// ExecutionContext
///
/// Everything one query execution reads its environment through. Cloning
/// is cheap; clones share the snapshot and the cancellation token, so
/// cancelling the token aborts every stream started from any clone.
///

#[derive(Clone)]
pub struct ExecutionContext {
    snapshot: Arc<dyn ReadSnapshot>,
    cancel: CancellationToken,
    hint: IterationHint,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(snapshot: Arc<dyn ReadSnapshot>) -> Self {
        Self {
            snapshot,
            cancel: CancellationToken::new(),
            hint: IterationHint::FullScan,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: IterationHint) -> Self {
        self.hint = hint;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> &dyn ReadSnapshot {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub const fn hint(&self) -> IterationHint {
        self.hint
    }

    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Checked by operators before every store read so a cancelled query
    /// stops at the next batch boundary.
    pub fn check_cancelled(&self) -> Result<(), Error> {
        if self.cancel.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
