use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error taxonomy for the encoding and query layer.
///
/// Construction-time failures (`InvalidArgument`, `CapacityExceeded`) are
/// detected before any store I/O is issued and leave no partially-built
/// encoder or expression tree behind. Execution-time failures abort the
/// whole running sequence; nothing in this layer retries.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// Malformed construction input. Always detected at encoder or
    /// expression-tree construction time, never mid-execution.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An encoded key or value exceeds the store's size limit.
    /// Detected before any I/O is issued.
    #[error("{what} is too big ({len} > {max})")]
    CapacityExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// Bytes read from the store could not be decoded into the expected
    /// type. Never coerced to a default value.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A reader attempted to consume more bytes than remain in a slice.
    /// A programming-contract violation; propagated, never retried.
    #[error("read of {requested} bytes exceeds remaining {remaining}")]
    OutOfBounds { requested: usize, remaining: usize },

    /// The execution context's cancellation signal fired at a suspension
    /// point. Distinguished from decode/capacity failures so callers can
    /// tell "query aborted" from "query failed".
    #[error("query execution was cancelled")]
    Cancelled,

    /// Failure reported by the underlying store collaborator.
    #[error("store error: {message}")]
    Store { message: String },
}

impl Error {
    /// Construct an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Construct a store-origin error from a collaborator failure.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// True if this error is the cancellation signal.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Re-attribute a decode failure to the composite part it happened
    /// in. Scalar codecs decode one element at a time and report index
    /// 0; composites rewrite that to the part's own position.
    #[must_use]
    pub(crate) fn at_element(self, element: usize) -> Self {
        match self {
            Self::Decode(err) => Self::Decode(err.at_element(element)),
            other => other,
        }
    }
}

///
/// DecodeError
///
/// Structured decode failure carrying enough context to diagnose which
/// sub-element of an encoded key or value was malformed.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("unknown type tag 0x{tag:02x} at element {element}")]
    UnknownTag { tag: u8, element: usize },

    #[error("truncated encoding at element {element} while reading {context}")]
    Truncated {
        element: usize,
        context: &'static str,
    },

    #[error("invalid payload at element {element}: {context}")]
    InvalidPayload {
        element: usize,
        context: &'static str,
    },

    #[error("element {element} is not valid UTF-8 text")]
    InvalidUtf8 { element: usize },

    #[error("{remaining} trailing bytes after a complete decode")]
    TrailingBytes { remaining: usize },

    #[error("encoded key does not start with the expected {context} prefix")]
    MissingPrefix { context: &'static str },
}

impl DecodeError {
    /// Override the reported element index; variants that carry no
    /// element position pass through unchanged.
    #[must_use]
    pub(crate) const fn at_element(self, element: usize) -> Self {
        match self {
            Self::UnknownTag { tag, .. } => Self::UnknownTag { tag, element },
            Self::Truncated { context, .. } => Self::Truncated { element, context },
            Self::InvalidPayload { context, .. } => Self::InvalidPayload { element, context },
            Self::InvalidUtf8 { .. } => Self::InvalidUtf8 { element },
            other => other,
        }
    }
}
