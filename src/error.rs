//! Error type shared by every operator.
//!
//! Operators never retry and never substitute a default for a failed
//! evaluation: the first error raised while a terminal call pulls its input is
//! returned from that call.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

/// Failure raised while evaluating a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A required argument was missing: a classifier got no value to
    /// canonicalize, or an ordering was requested without any sort level.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation has no identity for an empty input.
    #[error("sequence contains no elements ({op} requires at least one)")]
    EmptySequence {
        /// Name of the operation that failed.
        op: &'static str,
    },

    /// A fixed-width accumulation left its representable range.
    #[error("arithmetic overflow in {op}")]
    ArithmeticOverflow {
        /// Name of the operation that failed.
        op: &'static str,
    },

    /// A caller-supplied fallible selector returned an error.
    #[error("selector failed: {0}")]
    Selector(#[from] anyhow::Error),
}

impl QueryError {
    /// Build an [`QueryError::InvalidArgument`] from any message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn empty(op: &'static str) -> Self {
        Self::EmptySequence { op }
    }

    pub(crate) fn overflow(op: &'static str) -> Self {
        Self::ArithmeticOverflow { op }
    }

    /// `true` for [`QueryError::EmptySequence`].
    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, Self::EmptySequence { .. })
    }

    /// `true` for [`QueryError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// `true` for [`QueryError::ArithmeticOverflow`].
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::ArithmeticOverflow { .. })
    }
}
