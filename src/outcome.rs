//! Explicit results of a backend read.
//!
//! The storefront shows the same "nothing to show" state whether a read came
//! back empty or failed. [`FetchOutcome`] keeps the two apart so failures can
//! still be recorded for diagnostics.

use tracing::error;

use crate::error::{PriceCompareError, Result};

#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// At least one row.
    Rows(Vec<T>),
    /// The read succeeded and matched nothing.
    Empty,
    /// The read failed.
    Failed(PriceCompareError),
}

impl<T> FetchOutcome<T> {
    /// Wrap a single-row lookup.
    pub fn from_single(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(row)) => Self::Rows(vec![row]),
            Ok(None) => Self::Empty,
            Err(e) => Self::Failed(e),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&PriceCompareError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }

    /// Collapse to the rows to display. A failure is logged and shown as
    /// no rows.
    pub fn into_rows(self) -> Vec<T> {
        match self {
            Self::Rows(rows) => rows,
            Self::Empty => Vec::new(),
            Self::Failed(e) => {
                error!(error = %e, "fetch failed");
                Vec::new()
            }
        }
    }
}

impl<T> From<Result<Vec<T>>> for FetchOutcome<T> {
    fn from(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => Self::Empty,
            Ok(rows) => Self::Rows(rows),
            Err(e) => Self::Failed(e),
        }
    }
}
