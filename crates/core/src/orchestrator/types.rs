//! Types for the search orchestrator.

use serde::Serialize;

use crate::product::Product;
use crate::searcher::{SearchError, SearchErrorKind};
use crate::validation::RejectReason;

/// Message shown for any failed search. Error kinds are kept internal.
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong while searching. Please try again.";

/// What the presentation layer should render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Success {
        in_stock: Vec<Product>,
        out_of_stock: Vec<Product>,
    },
    Error {
        message: String,
        kind: SearchErrorKind,
    },
}

impl SearchState {
    pub(crate) fn failed(error: &SearchError) -> Self {
        SearchState::Error {
            message: SEARCH_FAILED_MESSAGE.to_string(),
            kind: error.kind(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    /// In-stock products; empty outside `Success`.
    pub fn in_stock(&self) -> &[Product] {
        match self {
            SearchState::Success { in_stock, .. } => in_stock,
            _ => &[],
        }
    }

    /// Out-of-stock products; empty outside `Success`.
    pub fn out_of_stock(&self) -> &[Product] {
        match self {
            SearchState::Success { out_of_stock, .. } => out_of_stock,
            _ => &[],
        }
    }

    pub fn has_results(&self) -> bool {
        !self.in_stock().is_empty() || !self.out_of_stock().is_empty()
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// How a call to `submit` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; search state untouched.
    Rejected(RejectReason),
    /// The result of this attempt is now the published state.
    Applied { sequence: u64 },
    /// A newer attempt was issued before this one finished; result dropped.
    Superseded { sequence: u64 },
}

impl SubmitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SubmitOutcome::Applied { .. })
    }
}
