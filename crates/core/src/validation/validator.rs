use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, PolicyConfig};

use super::policy::ContentPolicy;

/// Longest accepted query, in characters.
pub const MAX_QUERY_CHARS: usize = 100;

/// Characters that may not appear anywhere in a query.
const INVALID_CHARS: &[char] = &['<', '>', '{', '}', '[', ']', '\\'];

static DEFAULT_VALIDATOR: Lazy<QueryValidator> = Lazy::new(QueryValidator::default);

/// Why a query was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("Search query cannot be empty")]
    Empty,
    #[error("Search query cannot be longer than {max} characters")]
    TooLong { max: usize },
    #[error("Query cannot contain only numbers")]
    NumericOnly,
    #[error("Query cannot contain only symbols")]
    SymbolsOnly,
    #[error("Query contains inappropriate words")]
    HarmfulContent,
    #[error("Query contains invalid characters")]
    InvalidCharacters,
}

impl RejectReason {
    /// Stable short code, suitable for metric labels and tests.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::Empty => "empty",
            RejectReason::TooLong { .. } => "too long",
            RejectReason::NumericOnly => "numeric-only",
            RejectReason::SymbolsOnly => "symbols-only",
            RejectReason::HarmfulContent => "harmful content",
            RejectReason::InvalidCharacters => "invalid characters",
        }
    }
}

/// Result of validating a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(reason) => Some(*reason),
        }
    }

    pub fn into_result(self) -> Result<(), RejectReason> {
        match self {
            ValidationOutcome::Accepted => Ok(()),
            ValidationOutcome::Rejected(reason) => Err(reason),
        }
    }
}

/// Gatekeeper for free-text queries.
///
/// Rules run in a fixed order and the first failing rule decides the
/// outcome:
/// 1. blank after trimming
/// 2. longer than the character limit
/// 3. digits only (whitespace ignored)
/// 4. no letter or digit at all (whitespace ignored)
/// 5. contains a content policy term
/// 6. contains one of `< > { } [ ] \`
#[derive(Debug, Clone)]
pub struct QueryValidator {
    policy: ContentPolicy,
    max_chars: usize,
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new(ContentPolicy::default())
    }
}

impl QueryValidator {
    pub fn new(policy: ContentPolicy) -> Self {
        Self {
            policy,
            max_chars: MAX_QUERY_CHARS,
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(ContentPolicy::from_config(config)?).with_max_chars(config.max_query_chars))
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn policy(&self) -> &ContentPolicy {
        &self.policy
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn validate(&self, input: &str) -> ValidationOutcome {
        if input.trim().is_empty() {
            return ValidationOutcome::Rejected(RejectReason::Empty);
        }

        if input.chars().count() > self.max_chars {
            return ValidationOutcome::Rejected(RejectReason::TooLong {
                max: self.max_chars,
            });
        }

        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();

        if compact.chars().all(|c| c.is_ascii_digit()) {
            return ValidationOutcome::Rejected(RejectReason::NumericOnly);
        }

        // ASCII letters and digits only; "é!!" counts as symbols.
        if !compact.chars().any(|c| c.is_ascii_alphanumeric()) {
            return ValidationOutcome::Rejected(RejectReason::SymbolsOnly);
        }

        if self.policy.is_violated_by(input) {
            return ValidationOutcome::Rejected(RejectReason::HarmfulContent);
        }

        if input.contains(INVALID_CHARS) {
            return ValidationOutcome::Rejected(RejectReason::InvalidCharacters);
        }

        ValidationOutcome::Accepted
    }
}

/// Validate with the built-in policy and length limit.
pub fn validate(input: &str) -> ValidationOutcome {
    DEFAULT_VALIDATOR.validate(input)
}
