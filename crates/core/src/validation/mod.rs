//! Query validation.
//!
//! A [`QueryValidator`] gates free-text input before it reaches the search
//! backend. The harmful-term list lives in a [`ContentPolicy`] value so it
//! can be replaced from configuration without touching the rule order.

mod policy;
mod validator;

pub use policy::{ContentPolicy, MatchMode, DEFAULT_HARMFUL_TERMS};
pub use validator::{validate, QueryValidator, RejectReason, ValidationOutcome, MAX_QUERY_CHARS};
