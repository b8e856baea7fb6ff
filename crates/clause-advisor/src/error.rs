//! Error types for oracle calls
//!
//! None of these reach callers of the selector or critique: every failure
//! is absorbed into the rule-based fallback or an unavailable critique.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// No credential, or the oracle is otherwise not set up
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Oracle request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Oracle did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Oracle API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Oracle returned an empty response")]
    EmptyResponse,

    /// No structured object could be recovered from the reply
    #[error("Could not parse oracle response: {0}")]
    ResponseParse(String),

    #[error("Oracle selected no clauses that exist in the library")]
    NoValidClauses,
}
