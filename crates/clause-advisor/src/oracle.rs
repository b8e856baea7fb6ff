//! Oracle trait
//!
//! An oracle takes a single-turn prompt and an output cap and returns free
//! text. Availability is explicit: callers hold an [`OracleHandle`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::anthropic::AnthropicClient;
use crate::error::AdvisorError;

#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one prompt, return the raw text reply
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AdvisorError>;

    /// Get the model name for logging
    fn model_name(&self) -> &str;

    /// Get the provider name for logging
    fn provider_name(&self) -> &str;
}

#[derive(Clone)]
pub enum OracleHandle {
    Configured(Arc<dyn Oracle>),
    Unconfigured { reason: String },
}

impl OracleHandle {
    pub fn configured(oracle: impl Oracle + 'static) -> Self {
        OracleHandle::Configured(Arc::new(oracle))
    }

    pub fn unconfigured(reason: impl Into<String>) -> Self {
        OracleHandle::Unconfigured {
            reason: reason.into(),
        }
    }

    /// Anthropic client from `ANTHROPIC_API_KEY`; unconfigured without it
    pub fn from_env(timeout: Duration) -> Self {
        Self::from_client(AnthropicClient::from_env(timeout))
    }

    /// A client that could not be built leaves the oracle unconfigured
    fn from_client(client: Result<AnthropicClient, AdvisorError>) -> Self {
        match client {
            Ok(client) => Self::configured(client),
            Err(err) => Self::unconfigured(err.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, OracleHandle::Configured(_))
    }
}

impl fmt::Debug for OracleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleHandle::Configured(oracle) => write!(
                f,
                "Configured({} {})",
                oracle.provider_name(),
                oracle.model_name()
            ),
            OracleHandle::Unconfigured { reason } => write!(f, "Unconfigured({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_leave_oracle_unconfigured() {
        let handle = OracleHandle::from_client(Err(AdvisorError::Unavailable(
            "TLS backend cannot be initialized".to_string(),
        )));
        match handle {
            OracleHandle::Unconfigured { reason } => {
                assert!(reason.contains("TLS backend cannot be initialized"));
            }
            OracleHandle::Configured(_) => panic!("expected Unconfigured"),
        }
    }

    #[test]
    fn test_built_client_is_configured() {
        let client = AnthropicClient::with_model(
            "test-key".to_string(),
            "claude-3-haiku-20240307",
            Duration::from_millis(250),
        );
        let handle = OracleHandle::from_client(client);
        assert!(handle.is_configured());
        assert_eq!(format!("{:?}", handle), "Configured(Anthropic claude-3-haiku-20240307)");
    }
}
