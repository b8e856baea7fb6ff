//! AI-assisted clause selection and offer critique
//!
//! [`ClauseAdvisor`] asks an oracle to pick clauses and validates the answer
//! against the library. Any failure falls back to rule-based selection, so
//! the public operations never return an error.

pub mod anthropic;
pub mod critique;
pub mod error;
pub mod oracle;
pub mod prompt;
pub mod response;
pub mod selector;

#[cfg(test)]
mod testing;

use std::sync::Arc;
use std::time::Duration;

use clause_engine::ClauseEngine;
use shared_types::{Critique, SelectionMethod, SelectionResult, ShipmentContext};
use tracing::{info, warn};

pub use anthropic::AnthropicClient;
pub use error::AdvisorError;
pub use oracle::{Oracle, OracleHandle};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ClauseAdvisor {
    engine: ClauseEngine,
    oracle: OracleHandle,
    timeout: Duration,
}

impl ClauseAdvisor {
    pub fn new(engine: ClauseEngine, oracle: OracleHandle) -> Self {
        Self {
            engine,
            oracle,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound on a single oracle call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn oracle(&self) -> &OracleHandle {
        &self.oracle
    }

    pub fn is_configured(&self) -> bool {
        self.oracle.is_configured()
    }

    /// AI-assisted selection with rule-based fallback
    ///
    /// - unconfigured oracle: method `rule-based`, explanation says AI is off
    /// - oracle failure of any kind: method `rule-based-fallback` plus a warning
    pub async fn select(&self, context: &ShipmentContext) -> SelectionResult {
        let oracle = match &self.oracle {
            OracleHandle::Configured(oracle) => oracle,
            OracleHandle::Unconfigured { reason } => {
                info!("oracle not configured ({}), using rule-based selection", reason);
                let mut result = self.engine.select(context);
                result.explanation = selector::UNCONFIGURED_EXPLANATION.to_string();
                return result;
            }
        };

        match self.ai_selection(oracle, context).await {
            Ok(result) => {
                info!(
                    model = oracle.model_name(),
                    clauses = result.clauses.len(),
                    "AI clause selection for {} -> {}",
                    context.load_port,
                    context.discharge_port
                );
                result
            }
            Err(err) => {
                warn!(error = %err, "AI clause selection failed, falling back to rules");
                let mut result = self.engine.select(context);
                result.method = SelectionMethod::RuleBasedFallback;
                result.explanation = selector::FALLBACK_EXPLANATION.to_string();
                result.with_warning(selector::FALLBACK_WARNING)
            }
        }
    }

    /// Oracle review of a finished offer; never fails
    pub async fn critique(&self, offer_text: &str, context: &ShipmentContext) -> Critique {
        let OracleHandle::Configured(oracle) = &self.oracle else {
            return Critique::unavailable(critique::CRITIQUE_UNCONFIGURED);
        };

        let prompt = prompt::critique_prompt(offer_text, context);
        let reply = self
            .ask(oracle, &prompt, prompt::CRITIQUE_MAX_TOKENS)
            .await
            .and_then(|text| response::parse_reply(&text));

        match reply {
            Ok(reply) => critique::critique_from_reply(reply),
            Err(err) => {
                warn!(error = %err, "AI offer critique failed");
                Critique::unavailable(critique::CRITIQUE_FAILED)
            }
        }
    }

    async fn ai_selection(
        &self,
        oracle: &Arc<dyn Oracle>,
        context: &ShipmentContext,
    ) -> Result<SelectionResult, AdvisorError> {
        let prompt = prompt::selection_prompt(context, self.engine.library());
        let text = self
            .ask(oracle, &prompt, prompt::SELECTION_MAX_TOKENS)
            .await?;
        let reply = response::parse_reply(&text)?;
        selector::enrich_selection(reply, self.engine.library())
    }

    /// One oracle call bounded by the advisor timeout
    async fn ask(
        &self,
        oracle: &Arc<dyn Oracle>,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, AdvisorError> {
        tokio::time::timeout(self.timeout, oracle.complete(prompt, max_tokens))
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout))?
    }
}
