//! Oracle test doubles

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdvisorError;
use crate::oracle::Oracle;

/// Always answers with the same text
pub struct CannedOracle {
    reply: String,
}

impl CannedOracle {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl Oracle for CannedOracle {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AdvisorError> {
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "canned"
    }

    fn provider_name(&self) -> &str {
        "test"
    }
}

/// Fails every call with an API error
pub struct FailingOracle;

#[async_trait]
impl Oracle for FailingOracle {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AdvisorError> {
        Err(AdvisorError::Api {
            status: 529,
            body: "overloaded".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "failing"
    }

    fn provider_name(&self) -> &str {
        "test"
    }
}

/// Never answers within any sane timeout
pub struct SlowOracle;

#[async_trait]
impl Oracle for SlowOracle {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AdvisorError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("{}".to_string())
    }

    fn model_name(&self) -> &str {
        "slow"
    }

    fn provider_name(&self) -> &str {
        "test"
    }
}

/// Records calls and output caps, then fails
pub struct CountingOracle {
    calls: Arc<AtomicUsize>,
    max_tokens: Arc<Mutex<Vec<u32>>>,
}

impl CountingOracle {
    pub fn failing() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            max_tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn max_tokens_seen(&self) -> Arc<Mutex<Vec<u32>>> {
        Arc::clone(&self.max_tokens)
    }
}

#[async_trait]
impl Oracle for CountingOracle {
    async fn complete(&self, _prompt: &str, max_tokens: u32) -> Result<String, AdvisorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.max_tokens.lock().unwrap().push(max_tokens);
        Err(AdvisorError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        "counting"
    }

    fn provider_name(&self) -> &str {
        "test"
    }
}
