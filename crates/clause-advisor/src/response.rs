//! Oracle reply adapter
//!
//! Oracles answer in prose with a JSON object somewhere inside. Extraction
//! tries the greedy first-`{`-to-last-`}` span, then the first balanced
//! object, and fails with `ResponseParse` when neither deserializes.

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::AdvisorError;

lazy_static! {
    static ref GREEDY_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// One pick as the oracle wrote it; fields stay untyped so a single
/// malformed entry cannot fail the whole reply
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplyClause {
    #[serde(default)]
    pub clause_id: Option<serde_json::Value>,
    #[serde(default)]
    pub reason: Option<serde_json::Value>,
}

impl ReplyClause {
    /// Trimmed id when the oracle gave a string
    pub fn clause_id(&self) -> Option<&str> {
        self.clause_id
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
    }

    /// Non-blank reason when the oracle gave a string
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .filter(|r| !r.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SelectionReply {
    #[serde(default)]
    pub selected_clauses: Vec<ReplyClause>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CritiqueReply {
    /// Number or numeric string; clamped later
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
    #[serde(default)]
    pub missing_clauses: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// First `{ ... }` with balanced braces, ignoring braces inside strings
pub fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Recover a typed reply from free text
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, AdvisorError> {
    let greedy = GREEDY_OBJECT.find(text).map(|m| m.as_str());
    let balanced = balanced_object(text);

    let mut last_error = None;
    for candidate in [greedy, balanced].into_iter().flatten() {
        match serde_json::from_str(candidate) {
            Ok(reply) => return Ok(reply),
            Err(err) => last_error = Some(err.to_string()),
        }
    }

    Err(AdvisorError::ResponseParse(
        last_error.unwrap_or_else(|| "no JSON object in response".to_string()),
    ))
}
