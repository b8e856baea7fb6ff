//! Cross-validation of oracle clause picks against the library

use clause_engine::ClauseLibrary;
use shared_types::{SelectedClause, SelectionMethod, SelectionResult};
use tracing::debug;

use crate::error::AdvisorError;
use crate::response::SelectionReply;

pub const AI_EXPLANATION: &str =
    "Clauses selected by AI based on route, cargo, and maritime best practices.";
pub const UNCONFIGURED_EXPLANATION: &str = "AI not available. Using rule-based clause selection based on port type, country, and cargo category.";
pub const FALLBACK_EXPLANATION: &str = "AI request failed. Using rule-based clause selection.";
pub const FALLBACK_WARNING: &str = "AI service temporarily unavailable";
/// Reason used when the oracle gives none
pub const AI_DEFAULT_REASON: &str = "Selected by AI";

/// Keep picks that exist in the library, enriched with the library record.
/// Unknown or non-string ids are dropped; repeated ids keep their first
/// occurrence.
pub fn enrich_selection(
    reply: SelectionReply,
    library: &ClauseLibrary,
) -> Result<SelectionResult, AdvisorError> {
    let mut clauses: Vec<SelectedClause> = Vec::new();

    for pick in reply.selected_clauses {
        let Some(clause_id) = pick.clause_id() else {
            debug!("oracle pick without a string clause id: {:?}", pick.clause_id);
            continue;
        };
        let Some(clause) = library.get(clause_id) else {
            debug!("oracle picked unknown clause {}", clause_id);
            continue;
        };
        if clauses.iter().any(|c| c.clause_id() == clause_id) {
            continue;
        }

        let reason = pick.reason().unwrap_or(AI_DEFAULT_REASON);
        clauses.push(SelectedClause::new(clause.clone(), reason));
    }

    if clauses.is_empty() {
        return Err(AdvisorError::NoValidClauses);
    }

    Ok(SelectionResult {
        method: SelectionMethod::Ai,
        clauses,
        explanation: AI_EXPLANATION.to_string(),
        warnings: reply.warnings,
        recommendations: reply.recommendations,
    })
}
