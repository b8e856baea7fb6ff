//! Offer critique from the oracle reply

use shared_types::Critique;

use crate::response::CritiqueReply;

pub const CRITIQUE_UNCONFIGURED: &str =
    "AI critique not available. Configure ANTHROPIC_API_KEY to enable.";
pub const CRITIQUE_FAILED: &str = "AI critique failed";

/// Star rating clamped to 1-5; accepts numbers and numeric strings
pub fn clamp_rating(value: &serde_json::Value) -> Option<u8> {
    let rating = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !rating.is_finite() {
        return None;
    }
    Some(rating.round().clamp(1.0, 5.0) as u8)
}

pub fn critique_from_reply(reply: CritiqueReply) -> Critique {
    Critique {
        available: true,
        rating: reply.rating.as_ref().and_then(clamp_rating),
        missing_clauses: reply.missing_clauses,
        risks: reply.risks,
        suggestions: reply.suggestions,
        summary: reply.summary,
        message: None,
    }
}
