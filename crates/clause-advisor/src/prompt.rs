//! Prompt builders for clause selection and offer critique

use clause_engine::ClauseLibrary;
use shared_types::{group_thousands, ClauseRecord, ShipmentContext};

/// Output cap for clause selection
pub const SELECTION_MAX_TOKENS: u32 = 2000;
/// Output cap for offer critique
pub const CRITIQUE_MAX_TOKENS: u32 = 1500;

const DOMAIN_RULES: &str = "\
- For DANUBE ports: Include Sulina/Bystroe passage, air raids, combined demurrage/detention
- For POC ports: Include JCC inspection, ERWI, war insurance clauses
- For Egypt discharge: Include NOR hours (08:00-12:00 Sun-Thu), SHINC/FHINC, sampling
- For grain cargo: Include previous cargo, trimming, STW verification clauses
- Always include: GSB(A), ISM/ISPS, arbitration, proforma reference";

const SELECTION_FORMAT: &str = r#"{
  "selected_clauses": [
    {"clause_id": "...", "reason": "..."}
  ],
  "warnings": ["..."],
  "recommendations": ["..."]
}"#;

const CRITIQUE_FORMAT: &str = r#"{
  "rating": 4,
  "missing_clauses": ["..."],
  "risks": ["..."],
  "suggestions": ["..."],
  "summary": "..."
}"#;

/// `- PORT-DAN-001: Sulina passage [PORT/Ukraine-Danube] (MANDATORY) (CHRTR REVIEW)`
pub fn clause_line(clause: &ClauseRecord) -> String {
    let mut line = format!(
        "- {}: {} [{}/{}]",
        clause.clause_id,
        clause.title,
        clause.category,
        clause.subcategory_or_general()
    );
    if clause.is_mandatory {
        line.push_str(" (MANDATORY)");
    }
    if clause.requires_review {
        line.push_str(" (CHRTR REVIEW)");
    }
    line
}

pub fn selection_prompt(context: &ShipmentContext, library: &ClauseLibrary) -> String {
    let mut shipment = format!(
        "- Load Port: {} ({} port in Ukraine)\n\
         - Discharge Port: {} ({})\n\
         - Cargo: {} ({} category)\n\
         - Quantity: {} MT",
        context.load_port,
        context.port_type,
        context.discharge_port,
        context.discharge_country,
        context.cargo,
        context.cargo_category,
        group_thousands(context.quantity)
    );
    if let Some(charterer) = &context.charterer {
        shipment.push_str(&format!("\n- Charterer: {}", charterer));
    }

    let clauses: Vec<String> = library.iter().map(clause_line).collect();

    format!(
        "You are an expert maritime freight broker assistant. \
         Your task is to select appropriate contract clauses for a firm offer.\n\n\
         ## Context\n{shipment}\n\n\
         ## Available Clauses (Master Library)\n{clauses}\n\n\
         ## Your Task\n\
         1. Select all relevant clauses for this shipment\n\
         2. Explain WHY each clause is needed\n\
         3. Flag any clauses that require charterer review\n\
         4. Warn about any missing important clauses or potential risks\n\n\
         ## Important Rules\n{rules}\n\n\
         ## Response Format\n\
         Return a JSON object with:\n{format}\n",
        shipment = shipment,
        clauses = clauses.join("\n"),
        rules = DOMAIN_RULES,
        format = SELECTION_FORMAT,
    )
}

pub fn critique_prompt(offer_text: &str, context: &ShipmentContext) -> String {
    format!(
        "You are an expert maritime freight broker reviewing a firm offer.\n\n\
         ## Offer Context\n\
         - Route: {load} -> {discharge}\n\
         - Cargo: {cargo} ({quantity} MT)\n\
         - Port Type: {port_type}\n\n\
         ## Offer Text\n{offer}\n\n\
         ## Your Task\n\
         Review this offer and provide:\n\
         1. Missing clauses that should be included\n\
         2. Potential risks or ambiguities\n\
         3. Suggestions for improvement\n\
         4. Overall assessment (1-5 stars)\n\n\
         Be specific and practical. Focus on issues that could cause problems during execution.\n\n\
         Return JSON:\n{format}\n",
        load = context.load_port,
        discharge = context.discharge_port,
        cargo = context.cargo,
        quantity = group_thousands(context.quantity),
        port_type = context.port_type,
        offer = offer_text,
        format = CRITIQUE_FORMAT,
    )
}
