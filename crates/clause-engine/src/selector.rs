//! Rule-based clause selection
//!
//! Deterministic and always available; this is both the ground truth for the
//! AI-assisted path and its fallback.

use shared_types::{SelectedClause, SelectionMethod, SelectionResult, ShipmentContext};
use tracing::debug;

use crate::library::ClauseLibrary;
use crate::matcher::{ConditionMatcher, MatchVerdict};

pub const RULE_BASED_EXPLANATION: &str =
    "Clauses selected by rule-based matching on port type, country, and cargo category.";

/// Select every library clause whose conditions match, in library order
pub fn rule_based_selection(
    library: &ClauseLibrary,
    matcher: &ConditionMatcher,
    context: &ShipmentContext,
) -> SelectionResult {
    let clauses: Vec<SelectedClause> = library
        .iter()
        .filter_map(|clause| match matcher.evaluate(clause, context) {
            MatchVerdict::Matched { reason, .. } => Some(SelectedClause::new(clause.clone(), reason)),
            MatchVerdict::Excluded => None,
        })
        .collect();

    debug!(
        selected = clauses.len(),
        library = library.len(),
        "rule-based selection for {} -> {}",
        context.load_port,
        context.discharge_port
    );

    SelectionResult::new(SelectionMethod::RuleBased, clauses, RULE_BASED_EXPLANATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::PortType;

    const LIBRARY: &str = r#"{
        "version": "test",
        "clauses": [
            {"clause_id": "PORT-DAN-001", "title": "Sulina", "text": "SULINA PASSAGE",
             "category": "PORT", "conditions": {"port_type": "DANUBE"}},
            {"clause_id": "PORT-POC-001", "title": "JCC", "text": "JCC INSPECTION",
             "category": "PORT", "conditions": {"port_type": "POC"}},
            {"clause_id": "COUNTRY-EGY-001", "title": "SHINC", "text": "SHINC",
             "category": "COUNTRY", "conditions": {"discharge_country": "Egypt"}},
            {"clause_id": "CARGO-GRN-001", "title": "Trimming", "text": "TRIMMING",
             "category": "CARGO", "conditions": {"cargo_category": "grain"}},
            {"clause_id": "LEGAL-001", "title": "Arbitration", "text": "LONDON ARBITRATION",
             "category": "LEGAL", "is_mandatory": true},
            {"clause_id": "LEGAL-002", "title": "Optional", "text": "OPTIONAL",
             "category": "LEGAL"}
        ]
    }"#;

    fn context(port_type: PortType, country: &str, category: &str) -> ShipmentContext {
        ShipmentContext {
            load_port: "Reni".to_string(),
            discharge_port: "Alexandria".to_string(),
            cargo: "Corn".to_string(),
            quantity: 25_000,
            port_type,
            discharge_country: country.to_string(),
            cargo_category: category.to_string(),
            charterer: None,
        }
    }

    #[test]
    fn test_danube_egypt_grain_selection() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();
        let result = rule_based_selection(
            &library,
            &ConditionMatcher::new(),
            &context(PortType::Danube, "Egypt", "grain"),
        );

        assert_eq!(result.method, SelectionMethod::RuleBased);
        assert_eq!(
            result.clause_ids(),
            vec!["PORT-DAN-001", "COUNTRY-EGY-001", "CARGO-GRN-001", "LEGAL-001"]
        );
        assert!(result.clauses.iter().all(|c| !c.reason.is_empty()));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_poc_excludes_danube_clause() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();
        let result = rule_based_selection(
            &library,
            &ConditionMatcher::new(),
            &context(PortType::Poc, "Turkey", "steel"),
        );
        assert_eq!(result.clause_ids(), vec!["PORT-POC-001", "LEGAL-001"]);
    }

    #[test]
    fn test_selected_clause_copied_verbatim() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();
        let result = rule_based_selection(
            &library,
            &ConditionMatcher::new(),
            &context(PortType::Danube, "Egypt", "grain"),
        );
        let sulina = &result.clauses[0];
        assert_eq!(&sulina.clause, library.get("PORT-DAN-001").unwrap());
        assert_eq!(sulina.reason, "Required for DANUBE ports");
    }

    fn any_port_type() -> impl Strategy<Value = PortType> {
        prop_oneof![
            Just(PortType::Danube),
            Just(PortType::Poc),
            Just(PortType::Unknown),
        ]
    }

    proptest! {
        /// Property: selection is a pure function of (library, context)
        #[test]
        fn selection_is_deterministic(
            port_type in any_port_type(),
            country in "[A-Za-z]{0,12}",
            category in "[a-z]{0,10}",
        ) {
            let library = ClauseLibrary::from_json(LIBRARY).unwrap();
            let matcher = ConditionMatcher::new();
            let ctx = context(port_type, &country, &category);

            let first = rule_based_selection(&library, &matcher, &ctx);
            let second = rule_based_selection(&library, &matcher, &ctx);
            prop_assert_eq!(first, second);
        }

        /// Property: unconditional mandatory clauses are selected for every context
        #[test]
        fn mandatory_clause_always_selected(
            port_type in any_port_type(),
            country in "[A-Za-z ]{0,12}",
            category in "[a-z]{0,10}",
        ) {
            let library = ClauseLibrary::from_json(LIBRARY).unwrap();
            let result = rule_based_selection(
                &library,
                &ConditionMatcher::new(),
                &context(port_type, &country, &category),
            );
            prop_assert!(result.contains("LEGAL-001"));
            prop_assert!(!result.contains("LEGAL-002"));
        }
    }
}
