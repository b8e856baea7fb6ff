//! Condition matcher: decides whether a single clause applies to a shipment

use shared_types::{ClauseRecord, ConditionKey, ShipmentContext};
use tracing::debug;

use crate::rules::{self, ConditionRule, MANDATORY_REASON};

/// Outcome of matching one clause against a shipment context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchVerdict {
    Matched {
        reason: String,
        /// Condition key that produced the reason; `None` for unconditional
        /// mandatory clauses
        key: Option<ConditionKey>,
    },
    Excluded,
}

impl MatchVerdict {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchVerdict::Matched { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            MatchVerdict::Matched { reason, .. } => Some(reason),
            MatchVerdict::Excluded => None,
        }
    }
}

pub struct ConditionMatcher {
    rules: Vec<Box<dyn ConditionRule>>,
}

impl ConditionMatcher {
    pub fn new() -> Self {
        Self {
            rules: rules::precedence_ordered(),
        }
    }

    /// Use a custom rule list; order is precedence
    pub fn with_rules(rules: Vec<Box<dyn ConditionRule>>) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, clause: &ClauseRecord, context: &ShipmentContext) -> MatchVerdict {
        if clause.conditions.is_empty() {
            return if clause.is_mandatory {
                MatchVerdict::Matched {
                    reason: MANDATORY_REASON.to_string(),
                    key: None,
                }
            } else {
                MatchVerdict::Excluded
            };
        }

        for rule in &self.rules {
            let Some(expected) = clause.conditions.get(&rule.key()) else {
                continue;
            };
            if let Some(reason) = rule.evaluate(expected, context) {
                debug!(
                    clause_id = %clause.clause_id,
                    key = %rule.key(),
                    "clause matched: {}",
                    reason
                );
                return MatchVerdict::Matched {
                    reason,
                    key: Some(rule.key()),
                };
            }
        }

        MatchVerdict::Excluded
    }
}

impl Default for ConditionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Match with the default rule set
pub fn match_clause(clause: &ClauseRecord, context: &ShipmentContext) -> MatchVerdict {
    ConditionMatcher::new().evaluate(clause, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::PortType;
    use std::collections::BTreeMap;

    fn context(port_type: PortType) -> ShipmentContext {
        ShipmentContext {
            load_port: "Reni".to_string(),
            discharge_port: "Alexandria".to_string(),
            cargo: "Corn".to_string(),
            quantity: 25_000,
            port_type,
            discharge_country: "Egypt".to_string(),
            cargo_category: "grain".to_string(),
            charterer: None,
        }
    }

    fn clause(conditions: &[(ConditionKey, &str)], is_mandatory: bool) -> ClauseRecord {
        ClauseRecord {
            clause_id: "TEST-001".to_string(),
            title: "Test clause".to_string(),
            text: "TEST CLAUSE TEXT".to_string(),
            category: "PORT".to_string(),
            subcategory: None,
            is_mandatory,
            requires_review: false,
            conditions: conditions
                .iter()
                .map(|(k, v)| (*k, v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            sort_order: 0,
        }
    }

    #[test]
    fn test_port_type_condition() {
        let danube_only = clause(&[(ConditionKey::PortType, "DANUBE")], false);

        let verdict = match_clause(&danube_only, &context(PortType::Danube));
        assert_eq!(verdict.reason(), Some("Required for DANUBE ports"));

        assert_eq!(
            match_clause(&danube_only, &context(PortType::Poc)),
            MatchVerdict::Excluded
        );
    }

    #[test]
    fn test_custom_rule_order_sets_precedence() {
        use crate::rules::{CargoCategoryRule, LoadPortRule, PortTypeRule};

        let reni_danube = clause(
            &[(ConditionKey::PortType, "DANUBE"), (ConditionKey::LoadPort, "Reni")],
            false,
        );
        let ctx = context(PortType::Danube);

        let default_verdict = ConditionMatcher::default().evaluate(&reni_danube, &ctx);
        assert_eq!(default_verdict.reason(), Some("Specific to Reni port"));

        let port_type_first =
            ConditionMatcher::with_rules(vec![Box::new(PortTypeRule), Box::new(LoadPortRule)]);
        assert_eq!(
            port_type_first.evaluate(&reni_danube, &ctx),
            MatchVerdict::Matched {
                reason: "Required for DANUBE ports".to_string(),
                key: Some(ConditionKey::PortType),
            }
        );

        // Keys without a rule are never consulted
        let cargo_only = ConditionMatcher::with_rules(vec![Box::new(CargoCategoryRule)]);
        assert_eq!(cargo_only.evaluate(&reni_danube, &ctx), MatchVerdict::Excluded);
    }

    #[test]
    fn test_port_type_condition_is_case_insensitive() {
        let danube_only = clause(&[(ConditionKey::PortType, "danube")], false);
        assert!(match_clause(&danube_only, &context(PortType::Danube)).is_match());
    }

    #[test]
    fn test_mandatory_without_conditions_always_matches() {
        let mandatory = clause(&[], true);
        for port_type in [PortType::Danube, PortType::Poc, PortType::Unknown] {
            assert_eq!(
                match_clause(&mandatory, &context(port_type)),
                MatchVerdict::Matched {
                    reason: MANDATORY_REASON.to_string(),
                    key: None,
                }
            );
        }
    }

    #[test]
    fn test_optional_without_conditions_never_matches() {
        let optional = clause(&[], false);
        assert_eq!(
            match_clause(&optional, &context(PortType::Danube)),
            MatchVerdict::Excluded
        );
    }

    #[test]
    fn test_country_and_cargo_reasons() {
        let ctx = context(PortType::Poc);

        let egypt = clause(&[(ConditionKey::DischargeCountry, "egypt")], false);
        assert_eq!(match_clause(&egypt, &ctx).reason(), Some("Required for Egypt discharge"));

        let grain = clause(&[(ConditionKey::CargoCategory, "GRAIN")], false);
        assert_eq!(match_clause(&grain, &ctx).reason(), Some("Required for grain cargo"));

        let ukraine = clause(&[(ConditionKey::LoadCountry, "Ukraine")], false);
        assert_eq!(match_clause(&ukraine, &ctx).reason(), Some("Required for Ukraine loading"));

        let romania = clause(&[(ConditionKey::LoadCountry, "Romania")], false);
        assert!(!match_clause(&romania, &ctx).is_match());
    }

    #[test]
    fn test_named_port_reasons() {
        let ctx = context(PortType::Danube);

        let reni = clause(&[(ConditionKey::LoadPort, "RENI")], false);
        assert_eq!(match_clause(&reni, &ctx).reason(), Some("Specific to Reni port"));

        let alexandria = clause(&[(ConditionKey::DischargePort, "alexandria")], false);
        assert_eq!(
            match_clause(&alexandria, &ctx).reason(),
            Some("Specific to Alexandria port")
        );

        let izmail = clause(&[(ConditionKey::LoadPort, "Izmail")], false);
        assert!(!match_clause(&izmail, &ctx).is_match());
    }

    #[test]
    fn test_most_specific_key_wins_the_reason() {
        let ctx = context(PortType::Danube);
        let multi = clause(
            &[
                (ConditionKey::PortType, "DANUBE"),
                (ConditionKey::CargoCategory, "grain"),
                (ConditionKey::LoadPort, "Reni"),
            ],
            false,
        );
        assert_eq!(
            match_clause(&multi, &ctx),
            MatchVerdict::Matched {
                reason: "Specific to Reni port".to_string(),
                key: Some(ConditionKey::LoadPort),
            }
        );

        // Port no longer matches: cargo outranks port type
        let ctx = ShipmentContext {
            load_port: "Izmail".to_string(),
            ..ctx
        };
        assert_eq!(
            match_clause(&multi, &ctx).reason(),
            Some("Required for grain cargo")
        );
    }

    #[test]
    fn test_any_matching_key_includes_the_clause() {
        // Danube-or-Egypt: a POC load to Egypt still qualifies through the country key
        let either = clause(
            &[
                (ConditionKey::PortType, "DANUBE"),
                (ConditionKey::DischargeCountry, "Egypt"),
            ],
            false,
        );
        assert_eq!(
            match_clause(&either, &context(PortType::Poc)).reason(),
            Some("Required for Egypt discharge")
        );
    }
}
