//! Exact named-port targeting

use shared_types::{ConditionKey, ShipmentContext};

use super::{same, ConditionRule};

pub struct LoadPortRule;

impl ConditionRule for LoadPortRule {
    fn key(&self) -> ConditionKey {
        ConditionKey::LoadPort
    }

    fn evaluate(&self, expected: &str, context: &ShipmentContext) -> Option<String> {
        same(expected, &context.load_port).then(|| format!("Specific to {} port", context.load_port))
    }
}

pub struct DischargePortRule;

impl ConditionRule for DischargePortRule {
    fn key(&self) -> ConditionKey {
        ConditionKey::DischargePort
    }

    fn evaluate(&self, expected: &str, context: &ShipmentContext) -> Option<String> {
        same(expected, &context.discharge_port)
            .then(|| format!("Specific to {} port", context.discharge_port))
    }
}
