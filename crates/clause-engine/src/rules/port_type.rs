use shared_types::{ConditionKey, ShipmentContext};

use super::{same, ConditionRule};

/// DANUBE vs POC load port classification
pub struct PortTypeRule;

impl ConditionRule for PortTypeRule {
    fn key(&self) -> ConditionKey {
        ConditionKey::PortType
    }

    fn evaluate(&self, expected: &str, context: &ShipmentContext) -> Option<String> {
        same(expected, context.port_type.as_str())
            .then(|| format!("Required for {} ports", context.port_type))
    }
}
