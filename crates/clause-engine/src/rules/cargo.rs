use shared_types::{ConditionKey, ShipmentContext};

use super::{same, ConditionRule};

/// Cargo category (grain, steel, fertilizer, ...)
pub struct CargoCategoryRule;

impl ConditionRule for CargoCategoryRule {
    fn key(&self) -> ConditionKey {
        ConditionKey::CargoCategory
    }

    fn evaluate(&self, expected: &str, context: &ShipmentContext) -> Option<String> {
        same(expected, &context.cargo_category)
            .then(|| format!("Required for {} cargo", context.cargo_category))
    }
}
