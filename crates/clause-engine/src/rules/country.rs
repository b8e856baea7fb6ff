//! Country conditions
//!
//! Every load port in the data set is Ukrainian, so the load-country
//! condition only checks that the clause targets Ukraine.

use shared_types::{ConditionKey, ShipmentContext};

use super::{same, ConditionRule};

pub const LOAD_COUNTRY: &str = "Ukraine";

pub struct DischargeCountryRule;

impl ConditionRule for DischargeCountryRule {
    fn key(&self) -> ConditionKey {
        ConditionKey::DischargeCountry
    }

    fn evaluate(&self, expected: &str, context: &ShipmentContext) -> Option<String> {
        same(expected, &context.discharge_country)
            .then(|| format!("Required for {} discharge", context.discharge_country))
    }
}

pub struct LoadCountryRule;

impl ConditionRule for LoadCountryRule {
    fn key(&self) -> ConditionKey {
        ConditionKey::LoadCountry
    }

    fn evaluate(&self, expected: &str, _context: &ShipmentContext) -> Option<String> {
        same(expected, LOAD_COUNTRY).then(|| format!("Required for {} loading", LOAD_COUNTRY))
    }
}
