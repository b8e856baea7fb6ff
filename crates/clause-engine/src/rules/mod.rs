//! Condition rules for clause applicability
//!
//! Each rule owns one condition key. Rules are evaluated in precedence
//! order, most specific first:
//!
//! 1. Named port (load port, then discharge port)
//! 2. Cargo category
//! 3. Country (discharge country, then load country)
//! 4. Port type
//!
//! A clause applies when any of its keys matches; the reason reported is the
//! one from the highest-precedence matching rule.

pub mod cargo;
pub mod country;
pub mod named_port;
pub mod port_type;

use shared_types::{ConditionKey, ShipmentContext};

pub use cargo::CargoCategoryRule;
pub use country::{DischargeCountryRule, LoadCountryRule, LOAD_COUNTRY};
pub use named_port::{DischargePortRule, LoadPortRule};
pub use port_type::PortTypeRule;

/// Reason attached to mandatory clauses that carry no conditions
pub const MANDATORY_REASON: &str = "Standard mandatory clause";

/// A single condition-key check against the shipment context
pub trait ConditionRule: Send + Sync {
    fn key(&self) -> ConditionKey;

    /// Returns the reason the clause applies when `expected` matches the context
    fn evaluate(&self, expected: &str, context: &ShipmentContext) -> Option<String>;
}

/// The default rule set in precedence order
pub fn precedence_ordered() -> Vec<Box<dyn ConditionRule>> {
    vec![
        Box::new(LoadPortRule),
        Box::new(DischargePortRule),
        Box::new(CargoCategoryRule),
        Box::new(DischargeCountryRule),
        Box::new(LoadCountryRule),
        Box::new(PortTypeRule),
    ]
}

/// Case-insensitive, whitespace-tolerant comparison used by every rule
pub(crate) fn same(expected: &str, actual: &str) -> bool {
    expected.trim().to_lowercase() == actual.trim().to_lowercase()
}
