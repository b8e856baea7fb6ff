pub mod format;
pub mod types;

pub use format::group_thousands;

pub use types::{
    ClauseRecord, ConditionKey, Critique, OfferSummary, PortType, SelectedClause,
    SelectionMethod, SelectionResult, ShipmentContext,
};
