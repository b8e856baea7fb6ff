pub mod error;
pub mod library;
pub mod matcher;
pub mod rules;
pub mod selector;

use std::sync::Arc;

use shared_types::{SelectionResult, ShipmentContext};

pub use error::LibraryError;
pub use library::ClauseLibrary;
pub use matcher::{ConditionMatcher, MatchVerdict};
pub use selector::rule_based_selection;

/// ClauseEngine entry point
///
/// Owns a shared library snapshot and the default matcher. Cloning is cheap.
#[derive(Clone)]
pub struct ClauseEngine {
    library: Arc<ClauseLibrary>,
    matcher: Arc<ConditionMatcher>,
}

impl ClauseEngine {
    pub fn new(library: ClauseLibrary) -> Self {
        Self::from_shared(Arc::new(library))
    }

    pub fn from_shared(library: Arc<ClauseLibrary>) -> Self {
        Self {
            library,
            matcher: Arc::new(ConditionMatcher::new()),
        }
    }

    pub fn library(&self) -> &ClauseLibrary {
        &self.library
    }

    pub fn shared_library(&self) -> Arc<ClauseLibrary> {
        Arc::clone(&self.library)
    }

    pub fn matcher(&self) -> &ConditionMatcher {
        &self.matcher
    }

    /// Rule-based selection for a shipment
    pub fn select(&self, context: &ShipmentContext) -> SelectionResult {
        rule_based_selection(&self.library, &self.matcher, context)
    }

    /// Evaluate a single clause by id; `None` if the id is not in the library
    pub fn explain(&self, clause_id: &str, context: &ShipmentContext) -> Option<MatchVerdict> {
        self.library
            .get(clause_id)
            .map(|clause| self.matcher.evaluate(clause, context))
    }
}
