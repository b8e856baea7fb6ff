pub mod calendar;
pub mod compose;
pub mod data;
pub mod error;
pub mod format;
pub mod request;

use std::path::Path;
use std::sync::Arc;

use clause_engine::{ClauseEngine, ClauseLibrary};
use shared_types::{SelectedClause, SelectionResult, ShipmentContext};
use tracing::{debug, info};

pub use compose::{AssembledDocument, Section, SectionKind};
pub use data::DomainData;
pub use error::OfferError;
pub use request::{OfferRequest, ResolvedShipment};

/// Reason attached to clauses added from the charterer's preferences
pub const PREFERRED_REASON: &str = "Preferred by charterer";

/// OfferEngine entry point
///
/// Holds the domain data and clause library for the lifetime of the process.
/// Cloning is cheap; every generation call is independent.
#[derive(Clone)]
pub struct OfferEngine {
    data: Arc<DomainData>,
    clauses: ClauseEngine,
}

impl OfferEngine {
    pub fn new(data: DomainData, library: ClauseLibrary) -> Self {
        Self {
            data: Arc::new(data),
            clauses: ClauseEngine::new(library),
        }
    }

    /// Engine over the datasets compiled into the binary
    pub fn embedded() -> Result<Self, OfferError> {
        Ok(Self::new(DomainData::embedded()?, data::embedded_library()?))
    }

    /// Engine over a data directory; every dataset file must be present
    pub fn from_dir(dir: &Path) -> Result<Self, OfferError> {
        let data = DomainData::load_dir(dir)?;
        let library = data::load_library_dir(dir)?;
        info!(
            "loaded data from {} (library {} with {} clauses)",
            dir.display(),
            library.version(),
            library.len()
        );
        Ok(Self::new(data, library))
    }

    pub fn data(&self) -> &DomainData {
        &self.data
    }

    pub fn clause_engine(&self) -> &ClauseEngine {
        &self.clauses
    }

    pub fn library(&self) -> &ClauseLibrary {
        self.clauses.library()
    }

    pub fn resolve<'a>(&'a self, request: &'a OfferRequest) -> Result<ResolvedShipment<'a>, OfferError> {
        ResolvedShipment::resolve(&self.data, request)
    }

    /// Shipment context for clause selection
    pub fn context(&self, request: &OfferRequest) -> Result<ShipmentContext, OfferError> {
        Ok(self.resolve(request)?.context())
    }

    /// Compose the offer from an already-made clause selection
    pub fn generate(
        &self,
        request: &OfferRequest,
        selection: &SelectionResult,
    ) -> Result<AssembledDocument, OfferError> {
        let shipment = self.resolve(request)?;
        let selection = self.with_charterer_preferences(&shipment, selection);
        let document = compose::compose(&shipment, &self.data, &selection);

        info!(
            route = %document.summary.route,
            method = %document.summary.selection_method,
            clauses = document.summary.clauses_count,
            "firm offer assembled"
        );
        Ok(document)
    }

    /// Rule-based selection followed by composition
    pub fn generate_rule_based(&self, request: &OfferRequest) -> Result<AssembledDocument, OfferError> {
        let context = self.context(request)?;
        let selection = self.clauses.select(&context);
        self.generate(request, &selection)
    }

    /// Add the charterer's preferred library clauses not already selected
    fn with_charterer_preferences(
        &self,
        shipment: &ResolvedShipment<'_>,
        selection: &SelectionResult,
    ) -> SelectionResult {
        let mut merged = selection.clone();
        let Some(charterer) = shipment.charterer else {
            return merged;
        };

        for clause_id in &charterer.preferred_clauses {
            if merged.contains(clause_id) {
                continue;
            }
            match self.library().get(clause_id) {
                Some(clause) => merged
                    .clauses
                    .push(SelectedClause::new(clause.clone(), PREFERRED_REASON)),
                None => debug!(
                    charterer = %charterer.charterer_id,
                    "preferred clause {} is not in the library",
                    clause_id
                ),
            }
        }
        merged
    }
}
