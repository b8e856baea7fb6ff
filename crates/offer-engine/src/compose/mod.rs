//! Document compositor
//!
//! Renders a resolved shipment and a clause selection into the fixed firm
//! offer skeleton. Rendering is pure: the same inputs always produce the same
//! text and summary.

pub mod blocks;
pub mod letterhead;

use serde::Serialize;
use shared_types::{OfferSummary, SelectionResult};

use crate::data::DomainData;
use crate::format::format_cargo_description;
use crate::request::ResolvedShipment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    MainTerms,
    PortClauses,
    NorLaytime,
    EgyptDischarge,
    GrainCargo,
    AdditionalClauses,
    StandardClauses,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
    /// Clauses inserted by this section
    pub clauses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledDocument {
    pub sections: Vec<Section>,
    pub summary: OfferSummary,
}

impl AssembledDocument {
    /// The offer text, lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Assemble the offer from resolved data and the final clause selection
pub fn compose(
    shipment: &ResolvedShipment<'_>,
    data: &DomainData,
    selection: &SelectionResult,
) -> AssembledDocument {
    let mut sections = vec![
        blocks::header(shipment),
        blocks::main_terms(shipment),
        blocks::port_clauses(shipment, data),
        blocks::nor_laytime(shipment),
    ];
    sections.extend(blocks::egypt_discharge(shipment, data));
    sections.extend(blocks::grain_cargo(shipment, data));

    let standard = blocks::standard_clauses();
    let footer = blocks::footer();
    let additional = blocks::additional_clauses(
        &selection.clauses,
        sections.iter().chain([&standard, &footer]),
    );

    sections.extend(additional);
    sections.push(standard);
    sections.push(footer);

    let mut review_required: Vec<String> = Vec::new();
    for clause in selection.clauses.iter().filter(|c| c.clause.requires_review) {
        if !review_required.iter().any(|id| id == clause.clause_id()) {
            review_required.push(clause.clause_id().to_string());
        }
    }

    let request = shipment.request;
    let summary = OfferSummary {
        route: shipment.route(),
        cargo_description: format_cargo_description(
            shipment.cargo,
            request.quantity,
            request.quantity_tolerance,
        ),
        total_freight: shipment.total_freight(),
        clauses_count: sections.iter().map(|s| s.clauses).sum(),
        port_type: shipment.port_type(),
        selection_method: selection.method,
        review_required,
    };

    AssembledDocument { sections, summary }
}
