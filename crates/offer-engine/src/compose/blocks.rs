//! Builders for each section of the offer skeleton

use shared_types::SelectedClause;

use super::letterhead::letterhead_lines;
use super::{Section, SectionKind};
use crate::calendar::LaycanCalendar;
use crate::data::{DomainData, EGYPT_NOR_CLAUSE};
use crate::format::{format_cargo_description, format_demurrage, format_freight};
use crate::request::ResolvedShipment;

const RULE_WIDTH: usize = 43;

pub const OR_SUB_LINE: &str = "OR SUB: OWNERS SUBJECTS TO BE LIFTED WITHIN 24 HRS";
pub const DANUBE_BERTH_LINE: &str =
    "OWNRS SATSFY THEMSLVS WITH ANY KIND OF LOADING BERTH/PORT/CHANNEL/RIVER RESTRICTIONS";
pub const UKRAINE_NOR_LINE: &str = "AT LOAD PORT N.O.R. TO BE TENDERED ON WORKING DAYS DURING OFFICE HRS (08:00-17:00 HRS) FROM MONDAY TO FRIDAY";
pub const EGYPT_NOR_LINE: &str = "AT DISCHARGE PORT N.O.R. TO BE TENDERED ON WORKING DAYS DURING OFFICE HRS (08:00-12:00 HRS) FROM SUNDAY TO THURSDAY";
pub const LAYTIME_LINE: &str =
    "L/T TO COMMENCE 0800 HRS LT NEXT WORKING DAY AFTER VALID N.O.R. TENDERED, VSSL MOORED A.B.A.L.D.";
pub const PROFORMA_LINE: &str = "OWISE AS PER ATTACHED CHRTS PROFORMA CP, BASED ON SYNACOMEX 2000 C/P, LOGICALLY AMENDED AS PER MAIN TERMS AGREED (WHICH ALWAYS PREVAIL)";

pub const STANDARD_CLAUSES: [&str; 4] = [
    "GSB(A): GOOD SAFE BERTH ALWAYS AFLOAT",
    "DEMURRAGE PAYABLE WITHIN 30 DAYS UPON RECEIPT OF OWNRS SUPPORTING DOCUMENTS INCLUDING TIME SHEET AND INVOICES",
    "VSSL TO BE ISM/ISPS COMPLIANT WITH VALID CERTIFICATES",
    "ANY DISPUTE ARISING FROM THIS C/P TO BE REFERRED TO ARBITRATION IN LONDON ACCORDING TO ENGLISH LAW",
];

fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(RULE_WIDTH).collect()
}

/// Accumulates the lines of one section and counts inserted clauses
struct SectionBuilder {
    section: Section,
}

impl SectionBuilder {
    fn new(kind: SectionKind) -> Self {
        Self {
            section: Section {
                kind,
                lines: Vec::new(),
                clauses: 0,
            },
        }
    }

    fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.section.lines.push(line.into());
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.line(String::new())
    }

    /// A main-terms line followed by a blank
    fn term(&mut self, line: impl Into<String>) -> &mut Self {
        self.line(line).blank()
    }

    /// A counted clause followed by a blank
    fn clause(&mut self, text: impl Into<String>) -> &mut Self {
        self.section.clauses += 1;
        self.term(text)
    }

    /// Dashed block header: rule, title, rule, blank
    fn banner(&mut self, title: &str) -> &mut Self {
        self.line(rule('-')).line(title).line(rule('-')).blank()
    }

    fn build(self) -> Section {
        self.section
    }
}

pub fn header(shipment: &ResolvedShipment<'_>) -> Section {
    let mut b = SectionBuilder::new(SectionKind::Header);
    b.line("FIRM OFFER").blank().line(rule('='));
    for line in letterhead_lines(shipment.charterer) {
        b.line(line);
    }
    b.line(rule('=')).blank();
    b.build()
}

pub fn main_terms(shipment: &ResolvedShipment<'_>) -> Section {
    let request = shipment.request;
    let mut b = SectionBuilder::new(SectionKind::MainTerms);

    b.term(format!(
        "LOAD PORT: 1 GSB(A) {}, {}",
        request.load_port.to_uppercase(),
        shipment.load_port.country.to_uppercase()
    ))
    .term(format!(
        "DISCHARGE PORT: 1 GSB(A) {}, {}",
        request.discharge_port.to_uppercase(),
        shipment.discharge_port.country.to_uppercase()
    ))
    .term(format!(
        "CARGO: {}",
        format_cargo_description(shipment.cargo, request.quantity, request.quantity_tolerance)
    ))
    .term(format!(
        "LAYCAN: {}",
        LaycanCalendar::laycan(request.laycan_start, request.laycan_end)
    ))
    .term(format!("FREIGHT: {}", format_freight(request.freight_rate)))
    .term(format_demurrage(request.demurrage_rate, shipment.is_danube()));

    if shipment.or_sub() {
        b.term(OR_SUB_LINE);
    }
    b.build()
}

/// Load port clauses in port-data order
pub fn port_clauses(shipment: &ResolvedShipment<'_>, data: &DomainData) -> Section {
    let mut b = SectionBuilder::new(SectionKind::PortClauses);
    b.banner(if shipment.is_danube() {
        "UKRAINE - DANUBE PORT CLAUSES:"
    } else {
        "UKRAINE - POC PORT CLAUSES:"
    });

    for clause in shipment
        .load_port
        .clauses
        .iter()
        .filter_map(|id| data.port_clause(id))
    {
        b.clause(clause.text.as_str());
    }

    if shipment.is_danube() {
        b.clause(DANUBE_BERTH_LINE);
    }
    b.build()
}

pub fn nor_laytime(shipment: &ResolvedShipment<'_>) -> Section {
    let mut b = SectionBuilder::new(SectionKind::NorLaytime);
    b.banner("NOR & LAYTIME:").clause(UKRAINE_NOR_LINE);
    if shipment.is_egypt() {
        b.clause(EGYPT_NOR_LINE);
    }
    b.clause(LAYTIME_LINE)
        .term(LaycanCalendar::holidays_line(shipment.request.laycan_start));
    b.build()
}

/// Egypt discharge port clauses; `None` for other discharge countries
pub fn egypt_discharge(shipment: &ResolvedShipment<'_>, data: &DomainData) -> Option<Section> {
    if !shipment.is_egypt() {
        return None;
    }

    let mut b = SectionBuilder::new(SectionKind::EgyptDischarge);
    b.banner("EGYPT - DISCHARGE CLAUSES:");
    for clause in shipment
        .discharge_port
        .clauses
        .iter()
        .filter(|id| id.as_str() != EGYPT_NOR_CLAUSE)
        .filter_map(|id| data.port_clause(id))
    {
        b.clause(clause.text.as_str());
    }
    if let Some(text) = &data.grain_clauses().documents_time {
        b.clause(text.as_str());
    }
    Some(b.build())
}

/// Grain cargo clauses; `None` for other cargo categories
pub fn grain_cargo(shipment: &ResolvedShipment<'_>, data: &DomainData) -> Option<Section> {
    if !shipment.cargo.is_grain() {
        return None;
    }

    let grain = data.grain_clauses();
    let mut b = SectionBuilder::new(SectionKind::GrainCargo);
    b.banner("CARGO CLAUSES (GRAIN):");
    for text in [&grain.previous_cargo, &grain.trimming, &grain.surveyor]
        .into_iter()
        .flatten()
    {
        b.clause(text.as_str());
    }
    Some(b.build())
}

/// Normalised form used to spot clause bodies already in the document
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Selected clauses not already present elsewhere in the document, ordered
/// by (category, sort_order); `None` when nothing remains
pub fn additional_clauses<'s>(
    selected: &[SelectedClause],
    rendered: impl IntoIterator<Item = &'s Section>,
) -> Option<Section> {
    let mut seen: Vec<String> = rendered
        .into_iter()
        .flat_map(|section| section.lines.iter())
        .filter(|line| !line.is_empty())
        .map(|line| normalize(line))
        .collect();
    let body = seen.join("\n");

    let mut remaining: Vec<&SelectedClause> = Vec::new();
    for clause in selected {
        let text = normalize(&clause.clause.text);
        if text.is_empty() || body.contains(&text) || seen.contains(&text) {
            continue;
        }
        seen.push(text);
        remaining.push(clause);
    }
    if remaining.is_empty() {
        return None;
    }

    remaining.sort_by(|a, b| {
        a.clause
            .category
            .cmp(&b.clause.category)
            .then(a.clause.sort_order.cmp(&b.clause.sort_order))
    });

    let mut b = SectionBuilder::new(SectionKind::AdditionalClauses);
    b.banner("ADDITIONAL CLAUSES:");
    for clause in remaining {
        b.clause(clause.clause.text.trim());
    }
    Some(b.build())
}

pub fn standard_clauses() -> Section {
    let mut b = SectionBuilder::new(SectionKind::StandardClauses);
    b.banner("STANDARD CLAUSES:");
    for text in STANDARD_CLAUSES {
        b.clause(text);
    }
    b.build()
}

pub fn footer() -> Section {
    let mut b = SectionBuilder::new(SectionKind::Footer);
    b.line(rule('-'))
        .blank()
        .term(PROFORMA_LINE)
        .line(rule('-'))
        .line("END OF FIRM OFFER")
        .line(rule('-'));
    b.build()
}
