use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Load port classification driving the regional clause block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortType {
    /// River ports on the Ukrainian Danube (Reni, Izmail)
    Danube,
    /// Port of Call - Black Sea ports (Odesa, Chornomorsk, Pivdennyi)
    Poc,
    Unknown,
}

impl PortType {
    /// Derive the port type from a port record's region field (case-insensitive)
    pub fn from_region(region: &str) -> Self {
        match region.trim().to_uppercase().as_str() {
            "DANUBE" => PortType::Danube,
            "POC" => PortType::Poc,
            _ => PortType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PortType::Danube => "DANUBE",
            PortType::Poc => "POC",
            PortType::Unknown => "UNKNOWN",
        }
    }

    pub fn is_danube(&self) -> bool {
        matches!(self, PortType::Danube)
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed vocabulary of clause applicability conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKey {
    PortType,
    DischargeCountry,
    LoadCountry,
    CargoCategory,
    LoadPort,
    DischargePort,
}

impl ConditionKey {
    pub const ALL: [ConditionKey; 6] = [
        ConditionKey::PortType,
        ConditionKey::DischargeCountry,
        ConditionKey::LoadCountry,
        ConditionKey::CargoCategory,
        ConditionKey::LoadPort,
        ConditionKey::DischargePort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKey::PortType => "port_type",
            ConditionKey::DischargeCountry => "discharge_country",
            ConditionKey::LoadCountry => "load_country",
            ConditionKey::CargoCategory => "cargo_category",
            ConditionKey::LoadPort => "load_port",
            ConditionKey::DischargePort => "discharge_port",
        }
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable block of contract text from the clause library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseRecord {
    /// Stable key, category-coded (e.g. "PORT-DAN-001")
    pub clause_id: String,
    pub title: String,
    pub text: String,
    /// COUNTRY, PORT, CARGO, OPERATION, LEGAL, FREIGHT
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub is_mandatory: bool,
    /// Flagged "CHRTR REVIEW" - needs charterer approval
    #[serde(default, rename = "requires_charterer_review")]
    pub requires_review: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub conditions: BTreeMap<ConditionKey, String>,
    /// Placement within the category
    #[serde(default)]
    pub sort_order: i32,
}

impl ClauseRecord {
    pub fn subcategory_or_general(&self) -> &str {
        self.subcategory.as_deref().unwrap_or("General")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<ConditionKey, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Shipment parameters one generation call is evaluated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentContext {
    pub load_port: String,
    pub discharge_port: String,
    pub cargo: String,
    /// Metric tons
    pub quantity: u64,
    pub port_type: PortType,
    pub discharge_country: String,
    pub cargo_category: String,
    #[serde(default)]
    pub charterer: Option<String>,
}

/// How a selection was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMethod {
    Ai,
    RuleBased,
    RuleBasedFallback,
}

impl SelectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMethod::Ai => "ai",
            SelectionMethod::RuleBased => "rule-based",
            SelectionMethod::RuleBasedFallback => "rule-based-fallback",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A library clause together with the reason it applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedClause {
    #[serde(flatten)]
    pub clause: ClauseRecord,
    pub reason: String,
}

impl SelectedClause {
    pub fn new(clause: ClauseRecord, reason: impl Into<String>) -> Self {
        Self {
            clause,
            reason: reason.into(),
        }
    }

    pub fn clause_id(&self) -> &str {
        &self.clause.clause_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub method: SelectionMethod,
    pub clauses: Vec<SelectedClause>,
    pub explanation: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl SelectionResult {
    pub fn new(method: SelectionMethod, clauses: Vec<SelectedClause>, explanation: impl Into<String>) -> Self {
        Self {
            method,
            clauses,
            explanation: explanation.into(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// A rule-based result with no clauses; composes the bare section skeleton
    pub fn empty() -> Self {
        Self::new(SelectionMethod::RuleBased, Vec::new(), "No clauses selected.")
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn contains(&self, clause_id: &str) -> bool {
        self.clauses.iter().any(|c| c.clause_id() == clause_id)
    }

    pub fn clause_ids(&self) -> Vec<&str> {
        self.clauses.iter().map(|c| c.clause_id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Machine-readable digest of an assembled offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    /// "Reni -> Alexandria"
    pub route: String,
    pub cargo_description: String,
    pub total_freight: f64,
    pub clauses_count: usize,
    pub port_type: PortType,
    pub selection_method: SelectionMethod,
    /// Incorporated clauses flagged for charterer review
    #[serde(default)]
    pub review_required: Vec<String>,
}

/// Oracle review of a finished offer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default)]
    pub missing_clauses: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Why the critique is unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Critique {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}
