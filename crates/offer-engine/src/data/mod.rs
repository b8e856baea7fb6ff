//! Read-only domain data: ports, cargoes, charterers
//!
//! Loaded either from the embedded defaults or from a directory holding the
//! same four files. Lookups by name are case-insensitive.

pub mod embedded;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use clause_engine::ClauseLibrary;
use serde::{Deserialize, Serialize};
use shared_types::PortType;
use tracing::debug;

use crate::error::OfferError;

pub const PORTS_FILE: &str = "ports.json";
pub const CARGOES_FILE: &str = "cargo_stw.json";
pub const CHARTERERS_FILE: &str = "charterers.json";
pub const LIBRARY_FILE: &str = "master_library.json";

/// Egypt NOR clause; the NOR & laytime block renders it, so the discharge
/// block skips it
pub const EGYPT_NOR_CLAUSE: &str = "CLAUSE-EGY-NOR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    pub port_id: String,
    pub name: String,
    pub country: String,
    /// DANUBE, POC, MED, ...
    pub region: String,
    /// river / sea
    #[serde(rename = "type")]
    pub kind: String,
    pub max_draft: f64,
    /// Port clause ids in render order
    #[serde(default)]
    pub clauses: Vec<String>,
}

impl PortRecord {
    pub fn port_type(&self) -> PortType {
        PortType::from_region(&self.region)
    }

    pub fn is_egypt(&self) -> bool {
        self.country.eq_ignore_ascii_case("egypt")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortClause {
    #[serde(default)]
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct PortLists {
    load: Vec<PortRecord>,
    discharge: Vec<PortRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct PortsDataset {
    ports: PortLists,
    #[serde(default)]
    clauses: BTreeMap<String, PortClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoRecord {
    pub cargo_id: String,
    pub name: String,
    /// grain, fertilizer, steel, ...
    pub category: String,
    /// Stowage factor bounds, printed as they appear in the data
    pub stw_min: serde_json::Number,
    pub stw_max: serde_json::Number,
    #[serde(default)]
    pub stw_unit: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CargoRecord {
    pub fn is_grain(&self) -> bool {
        self.category.eq_ignore_ascii_case("grain")
    }

    /// "48-50 CBFT/MT"
    pub fn stw_range(&self) -> String {
        format!("{}-{} {}", self.stw_min, self.stw_max, self.stw_unit)
            .trim_end()
            .to_string()
    }
}

/// Fixed grain clause texts; each is optional in the data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrainClauses {
    #[serde(default)]
    pub previous_cargo: Option<String>,
    #[serde(default)]
    pub trimming: Option<String>,
    #[serde(default)]
    pub surveyor: Option<String>,
    #[serde(default)]
    pub documents_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CargoDataset {
    cargoes: Vec<CargoRecord>,
    #[serde(default)]
    grain_clauses: GrainClauses,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub registration_number: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub or_sub_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartererRecord {
    pub charterer_id: String,
    pub charterer_name: String,
    #[serde(default)]
    pub companies: Vec<CompanyRecord>,
    /// Library clause ids this charterer always wants in its offers
    #[serde(default)]
    pub preferred_clauses: Vec<String>,
}

impl ChartererRecord {
    /// The primary company, else the first one listed
    pub fn primary_company(&self) -> Option<&CompanyRecord> {
        self.companies
            .iter()
            .find(|c| c.is_primary)
            .or_else(|| self.companies.first())
    }

    pub fn company_name(&self) -> &str {
        self.primary_company()
            .map(|c| c.company_name.as_str())
            .unwrap_or(&self.charterer_name)
    }

    pub fn or_sub_default(&self) -> bool {
        self.primary_company().is_some_and(|c| c.or_sub_default)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChartererDataset {
    charterers: Vec<ChartererRecord>,
}

#[derive(Debug, Clone)]
pub struct DomainData {
    load_ports: Vec<PortRecord>,
    discharge_ports: Vec<PortRecord>,
    port_clauses: BTreeMap<String, PortClause>,
    cargoes: Vec<CargoRecord>,
    grain_clauses: GrainClauses,
    charterers: Vec<ChartererRecord>,
}

impl DomainData {
    /// Parse the three domain datasets
    pub fn from_json(ports: &str, cargoes: &str, charterers: &str) -> Result<Self, OfferError> {
        let ports: PortsDataset = parse(PORTS_FILE, ports)?;
        let cargoes: CargoDataset = parse(CARGOES_FILE, cargoes)?;
        let charterers: ChartererDataset = parse(CHARTERERS_FILE, charterers)?;

        Ok(Self {
            load_ports: ports.ports.load,
            discharge_ports: ports.ports.discharge,
            port_clauses: ports.clauses,
            cargoes: cargoes.cargoes,
            grain_clauses: cargoes.grain_clauses,
            charterers: charterers.charterers,
        })
    }

    /// The datasets compiled into the binary
    pub fn embedded() -> Result<Self, OfferError> {
        Self::from_json(
            embedded_dataset(PORTS_FILE)?,
            embedded_dataset(CARGOES_FILE)?,
            embedded_dataset(CHARTERERS_FILE)?,
        )
    }

    /// Load from a directory holding ports.json, cargo_stw.json and charterers.json
    pub fn load_dir(dir: &Path) -> Result<Self, OfferError> {
        Self::from_json(
            &read_dataset(dir, PORTS_FILE)?,
            &read_dataset(dir, CARGOES_FILE)?,
            &read_dataset(dir, CHARTERERS_FILE)?,
        )
    }

    pub fn load_ports(&self) -> &[PortRecord] {
        &self.load_ports
    }

    pub fn discharge_ports(&self) -> &[PortRecord] {
        &self.discharge_ports
    }

    pub fn cargoes(&self) -> &[CargoRecord] {
        &self.cargoes
    }

    pub fn charterers(&self) -> &[ChartererRecord] {
        &self.charterers
    }

    pub fn grain_clauses(&self) -> &GrainClauses {
        &self.grain_clauses
    }

    pub fn port_clause(&self, clause_id: &str) -> Option<&PortClause> {
        self.port_clauses.get(clause_id)
    }

    pub fn find_load_port(&self, name: &str) -> Option<&PortRecord> {
        find_by_name(&self.load_ports, name, |p| &p.name)
    }

    pub fn find_discharge_port(&self, name: &str) -> Option<&PortRecord> {
        find_by_name(&self.discharge_ports, name, |p| &p.name)
    }

    pub fn find_cargo(&self, name: &str) -> Option<&CargoRecord> {
        find_by_name(&self.cargoes, name, |c| &c.name)
    }

    /// Charterers are looked up by id, not name
    pub fn find_charterer(&self, charterer_id: &str) -> Option<&ChartererRecord> {
        self.charterers.iter().find(|c| c.charterer_id == charterer_id)
    }
}

/// Clause library from the embedded master library
pub fn embedded_library() -> Result<ClauseLibrary, OfferError> {
    Ok(ClauseLibrary::from_json(embedded_dataset(LIBRARY_FILE)?)?)
}

/// Clause library from `<dir>/master_library.json`
pub fn load_library_dir(dir: &Path) -> Result<ClauseLibrary, OfferError> {
    Ok(ClauseLibrary::from_json(&read_dataset(dir, LIBRARY_FILE)?)?)
}

fn find_by_name<'a, T>(items: &'a [T], name: &str, key: impl Fn(&T) -> &String) -> Option<&'a T> {
    let name = name.trim();
    items.iter().find(|item| key(item).eq_ignore_ascii_case(name))
}

fn parse<T: serde::de::DeserializeOwned>(dataset: &'static str, json: &str) -> Result<T, OfferError> {
    serde_json::from_str(json).map_err(|source| OfferError::InvalidData { dataset, source })
}

fn embedded_dataset(name: &'static str) -> Result<&'static str, OfferError> {
    embedded::get_embedded_dataset(name).ok_or_else(|| OfferError::DataNotFound(name.to_string()))
}

fn read_dataset(dir: &Path, name: &'static str) -> Result<String, OfferError> {
    let path = dir.join(name);
    debug!("reading dataset {}", path.display());
    fs::read_to_string(&path).map_err(|_| OfferError::DataNotFound(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_loads() {
        let data = DomainData::embedded().unwrap();
        assert!(!data.load_ports().is_empty());
        assert!(!data.discharge_ports().is_empty());
        assert!(!data.cargoes().is_empty());
        assert!(!data.charterers().is_empty());
        assert!(embedded_library().unwrap().len() > 0);
    }

    #[test]
    fn test_every_port_clause_reference_resolves() {
        let data = DomainData::embedded().unwrap();
        for port in data.load_ports().iter().chain(data.discharge_ports()) {
            for clause_id in &port.clauses {
                assert!(
                    data.port_clause(clause_id).is_some(),
                    "{} references unknown clause {}",
                    port.name,
                    clause_id
                );
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let data = DomainData::embedded().unwrap();
        let reni = data.find_load_port("RENI").unwrap();
        assert_eq!(reni.name, "Reni");
        assert_eq!(reni.port_type(), PortType::Danube);

        assert_eq!(data.find_load_port(" odesa ").unwrap().port_type(), PortType::Poc);
        assert!(data.find_discharge_port("alexandria").unwrap().is_egypt());
        assert!(data.find_cargo("corn").unwrap().is_grain());
        assert!(data.find_load_port("Alexandria").is_none());
    }

    #[test]
    fn test_stw_range_keeps_data_formatting() {
        let data = DomainData::embedded().unwrap();
        assert_eq!(data.find_cargo("Corn").unwrap().stw_range(), "48-50 CBFT/MT");
        assert_eq!(data.find_cargo("Pig Iron").unwrap().stw_range(), "10.5-12 CBFT/MT");
    }

    #[test]
    fn test_primary_company_fallback() {
        let data = DomainData::embedded().unwrap();

        let primary = data.find_charterer("CHR-001").unwrap();
        assert_eq!(primary.company_name(), "Black Sea Agro SA");
        assert!(primary.or_sub_default());

        let first = data.find_charterer("CHR-002").unwrap();
        assert_eq!(first.company_name(), "Danube Grain Logistics SRL");
        assert!(!first.or_sub_default());

        let bare = data.find_charterer("CHR-003").unwrap();
        assert!(bare.primary_company().is_none());
        assert_eq!(bare.company_name(), "Meridian Commodities");
        assert!(!bare.or_sub_default());
    }

    #[test]
    fn test_missing_directory_is_data_not_found() {
        let err = DomainData::load_dir(Path::new("/nonexistent/offer-data")).unwrap_err();
        assert!(matches!(err, OfferError::DataNotFound(path) if path.ends_with(PORTS_FILE)));

        let err = load_library_dir(Path::new("/nonexistent/offer-data")).unwrap_err();
        assert!(matches!(err, OfferError::DataNotFound(_)));
    }

    #[test]
    fn test_invalid_dataset_names_the_file() {
        let err = DomainData::from_json("{}", "{}", "{}").unwrap_err();
        assert!(matches!(err, OfferError::InvalidData { dataset: PORTS_FILE, .. }));
    }
}
