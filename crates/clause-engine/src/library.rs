//! Master Library of reusable contract clauses
//!
//! A library is an immutable snapshot: it is loaded once, validated, and then
//! shared read-only between requests.

use std::collections::HashMap;

use serde::Deserialize;
use shared_types::{ClauseRecord, ConditionKey, PortType};

use crate::error::LibraryError;

/// On-disk shape of `master_library.json`
#[derive(Deserialize)]
struct LibraryFile {
    #[serde(default)]
    version: Option<String>,
    clauses: Vec<ClauseRecord>,
}

#[derive(Debug, Clone)]
pub struct ClauseLibrary {
    version: String,
    clauses: Vec<ClauseRecord>,
    index: HashMap<String, usize>,
}

impl ClauseLibrary {
    /// Parse and validate a library document
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let file: LibraryFile = serde_json::from_str(json)?;
        Self::from_clauses(file.version.unwrap_or_else(|| "unversioned".to_string()), file.clauses)
    }

    /// Build a library from records, enforcing required fields and unique ids
    pub fn from_clauses(
        version: impl Into<String>,
        clauses: Vec<ClauseRecord>,
    ) -> Result<Self, LibraryError> {
        let mut index = HashMap::with_capacity(clauses.len());

        for (position, clause) in clauses.iter().enumerate() {
            validate_clause(clause, position)?;
            if index.insert(clause.clause_id.clone(), position).is_some() {
                return Err(LibraryError::DuplicateClause(clause.clause_id.clone()));
            }
        }

        Ok(Self {
            version: version.into(),
            clauses,
            index,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses in library order
    pub fn clauses(&self) -> &[ClauseRecord] {
        &self.clauses
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseRecord> {
        self.clauses.iter()
    }

    pub fn get(&self, clause_id: &str) -> Option<&ClauseRecord> {
        self.index.get(clause_id).map(|&i| &self.clauses[i])
    }

    /// Clauses of one category (and optionally subcategory) in placement order
    pub fn by_category(&self, category: &str, subcategory: Option<&str>) -> Vec<&ClauseRecord> {
        let mut matching: Vec<&ClauseRecord> = self
            .clauses
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(category))
            .filter(|c| match subcategory {
                Some(sub) => c
                    .subcategory
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(sub)),
                None => true,
            })
            .collect();
        matching.sort_by_key(|c| c.sort_order);
        matching
    }

    /// Every clause ordered by (category, sort_order)
    pub fn sorted(&self) -> Vec<&ClauseRecord> {
        let mut all: Vec<&ClauseRecord> = self.clauses.iter().collect();
        all.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.sort_order.cmp(&b.sort_order))
        });
        all
    }

    /// Strict context filter: every condition the clause states must agree with
    /// the context. A context field that is not supplied does not exclude.
    ///
    /// Unlike the selector this ignores the named-port and load-country keys and
    /// never reports a reason; it backs catalogue browsing.
    pub fn for_context(
        &self,
        port_type: Option<PortType>,
        cargo_category: Option<&str>,
        discharge_country: Option<&str>,
    ) -> Vec<&ClauseRecord> {
        self.sorted()
            .into_iter()
            .filter(|clause| {
                let agrees = |key: ConditionKey, actual: Option<&str>| {
                    match (clause.conditions.get(&key), actual) {
                        (Some(expected), Some(actual)) => expected.eq_ignore_ascii_case(actual),
                        _ => true,
                    }
                };
                agrees(ConditionKey::PortType, port_type.map(|p| p.as_str()))
                    && agrees(ConditionKey::CargoCategory, cargo_category)
                    && agrees(ConditionKey::DischargeCountry, discharge_country)
            })
            .collect()
    }
}

fn validate_clause(clause: &ClauseRecord, position: usize) -> Result<(), LibraryError> {
    if clause.clause_id.trim().is_empty() {
        return Err(LibraryError::MissingField {
            clause_id: format!("#{}", position),
            field: "clause_id",
        });
    }

    let required = [
        ("title", &clause.title),
        ("text", &clause.text),
        ("category", &clause.category),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(LibraryError::MissingField {
                clause_id: clause.clause_id.clone(),
                field,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LIBRARY: &str = r#"{
        "version": "2024.11",
        "clauses": [
            {"clause_id": "PORT-DAN-002", "title": "Air raids", "text": "AIR RAID ALERTS TO COUNT AS LAYTIME",
             "category": "PORT", "subcategory": "Ukraine-Danube", "conditions": {"port_type": "DANUBE"}, "sort_order": 2},
            {"clause_id": "PORT-DAN-001", "title": "Sulina", "text": "SULINA PASSAGE",
             "category": "PORT", "subcategory": "Ukraine-Danube", "conditions": {"port_type": "DANUBE"}, "sort_order": 1},
            {"clause_id": "PORT-POC-001", "title": "JCC", "text": "JCC INSPECTION",
             "category": "PORT", "subcategory": "Ukraine-POC", "conditions": {"port_type": "POC"}, "sort_order": 1},
            {"clause_id": "CARGO-GRN-001", "title": "Previous cargo", "text": "LAST 3 CARGOES",
             "category": "CARGO", "subcategory": "Grain", "conditions": {"cargo_category": "grain"}, "sort_order": 1},
            {"clause_id": "LEGAL-001", "title": "Arbitration", "text": "LONDON ARBITRATION",
             "category": "LEGAL", "is_mandatory": true, "sort_order": 1}
        ]
    }"#;

    #[test]
    fn test_load_library() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();
        assert_eq!(library.version(), "2024.11");
        assert_eq!(library.len(), 5);
        assert_eq!(library.get("LEGAL-001").unwrap().title, "Arbitration");
        assert!(library.get("LEGAL-999").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();
        let mut clauses = library.clauses().to_vec();
        clauses.push(clauses[0].clone());

        let err = ClauseLibrary::from_clauses("dup", clauses).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateClause(id) if id == "PORT-DAN-002"));
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let json = r#"{"clauses": [{"clause_id": "X-1", "title": "", "text": "x", "category": "PORT"}]}"#;
        let err = ClauseLibrary::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::MissingField { field: "title", .. }
        ));

        let json = r#"{"clauses": [{"clause_id": "X-1", "title": "t", "category": "PORT"}]}"#;
        assert!(matches!(
            ClauseLibrary::from_json(json).unwrap_err(),
            LibraryError::Parse(_)
        ));
    }

    #[test]
    fn test_by_category_orders_by_sort_order() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();

        let danube: Vec<&str> = library
            .by_category("PORT", Some("Ukraine-Danube"))
            .iter()
            .map(|c| c.clause_id.as_str())
            .collect();
        assert_eq!(danube, vec!["PORT-DAN-001", "PORT-DAN-002"]);

        assert_eq!(library.by_category("port", None).len(), 3);
    }

    #[test]
    fn test_sorted_groups_categories() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();
        let ids: Vec<&str> = library.sorted().iter().map(|c| c.clause_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["CARGO-GRN-001", "LEGAL-001", "PORT-DAN-001", "PORT-POC-001", "PORT-DAN-002"]
        );
    }

    #[test]
    fn test_for_context_is_strict_but_permissive_on_missing_fields() {
        let library = ClauseLibrary::from_json(LIBRARY).unwrap();

        let danube_grain: Vec<&str> = library
            .for_context(Some(PortType::Danube), Some("grain"), None)
            .iter()
            .map(|c| c.clause_id.as_str())
            .collect();
        assert_eq!(
            danube_grain,
            vec!["CARGO-GRN-001", "LEGAL-001", "PORT-DAN-001", "PORT-DAN-002"]
        );

        // No context at all: everything passes
        assert_eq!(library.for_context(None, None, None).len(), 5);
    }
}
