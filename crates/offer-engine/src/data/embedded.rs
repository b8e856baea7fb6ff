//! Embedded datasets
//!
//! The default ports, cargo, charterer and clause library data are compiled
//! into the binary so the engine runs without a data directory.

/// Ports, port types and port clause texts - loaded from data/ports.json
const PORTS_DATASET: &str = include_str!("../../data/ports.json");

/// Cargo stowage factors and grain clauses - loaded from data/cargo_stw.json
const CARGO_DATASET: &str = include_str!("../../data/cargo_stw.json");

/// Charterers and their companies - loaded from data/charterers.json
const CHARTERERS_DATASET: &str = include_str!("../../data/charterers.json");

/// Master clause library - loaded from data/master_library.json
const MASTER_LIBRARY: &str = include_str!("../../data/master_library.json");

/// Get an embedded dataset by file name
pub fn get_embedded_dataset(name: &str) -> Option<&'static str> {
    match name {
        super::PORTS_FILE => Some(PORTS_DATASET),
        super::CARGOES_FILE => Some(CARGO_DATASET),
        super::CHARTERERS_FILE => Some(CHARTERERS_DATASET),
        super::LIBRARY_FILE => Some(MASTER_LIBRARY),
        _ => None,
    }
}

/// List available embedded datasets
pub fn list_embedded_datasets() -> Vec<&'static str> {
    vec![
        super::PORTS_FILE,
        super::CARGOES_FILE,
        super::CHARTERERS_FILE,
        super::LIBRARY_FILE,
    ]
}
