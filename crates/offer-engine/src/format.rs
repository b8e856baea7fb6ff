//! Formatting of the main-terms lines

use crate::data::CargoRecord;

pub use shared_types::format::group_thousands;
use shared_types::format::group_digits;

/// "25,000 MTS (+/- 5% MOLCO)"
pub fn format_quantity(quantity: u64, tolerance: f64) -> String {
    format!("{} MTS (+/- {:.0}% MOLCO)", group_thousands(quantity), tolerance)
}

/// "25,000 MTS (+/- 5% MOLCO) OF CORN IN BULK STW ABT 48-50 WOG"
pub fn format_cargo_description(cargo: &CargoRecord, quantity: u64, tolerance: f64) -> String {
    format!(
        "{} OF {} IN BULK STW ABT {}-{} WOG",
        format_quantity(quantity, tolerance),
        cargo.name.to_uppercase(),
        cargo.stw_min,
        cargo.stw_max
    )
}

pub fn format_freight(rate: f64) -> String {
    format!("USD {:.2} PMT FIOST", rate)
}

/// Danube offers use the combined DEMURRAGE/DETENTION term
pub fn format_demurrage(rate: f64, is_danube: bool) -> String {
    let term = if is_danube {
        "DEMURRAGE/DETENTION"
    } else {
        "DEMURRAGE"
    };
    format!(
        "{}: USD {} PDPR FD BENDS (LESS BROKERAGE COMMISSION)",
        term,
        group_digits(&format!("{:.0}", rate))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corn() -> CargoRecord {
        serde_json::from_str(
            r#"{"cargo_id": "CRG-CORN", "name": "Corn", "category": "grain",
                "stw_min": 48, "stw_max": 50, "stw_unit": "CBFT/MT"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_format_cargo_description() {
        assert_eq!(
            format_cargo_description(&corn(), 25_000, 5.0),
            "25,000 MTS (+/- 5% MOLCO) OF CORN IN BULK STW ABT 48-50 WOG"
        );
        assert_eq!(
            format_quantity(3_500, 10.0),
            "3,500 MTS (+/- 10% MOLCO)"
        );
    }

    #[test]
    fn test_format_freight() {
        assert_eq!(format_freight(28.5), "USD 28.50 PMT FIOST");
        assert_eq!(format_freight(31.0), "USD 31.00 PMT FIOST");
    }

    #[test]
    fn test_format_demurrage() {
        assert_eq!(
            format_demurrage(9_000.0, true),
            "DEMURRAGE/DETENTION: USD 9,000 PDPR FD BENDS (LESS BROKERAGE COMMISSION)"
        );
        assert_eq!(
            format_demurrage(12_499.6, false),
            "DEMURRAGE: USD 12,500 PDPR FD BENDS (LESS BROKERAGE COMMISSION)"
        );
    }
}
