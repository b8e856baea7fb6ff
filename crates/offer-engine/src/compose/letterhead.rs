//! Charterer letterhead for the offer header

use crate::data::ChartererRecord;

/// Letterhead lines: primary (or first) company details, else the bare
/// charterer name, else a fill-in placeholder
pub fn letterhead_lines(charterer: Option<&ChartererRecord>) -> Vec<String> {
    let Some(charterer) = charterer else {
        return vec![
            "CHARTERERS: [CHARTERER NAME]".to_string(),
            "[Full address and registration details]".to_string(),
        ];
    };

    match charterer.primary_company() {
        Some(company) => vec![
            format!("CHARTERERS: {}", company.company_name),
            company.address.clone(),
            format!("{} {}, {}", company.postal_code, company.city, company.country),
            format!(
                "Reg. No: {} | VAT: {}",
                company.registration_number, company.vat
            ),
        ],
        None => vec![format!("CHARTERERS: {}", charterer.charterer_name)],
    }
}
