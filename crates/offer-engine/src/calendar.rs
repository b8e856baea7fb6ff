use chrono::{Datelike, NaiveDate};

/// Laycan and holiday-calendar labels for Ukrainian loadings
///
/// A laycan opening in November or December is quoted against both the
/// current and the following year's holiday calendar.
pub struct LaycanCalendar;

impl LaycanCalendar {
    /// Whether the laycan start falls in the year-end window (Nov/Dec)
    pub fn spans_year_end(start: NaiveDate) -> bool {
        matches!(start.month(), 11 | 12)
    }

    /// "2024" or "2024/2025"
    pub fn year_label(start: NaiveDate) -> String {
        let year = start.year();
        if Self::spans_year_end(start) {
            format!("{}/{}", year, year + 1)
        } else {
            year.to_string()
        }
    }

    /// "25-30 NOVEMBER 2024/2025"
    ///
    /// The month is always the start month, even when the window runs into
    /// the next month.
    pub fn laycan(start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}-{} {} {}",
            start.day(),
            end.day(),
            start.format("%B").to_string().to_uppercase(),
            Self::year_label(start)
        )
    }

    /// "HOLIDAYS AS PER UKRAINE 2024/2025 CALENDAR"
    pub fn holidays_line(start: NaiveDate) -> String {
        format!("HOLIDAYS AS PER UKRAINE {} CALENDAR", Self::year_label(start))
    }
}
