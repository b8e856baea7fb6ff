//! Offer request and its resolution against the domain data

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{PortType, ShipmentContext};

use crate::data::{CargoRecord, ChartererRecord, DomainData, PortRecord};
use crate::error::OfferError;

pub const DEFAULT_TOLERANCE: f64 = 5.0;

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Parameters of one firm offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRequest {
    pub load_port: String,
    pub discharge_port: String,
    pub cargo: String,
    /// Metric tons
    pub quantity: u64,
    /// USD per metric ton
    pub freight_rate: f64,
    /// USD per day
    pub demurrage_rate: f64,
    pub laycan_start: NaiveDate,
    pub laycan_end: NaiveDate,
    #[serde(default)]
    pub charterer_id: Option<String>,
    /// `None` takes the charterer's default
    #[serde(default)]
    pub or_sub: Option<bool>,
    /// Percent, MOLCO
    #[serde(default = "default_tolerance")]
    pub quantity_tolerance: f64,
}

/// A request with every named entity looked up
#[derive(Debug, Clone, Copy)]
pub struct ResolvedShipment<'a> {
    pub request: &'a OfferRequest,
    pub load_port: &'a PortRecord,
    pub discharge_port: &'a PortRecord,
    pub cargo: &'a CargoRecord,
    pub charterer: Option<&'a ChartererRecord>,
}

impl<'a> ResolvedShipment<'a> {
    /// Look up ports, cargo and charterer; unknown names are client errors
    pub fn resolve(data: &'a DomainData, request: &'a OfferRequest) -> Result<Self, OfferError> {
        let load_port = data
            .find_load_port(&request.load_port)
            .ok_or_else(|| OfferError::not_found("Load port", &request.load_port))?;
        let discharge_port = data
            .find_discharge_port(&request.discharge_port)
            .ok_or_else(|| OfferError::not_found("Discharge port", &request.discharge_port))?;
        let cargo = data
            .find_cargo(&request.cargo)
            .ok_or_else(|| OfferError::not_found("Cargo", &request.cargo))?;
        let charterer = match request.charterer_id.as_deref() {
            Some(id) => Some(
                data.find_charterer(id)
                    .ok_or_else(|| OfferError::not_found("Charterer", id))?,
            ),
            None => None,
        };

        Ok(Self {
            request,
            load_port,
            discharge_port,
            cargo,
            charterer,
        })
    }

    pub fn port_type(&self) -> PortType {
        self.load_port.port_type()
    }

    pub fn is_danube(&self) -> bool {
        self.port_type().is_danube()
    }

    pub fn is_egypt(&self) -> bool {
        self.discharge_port.is_egypt()
    }

    /// Explicit request flag, else the charterer's default
    pub fn or_sub(&self) -> bool {
        self.request
            .or_sub
            .unwrap_or_else(|| self.charterer.is_some_and(|c| c.or_sub_default()))
    }

    pub fn total_freight(&self) -> f64 {
        self.request.quantity as f64 * self.request.freight_rate
    }

    /// "Reni -> Alexandria", using the names as requested
    pub fn route(&self) -> String {
        format!("{} -> {}", self.request.load_port, self.request.discharge_port)
    }

    pub fn context(&self) -> ShipmentContext {
        ShipmentContext {
            load_port: self.load_port.name.clone(),
            discharge_port: self.discharge_port.name.clone(),
            cargo: self.cargo.name.clone(),
            quantity: self.request.quantity,
            port_type: self.port_type(),
            discharge_country: self.discharge_port.country.clone(),
            cargo_category: self.cargo.category.clone(),
            charterer: self.charterer.map(|c| c.charterer_name.clone()),
        }
    }
}
