//! API handlers for the offer server
//!
//! Provides REST endpoints for:
//! - Catalogues (ports, cargoes, charterers, clauses)
//! - Clause selection
//! - Firm offer generation
//! - Offer critique

use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    Json,
};
use offer_engine::OfferRequest;
use serde::{Deserialize, Serialize};
use shared_types::{
    ClauseRecord, Critique, OfferSummary, PortType, SelectionResult, ShipmentContext,
};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub oracle_configured: bool,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "offer-server",
        version: env!("CARGO_PKG_VERSION"),
        oracle_configured: state.advisor.is_configured(),
    })
}

/// Port catalogue entry
#[derive(Debug, Serialize)]
pub struct PortInfo {
    pub port_id: String,
    pub name: String,
    pub country: String,
    pub region: String,
    pub port_type: PortType,
    pub max_draft: f64,
}

/// Port list response
#[derive(Serialize)]
pub struct PortListResponse {
    pub success: bool,
    pub ports: Vec<PortInfo>,
    pub count: usize,
}

fn port_list(ports: &[offer_engine::data::PortRecord]) -> Json<PortListResponse> {
    let ports: Vec<PortInfo> = ports
        .iter()
        .map(|p| PortInfo {
            port_id: p.port_id.clone(),
            name: p.name.clone(),
            country: p.country.clone(),
            region: p.region.clone(),
            port_type: p.port_type(),
            max_draft: p.max_draft,
        })
        .collect();
    let count = ports.len();

    Json(PortListResponse {
        success: true,
        ports,
        count,
    })
}

/// Handler: GET /api/ports/load
pub async fn handle_load_ports(State(state): State<AppState>) -> Json<PortListResponse> {
    port_list(state.offers.data().load_ports())
}

/// Handler: GET /api/ports/discharge
pub async fn handle_discharge_ports(State(state): State<AppState>) -> Json<PortListResponse> {
    port_list(state.offers.data().discharge_ports())
}

/// Cargo catalogue entry
#[derive(Debug, Serialize)]
pub struct CargoInfo {
    pub cargo_id: String,
    pub name: String,
    pub category: String,
    /// "48-50 CBFT/MT"
    pub stw_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Cargo list response
#[derive(Serialize)]
pub struct CargoListResponse {
    pub success: bool,
    pub cargoes: Vec<CargoInfo>,
    pub count: usize,
}

/// Handler: GET /api/cargoes
pub async fn handle_cargoes(State(state): State<AppState>) -> Json<CargoListResponse> {
    let cargoes: Vec<CargoInfo> = state
        .offers
        .data()
        .cargoes()
        .iter()
        .map(|c| CargoInfo {
            cargo_id: c.cargo_id.clone(),
            name: c.name.clone(),
            category: c.category.clone(),
            stw_range: c.stw_range(),
            notes: c.notes.clone(),
        })
        .collect();
    let count = cargoes.len();

    Json(CargoListResponse {
        success: true,
        cargoes,
        count,
    })
}

/// Charterer catalogue entry
#[derive(Debug, Serialize)]
pub struct ChartererInfo {
    pub charterer_id: String,
    pub charterer_name: String,
    /// Primary company, else the charterer name
    pub company_name: String,
    pub or_sub_default: bool,
}

/// Charterer list response
#[derive(Serialize)]
pub struct ChartererListResponse {
    pub success: bool,
    pub charterers: Vec<ChartererInfo>,
    pub count: usize,
}

/// Handler: GET /api/charterers
pub async fn handle_charterers(State(state): State<AppState>) -> Json<ChartererListResponse> {
    let charterers: Vec<ChartererInfo> = state
        .offers
        .data()
        .charterers()
        .iter()
        .map(|c| ChartererInfo {
            charterer_id: c.charterer_id.clone(),
            charterer_name: c.charterer_name.clone(),
            company_name: c.company_name().to_string(),
            or_sub_default: c.or_sub_default(),
        })
        .collect();
    let count = charterers.len();

    Json(ChartererListResponse {
        success: true,
        charterers,
        count,
    })
}

/// Clause catalogue filters
#[derive(Debug, Default, Deserialize)]
pub struct ClauseQuery {
    pub category: Option<String>,
    /// Only valid together with `category`
    pub subcategory: Option<String>,
    pub port_type: Option<PortType>,
    pub cargo_category: Option<String>,
    pub discharge_country: Option<String>,
}

impl ClauseQuery {
    fn has_context(&self) -> bool {
        self.port_type.is_some() || self.cargo_category.is_some() || self.discharge_country.is_some()
    }
}

/// Clause list response
#[derive(Serialize)]
pub struct ClauseListResponse {
    pub success: bool,
    pub version: String,
    pub clauses: Vec<ClauseRecord>,
    pub count: usize,
}

/// Handler: GET /api/clauses
pub async fn handle_list_clauses(
    State(state): State<AppState>,
    Query(query): Query<ClauseQuery>,
) -> Result<Json<ClauseListResponse>, ServerError> {
    let library = state.offers.library();

    let mut clauses = match query.category.as_deref() {
        Some(category) => library.by_category(category, query.subcategory.as_deref()),
        None if query.subcategory.is_some() => {
            return Err(ServerError::InvalidRequest(
                "subcategory filter requires a category".to_string(),
            ));
        }
        None => library.sorted(),
    };

    if query.has_context() {
        let fitting: HashSet<&str> = library
            .for_context(
                query.port_type,
                query.cargo_category.as_deref(),
                query.discharge_country.as_deref(),
            )
            .into_iter()
            .map(|c| c.clause_id.as_str())
            .collect();
        clauses.retain(|c| fitting.contains(c.clause_id.as_str()));
    }

    let clauses: Vec<ClauseRecord> = clauses.into_iter().cloned().collect();
    let count = clauses.len();

    Ok(Json(ClauseListResponse {
        success: true,
        version: library.version().to_string(),
        clauses,
        count,
    }))
}

/// Offer parameters plus the selection mode
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub offer: OfferRequest,

    /// Ask the oracle to select clauses; falls back to rules on any failure
    #[serde(default)]
    pub ai_assist: bool,
}

async fn select_for(state: &AppState, context: &ShipmentContext, ai_assist: bool) -> SelectionResult {
    if ai_assist {
        state.advisor.select(context).await
    } else {
        state.offers.clause_engine().select(context)
    }
}

/// Selection response
#[derive(Serialize)]
pub struct SelectionResponse {
    pub success: bool,
    pub context: ShipmentContext,
    pub selection: SelectionResult,
}

/// Handler: POST /api/clauses/select
pub async fn handle_select_clauses(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<SelectionResponse>, ServerError> {
    info!(
        "Selection request: {} -> {}, ai_assist={}",
        req.offer.load_port, req.offer.discharge_port, req.ai_assist
    );

    let context = state.offers.context(&req.offer)?;
    let selection = select_for(&state, &context, req.ai_assist).await;
    debug!("Selected clauses: {:?}", selection.clause_ids());

    Ok(Json(SelectionResponse {
        success: true,
        context,
        selection,
    }))
}

/// Generation response
#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub firm_offer_text: String,
    pub summary: OfferSummary,
    pub selection: SelectionResult,
}

/// Handler: POST /api/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ServerError> {
    info!(
        "Generate request: {} -> {}, {} {} MT, ai_assist={}",
        req.offer.load_port, req.offer.discharge_port, req.offer.cargo, req.offer.quantity, req.ai_assist
    );

    let context = state.offers.context(&req.offer)?;
    let selection = select_for(&state, &context, req.ai_assist).await;
    let document = state.offers.generate(&req.offer, &selection)?;

    Ok(Json(GenerateResponse {
        success: true,
        firm_offer_text: document.text(),
        summary: document.summary,
        selection,
    }))
}

/// Critique request body
#[derive(Debug, Deserialize)]
pub struct CritiqueRequest {
    pub offer_text: String,
    /// The parameters the offer was generated from
    pub offer: OfferRequest,
}

/// Critique response
#[derive(Serialize)]
pub struct CritiqueResponse {
    pub success: bool,
    pub critique: Critique,
}

/// Handler: POST /api/critique
pub async fn handle_critique(
    State(state): State<AppState>,
    Json(req): Json<CritiqueRequest>,
) -> Result<Json<CritiqueResponse>, ServerError> {
    if req.offer_text.trim().is_empty() {
        return Err(ServerError::InvalidRequest(
            "offer_text must not be empty".to_string(),
        ));
    }

    let context = state.offers.context(&req.offer)?;
    info!("Critique request: {} -> {}", context.load_port, context.discharge_port);

    let critique = state.advisor.critique(&req.offer_text, &context).await;

    Ok(Json(CritiqueResponse {
        success: true,
        critique,
    }))
}
