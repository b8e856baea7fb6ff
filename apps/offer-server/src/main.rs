//! Firm Offer Server
//!
//! REST front end for firm offer assembly on Black Sea and Danube voyages.
//! Provides endpoints for:
//!
//! - Port, cargo, charterer and clause catalogues
//! - Rule-based and AI-assisted clause selection
//! - Firm offer generation
//! - AI critique of a finished offer
//!
//! The oracle is configured from `ANTHROPIC_API_KEY`. Without it every
//! AI-assisted call degrades to rule-based selection.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use clause_advisor::{ClauseAdvisor, OracleHandle};
use offer_engine::OfferEngine;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{
    handle_cargoes, handle_charterers, handle_critique, handle_discharge_ports, handle_generate,
    handle_health, handle_list_clauses, handle_load_ports, handle_select_clauses,
};

/// Command-line arguments for the offer server
#[derive(Parser, Debug)]
#[command(name = "offer-server")]
#[command(about = "Firm offer server for clause selection and offer assembly")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory with ports.json, cargo_stw.json, charterers.json and
    /// master_library.json; the embedded datasets are used when omitted
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Oracle call timeout in milliseconds
    #[arg(long, default_value = "30000")]
    oracle_timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub offers: OfferEngine,
    pub advisor: ClauseAdvisor,
}

impl AppState {
    /// The advisor shares the offer engine's clause library
    pub fn new(offers: OfferEngine, oracle: OracleHandle, oracle_timeout: Duration) -> Self {
        let advisor =
            ClauseAdvisor::new(offers.clause_engine().clone(), oracle).with_timeout(oracle_timeout);
        Self { offers, advisor }
    }
}

/// Full API router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Catalogues
        .route("/api/ports/load", get(handle_load_ports))
        .route("/api/ports/discharge", get(handle_discharge_ports))
        .route("/api/cargoes", get(handle_cargoes))
        .route("/api/charterers", get(handle_charterers))
        .route("/api/clauses", get(handle_list_clauses))
        // Offer workflow
        .route("/api/clauses/select", post(handle_select_clauses))
        .route("/api/generate", post(handle_generate))
        .route("/api/critique", post(handle_critique))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting offer server on {}:{}", args.host, args.port);

    let offers = match &args.data_dir {
        Some(dir) => OfferEngine::from_dir(dir)?,
        None => OfferEngine::embedded()?,
    };

    let oracle_timeout = Duration::from_millis(args.oracle_timeout_ms);
    let oracle = OracleHandle::from_env(oracle_timeout);
    if !oracle.is_configured() {
        warn!("AI oracle not configured, clause selection is rule-based only");
    }

    let state = AppState::new(offers, oracle, oracle_timeout);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Oracle timeout: {}ms", args.oracle_timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
