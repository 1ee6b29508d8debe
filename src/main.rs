//! Museum Server - Museum Management System
//!
//! REST API server for visitors, artefacts, open days and loans.

use axum::{
    routing::{get, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use museum_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    tracing::info!("Starting Museum Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database migrations completed");

    let services = Services::new(Repository::new(pool.clone()), config.loans.clone());

    services
        .manager
        .ensure_manager(&config.manager.username, &config.manager.password)
        .await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        db: pool,
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("museum_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Manager
        .route(
            "/manager",
            get(api::manager::get_manager).put(api::manager::update_password),
        )
        // Loans
        .route(
            "/loans",
            get(api::loans::list_loans).post(api::loans::create_loan),
        )
        .route(
            "/loans/:id",
            get(api::loans::get_loan)
                .put(api::loans::update_loan_status)
                .delete(api::loans::delete_loan),
        )
        // Visitors
        .route(
            "/visitors",
            get(api::visitors::list_visitors).post(api::visitors::create_visitor),
        )
        .route(
            "/visitors/:username",
            get(api::visitors::get_visitor).delete(api::visitors::delete_visitor),
        )
        .route("/visitors/:username/balance", put(api::visitors::update_balance))
        .route("/visitors/:username/loans", get(api::visitors::get_visitor_loans))
        // Artefacts
        .route(
            "/artefacts",
            get(api::artefacts::list_artefacts).post(api::artefacts::create_artefact),
        )
        .route(
            "/artefacts/:id",
            get(api::artefacts::get_artefact)
                .put(api::artefacts::update_artefact)
                .delete(api::artefacts::delete_artefact),
        )
        // Open days
        .route(
            "/open-days",
            get(api::open_days::list_open_days).post(api::open_days::create_open_day),
        )
        .route(
            "/open-days/:date",
            get(api::open_days::get_open_day).delete(api::open_days::delete_open_day),
        )
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
