//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{artefacts, health, loans, manager, open_days, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Museum API",
        version = "1.0.0",
        description = "Museum Management System REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Manager
        manager::get_manager,
        manager::update_password,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::update_loan_status,
        loans::delete_loan,
        // Visitors
        visitors::list_visitors,
        visitors::get_visitor,
        visitors::create_visitor,
        visitors::update_balance,
        visitors::delete_visitor,
        visitors::get_visitor_loans,
        // Artefacts
        artefacts::list_artefacts,
        artefacts::get_artefact,
        artefacts::create_artefact,
        artefacts::update_artefact,
        artefacts::delete_artefact,
        // Open days
        open_days::list_open_days,
        open_days::get_open_day,
        open_days::create_open_day,
        open_days::delete_open_day,
    ),
    components(
        schemas(
            crate::models::enums::ExchangeStatus,
            crate::models::loan::LoanDto,
            crate::models::manager::ManagerDto,
            crate::models::visitor::Visitor,
            crate::models::visitor::CreateVisitor,
            crate::models::visitor::UpdateBalance,
            crate::models::artefact::Artefact,
            crate::models::artefact::CreateArtefact,
            crate::models::artefact::UpdateArtefact,
            crate::models::open_day::OpenDay,
            crate::models::open_day::CreateOpenDay,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "manager", description = "Manager account"),
        (name = "loans", description = "Loan requests and approvals"),
        (name = "visitors", description = "Visitor management"),
        (name = "artefacts", description = "Collection artefacts"),
        (name = "open-days", description = "Opening calendar")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
