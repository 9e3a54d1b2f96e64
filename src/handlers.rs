use crate::config::Config;
use crate::copper_client::CopperClient;
use crate::errors::ActionError;
use crate::http::ReqwestInvoker;
use crate::models::{LeadUpdateForm, LeadUpdateInput, PersonInput};
use crate::props::{self, ActionDefinition};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest action payload accepted by the host surface.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the Copper developer API.
    pub copper: CopperClient<ReqwestInvoker>,
}

/// Health check endpoint.
///
/// Reports the service version and the Copper API root requests go to.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "copper-actions",
            "version": env!("CARGO_PKG_VERSION"),
            "copper_base_url": state.config.copper_base_url
        })),
    )
}

/// GET /api/v1/actions
///
/// Form definitions of every action, for hosts that render their own input UI.
pub async fn list_actions() -> Json<Vec<ActionDefinition>> {
    Json(props::catalogue())
}

/// POST /api/v1/actions/create_person
///
/// Runs the "Create Person" action and returns Copper's response body.
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PersonInput>,
) -> Result<Json<Value>, ActionError> {
    tracing::info!("POST /actions/create_person");

    let person = state.copper.create_person(&input).await?;
    Ok(Json(person))
}

/// POST /api/v1/actions/update_lead
///
/// Runs the "Update Lead" action and returns Copper's response body.
pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LeadUpdateForm>,
) -> Result<Json<Value>, ActionError> {
    let input = LeadUpdateInput::from(form);
    tracing::info!("POST /actions/update_lead - lead_id: {}", input.lead_id);

    let lead = state.copper.update_lead(&input).await?;
    Ok(Json(lead))
}

/// Builds the service router with its middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    let action_routes = Router::new()
        .route("/api/v1/actions", get(list_actions))
        .route("/api/v1/actions/create_person", post(create_person))
        .route("/api/v1/actions/update_lead", post(update_lead))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)));

    Router::new()
        .route("/health", get(health))
        .merge(action_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
