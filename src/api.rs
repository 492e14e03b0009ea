/// HTTP API для слоя отображения

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::error::DashboardError;
use crate::state::{DashboardState, DashboardView};
use crate::types::Period;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardState>,
}

#[derive(Debug, Deserialize)]
pub struct PeriodRequest {
    pub period: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DismissResponse {
    pub dismissed: bool,
}

/// Ошибка запроса в виде JSON `{ "error": ... }`
pub struct ApiError(pub DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DashboardError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

pub fn router(dashboard: Arc<DashboardState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard_view))
        .route("/api/period", post(set_period))
        .route("/api/refresh", post(refresh))
        .route("/api/alerts/:id", delete(dismiss_alert))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(AppState { dashboard })
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Dispatch Dashboard API (Rust)",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn dashboard_view(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard.view().await)
}

async fn set_period(
    State(state): State<AppState>,
    Json(request): Json<PeriodRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let period: Period = request.period.parse()?;

    tracing::info!("Set period request: {}", period);
    state.dashboard.set_period(period).await;

    Ok(Json(state.dashboard.view().await))
}

async fn refresh(State(state): State<AppState>) -> Json<DashboardView> {
    tracing::info!("Refresh request");
    state.dashboard.refresh().await;
    Json(state.dashboard.view().await)
}

async fn dismiss_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<DismissResponse> {
    let dismissed = state.dashboard.dismiss_alert(&id).await;
    Json(DismissResponse { dismissed })
}
