use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use explain_error_core::{
    api::{ExplainRequest, HealthResponse},
    model::Verdict,
    Classifier,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::config::{ConfigError, DaemonConfig};

pub const BANNER: &str =
    "ExplainError API is running. Try GET /health or POST /v1/explain-error";

#[derive(Clone, Default)]
pub struct AppState {
    classifier: Classifier,
}

/// Builds the full router: routes, body limit, CORS, request tracing.
pub fn router(config: &DaemonConfig) -> Result<Router, ConfigError> {
    config.validate()?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.origin_header_values()?))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/v1/explain-error", post(explain_error))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::default()))
}

async fn root() -> &'static str {
    BANNER
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn explain_error(
    State(st): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<Verdict>, AppError> {
    let Json(req) = payload?;
    tracing::info!(
        has_text = req.has_text(),
        has_context = req.has_context(),
        "incoming"
    );

    let verdict = st.classifier.classify(req.raw_error(), req.stack());
    tracing::info!(
        classification = %verdict.category,
        confidence = verdict.confidence,
        "classified"
    );
    Ok(Json(verdict))
}

/// Request failure rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    source: anyhow::Error,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            source: anyhow::anyhow!(rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.source, "request rejected");
        let body = Json(serde_json::json!({
            "error": self.source.to_string()
        }));
        (self.status, body).into_response()
    }
}
