//! REST endpoints for the wizard, reference data, phone sign-in and the
//! image picker.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::OtpFlow;
use crate::error::{Error, ServiceError, UNEXPECTED_ERROR_MESSAGE, ValidationError};

use super::input::StepInput;
use super::manager::WizardManager;
use super::reference::suggest_ethnicities;

const DEFAULT_SUGGESTIONS: usize = 10;
const MAX_SUGGESTIONS: usize = 50;

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub manager: Arc<WizardManager>,
    pub otp: Arc<OtpFlow>,
}

/// Maps crate errors onto HTTP responses.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Validation(v) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": v.message, "step": v.step, "field": v.field }),
            ),
            Error::Wizard(w) => (StatusCode::CONFLICT, json!({ "error": w.to_string() })),
            Error::Service(ServiceError::Unexpected(detail)) => {
                tracing::error!(error = %detail, "Unexpected service failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": UNEXPECTED_ERROR_MESSAGE }),
                )
            }
            Error::Service(s) => (StatusCode::BAD_GATEWAY, json!({ "error": s.user_message() })),
            Error::Config(_) | Error::Database(_) => {
                tracing::error!(error = %self.0, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": UNEXPECTED_ERROR_MESSAGE }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Unwrap a JSON body, reporting an undecodable one as a validation error.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError(
            ValidationError::invalid("body", "Please check the values you entered and try again.")
                .into(),
        )
    })
}

/// GET /api/wizard/status
async fn get_status(State(state): State<WizardRouteState>) -> impl IntoResponse {
    Json(state.manager.status().await)
}

/// POST /api/wizard/step
///
/// Body is the step's form, tagged with `"step"`.
async fn post_step(
    State(state): State<WizardRouteState>,
    payload: Result<Json<StepInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.manager.submit(json_body(payload)?).await?;
    Ok(Json(outcome))
}

/// POST /api/wizard/back
async fn post_back(State(state): State<WizardRouteState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.manager.back().await?))
}

/// POST /api/wizard/reset
async fn post_reset(State(state): State<WizardRouteState>) -> impl IntoResponse {
    Json(state.manager.reset().await)
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

/// GET /api/reference/ethnicities?q=&limit=
async fn get_ethnicities(Query(query): Query<SuggestQuery>) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(DEFAULT_SUGGESTIONS).min(MAX_SUGGESTIONS);
    Json(json!({ "suggestions": suggest_ethnicities(&query.q, limit) }))
}

#[derive(Debug, Deserialize)]
struct SendOtpRequest {
    phone: String,
}

#[derive(Debug, Deserialize)]
struct VerifyOtpRequest {
    phone: String,
    code: String,
}

/// POST /api/auth/otp
async fn post_send_otp(
    State(state): State<WizardRouteState>,
    payload: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let phone = state.otp.send_code(&req.phone).await?;
    Ok(Json(json!({ "phone": phone })))
}

/// POST /api/auth/verify
async fn post_verify_otp(
    State(state): State<WizardRouteState>,
    payload: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;
    let user = state.otp.verify_code(&req.phone, &req.code).await?;
    Ok(Json(user))
}

/// POST /api/media/pick
///
/// `{"image": null}` when the user canceled.
async fn post_pick_image(
    State(state): State<WizardRouteState>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state.manager.pick_image().await?;
    Ok(Json(json!({ "image": image })))
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/wizard/status", get(get_status))
        .route("/api/wizard/step", post(post_step))
        .route("/api/wizard/back", post(post_back))
        .route("/api/wizard/reset", post(post_reset))
        .route("/api/reference/ethnicities", get(get_ethnicities))
        .route("/api/auth/otp", post(post_send_otp))
        .route("/api/auth/verify", post(post_verify_otp))
        .route("/api/media/pick", post(post_pick_image))
        .layer(cors)
        .with_state(state)
}
