use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use dossier_service::{
	AssignmentSnapshot, Error as ServiceError, ProfilesResponse, SearchRequest, SearchResponse,
	SynthesizeRequest, SynthesizeResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/mode", get(mode))
		.route("/v1/profiles", get(profiles))
		.route("/v1/profiles/synthesize", post(synthesize))
		.route("/v1/profiles/search", post(search))
		.route("/v1/match/assignments", post(assignments))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Serialize)]
struct ModeResponse {
	live_reasoning: bool,
	records_authenticated: bool,
	message: &'static str,
}

async fn mode(State(state): State<AppState>) -> Json<ModeResponse> {
	let live = state.service.live_reasoning();

	Json(ModeResponse {
		live_reasoning: live,
		records_authenticated: !state.service.cfg.providers.records.token.is_empty(),
		message: if live {
			"Using the configured reasoning service."
		} else {
			"Offline mode: deterministic fallbacks and keyword matching."
		},
	})
}

async fn synthesize(
	State(state): State<AppState>,
	Json(payload): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
	let response = state.service.synthesize_profiles(payload).await?;

	Ok(Json(response))
}

async fn profiles(State(state): State<AppState>) -> Result<Json<ProfilesResponse>, ApiError> {
	let response = state.service.profiles()?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn assignments(State(state): State<AppState>) -> Result<Json<AssignmentSnapshot>, ApiError> {
	let response = state.service.run_assignment_match().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Matching { .. } => (StatusCode::BAD_GATEWAY, "matching_failed"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
			ServiceError::Source { .. } => (StatusCode::BAD_GATEWAY, "source_unavailable"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
		};

		Self { status, error_code, message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
