use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use scripture_service::{Error as ServiceError, SearchHit, SearchRequest};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	let allow_cors = state.service.cfg.service.cors_allow_any_origin;
	let mut app = Router::new()
		.route("/", get(hello))
		.route("/health", get(health))
		.route("/search", get(search))
		.with_state(state)
		.layer(TraceLayer::new_for_http());

	if allow_cors {
		app = app.layer(CorsLayer::permissive());
	}

	app
}

#[derive(Debug, Serialize)]
struct Greeting {
	message: &'static str,
}

async fn hello() -> Json<Greeting> {
	Json(Greeting { message: "Hello World" })
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Query(params): Query<SearchRequest>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
	let hits = state.service.search(params).await?;

	Ok(Json(hits))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::MalformedQuery { message } =>
				Self::new(StatusCode::BAD_REQUEST, "malformed_query", message),
			ServiceError::EmbeddingProvider { .. } => {
				tracing::error!(error = %err, "Embedding provider failure.");

				Self::new(StatusCode::BAD_GATEWAY, "embedding_provider_failure", err.to_string())
			},
			ServiceError::DimensionMismatch { .. } => {
				tracing::error!(error = %err, "Vector dimension mismatch.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "dimension_mismatch", err.to_string())
			},
			ServiceError::Internal { .. } => {
				tracing::error!(error = %err, "Internal search failure.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", err.to_string())
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
