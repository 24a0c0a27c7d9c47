use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::service::{CodeReply, TutorService};

#[derive(Deserialize)]
pub struct QueryRequest {
    pub prompt: String,
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

#[derive(Clone)]
struct AppState {
    service: Arc<TutorService>,
}

pub fn router(service: TutorService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(AppState {
            service: Arc::new(service),
        })
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<CodeReply>, (StatusCode, Json<ErrorDetail>)> {
    if request.prompt.is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Prompt cannot be empty"));
    }

    match state.service.generate_code(&request.prompt).await {
        Ok(reply) => Ok(Json(reply)),
        Err(err) => {
            error!("code generation failed: {err:#}");
            Err(reject(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()))
        }
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

fn reject(status: StatusCode, detail: &str) -> (StatusCode, Json<ErrorDetail>) {
    (
        status,
        Json(ErrorDetail {
            detail: detail.to_string(),
        }),
    )
}
