use crate::transport::http::error::{ErrorBody, ErrorDetail, ErrorMessage};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (DB reachable)"),
        (status = 503, description = "Service is unhealthy (DB unreachable)", body = ErrorBody)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(state.store.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok" })),
        )
            .into_response(),
        Err(e) => {
            let status = StatusCode::SERVICE_UNAVAILABLE;
            (
                status,
                Json(ErrorBody {
                    error: ErrorDetail {
                        message: ErrorMessage::One(format!("DB ping failed: {}", e)),
                        status: status.as_u16(),
                    },
                }),
            )
                .into_response()
        }
    }
}
