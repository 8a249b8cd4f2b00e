use axum::{extract::State, http::StatusCode, Json};
use chronos_core::AppState;
use chronos_primitives::models::dtos::auth_dto::HealthResponse;
use diesel::prelude::*;
use std::sync::Arc;
use tracing::error;

pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match state.db.get() {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn) {
            Ok(_) => true,
            Err(e) => {
                error!("Health check DB query failed: {}", e);
                false
            }
        },
        Err(e) => {
            error!("Health check DB connection failed: {}", e);
            false
        }
    };

    if database_ok {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "up",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database: "down",
            }),
        )
    }
}
