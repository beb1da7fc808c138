// src/handlers/health.rs

use axum::{extract::State, http::StatusCode};

use crate::config::AppState;

// GET /api/health
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, &'static str) {
    match sqlx::query("SELECT 1").execute(&app_state.db_pool).await {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!("🔥 Banco de dados indisponível: {:?}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "DB unavailable")
        }
    }
}
