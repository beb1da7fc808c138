// src/handlers/admin.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AdminSession, i18n::Locale},
    models::{
        admin::{AdminLoginPayload, AdminSessionResponse},
        lead::{Lead, LeadStatus},
    },
};

// =============================================================================
//  ÁREA 1: PORTÃO DO PAINEL
// =============================================================================

// POST /api/admin/session
#[utoipa::path(
    post,
    path = "/api/admin/session",
    tag = "Admin",
    request_body = AdminLoginPayload,
    responses(
        (status = 200, description = "Sessão aberta", body = AdminSessionResponse),
        (status = 400, description = "Chave não informada"),
        (status = 401, description = "Chave inválida")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<AdminLoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Json(payload) = payload.map_err(|rejection| {
        AppError::InvalidPayload(rejection.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    let session = app_state.admin_service
        .login(&payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(session)))
}

// =============================================================================
//  ÁREA 2: LEADS (Busca, triagem e exportação)
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Trecho do nome ou da empresa (sem diferenciar maiúsculas)
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: LeadStatus,
}

// GET /api/admin/leads
#[utoipa::path(
    get,
    path = "/api/admin/leads",
    tag = "Admin",
    params(SearchQuery),
    responses(
        (status = 200, description = "Leads do mais novo para o mais antigo", body = Vec<Lead>),
        (status = 401, description = "Sessão ausente ou expirada")
    ),
    security(("admin_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Lead>> {
    Json(app_state.lead_service.search(query.search.as_deref()).await)
}

// GET /api/admin/leads/export
// Exporta a lista filtrada (mesmo `search` da listagem); sem filtro, exporta tudo.
#[utoipa::path(
    get,
    path = "/api/admin/leads/export",
    tag = "Admin",
    params(SearchQuery),
    responses(
        (status = 200, description = "Planilha CSV", body = String, content_type = "text/csv"),
        (status = 401, description = "Sessão ausente ou expirada")
    ),
    security(("admin_jwt" = []))
)]
pub async fn export_leads(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ApiError> {

    let leads = app_state.lead_service.search(query.search.as_deref()).await;

    let csv_bytes = app_state.export_service
        .leads_to_csv(&leads)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let filename = app_state.export_service.filename(Utc::now());
    tracing::info!("📤 Exportando {} leads em {}", leads.len(), filename);

    // Configura os Headers para o navegador baixar o arquivo
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
    ];

    Ok((headers, csv_bytes).into_response())
}

// PATCH /api/admin/leads/{id}/status
#[utoipa::path(
    patch,
    path = "/api/admin/leads/{id}/status",
    tag = "Admin",
    request_body = UpdateStatusPayload,
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 204, description = "Status aplicado (id inexistente é ignorado)"),
        (status = 400, description = "Status fora da lista"),
        (status = 401, description = "Sessão ausente ou expirada")
    ),
    security(("admin_jwt" = []))
)]
pub async fn update_lead_status(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {

    let Path(id) = id.map_err(|rejection| {
        AppError::InvalidPayload(rejection.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;
    let Json(payload) = payload.map_err(|rejection| {
        AppError::InvalidPayload(rejection.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    tracing::debug!("Sessão de {} (emitida em {}) altera status de {}", session.sub, session.iat, id);
    app_state.lead_service.update_status(id, payload.status).await;

    Ok(StatusCode::NO_CONTENT)
}

// DELETE /api/admin/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/leads/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 204, description = "Lead removido (id inexistente é ignorado)"),
        (status = 401, description = "Sessão ausente ou expirada")
    ),
    security(("admin_jwt" = []))
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    AdminSession(session): AdminSession,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {

    let Path(id) = id.map_err(|rejection| {
        AppError::InvalidPayload(rejection.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    tracing::debug!("Sessão de {} (emitida em {}) remove {}", session.sub, session.iat, id);
    app_state.lead_service.delete(id).await;

    Ok(StatusCode::NO_CONTENT)
}
