// src/handlers/leads.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::lead::{BudgetRange, Lead, LeadContent, LeadFormOptions, WebsiteType},
};

// =============================================================================
//  FORMULÁRIO DE CONTATO (Público)
// =============================================================================

// Todos os campos são obrigatórios. Enums fora da lista são recusados já no JSON.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeadPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Co")]
    pub business_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "a@x.com")]
    pub email: String,

    pub website_type: WebsiteType,
    pub budget_range: BudgetRange,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "need a page")]
    pub message: String,
}

impl From<SubmitLeadPayload> for LeadContent {
    fn from(payload: SubmitLeadPayload) -> Self {
        Self {
            name: payload.name,
            business_name: payload.business_name,
            email: payload.email,
            website_type: payload.website_type,
            budget_range: payload.budget_range,
            message: payload.message,
        }
    }
}

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = SubmitLeadPayload,
    responses(
        (status = 201, description = "Lead registrado", body = Lead),
        (status = 400, description = "Campo ausente ou valor fora da lista"),
        (status = 502, description = "Automação recusou ou não confirmou o lead")
    )
)]
pub async fn submit_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<SubmitLeadPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let Json(payload) = payload.map_err(|rejection| {
        AppError::InvalidPayload(rejection.body_text()).to_api_error(&locale, &app_state.i18n_store)
    })?;

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let lead = app_state.lead_service
        .submit(payload.into())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads/options
#[utoipa::path(
    get,
    path = "/api/leads/options",
    tag = "Leads",
    responses(
        (status = 200, description = "Valores aceitos pelo formulário", body = LeadFormOptions)
    )
)]
pub async fn form_options() -> Json<LeadFormOptions> {
    Json(LeadFormOptions::current())
}
