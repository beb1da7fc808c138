// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Leads ---
        handlers::leads::submit_lead,
        handlers::leads::form_options,

        // --- Admin ---
        handlers::admin::login,
        handlers::admin::list_leads,
        handlers::admin::export_leads,
        handlers::admin::update_lead_status,
        handlers::admin::delete_lead,
    ),
    components(
        schemas(
            // --- Leads ---
            models::lead::WebsiteType,
            models::lead::BudgetRange,
            models::lead::LeadStatus,
            models::lead::Lead,
            models::lead::StatusOption,
            models::lead::LeadFormOptions,

            // --- Admin ---
            models::admin::AdminLoginPayload,
            models::admin::AdminSessionResponse,

            // --- Payloads ---
            handlers::leads::SubmitLeadPayload,
            handlers::admin::UpdateStatusPayload,
        )
    ),
    tags(
        (name = "Leads", description = "Formulário de contato"),
        (name = "Admin", description = "Painel de leads (sessão por chave compartilhada)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "admin_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/leads",
            "/api/leads/options",
            "/api/admin/session",
            "/api/admin/leads",
            "/api/admin/leads/export",
            "/api/admin/leads/{id}/status",
            "/api/admin/leads/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota sem documentação: {path}");
        }
    }
}
