// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::admin_guard};

pub fn router(app_state: AppState) -> Router {
    // Formulário de contato (público)
    let lead_routes = Router::new()
        .route("/", post(handlers::leads::submit_lead))
        .route("/options", get(handlers::leads::form_options));

    // Painel: só a abertura de sessão fica fora do guard
    let admin_routes = Router::new()
        .route("/leads", get(handlers::admin::list_leads))
        .route("/leads/export", get(handlers::admin::export_leads))
        .route("/leads/{id}/status", patch(handlers::admin::update_lead_status))
        .route("/leads/{id}", delete(handlers::admin::delete_lead))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ))
        .route("/session", post(handlers::admin::login));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(handlers::health::health))
        .nest("/api/leads", lead_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
