use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    services::webhook::WebhookError,
};

// Nosso tipo de erro interno, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo JSON malformado ou valor fora dos enums (websiteType, budgetRange, status)
    #[error("Payload inválido: {0}")]
    InvalidPayload(String),

    #[error("Credenciais ausentes")]
    CredentialsRequired,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Lead já existe: {0}")]
    DuplicateLead(Uuid),

    #[error("Falha na automação: {0}")]
    Webhook(#[from] WebhookError),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro ao gerar CSV: {0}")]
    ExportError(#[from] csv::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que sai pela API: status + mensagem já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    /// Converte para o erro HTTP, traduzindo a mensagem para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        let (status, key, reason, details) = match self {
            AppError::ValidationError(errors) => {
                // Retorna os códigos de erro por campo ("required", ...)
                let mut fields = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let codes: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let code = e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string());
                            Value::String(code)
                        })
                        .collect();
                    fields.insert(field.to_string(), Value::Array(codes));
                }
                (StatusCode::BAD_REQUEST, "errors.validation", None, Some(Value::Object(fields)))
            }
            AppError::InvalidPayload(reason) => {
                (StatusCode::BAD_REQUEST, "errors.invalid_payload", None, Some(json!({ "reason": reason })))
            }
            AppError::CredentialsRequired => (StatusCode::BAD_REQUEST, "admin.credentials_required", None, None),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "admin.invalid_credentials", None, None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "admin.invalid_token", None, None),
            AppError::DuplicateLead(_) => (StatusCode::CONFLICT, "lead.duplicate", None, None),

            AppError::Webhook(err) => {
                tracing::warn!("⚠️ Automação recusou o lead: {}", err);
                match err {
                    WebhookError::Rejected(reason) => (StatusCode::BAD_GATEWAY, "webhook.rejected", Some(reason), None),
                    WebhookError::Status(code) => (StatusCode::BAD_GATEWAY, "webhook.status", Some(code.to_string()), None),
                    WebhookError::MalformedAck(_) => (StatusCode::BAD_GATEWAY, "webhook.malformed", None, None),
                    WebhookError::Transport(_) => (StatusCode::BAD_GATEWAY, "webhook.unreachable", None, None),
                }
            }

            // Todos os outros erros viram 500. O `tracing` loga o detalhe.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "errors.internal", None, None)
            }
        };

        let error = match reason {
            Some(reason) => i18n.translate_with(lang, key, &[("reason", reason.as_str())]),
            None => i18n.translate(lang, key),
        };

        ApiError { status, error, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}
