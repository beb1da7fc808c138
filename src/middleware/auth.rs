// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::admin::AdminClaims,
};

// O middleware do painel: exige "Authorization: Bearer <token da sessão>"
pub async fn admin_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &app_state)
            .await
            .map_err(|_| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

    let claims = app_state
        .admin_service
        .validate_token(bearer.token())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // Insere a sessão nos "extensions" da requisição
    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(AdminSession(claims));

    Ok(next.run(request).await)
}

// Extrator para os handlers que querem a sessão validada pelo guard
#[derive(Debug, Clone)]
pub struct AdminSession(pub AdminClaims);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AdminSession>().cloned().ok_or_else(|| {
            let locale = Locale::from_headers(&parts.headers);
            AppError::InvalidToken.to_api_error(&locale, &state.i18n_store)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use pretty_assertions::assert_eq;

    use crate::test_support::{test_state, ADMIN_KEY};

    fn parts_with_language(lang: &str) -> Parts {
        let (parts, _) = axum::http::Request::builder()
            .header(header::ACCEPT_LANGUAGE, lang)
            .body(axum::body::Body::empty())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_session_is_rejected_in_the_client_language() {
        let state = test_state(None).await;
        let mut parts = parts_with_language("pt-BR");

        let err = AdminSession::from_request_parts(&mut parts, &state).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error, state.i18n_store.translate("pt", "admin.invalid_token"));
    }

    #[tokio::test]
    async fn session_left_by_the_guard_is_extracted() {
        let state = test_state(None).await;
        let token = state.admin_service.login(ADMIN_KEY).await.unwrap().token;
        let claims = state.admin_service.validate_token(&token).unwrap();
        let mut parts = parts_with_language("en");
        parts.extensions.insert(AdminSession(claims));

        let AdminSession(session) = AdminSession::from_request_parts(&mut parts, &state).await.unwrap();

        assert_eq!(session.sub, "admin");
    }
}
