// src/services/admin_auth.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::admin::{AdminClaims, AdminSessionResponse},
};

const ADMIN_SUBJECT: &str = "admin";

/// Portão do painel: compara a chave compartilhada com um hash bcrypt
/// guardado só no servidor e emite um token de sessão de curta duração.
///
/// Não é um modelo de controle de acesso: existe uma única chave, sem usuários.
#[derive(Clone)]
pub struct AdminAuthService {
    key_hash: String,
    jwt_secret: String,
    session_ttl: chrono::Duration,
}

impl AdminAuthService {
    pub fn new(key_hash: String, jwt_secret: String, session_ttl: chrono::Duration) -> Self {
        Self { key_hash, jwt_secret, session_ttl }
    }

    pub async fn login(&self, password: &str) -> Result<AdminSessionResponse, AppError> {
        if password.is_empty() {
            return Err(AppError::CredentialsRequired);
        }

        let password_clone = password.to_owned();
        let hash_clone = self.key_hash.clone();

        // Executa a verificação em um thread separado
        let is_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação da chave: {}", e))??;

        if !is_valid {
            tracing::warn!("🔒 Tentativa de acesso ao painel com chave inválida");
            return Err(AppError::InvalidCredentials);
        }

        self.create_token()
    }

    pub fn validate_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        let token_data = decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        if token_data.claims.sub != ADMIN_SUBJECT {
            return Err(AppError::InvalidToken);
        }

        Ok(token_data.claims)
    }

    fn create_token(&self) -> Result<AdminSessionResponse, AppError> {
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        let claims = AdminClaims {
            sub: ADMIN_SUBJECT.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?;

        Ok(AdminSessionResponse { token, expires_at: expires_at.timestamp() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::{admin_service, ADMIN_KEY};

    #[tokio::test]
    async fn correct_key_opens_a_session() {
        let service = admin_service();

        let session = service.login(ADMIN_KEY).await.unwrap();

        let claims = service.validate_token(&session.token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(session.expires_at > Utc::now().timestamp());
    }

    #[tokio::test]
    async fn wrong_key_is_rejected() {
        let err = admin_service().login("guess").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn empty_key_asks_for_credentials() {
        let err = admin_service().login("").await.unwrap_err();
        assert!(matches!(err, AppError::CredentialsRequired));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let err = admin_service().validate_token("not.a.jwt").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_invalid() {
        let other = AdminAuthService::new(
            bcrypt::hash(ADMIN_KEY, 4).unwrap(),
            "another-secret".to_string(),
            chrono::Duration::hours(1),
        );
        let session = other.login(ADMIN_KEY).await.unwrap();

        let err = admin_service().validate_token(&session.token).unwrap_err();

        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn expired_token_is_invalid() {
        let service = AdminAuthService::new(
            bcrypt::hash(ADMIN_KEY, 4).unwrap(),
            "test-secret".to_string(),
            chrono::Duration::hours(-2),
        );
        let session = service.create_token().unwrap();

        assert!(matches!(service.validate_token(&session.token), Err(AppError::InvalidToken)));
    }
}
