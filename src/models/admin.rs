// src/models/admin.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Dados para abrir a sessão do painel.
// Sem `validator` aqui: senha vazia tem mensagem própria no serviço.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginPayload {
    #[schema(example = "agency-key")]
    pub password: String,
}

// Resposta com o token da sessão. O cliente guarda só em memória.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSessionResponse {
    pub token: String,
    pub expires_at: i64,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String, // Sempre "admin": existe um único segredo compartilhado
    pub exp: usize,
    pub iat: usize,
}
