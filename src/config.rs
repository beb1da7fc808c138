// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::SqlitePool;

use crate::{
    common::i18n::I18nStore,
    db::{self, LeadStore, SlotRepository},
    services::{
        admin_auth::AdminAuthService,
        export_service::ExportService,
        lead_service::LeadService,
        webhook::WebhookNotifier,
    },
};

/// Configuração lida das variáveis de ambiente (com `.env` opcional).
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_key_hash: String,
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
    pub slot_key: String,
    pub server_addr: String,
    pub admin_session_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let admin_key_hash = env::var("ADMIN_KEY_HASH")
            .context("ADMIN_KEY_HASH deve ser definido (hash bcrypt da chave do painel)")?;

        // Vazio conta como "sem webhook"
        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|url| !url.trim().is_empty());

        let webhook_timeout_secs: u64 = env_or("WEBHOOK_TIMEOUT_SECS", "10")
            .parse()
            .context("WEBHOOK_TIMEOUT_SECS deve ser um número de segundos")?;
        let session_hours: i64 = env_or("ADMIN_SESSION_HOURS", "8")
            .parse()
            .context("ADMIN_SESSION_HOURS deve ser um número de horas")?;

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://leads.db?mode=rwc"),
            jwt_secret,
            admin_key_hash,
            webhook_url,
            webhook_timeout: Duration::from_secs(webhook_timeout_secs),
            slot_key: env_or("LEADS_SLOT_KEY", "bba_leads"),
            server_addr: env_or("SERVER_ADDR", "0.0.0.0:3000"),
            admin_session_ttl: session_ttl(session_hours)?,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn session_ttl(hours: i64) -> anyhow::Result<chrono::Duration> {
    chrono::Duration::try_hours(hours)
        .filter(|ttl| *ttl > chrono::Duration::zero())
        .with_context(|| format!("ADMIN_SESSION_HOURS fora do intervalo: {}", hours))
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub lead_service: LeadService,
    pub admin_service: AdminAuthService,
    pub export_service: ExportService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = db::connect(&config.database_url).await?;
        Self::with_pool(config, db_pool).await
    }

    /// Monta o gráfico de dependências sobre um pool já migrado.
    pub async fn with_pool(config: &Config, db_pool: SqlitePool) -> anyhow::Result<Self> {
        let slot = Arc::new(SlotRepository::new(db_pool.clone()));
        let lead_store = LeadStore::initialize(slot, config.slot_key.clone()).await;

        let notifier = match &config.webhook_url {
            Some(url) => {
                tracing::info!("🤖 Webhook de automação ativo: {}", url);
                Some(WebhookNotifier::new(url.clone(), config.webhook_timeout)?)
            }
            None => {
                tracing::info!("Webhook de automação não configurado, leads gravados direto");
                None
            }
        };

        let lead_service = LeadService::new(lead_store, notifier);
        let admin_service = AdminAuthService::new(
            config.admin_key_hash.clone(),
            config.jwt_secret.clone(),
            config.admin_session_ttl,
        );

        Ok(Self {
            db_pool,
            lead_service,
            admin_service,
            export_service: ExportService::new(),
            i18n_store: Arc::new(I18nStore::load()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn session_ttl_accepts_a_normal_window() {
        assert_eq!(session_ttl(8).unwrap(), chrono::Duration::hours(8));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MAX / 1000)]
    fn session_ttl_out_of_range_is_an_error(#[case] hours: i64) {
        let err = session_ttl(hours).unwrap_err();
        assert!(err.to_string().contains("ADMIN_SESSION_HOURS"));
    }
}
