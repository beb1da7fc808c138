//! Utilitários compartilhados pelos testes.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    common::error::AppError,
    config::{AppState, Config},
    db::{DurableSlot, LeadStore, SlotRepository},
    models::lead::{BudgetRange, Lead, LeadContent, WebsiteType},
    routes,
    services::admin_auth::AdminAuthService,
};

pub const ADMIN_KEY: &str = "agency-key";
const JWT_SECRET: &str = "test-secret";
const SLOT_KEY: &str = "bba_leads";

/// SQLite em memória com as migrações aplicadas.
/// Uma única conexão que nunca expira: fechar a conexão apaga o banco.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub fn sample_content(name: &str, business: &str) -> LeadContent {
    LeadContent {
        name: name.to_string(),
        business_name: business.to_string(),
        email: "a@x.com".to_string(),
        website_type: WebsiteType::LandingPage,
        budget_range: BudgetRange::Startup,
        message: "need a page".to_string(),
    }
}

pub fn sample_lead(name: &str, business: &str) -> Lead {
    Lead::from_content(sample_content(name, business))
}

/// Slot que falha em toda leitura e escrita (ex: cota estourada).
pub struct FailingSlot;

#[async_trait]
impl DurableSlot for FailingSlot {
    async fn read(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::InternalServerError(anyhow::anyhow!("slot offline")))
    }

    async fn write(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::InternalServerError(anyhow::anyhow!("quota exceeded")))
    }
}

pub fn admin_service() -> AdminAuthService {
    AdminAuthService::new(
        bcrypt::hash(ADMIN_KEY, 4).unwrap(),
        JWT_SECRET.to_string(),
        chrono::Duration::hours(1),
    )
}

fn test_config(webhook_url: Option<String>) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        admin_key_hash: bcrypt::hash(ADMIN_KEY, 4).unwrap(),
        webhook_url,
        webhook_timeout: Duration::from_secs(5),
        slot_key: SLOT_KEY.to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        admin_session_ttl: chrono::Duration::hours(1),
    }
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// =========================================================================
//  APP COMPLETA NUMA PORTA EFÊMERA
// =========================================================================

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    state: AppState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn admin_token(&self) -> String {
        let session: Value = self.client
            .post(self.url("/api/admin/session"))
            .json(&serde_json::json!({ "password": ADMIN_KEY }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        session["token"].as_str().unwrap().to_string()
    }

    pub async fn list_leads(&self, token: &str, search: Option<&str>) -> Vec<Value> {
        let mut request = self.client.get(self.url("/api/admin/leads")).bearer_auth(token);
        if let Some(term) = search {
            request = request.query(&[("search", term)]);
        }
        request.send().await.unwrap().json().await.unwrap()
    }

    /// Relê o slot durável com uma instância nova do store.
    pub async fn reload_store(&self) -> Vec<Lead> {
        let slot = Arc::new(SlotRepository::new(self.state.db_pool.clone()));
        LeadStore::initialize(slot, SLOT_KEY).await.list().await
    }
}

/// Estado completo da aplicação sobre um SQLite em memória.
pub async fn test_state(webhook_url: Option<String>) -> AppState {
    AppState::with_pool(&test_config(webhook_url), memory_pool().await).await.unwrap()
}

pub async fn spawn_app(webhook_url: Option<String>) -> TestApp {
    let state = test_state(webhook_url).await;
    let base_url = serve(routes::router(state.clone())).await;

    TestApp { base_url, client: reqwest::Client::new(), state }
}

// =========================================================================
//  WEBHOOK FALSO
// =========================================================================

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    ack: Value,
    delay: Duration,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn stub_hook(State(stub): State<StubState>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    stub.received.lock().await.push(body);
    tokio::time::sleep(stub.delay).await;
    (stub.status, Json(stub.ack.clone()))
}

pub struct StubWebhook {
    pub url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl StubWebhook {
    pub async fn received(&self) -> Vec<Value> {
        self.received.lock().await.clone()
    }
}

/// Sobe um webhook que responde sempre com `status` e o corpo `ack`.
pub async fn spawn_webhook(status: u16, ack: Value) -> StubWebhook {
    start_webhook(status, ack, Duration::ZERO).await
}

/// Webhook que só confirma depois de `delay` (para estourar o timeout do cliente).
pub async fn spawn_slow_webhook(delay: Duration) -> StubWebhook {
    start_webhook(200, serde_json::json!({ "success": true }), delay).await
}

async fn start_webhook(status: u16, ack: Value, delay: Duration) -> StubWebhook {
    let received = Arc::new(Mutex::new(Vec::new()));
    let stub = StubState {
        status: StatusCode::from_u16(status).unwrap(),
        ack,
        delay,
        received: received.clone(),
    };

    let app = Router::new().route("/hook", post(stub_hook)).with_state(stub);
    let base_url = serve(app).await;

    StubWebhook { url: format!("{}/hook", base_url), received }
}
