// src/services/webhook.rs

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::lead::Lead;

/// Falhas de entrega para a automação externa.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status HTTP {0}")]
    Status(u16),

    #[error("confirmação malformada: {0}")]
    MalformedAck(String),

    #[error("automação recusou: {0}")]
    Rejected(String),
}

// Confirmação esperada da automação: {"success": bool, "error"?: string}
#[derive(Debug, Deserialize)]
struct WebhookAck {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Cliente do webhook de automação (entrega confirmada).
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into() })
    }

    /// Envia o lead como JSON. Só retorna Ok com uma confirmação positiva.
    pub async fn deliver(&self, lead: &Lead) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(lead).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_ack(&body)
    }
}

fn parse_ack(body: &str) -> Result<(), WebhookError> {
    let ack: WebhookAck =
        serde_json::from_str(body).map_err(|e| WebhookError::MalformedAck(e.to_string()))?;

    if ack.success {
        Ok(())
    } else {
        Err(WebhookError::Rejected(
            ack.error.unwrap_or_else(|| "no reason given".to_string()),
        ))
    }
}
