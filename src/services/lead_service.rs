// src/services/lead_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadStore,
    models::lead::{Lead, LeadContent, LeadStatus},
    services::webhook::WebhookNotifier,
};

#[derive(Clone)]
pub struct LeadService {
    store: LeadStore,
    notifier: Option<WebhookNotifier>,
}

impl LeadService {
    pub fn new(store: LeadStore, notifier: Option<WebhookNotifier>) -> Self {
        Self { store, notifier }
    }

    // =========================================================================
    //  1. ENVIO DO FORMULÁRIO (Entrega confirmada)
    // =========================================================================

    /// Monta o lead e, se houver webhook, só grava depois da confirmação positiva.
    /// Qualquer falha da automação volta como erro e nada é gravado.
    pub async fn submit(&self, content: LeadContent) -> Result<Lead, AppError> {
        let lead = Lead::from_content(content);

        if let Some(notifier) = &self.notifier {
            notifier.deliver(&lead).await?;
            tracing::info!("🤖 Automação confirmou o lead {}", lead.id);
        }

        self.store.add(lead.clone()).await?;
        tracing::info!("📨 Novo lead {} registrado", lead.id);

        Ok(lead)
    }

    // =========================================================================
    //  2. PAINEL (Busca e triagem)
    // =========================================================================

    /// Lista do mais novo para o mais antigo, filtrando por nome ou empresa.
    pub async fn search(&self, term: Option<&str>) -> Vec<Lead> {
        let leads = self.store.list().await;

        match term {
            Some(term) => leads.into_iter().filter(|lead| lead.matches_search(term)).collect(),
            None => leads,
        }
    }

    pub async fn update_status(&self, id: Uuid, status: LeadStatus) {
        if !self.store.update_status(id, status).await {
            tracing::debug!("Status ignorado: lead {} não existe", id);
        }
    }

    pub async fn delete(&self, id: Uuid) {
        if self.store.delete(id).await {
            tracing::info!("🗑️ Lead {} removido", id);
        }
    }
}
