// src/db/lead_store.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::slot_repo::DurableSlot,
    models::lead::{Lead, LeadStatus},
};

/// Fonte única da verdade dos leads.
///
/// A coleção em memória é a visão autoritativa; o slot durável é só um cache
/// lido na inicialização e reescrito por inteiro a cada mutação. Cada mutação
/// (incluindo a escrita no slot) acontece sob o mesmo write lock.
#[derive(Clone)]
pub struct LeadStore {
    leads: Arc<RwLock<Vec<Lead>>>,
    slot: Arc<dyn DurableSlot>,
    key: String,
}

impl LeadStore {
    /// Lê o slot. Ausente, ilegível ou corrompido vira coleção vazia: nunca falha.
    pub async fn initialize(slot: Arc<dyn DurableSlot>, key: impl Into<String>) -> Self {
        let key = key.into();

        let leads = match slot.read(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Lead>>(&raw) {
                Ok(leads) => leads,
                Err(e) => {
                    tracing::warn!("⚠️ Slot '{}' corrompido, iniciando vazio: {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("⚠️ Falha ao ler o slot '{}', persistência desabilitada nesta leitura: {}", key, e);
                Vec::new()
            }
        };

        tracing::info!("📇 {} leads carregados do slot '{}'", leads.len(), key);

        Self {
            leads: Arc::new(RwLock::new(leads)),
            slot,
            key,
        }
    }

    /// Insere no início (mais novo primeiro) e persiste.
    pub async fn add(&self, lead: Lead) -> Result<(), AppError> {
        let mut leads = self.leads.write().await;

        if leads.iter().any(|existing| existing.id == lead.id) {
            return Err(AppError::DuplicateLead(lead.id));
        }

        leads.insert(0, lead);
        self.persist(&leads).await;
        Ok(())
    }

    /// Troca o status. Id inexistente é no-op; retorna se algum lead foi alterado.
    pub async fn update_status(&self, id: Uuid, status: LeadStatus) -> bool {
        let mut leads = self.leads.write().await;

        let found = match leads.iter_mut().find(|lead| lead.id == id) {
            Some(lead) => {
                lead.status = status;
                true
            }
            None => false,
        };

        self.persist(&leads).await;
        found
    }

    /// Remove o lead. Id inexistente é no-op; retorna se algum lead foi removido.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut leads = self.leads.write().await;

        let before = leads.len();
        leads.retain(|lead| lead.id != id);
        let removed = leads.len() != before;

        self.persist(&leads).await;
        removed
    }

    pub async fn list(&self) -> Vec<Lead> {
        self.leads.read().await.clone()
    }

    // Escrita "best effort": falhas só vão para o log, o estado em memória fica.
    async fn persist(&self, leads: &[Lead]) {
        let raw = match serde_json::to_string(leads) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("⚠️ Falha ao serializar leads: {}", e);
                return;
            }
        };

        if let Err(e) = self.slot.write(&self.key, &raw).await {
            tracing::warn!("⚠️ Falha ao salvar leads no slot '{}': {}", self.key, e);
        }
    }
}
