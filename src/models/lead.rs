// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- ENUMS ---
// Os valores serializados são exatamente os textos do formulário do site.

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum WebsiteType {
    #[serde(rename = "Business Website")]
    Business,
    #[serde(rename = "E-commerce Store")]
    Ecommerce,
    #[serde(rename = "Landing Page")]
    LandingPage,
    #[serde(rename = "SaaS Platform")]
    SaaS,
    #[serde(rename = "Portfolio / Personal")]
    Portfolio,
    #[serde(rename = "Other")]
    Other,
}

impl WebsiteType {
    pub const ALL: [WebsiteType; 6] = [
        WebsiteType::Business,
        WebsiteType::Ecommerce,
        WebsiteType::LandingPage,
        WebsiteType::SaaS,
        WebsiteType::Portfolio,
        WebsiteType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebsiteType::Business => "Business Website",
            WebsiteType::Ecommerce => "E-commerce Store",
            WebsiteType::LandingPage => "Landing Page",
            WebsiteType::SaaS => "SaaS Platform",
            WebsiteType::Portfolio => "Portfolio / Personal",
            WebsiteType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum BudgetRange {
    #[serde(rename = "$500 - $1,000")]
    Startup,
    #[serde(rename = "$1,000 - $3,000")]
    Growth,
    #[serde(rename = "$3,000 - $10,000")]
    Enterprise,
    #[serde(rename = "$10,000+")]
    Custom,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 4] = [
        BudgetRange::Startup,
        BudgetRange::Growth,
        BudgetRange::Enterprise,
        BudgetRange::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Startup => "$500 - $1,000",
            BudgetRange::Growth => "$1,000 - $3,000",
            BudgetRange::Enterprise => "$3,000 - $10,000",
            BudgetRange::Custom => "$10,000+",
        }
    }
}

// Conjunto plano: qualquer status pode ir para qualquer outro.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [LeadStatus::New, LeadStatus::Contacted, LeadStatus::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Closed => "Closed",
        }
    }

    /// Rótulo mostrado no seletor do painel.
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "New Lead",
            LeadStatus::Contacted => "Engaged",
            LeadStatus::Closed => "Converted",
        }
    }
}

// --- LEAD (O Dado) ---

/// Conteúdo enviado pelo formulário de contato, já com os enums validados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadContent {
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub website_type: WebsiteType,
    pub budget_range: BudgetRange,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "Ana Co")]
    pub business_name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,

    pub website_type: WebsiteType,
    pub budget_range: BudgetRange,

    #[schema(example = "Need a landing page for our launch")]
    pub message: String,

    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Monta um lead novo: id e data gerados aqui, status sempre `New`.
    pub fn from_content(content: LeadContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: content.name,
            business_name: content.business_name,
            email: content.email,
            website_type: content.website_type,
            budget_range: content.budget_range,
            message: content.message,
            status: LeadStatus::New,
            created_at: Utc::now(),
        }
    }

    /// Busca do painel: substring sem diferenciar maiúsculas em nome ou empresa.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.business_name.to_lowercase().contains(&term)
    }
}

// --- OPÇÕES DO FORMULÁRIO ---

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusOption {
    pub value: LeadStatus,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadFormOptions {
    pub website_types: Vec<WebsiteType>,
    pub budget_ranges: Vec<BudgetRange>,
    pub statuses: Vec<StatusOption>,
}

impl LeadFormOptions {
    pub fn current() -> Self {
        Self {
            website_types: WebsiteType::ALL.to_vec(),
            budget_ranges: BudgetRange::ALL.to_vec(),
            statuses: LeadStatus::ALL
                .iter()
                .map(|status| StatusOption { value: *status, label: status.label().to_string() })
                .collect(),
        }
    }
}
