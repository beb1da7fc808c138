// src/services/export_service.rs

use chrono::{DateTime, Utc};

use crate::{common::error::AppError, models::lead::Lead};

// Ordem fixa das colunas da planilha.
pub const EXPORT_HEADERS: [&str; 8] = [
    "Date", "Name", "Business", "Email", "Type", "Budget", "Status", "Message",
];

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Gera o CSV. O `csv::Writer` cuida das aspas e vírgulas nos campos livres.
    pub fn leads_to_csv(&self, leads: &[Lead]) -> Result<Vec<u8>, AppError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(EXPORT_HEADERS)?;

        for lead in leads {
            let date = lead.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
            writer.write_record([
                date.as_str(),
                lead.name.as_str(),
                lead.business_name.as_str(),
                lead.email.as_str(),
                lead.website_type.as_str(),
                lead.budget_range.as_str(),
                lead.status.as_str(),
                lead.message.as_str(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Falha ao finalizar o CSV: {}", e)))
    }

    pub fn filename(&self, now: DateTime<Utc>) -> String {
        format!("agency_leads_export_{}.csv", now.format("%Y%m%d-%H%M%S"))
    }
}
