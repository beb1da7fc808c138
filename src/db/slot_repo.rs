// src/db/slot_repo.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::AppError;

/// Um local chave/valor durável que sobrevive a reinícios.
/// O valor é sempre o documento inteiro: não existe escrita incremental.
#[async_trait]
pub trait DurableSlot: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
}

// O repositório de slots, responsável pela tabela 'storage_slots'
#[derive(Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DurableSlot for SlotRepository {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM storage_slots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        // Upsert: reescreve o slot inteiro a cada mutação
        sqlx::query(
            r#"
            INSERT INTO storage_slots (key, value, updated_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
