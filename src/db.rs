pub mod slot_repo;
pub use slot_repo::{DurableSlot, SlotRepository};
pub mod lead_store;
pub use lead_store::LeadStore;

use std::time::Duration;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Conecta ao SQLite e roda as migrações do SQLx.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    Ok(pool)
}
