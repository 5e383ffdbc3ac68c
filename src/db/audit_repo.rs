// src/db/audit_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::audit::AuditEntry};

#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_entry<'e, E>(&self, executor: E, entry: &AuditEntry) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO audit_log (
                tenant_id, tabela, registro_id, operacao, antes, depois, descricao, usuario
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.tenant_id)
        .bind(entry.tabela)
        .bind(&entry.registro_id)
        .bind(entry.operacao)
        .bind(&entry.antes)
        .bind(&entry.depois)
        .bind(&entry.descricao)
        .bind(&entry.usuario)
        .execute(executor)
        .await?;

        Ok(())
    }
}
