// src/db/master_user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

/// Usuários com poder de reabrir competências fechadas.
#[derive(Clone)]
pub struct MasterUserRepository {
    pool: PgPool,
}

impl MasterUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Hash da senha de um master ativo do tenant.
    pub async fn find_password_hash<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        login: &str,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let hash = sqlx::query_scalar::<_, String>(
            r#"
            SELECT password_hash FROM master_users
            WHERE tenant_id = $1 AND login = $2 AND ativo = TRUE
            "#,
        )
        .bind(tenant_id)
        .bind(login)
        .fetch_optional(executor)
        .await?;

        Ok(hash)
    }
}
