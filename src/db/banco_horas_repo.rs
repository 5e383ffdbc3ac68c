// src/db/banco_horas_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::banco_horas::{AjusteBancoHoras, TipoAjuste},
};

/// Livro de ajustes do banco de horas. Só recebe INSERT e DELETE.
#[derive(Clone)]
pub struct BancoHorasRepository {
    pool: PgPool,
}

impl BancoHorasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn list_ajustes<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<Vec<AjusteBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ajustes = sqlx::query_as::<_, AjusteBancoHoras>(
            r#"
            SELECT * FROM ajustes_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .fetch_all(executor)
        .await?;

        Ok(ajustes)
    }

    pub async fn find_ajuste<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        ajuste_id: Uuid,
    ) -> Result<Option<AjusteBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ajuste = sqlx::query_as::<_, AjusteBancoHoras>(
            "SELECT * FROM ajustes_banco_horas WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(ajuste_id)
        .fetch_optional(executor)
        .await?;

        Ok(ajuste)
    }

    pub async fn create_ajuste<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
        tipo: TipoAjuste,
        minutos: i32,
        observacao: Option<&str>,
        usuario: &str,
    ) -> Result<AjusteBancoHoras, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ajuste = sqlx::query_as::<_, AjusteBancoHoras>(
            r#"
            INSERT INTO ajustes_banco_horas (
                tenant_id, funcionario_id, ano, mes, tipo, minutos, observacao, usuario
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .bind(tipo)
        .bind(minutos)
        .bind(observacao)
        .bind(usuario)
        .fetch_one(executor)
        .await?;

        Ok(ajuste)
    }

    /// Remove apenas AJUSTE_MANUAL; devolve se alguma linha saiu.
    pub async fn delete_ajuste_manual<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        ajuste_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM ajustes_banco_horas
            WHERE tenant_id = $1 AND id = $2 AND tipo = 'AJUSTE_MANUAL'
            "#,
        )
        .bind(tenant_id)
        .bind(ajuste_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Apaga os lançamentos gerados por um fechamento anterior da mesma competência.
    pub async fn delete_ajustes_fechamento<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM ajustes_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
              AND tipo IN ('FECHAMENTO_PAGAR', 'FECHAMENTO_DESCONTAR')
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
