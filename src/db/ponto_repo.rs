// src/db/ponto_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ponto::{RegistroPonto, StatusDia},
};

/// Marcações diárias (`registros_ponto`), uma linha por funcionário e dia.
#[derive(Clone)]
pub struct PontoRepository {
    pool: PgPool,
}

impl PontoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn list_registros_periodo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<Vec<RegistroPonto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let registros = sqlx::query_as::<_, RegistroPonto>(
            r#"
            SELECT
                data, entrada_manha, saida_manha, entrada_tarde, saida_tarde,
                entrada_extra, saida_extra, status, observacao
            FROM registros_ponto
            WHERE tenant_id = $1 AND funcionario_id = $2 AND data BETWEEN $3 AND $4
            ORDER BY data ASC
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(inicio)
        .bind(fim)
        .fetch_all(executor)
        .await?;

        Ok(registros)
    }

    pub async fn delete_registros_periodo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        inicio: NaiveDate,
        fim: NaiveDate,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM registros_ponto
            WHERE tenant_id = $1 AND funcionario_id = $2 AND data BETWEEN $3 AND $4
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(inicio)
        .bind(fim)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Insere vários dias em um único comando (UNNEST dos arrays).
    pub async fn insert_registros<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        registros: &[RegistroPonto],
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if registros.is_empty() {
            return Ok(0);
        }

        let datas: Vec<NaiveDate> = registros.iter().map(|r| r.data).collect();
        let status: Vec<StatusDia> = registros.iter().map(|r| r.status).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO registros_ponto (
                tenant_id, funcionario_id, data,
                entrada_manha, saida_manha, entrada_tarde, saida_tarde,
                entrada_extra, saida_extra, status, observacao
            )
            SELECT $1, $2, d.*
            FROM UNNEST(
                $3::date[], $4::varchar[], $5::varchar[], $6::varchar[], $7::varchar[],
                $8::varchar[], $9::varchar[], $10::status_dia[], $11::text[]
            ) AS d
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(datas)
        .bind(coluna(registros, |r| r.entrada_manha.clone()))
        .bind(coluna(registros, |r| r.saida_manha.clone()))
        .bind(coluna(registros, |r| r.entrada_tarde.clone()))
        .bind(coluna(registros, |r| r.saida_tarde.clone()))
        .bind(coluna(registros, |r| r.entrada_extra.clone()))
        .bind(coluna(registros, |r| r.saida_extra.clone()))
        .bind(status)
        .bind(coluna(registros, |r| r.observacao.clone()))
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}

fn coluna<F>(registros: &[RegistroPonto], campo: F) -> Vec<Option<String>>
where
    F: Fn(&RegistroPonto) -> Option<String>,
{
    registros.iter().map(campo).collect()
}
