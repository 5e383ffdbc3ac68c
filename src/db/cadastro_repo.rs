// src/db/cadastro_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ponto::{Feriado, Funcionario, Jornada},
};

/// Cadastros de referência do RH: funcionários, jornadas e feriados.
#[derive(Clone)]
pub struct CadastroRepository {
    pool: PgPool,
}

/// Campos de uma jornada nova.
#[derive(Debug, Clone)]
pub struct NovaJornada<'a> {
    pub nome: &'a str,
    pub entrada_manha: Option<&'a str>,
    pub saida_manha: Option<&'a str>,
    pub entrada_tarde: Option<&'a str>,
    pub saida_tarde: Option<&'a str>,
    pub intervalo_inicio: Option<&'a str>,
    pub intervalo_fim: Option<&'a str>,
    pub tolerancia_minutos: i32,
}

impl CadastroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // =========================================================================
    //  FUNCIONÁRIOS (somente leitura)
    // =========================================================================

    pub async fn find_funcionario<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
    ) -> Result<Option<Funcionario>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let funcionario = sqlx::query_as::<_, Funcionario>(
            r#"
            SELECT f.id, f.nome, f.jornada_id, d.nome AS departamento, f.valor_hora
            FROM funcionarios f
            LEFT JOIN departamentos d ON d.id = f.departamento_id AND d.tenant_id = f.tenant_id
            WHERE f.tenant_id = $1 AND f.id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .fetch_optional(executor)
        .await?;

        Ok(funcionario)
    }

    // =========================================================================
    //  JORNADAS
    // =========================================================================

    pub async fn find_jornada<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        jornada_id: Uuid,
    ) -> Result<Option<Jornada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jornada = sqlx::query_as::<_, Jornada>(
            "SELECT * FROM jornadas WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(jornada_id)
        .fetch_optional(executor)
        .await?;

        Ok(jornada)
    }

    pub async fn list_jornadas<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Jornada>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jornadas = sqlx::query_as::<_, Jornada>(
            "SELECT * FROM jornadas WHERE tenant_id = $1 ORDER BY nome ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;

        Ok(jornadas)
    }

    pub async fn create_jornada<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        nova: &NovaJornada<'_>,
    ) -> Result<Jornada, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let jornada = sqlx::query_as::<_, Jornada>(
            r#"
            INSERT INTO jornadas (
                tenant_id, nome,
                entrada_manha, saida_manha, entrada_tarde, saida_tarde,
                intervalo_inicio, intervalo_fim, tolerancia_minutos
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(nova.nome)
        .bind(nova.entrada_manha)
        .bind(nova.saida_manha)
        .bind(nova.entrada_tarde)
        .bind(nova.saida_tarde)
        .bind(nova.intervalo_inicio)
        .bind(nova.intervalo_fim)
        .bind(nova.tolerancia_minutos)
        .fetch_one(executor)
        .await?;

        Ok(jornada)
    }

    // =========================================================================
    //  FERIADOS
    // =========================================================================

    pub async fn list_feriados<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Feriado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let feriados = sqlx::query_as::<_, Feriado>(
            "SELECT * FROM feriados WHERE tenant_id = $1 ORDER BY mes ASC, dia ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;

        Ok(feriados)
    }

    pub async fn find_feriado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        feriado_id: Uuid,
    ) -> Result<Option<Feriado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let feriado = sqlx::query_as::<_, Feriado>(
            "SELECT * FROM feriados WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(feriado_id)
        .fetch_optional(executor)
        .await?;

        Ok(feriado)
    }

    pub async fn create_feriado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        dia: i16,
        mes: i16,
        descricao: &str,
        ativo: bool,
    ) -> Result<Feriado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let feriado = sqlx::query_as::<_, Feriado>(
            r#"
            INSERT INTO feriados (tenant_id, dia, mes, descricao, ativo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(dia)
        .bind(mes)
        .bind(descricao)
        .bind(ativo)
        .fetch_one(executor)
        .await?;

        Ok(feriado)
    }

    pub async fn update_feriado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        feriado_id: Uuid,
        dia: i16,
        mes: i16,
        descricao: &str,
        ativo: bool,
    ) -> Result<Option<Feriado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let feriado = sqlx::query_as::<_, Feriado>(
            r#"
            UPDATE feriados
            SET dia = $3, mes = $4, descricao = $5, ativo = $6
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(feriado_id)
        .bind(dia)
        .bind(mes)
        .bind(descricao)
        .bind(ativo)
        .fetch_optional(executor)
        .await?;

        Ok(feriado)
    }

    pub async fn delete_feriado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        feriado_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM feriados WHERE tenant_id = $1 AND id = $2")
            .bind(tenant_id)
            .bind(feriado_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
