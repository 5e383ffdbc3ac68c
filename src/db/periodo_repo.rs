// src/db/periodo_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::minutos_coluna, error::AppError},
    models::periodo::{FechamentoBancoHoras, PeriodoBancoHoras, SituacaoPeriodo, TotaisFechamento},
};

#[derive(Clone)]
pub struct PeriodoRepository {
    pool: PgPool,
}

impl PeriodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // =========================================================================
    //  SITUAÇÃO DO PERÍODO
    // =========================================================================

    /// Lock transacional da competência (tenant, funcionário, ano, mês).
    /// Vale mesmo quando ainda não existe linha do período; solto no COMMIT/ROLLBACK.
    pub async fn lock_competencia<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            SELECT pg_advisory_xact_lock(
                hashtextextended($1::text || ':' || $2::text || ':' || $3::text || ':' || $4::text, 0)
            )
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_periodo<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<Option<PeriodoBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let periodo = sqlx::query_as::<_, PeriodoBancoHoras>(
            r#"
            SELECT funcionario_id, ano, mes, situacao, atualizado_por, atualizado_em
            FROM periodos_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .fetch_optional(executor)
        .await?;

        Ok(periodo)
    }

    /// Mesma consulta, travando a linha até o fim da transação.
    pub async fn find_periodo_for_update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<Option<PeriodoBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let periodo = sqlx::query_as::<_, PeriodoBancoHoras>(
            r#"
            SELECT funcionario_id, ano, mes, situacao, atualizado_por, atualizado_em
            FROM periodos_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
            FOR UPDATE
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .fetch_optional(executor)
        .await?;

        Ok(periodo)
    }

    pub async fn list_periodos_ano<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
    ) -> Result<Vec<PeriodoBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let periodos = sqlx::query_as::<_, PeriodoBancoHoras>(
            r#"
            SELECT funcionario_id, ano, mes, situacao, atualizado_por, atualizado_em
            FROM periodos_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3
            ORDER BY mes ASC
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .fetch_all(executor)
        .await?;

        Ok(periodos)
    }

    pub async fn upsert_situacao<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
        situacao: SituacaoPeriodo,
        usuario: &str,
    ) -> Result<PeriodoBancoHoras, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let periodo = sqlx::query_as::<_, PeriodoBancoHoras>(
            r#"
            INSERT INTO periodos_banco_horas (
                tenant_id, funcionario_id, ano, mes, situacao, atualizado_por, atualizado_em
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (tenant_id, funcionario_id, ano, mes)
            DO UPDATE SET
                situacao = EXCLUDED.situacao,
                atualizado_por = EXCLUDED.atualizado_por,
                atualizado_em = NOW()
            RETURNING funcionario_id, ano, mes, situacao, atualizado_por, atualizado_em
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .bind(situacao)
        .bind(usuario)
        .fetch_one(executor)
        .await?;

        Ok(periodo)
    }

    /// FECHADO -> REABERTO somente se ainda estiver FECHADO. `None` se nada mudou.
    pub async fn reabrir_se_fechado<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
        usuario: &str,
    ) -> Result<Option<PeriodoBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let periodo = sqlx::query_as::<_, PeriodoBancoHoras>(
            r#"
            UPDATE periodos_banco_horas
            SET situacao = 'REABERTO', atualizado_por = $5, atualizado_em = NOW()
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
              AND situacao = 'FECHADO'
            RETURNING funcionario_id, ano, mes, situacao, atualizado_por, atualizado_em
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .bind(usuario)
        .fetch_optional(executor)
        .await?;

        Ok(periodo)
    }

    // =========================================================================
    //  FECHAMENTO (FOTOGRAFIA)
    // =========================================================================

    pub async fn find_fechamento<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<Option<FechamentoBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fechamento = sqlx::query_as::<_, FechamentoBancoHoras>(
            r#"
            SELECT * FROM fechamentos_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .fetch_optional(executor)
        .await?;

        Ok(fechamento)
    }

    /// Saldo final do fechamento da competência, se houver.
    pub async fn saldo_final<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let saldo = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT saldo_final_minutos FROM fechamentos_banco_horas
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .fetch_optional(executor)
        .await?;

        Ok(saldo)
    }

    /// Grava a fotografia do mês. Refechar atualiza a mesma linha e limpa a reabertura.
    pub async fn upsert_fechamento<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
        totais: &TotaisFechamento,
        valor_pagar: Decimal,
        valor_descontar: Decimal,
        usuario: &str,
        fechado_em: DateTime<Utc>,
    ) -> Result<FechamentoBancoHoras, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fechamento = sqlx::query_as::<_, FechamentoBancoHoras>(
            r#"
            INSERT INTO fechamentos_banco_horas (
                tenant_id, funcionario_id, ano, mes,
                saldo_anterior_minutos, extras_50_minutos, extras_100_minutos,
                devidas_minutos, ajustes_minutos, saldo_final_minutos,
                saldo_final_para_pagar_minutos, politica_faltas, zerou_banco,
                valor_hora, valor_pagar, valor_descontar,
                fechado_por, fechado_em,
                data_liberacao_edicao, reaberto_por, motivo_reabertura
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                    NULL, NULL, NULL)
            ON CONFLICT (tenant_id, funcionario_id, ano, mes)
            DO UPDATE SET
                saldo_anterior_minutos = EXCLUDED.saldo_anterior_minutos,
                extras_50_minutos = EXCLUDED.extras_50_minutos,
                extras_100_minutos = EXCLUDED.extras_100_minutos,
                devidas_minutos = EXCLUDED.devidas_minutos,
                ajustes_minutos = EXCLUDED.ajustes_minutos,
                saldo_final_minutos = EXCLUDED.saldo_final_minutos,
                saldo_final_para_pagar_minutos = EXCLUDED.saldo_final_para_pagar_minutos,
                politica_faltas = EXCLUDED.politica_faltas,
                zerou_banco = EXCLUDED.zerou_banco,
                valor_hora = EXCLUDED.valor_hora,
                valor_pagar = EXCLUDED.valor_pagar,
                valor_descontar = EXCLUDED.valor_descontar,
                fechado_por = EXCLUDED.fechado_por,
                fechado_em = EXCLUDED.fechado_em,
                data_liberacao_edicao = NULL,
                reaberto_por = NULL,
                motivo_reabertura = NULL
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .bind(minutos_coluna("saldoAnterior", totais.saldo_anterior_minutos)?)
        .bind(minutos_coluna("extras50", totais.extras_50_minutos)?)
        .bind(minutos_coluna("extras100", totais.extras_100_minutos)?)
        .bind(minutos_coluna("devidas", totais.devidas_minutos)?)
        .bind(minutos_coluna("ajustes", totais.ajustes_minutos)?)
        .bind(minutos_coluna("saldoFinal", totais.saldo_final_minutos)?)
        .bind(minutos_coluna("saldoFinalParaPagar", totais.saldo_final_para_pagar_minutos)?)
        .bind(totais.politica_faltas)
        .bind(totais.zerou_banco)
        .bind(totais.valor_hora)
        .bind(valor_pagar)
        .bind(valor_descontar)
        .bind(usuario)
        .bind(fechado_em)
        .fetch_one(executor)
        .await?;

        Ok(fechamento)
    }

    /// Carimba a reabertura mantendo os totais do último fechamento.
    pub async fn marcar_reabertura<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
        mes: i32,
        reaberto_por: &str,
        motivo: Option<&str>,
        reaberto_em: DateTime<Utc>,
    ) -> Result<Option<FechamentoBancoHoras>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fechamento = sqlx::query_as::<_, FechamentoBancoHoras>(
            r#"
            UPDATE fechamentos_banco_horas
            SET data_liberacao_edicao = $5, reaberto_por = $6, motivo_reabertura = $7
            WHERE tenant_id = $1 AND funcionario_id = $2 AND ano = $3 AND mes = $4
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(funcionario_id)
        .bind(ano)
        .bind(mes)
        .bind(reaberto_em)
        .bind(reaberto_por)
        .bind(motivo)
        .fetch_optional(executor)
        .await?;

        Ok(fechamento)
    }
}
