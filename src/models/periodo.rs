// src/models/periodo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::banco_horas::PoliticaFaltas;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "situacao_periodo", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SituacaoPeriodo {
    NaoIniciado,
    Fechado,
    Reaberto,
}

/// Linha de `periodos_banco_horas`. A ausência da linha equivale a NAO_INICIADO.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodoBancoHoras {
    pub funcionario_id: Uuid,
    pub ano: i32,
    pub mes: i32,
    pub situacao: SituacaoPeriodo,
    pub atualizado_por: String,
    pub atualizado_em: DateTime<Utc>,
}

/// Fotografia dos totais no momento do fechamento.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FechamentoBancoHoras {
    pub id: Uuid,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,

    pub funcionario_id: Uuid,
    pub ano: i32,
    pub mes: i32,

    pub saldo_anterior_minutos: i32,
    pub extras_50_minutos: i32,
    pub extras_100_minutos: i32,
    pub devidas_minutos: i32,
    pub ajustes_minutos: i32,
    pub saldo_final_minutos: i32,
    pub saldo_final_para_pagar_minutos: i32,

    pub politica_faltas: PoliticaFaltas,
    pub zerou_banco: bool,

    #[schema(example = "25.50")]
    pub valor_hora: Decimal,
    pub valor_pagar: Decimal,
    pub valor_descontar: Decimal,

    pub fechado_por: String,
    pub fechado_em: DateTime<Utc>,

    pub data_liberacao_edicao: Option<DateTime<Utc>>,
    pub reaberto_por: Option<String>,
    pub motivo_reabertura: Option<String>,
}

/// Totais que o fechamento recebe já calculados pelo resumo.
#[derive(Debug, Clone, PartialEq)]
pub struct TotaisFechamento {
    pub saldo_anterior_minutos: i64,
    pub extras_50_minutos: i64,
    pub extras_100_minutos: i64,
    pub devidas_minutos: i64,
    pub ajustes_minutos: i64,
    pub saldo_final_minutos: i64,
    pub saldo_final_para_pagar_minutos: i64,
    pub politica_faltas: PoliticaFaltas,
    pub zerou_banco: bool,
    pub valor_hora: Decimal,
}

/// Situação de um mês na visão anual.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SituacaoMes {
    #[schema(example = 3)]
    pub mes: u32,
    pub situacao: SituacaoPeriodo,
    pub atualizado_por: Option<String>,
    pub atualizado_em: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodoDetalhe {
    pub funcionario_id: Uuid,
    pub ano: i32,
    pub mes: u32,
    pub situacao: SituacaoPeriodo,
    pub atualizado_por: Option<String>,
    pub atualizado_em: Option<DateTime<Utc>>,
    pub fechamento: Option<FechamentoBancoHoras>,
}
