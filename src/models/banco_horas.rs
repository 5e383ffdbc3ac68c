// src/models/banco_horas.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ponto::{StatusDia, TipoDia};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_ajuste", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoAjuste {
    AjusteManual,
    FechamentoPagar,
    FechamentoDescontar,
    CarregarSaldo,
}

impl TipoAjuste {
    /// Tipos que entram no saldo do mês. Os de fechamento são apenas registro contábil.
    pub fn entra_no_saldo(self) -> bool {
        matches!(self, TipoAjuste::AjusteManual | TipoAjuste::CarregarSaldo)
    }
}

/// Política aplicada aos débitos de faltas não justificadas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "politica_faltas", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoliticaFaltas {
    #[default]
    CompensarComHorasExtras,
    DescontarEmFolha,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AjusteBancoHoras {
    pub id: Uuid,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,

    pub funcionario_id: Uuid,

    #[schema(example = 2024)]
    pub ano: i32,
    #[schema(example = 3)]
    pub mes: i32,

    pub tipo: TipoAjuste,

    #[schema(example = -45)]
    pub minutos: i32,

    #[schema(example = "Consulta médica sem atestado")]
    pub observacao: Option<String>,

    pub usuario: String,
    pub created_at: DateTime<Utc>,
}

// --- Resumo mensal ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificacaoDia {
    Normal,
    ExtraUtil,
    Extra100,
    Devedor,
    FaltaJustificada,
    FaltaNaoJustificada,
}

/// Uma linha do extrato diário.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaResumo {
    #[schema(value_type = String, format = Date, example = "2024-03-04")]
    pub data: NaiveDate,
    #[schema(example = "Segunda-feira")]
    pub dia_semana: String,
    pub tipo_dia: TipoDia,
    pub status: StatusDia,
    /// Carga prevista; ausente fora de dia útil ou sem jornada.
    pub previsto_minutos: Option<i64>,
    pub trabalhado_minutos: i64,
    /// Contribuição do dia para o banco, já descontada a tolerância.
    pub diff_minutos: i64,
    pub pagos_feriado_fds_minutos: i64,
    pub extras_exibicao_minutos: i64,
    pub classificacao: ClassificacaoDia,
    pub observacao: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotaisBancoHoras {
    pub saldo_anterior_minutos: i64,
    pub extras_uteis_minutos: i64,
    pub extras_100_minutos: i64,
    /// Débito que fica no banco (já aplicada a política de faltas). Sempre <= 0.
    pub devidas_minutos: i64,
    /// Débito de faltas não justificadas. Sempre <= 0.
    pub faltas_minutos: i64,
    pub ajustes_manuais_minutos: i64,
    pub saldo_final_banco_minutos: i64,
    /// Saldo liquidado no fechamento quando o banco é zerado no mês.
    pub saldo_final_para_pagar_minutos: i64,
    pub horas_pagar_50_minutos: i64,
    pub horas_pagar_100_minutos: i64,
    pub horas_descontar_minutos: i64,
    #[schema(example = "02:00")]
    pub saldo_final_banco_formatado: String,
    #[schema(example = "153.00")]
    pub valor_pagar_50: Decimal,
    pub valor_pagar_100: Decimal,
    pub valor_descontar: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumoBancoHoras {
    pub funcionario_id: Uuid,
    pub funcionario_nome: String,
    pub departamento: Option<String>,
    #[schema(example = 2024)]
    pub ano: i32,
    #[schema(example = 3)]
    pub mes: u32,
    pub politica_faltas: PoliticaFaltas,
    pub zerar_banco_no_mes: bool,
    pub jornada_id: Option<Uuid>,
    pub tolerancia_minutos: i64,
    #[schema(example = "25.50")]
    pub valor_hora: Decimal,
    pub dias: Vec<LinhaResumo>,
    pub totais: TotaisBancoHoras,
}
