// src/models/ponto.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_dia", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusDia {
    #[default]
    Normal,
    Ferias,
    Atestado,
    Folga,
    FaltaJustificada,
    FaltaNaoJustificada,
}

impl StatusDia {
    /// Dias em que a ausência é abonada: não geram saldo nem débito.
    pub fn is_abonado(self) -> bool {
        matches!(
            self,
            StatusDia::Ferias | StatusDia::Atestado | StatusDia::Folga | StatusDia::FaltaJustificada
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoDia {
    DiaUtil,
    FimDeSemana,
    Feriado,
}

impl TipoDia {
    pub fn is_dia_util(self) -> bool {
        self == TipoDia::DiaUtil
    }
}

// --- Cadastros de referência ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Jornada {
    pub id: Uuid,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,

    #[schema(example = "Comercial 44h")]
    pub nome: String,

    #[schema(example = "08:00")]
    pub entrada_manha: Option<String>,
    #[schema(example = "12:00")]
    pub saida_manha: Option<String>,
    #[schema(example = "13:00")]
    pub entrada_tarde: Option<String>,
    #[schema(example = "17:00")]
    pub saida_tarde: Option<String>,

    // Janela descontada da carga prevista
    pub intervalo_inicio: Option<String>,
    pub intervalo_fim: Option<String>,

    #[schema(example = 10)]
    pub tolerancia_minutos: i32,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feriado {
    pub id: Uuid,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,

    #[schema(example = 7)]
    pub dia: i16,

    #[schema(example = 9)]
    pub mes: i16,

    #[schema(example = "Independência do Brasil")]
    pub descricao: String,

    pub ativo: bool,
}

/// Funcionário com os dados que o banco de horas precisa.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Funcionario {
    pub id: Uuid,
    #[schema(example = "Ana Souza")]
    pub nome: String,
    pub jornada_id: Option<Uuid>,
    #[schema(example = "Financeiro")]
    pub departamento: Option<String>,
    #[schema(example = "25.50")]
    pub valor_hora: Decimal,
}

// --- Ponto diário ---

/// Uma linha de `registros_ponto`. Só existe para dias com alguma informação.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPonto {
    #[schema(value_type = String, format = Date, example = "2024-03-04")]
    pub data: NaiveDate,

    #[schema(example = "08:00")]
    pub entrada_manha: Option<String>,
    #[schema(example = "12:00")]
    pub saida_manha: Option<String>,
    #[schema(example = "13:00")]
    pub entrada_tarde: Option<String>,
    #[schema(example = "17:15")]
    pub saida_tarde: Option<String>,

    // Par "extra": janela descontada do trabalhado
    pub entrada_extra: Option<String>,
    pub saida_extra: Option<String>,

    #[serde(default)]
    pub status: StatusDia,

    pub observacao: Option<String>,
}

impl RegistroPonto {
    /// Dia sem marcações, status padrão e sem observação: não é persistido.
    pub fn is_vazio(&self) -> bool {
        let sem_marcacao = [
            &self.entrada_manha,
            &self.saida_manha,
            &self.entrada_tarde,
            &self.saida_tarde,
            &self.entrada_extra,
            &self.saida_extra,
        ]
        .iter()
        .all(|t| t.as_deref().map_or(true, |v| v.trim().is_empty()));

        sem_marcacao
            && self.status == StatusDia::Normal
            && self.observacao.as_deref().map_or(true, |o| o.trim().is_empty())
    }

    pub fn tem_marcacao(&self) -> bool {
        [
            &self.entrada_manha,
            &self.saida_manha,
            &self.entrada_tarde,
            &self.saida_tarde,
            &self.entrada_extra,
            &self.saida_extra,
        ]
        .iter()
        .any(|t| t.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }
}

/// O mês inteiro, com os dias sem registro preenchidos pelo padrão.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PontoMes {
    pub funcionario_id: Uuid,
    #[schema(example = "2024-03")]
    pub competencia: String,
    pub situacao: crate::models::periodo::SituacaoPeriodo,
    pub dias: Vec<RegistroPonto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dia(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn registro_sem_dados_e_vazio() {
        let registro = RegistroPonto {
            data: dia(4),
            entrada_manha: Some(" ".into()),
            ..Default::default()
        };
        assert!(registro.is_vazio());
        assert!(!registro.tem_marcacao());
    }

    #[test]
    fn status_ou_observacao_tornam_o_registro_relevante() {
        let falta = RegistroPonto {
            data: dia(5),
            status: StatusDia::FaltaNaoJustificada,
            ..Default::default()
        };
        assert!(!falta.is_vazio());

        let nota = RegistroPonto {
            data: dia(6),
            observacao: Some("esqueceu o crachá".into()),
            ..Default::default()
        };
        assert!(!nota.is_vazio());
    }
}
