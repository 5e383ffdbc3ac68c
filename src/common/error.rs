// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    models::periodo::SituacaoPeriodo,
};

/// Classe do erro, estável para o cliente (equivalente à severidade HTTP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    NotFound,
    StateConflict,
    Auth,
    Storage,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::StateConflict => StatusCode::CONFLICT,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// O erro único da camada de serviço/repositório.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Horário inválido em {data} ({campo}): '{valor}'")]
    HorarioInvalido {
        data: NaiveDate,
        campo: &'static str,
        valor: String,
    },

    #[error("Competência inválida: {0}")]
    CompetenciaInvalida(String),

    #[error("Data {data} fora da competência {competencia}")]
    DataForaDaCompetencia { data: NaiveDate, competencia: String },

    #[error("Data {0} informada mais de uma vez")]
    DataDuplicada(NaiveDate),

    #[error("Campo obrigatório: {0}")]
    CampoObrigatorio(&'static str),

    #[error("Valor inválido para {campo}: {motivo}")]
    ValorInvalido { campo: &'static str, motivo: String },

    #[error("Tenant não selecionado")]
    TenantNaoSelecionado,

    #[error("Tenant inválido")]
    TenantInvalido,

    #[error("Usuário não informado")]
    UsuarioNaoInformado,

    #[error("Ajuste {0} não pode ser alterado manualmente")]
    AjusteNaoEditavel(Uuid),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Período {mes:02}/{ano} nunca foi fechado")]
    PeriodoNaoEncontrado { ano: i32, mes: u32 },

    #[error("Período {mes:02}/{ano} está fechado")]
    PeriodoFechado { ano: i32, mes: u32 },

    #[error("Período {mes:02}/{ano} não está fechado (situação {situacao:?})")]
    PeriodoNaoFechado {
        ano: i32,
        mes: u32,
        situacao: SituacaoPeriodo,
    },

    #[error("Credenciais master inválidas")]
    CredenciaisMasterInvalidas,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    /// Código estável, nunca traduzido.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "CAMPOS_INVALIDOS",
            AppError::HorarioInvalido { .. } => "HORARIO_INVALIDO",
            AppError::CompetenciaInvalida(_) => "COMPETENCIA_INVALIDA",
            AppError::DataForaDaCompetencia { .. } => "DATA_FORA_DA_COMPETENCIA",
            AppError::DataDuplicada(_) => "DATA_DUPLICADA",
            AppError::CampoObrigatorio(_) => "CAMPO_OBRIGATORIO",
            AppError::ValorInvalido { .. } => "VALOR_INVALIDO",
            AppError::TenantNaoSelecionado => "TENANT_NAO_SELECIONADO",
            AppError::TenantInvalido => "TENANT_INVALIDO",
            AppError::UsuarioNaoInformado => "USUARIO_NAO_INFORMADO",
            AppError::AjusteNaoEditavel(_) => "AJUSTE_NAO_EDITAVEL",
            AppError::ResourceNotFound(_) => "NAO_ENCONTRADO",
            AppError::PeriodoNaoEncontrado { .. } => "PERIODO_NAO_ENCONTRADO",
            AppError::PeriodoFechado { .. } => "PERIODO_FECHADO",
            AppError::PeriodoNaoFechado { .. } => "PERIODO_NAO_FECHADO",
            AppError::CredenciaisMasterInvalidas => "CREDENCIAIS_MASTER_INVALIDAS",
            AppError::DatabaseError(_) => "ERRO_ARMAZENAMENTO",
            AppError::InternalServerError(_) | AppError::BcryptError(_) => "ERRO_INTERNO",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::ValidationError(_)
            | AppError::HorarioInvalido { .. }
            | AppError::CompetenciaInvalida(_)
            | AppError::DataForaDaCompetencia { .. }
            | AppError::DataDuplicada(_)
            | AppError::CampoObrigatorio(_)
            | AppError::ValorInvalido { .. }
            | AppError::TenantNaoSelecionado
            | AppError::TenantInvalido
            | AppError::UsuarioNaoInformado
            | AppError::AjusteNaoEditavel(_) => ErrorKind::Validation,
            AppError::ResourceNotFound(_) | AppError::PeriodoNaoEncontrado { .. } => {
                ErrorKind::NotFound
            }
            AppError::PeriodoFechado { .. } | AppError::PeriodoNaoFechado { .. } => {
                ErrorKind::StateConflict
            }
            AppError::CredenciaisMasterInvalidas => ErrorKind::Auth,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_) => ErrorKind::Storage,
        }
    }

    // Dados estruturados que acompanham a mensagem traduzida.
    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                Some(Value::Object(details))
            }
            AppError::HorarioInvalido { data, campo, valor } => {
                Some(json!({ "data": data, "campo": campo, "valor": valor }))
            }
            AppError::CompetenciaInvalida(valor) => Some(json!({ "valor": valor })),
            AppError::DataForaDaCompetencia { data, competencia } => {
                Some(json!({ "data": data, "competencia": competencia }))
            }
            AppError::DataDuplicada(data) => Some(json!({ "data": data })),
            AppError::CampoObrigatorio(campo) => Some(json!({ "campo": campo })),
            AppError::ValorInvalido { campo, motivo } => {
                Some(json!({ "campo": campo, "motivo": motivo }))
            }
            AppError::AjusteNaoEditavel(id) => Some(json!({ "ajusteId": id })),
            AppError::ResourceNotFound(recurso) => Some(json!({ "recurso": recurso })),
            AppError::PeriodoNaoEncontrado { ano, mes } | AppError::PeriodoFechado { ano, mes } => {
                Some(json!({ "ano": ano, "mes": mes }))
            }
            AppError::PeriodoNaoFechado { ano, mes, situacao } => {
                Some(json!({ "ano": ano, "mes": mes, "situacao": situacao }))
            }
            _ => None,
        }
    }

    /// Converte para a resposta HTTP, com a mensagem no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let kind = self.kind();
        if kind == ErrorKind::Storage {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError {
            status: kind.status(),
            code: self.code(),
            kind,
            error: store.message(&locale.0, self.code()).to_string(),
            details: self.details(),
        }
    }
}

// Rejeições de extratores não têm acesso ao AppState: usam o catálogo padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub kind: ErrorKind,
    pub error: String,
    pub details: Option<Value>,
}

/// Corpo de erro devolvido por todas as rotas.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorBody {
    #[schema(example = "PERIODO_FECHADO")]
    pub code: String,
    pub kind: ErrorKind,
    #[schema(example = "O período está fechado para edição.")]
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            code: self.code.to_string(),
            kind: self.kind,
            error: self.error,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomia_mapeia_para_status_http() {
        assert_eq!(
            AppError::HorarioInvalido {
                data: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                campo: "entradaManha",
                valor: "25:00".into(),
            }
            .kind()
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PeriodoNaoEncontrado { ano: 2024, mes: 3 }.kind().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::PeriodoNaoFechado {
                ano: 2024,
                mes: 3,
                situacao: SituacaoPeriodo::Reaberto,
            }
            .kind()
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::CredenciaisMasterInvalidas.kind().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn codigo_nao_depende_do_idioma() {
        let store = I18nStore::default();
        let pt = AppError::PeriodoFechado { ano: 2024, mes: 5 }
            .to_api_error(&Locale("pt".into()), &store);
        let en = AppError::PeriodoFechado { ano: 2024, mes: 5 }
            .to_api_error(&Locale("en".into()), &store);

        assert_eq!(pt.code, "PERIODO_FECHADO");
        assert_eq!(pt.code, en.code);
        assert_ne!(pt.error, en.error);
        assert_eq!(pt.details, Some(json!({ "ano": 2024, "mes": 5 })));
    }
}
