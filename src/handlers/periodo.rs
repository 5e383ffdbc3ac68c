// src/handlers/periodo.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, ApiErrorBody, AppError},
    config::AppState,
    middleware::{actor::Actor, i18n::Locale, tenancy::TenantContext},
    models::{
        banco_horas::PoliticaFaltas,
        periodo::{PeriodoDetalhe, SituacaoMes},
    },
    services::{competencia::Competencia, periodo_service::totais_do_resumo},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnoQuery {
    #[param(example = 2024)]
    pub ano: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FecharPayload {
    #[serde(default)]
    pub politica_faltas: PoliticaFaltas,
    #[serde(default)]
    pub zerar_banco_no_mes: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReabrirPayload {
    #[validate(length(min = 1, message = "O usuário master é obrigatório."))]
    pub usuario_master: String,

    #[validate(length(min = 1, message = "A senha master é obrigatória."))]
    pub senha_master: String,

    /// Guardado com no máximo 255 caracteres.
    pub motivo: Option<String>,
}

/// Ação sobre o período, identificada pelo campo `acao`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "acao", rename_all = "lowercase")]
pub enum AcaoPeriodoPayload {
    Fechar(FecharPayload),
    Reabrir(ReabrirPayload),
}

// GET /api/rh/banco-horas/{funcionario_id}/periodos
#[utoipa::path(
    get,
    path = "/api/rh/banco-horas/{funcionario_id}/periodos",
    tag = "Períodos",
    responses(
        (status = 200, description = "Situação dos doze meses do ano", body = Vec<SituacaoMes>)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        AnoQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_periodos(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(funcionario_id): Path<Uuid>,
    Query(query): Query<AnoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    // valida o ano com a mesma regra da competência
    Competencia::new(query.ano, 1).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let meses = app_state
        .periodo_service
        .listar_ano(tenant.0, funcionario_id, query.ano)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(meses)))
}

// GET /api/rh/banco-horas/{funcionario_id}/periodos/{ano}/{mes}
#[utoipa::path(
    get,
    path = "/api/rh/banco-horas/{funcionario_id}/periodos/{ano}/{mes}",
    tag = "Períodos",
    responses(
        (status = 200, description = "Situação e fotografia do fechamento", body = PeriodoDetalhe),
        (status = 400, description = "Competência inválida", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ("ano" = i32, Path, description = "Ano da competência"),
        ("mes" = u32, Path, description = "Mês da competência (1-12)"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_periodo(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path((funcionario_id, ano, mes)): Path<(Uuid, i32, u32)>,
) -> Result<impl IntoResponse, ApiError> {
    let competencia = Competencia::new(ano, mes)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let detalhe = app_state
        .periodo_service
        .consultar(tenant.0, funcionario_id, competencia)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detalhe)))
}

// POST /api/rh/banco-horas/{funcionario_id}/periodos/{ano}/{mes}
#[utoipa::path(
    post,
    path = "/api/rh/banco-horas/{funcionario_id}/periodos/{ano}/{mes}",
    tag = "Períodos",
    request_body = AcaoPeriodoPayload,
    responses(
        (status = 200, description = "Período fechado ou reaberto", body = PeriodoDetalhe),
        (status = 400, description = "Dados inválidos", body = ApiErrorBody),
        (status = 401, description = "Credenciais master inválidas", body = ApiErrorBody),
        (status = 404, description = "Período nunca fechado ou funcionário inexistente", body = ApiErrorBody),
        (status = 409, description = "Período não está fechado", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ("ano" = i32, Path, description = "Ano da competência"),
        ("mes" = u32, Path, description = "Mês da competência (1-12)"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn change_periodo(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path((funcionario_id, ano, mes)): Path<(Uuid, i32, u32)>,
    Json(payload): Json<AcaoPeriodoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let competencia = Competencia::new(ano, mes)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let detalhe = match payload {
        AcaoPeriodoPayload::Fechar(fechar) => {
            // Os totais são sempre recalculados aqui, nunca vindos do cliente.
            let resumo = app_state
                .banco_horas_service
                .resumo(
                    tenant.0,
                    funcionario_id,
                    competencia,
                    fechar.politica_faltas,
                    fechar.zerar_banco_no_mes,
                )
                .await
                .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

            app_state
                .periodo_service
                .fechar(
                    tenant.0,
                    funcionario_id,
                    competencia,
                    totais_do_resumo(&resumo),
                    &actor.0,
                )
                .await
        }
        AcaoPeriodoPayload::Reabrir(reabrir) => {
            reabrir.validate().map_err(|e| {
                AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store)
            })?;

            app_state
                .periodo_service
                .reabrir(
                    tenant.0,
                    funcionario_id,
                    competencia,
                    &reabrir.usuario_master,
                    &reabrir.senha_master,
                    reabrir.motivo.as_deref(),
                    &actor.0,
                )
                .await
        }
    }
    .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detalhe)))
}
