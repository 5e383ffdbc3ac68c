// src/handlers/banco_horas.rs

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
    models::banco_horas::{AjusteBancoHoras, PoliticaFaltas, ResumoBancoHoras, TipoAjuste},
    services::competencia::Competencia,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ResumoQuery {
    #[param(example = 2024)]
    pub ano: i32,
    #[param(example = 3)]
    pub mes: u32,
    /// Padrão: COMPENSAR_COM_HORAS_EXTRAS
    #[serde(default)]
    pub politica_faltas: PoliticaFaltas,
    /// Liquida o saldo no mês (banco final = 0)
    #[serde(default)]
    pub zerar_banco_no_mes: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetenciaQuery {
    #[param(example = 2024)]
    pub ano: i32,
    #[param(example = 3)]
    pub mes: u32,
}

// ---
// Payload: lançamento de ajuste (manual ou saldo inicial)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LancarAjustePayload {
    #[schema(example = 2024)]
    pub ano: i32,

    #[schema(example = 3)]
    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub mes: u32,

    /// Diferente de zero, no máximo 100000 em valor absoluto.
    #[schema(example = -45)]
    pub minutos: i32,

    #[validate(length(max = 500, message = "A observação aceita no máximo 500 caracteres."))]
    pub observacao: Option<String>,
}

// GET /api/rh/banco-horas/{funcionario_id}/resumo
#[utoipa::path(
    get,
    path = "/api/rh/banco-horas/{funcionario_id}/resumo",
    tag = "Banco de Horas",
    responses(
        (status = 200, description = "Extrato diário e totais da competência", body = ResumoBancoHoras),
        (status = 400, description = "Competência inválida", body = ApiErrorBody),
        (status = 404, description = "Funcionário não encontrado", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ResumoQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_resumo(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(funcionario_id): Path<Uuid>,
    Query(query): Query<ResumoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let competencia = Competencia::new(query.ano, query.mes)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let resumo = app_state
        .banco_horas_service
        .resumo(
            tenant.0,
            funcionario_id,
            competencia,
            query.politica_faltas,
            query.zerar_banco_no_mes,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/rh/banco-horas/{funcionario_id}/ajustes
#[utoipa::path(
    get,
    path = "/api/rh/banco-horas/{funcionario_id}/ajustes",
    tag = "Banco de Horas",
    responses(
        (status = 200, description = "Todos os ajustes da competência", body = Vec<AjusteBancoHoras>),
        (status = 400, description = "Competência inválida", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        CompetenciaQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_ajustes(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(funcionario_id): Path<Uuid>,
    Query(query): Query<CompetenciaQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let competencia = Competencia::new(query.ano, query.mes)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let ajustes = app_state
        .banco_horas_service
        .list_ajustes(tenant.0, funcionario_id, competencia)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ajustes)))
}

async fn lancar(
    app_state: AppState,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    funcionario_id: Uuid,
    tipo: TipoAjuste,
    payload: LancarAjustePayload,
) -> Result<AjusteBancoHoras, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let competencia = Competencia::new(payload.ano, payload.mes)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .banco_horas_service
        .lancar_ajuste(
            tenant.0,
            funcionario_id,
            competencia,
            tipo,
            payload.minutos,
            payload.observacao.as_deref(),
            &actor.0,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))
}

// POST /api/rh/banco-horas/{funcionario_id}/ajustes
#[utoipa::path(
    post,
    path = "/api/rh/banco-horas/{funcionario_id}/ajustes",
    tag = "Banco de Horas",
    request_body = LancarAjustePayload,
    responses(
        (status = 201, description = "Ajuste manual lançado", body = AjusteBancoHoras),
        (status = 400, description = "Dados inválidos", body = ApiErrorBody),
        (status = 404, description = "Funcionário não encontrado", body = ApiErrorBody),
        (status = 409, description = "Competência fechada", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn create_ajuste(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path(funcionario_id): Path<Uuid>,
    Json(payload): Json<LancarAjustePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let ajuste = lancar(
        app_state,
        locale,
        tenant,
        actor,
        funcionario_id,
        TipoAjuste::AjusteManual,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ajuste)))
}

// POST /api/rh/banco-horas/{funcionario_id}/saldo-inicial
#[utoipa::path(
    post,
    path = "/api/rh/banco-horas/{funcionario_id}/saldo-inicial",
    tag = "Banco de Horas",
    request_body = LancarAjustePayload,
    responses(
        (status = 201, description = "Saldo trazido de outro sistema", body = AjusteBancoHoras),
        (status = 400, description = "Dados inválidos", body = ApiErrorBody),
        (status = 409, description = "Competência fechada", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn create_saldo_inicial(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path(funcionario_id): Path<Uuid>,
    Json(payload): Json<LancarAjustePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let ajuste = lancar(
        app_state,
        locale,
        tenant,
        actor,
        funcionario_id,
        TipoAjuste::CarregarSaldo,
        payload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ajuste)))
}

// DELETE /api/rh/banco-horas/ajustes/{ajuste_id}
#[utoipa::path(
    delete,
    path = "/api/rh/banco-horas/ajustes/{ajuste_id}",
    tag = "Banco de Horas",
    responses(
        (status = 204, description = "Ajuste manual excluído"),
        (status = 400, description = "Ajuste gerado pelo sistema", body = ApiErrorBody),
        (status = 404, description = "Ajuste não encontrado", body = ApiErrorBody),
        (status = 409, description = "Competência fechada", body = ApiErrorBody)
    ),
    params(
        ("ajuste_id" = Uuid, Path, description = "ID do ajuste"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn delete_ajuste(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path(ajuste_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .banco_horas_service
        .excluir_ajuste(tenant.0, ajuste_id, &actor.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
