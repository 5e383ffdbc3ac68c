// src/handlers/feriados.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, ApiErrorBody, AppError},
    config::AppState,
    middleware::{actor::Actor, i18n::Locale, tenancy::TenantContext},
    models::ponto::Feriado,
};

fn ativo_padrao() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeriadoPayload {
    #[schema(example = 7)]
    #[validate(range(min = 1, max = 31, message = "O dia deve estar entre 1 e 31."))]
    pub dia: i16,

    #[schema(example = 9)]
    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub mes: i16,

    #[schema(example = "Independência do Brasil")]
    #[validate(length(min = 1, max = 120, message = "A descrição é obrigatória (até 120 caracteres)."))]
    pub descricao: String,

    #[serde(default = "ativo_padrao")]
    pub ativo: bool,
}

// GET /api/rh/feriados
#[utoipa::path(
    get,
    path = "/api/rh/feriados",
    tag = "Feriados",
    responses(
        (status = 200, description = "Feriados do tenant (recorrentes, por dia/mês)", body = Vec<Feriado>)
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_feriados(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let feriados = app_state
        .cadastro_service
        .list_feriados(tenant.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(feriados)))
}

// POST /api/rh/feriados
#[utoipa::path(
    post,
    path = "/api/rh/feriados",
    tag = "Feriados",
    request_body = FeriadoPayload,
    responses(
        (status = 201, description = "Feriado criado", body = Feriado),
        (status = 400, description = "Dia/mês inválidos", body = ApiErrorBody)
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn create_feriado(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Json(payload): Json<FeriadoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let feriado = app_state
        .cadastro_service
        .create_feriado(
            tenant.0,
            payload.dia,
            payload.mes,
            payload.descricao.trim(),
            payload.ativo,
            &actor.0,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(feriado)))
}

// PUT /api/rh/feriados/{feriado_id}
#[utoipa::path(
    put,
    path = "/api/rh/feriados/{feriado_id}",
    tag = "Feriados",
    request_body = FeriadoPayload,
    responses(
        (status = 200, description = "Feriado alterado", body = Feriado),
        (status = 400, description = "Dia/mês inválidos", body = ApiErrorBody),
        (status = 404, description = "Feriado não encontrado", body = ApiErrorBody)
    ),
    params(
        ("feriado_id" = Uuid, Path, description = "ID do feriado"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn update_feriado(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path(feriado_id): Path<Uuid>,
    Json(payload): Json<FeriadoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let feriado = app_state
        .cadastro_service
        .update_feriado(
            tenant.0,
            feriado_id,
            payload.dia,
            payload.mes,
            payload.descricao.trim(),
            payload.ativo,
            &actor.0,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(feriado)))
}

// DELETE /api/rh/feriados/{feriado_id}
#[utoipa::path(
    delete,
    path = "/api/rh/feriados/{feriado_id}",
    tag = "Feriados",
    responses(
        (status = 204, description = "Feriado excluído"),
        (status = 404, description = "Feriado não encontrado", body = ApiErrorBody)
    ),
    params(
        ("feriado_id" = Uuid, Path, description = "ID do feriado"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn delete_feriado(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path(feriado_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .cadastro_service
        .delete_feriado(tenant.0, feriado_id, &actor.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
