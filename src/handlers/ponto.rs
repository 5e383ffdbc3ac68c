// src/handlers/ponto.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, ApiErrorBody, AppError},
    config::AppState,
    middleware::{actor::Actor, i18n::Locale, tenancy::TenantContext},
    models::ponto::{PontoMes, RegistroPonto},
    services::competencia::Competencia,
};

// ---
// Payload: substituição do mês inteiro
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubstituirPontoPayload {
    /// Dias do mês. Os ausentes ficam sem registro.
    #[validate(length(max = 31, message = "Um mês tem no máximo 31 dias."))]
    pub dias: Vec<RegistroPonto>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GravacaoPontoResponse {
    pub competencia: String,
    pub gravados: u64,
}

// GET /api/rh/ponto/{funcionario_id}/{competencia}
#[utoipa::path(
    get,
    path = "/api/rh/ponto/{funcionario_id}/{competencia}",
    tag = "Ponto",
    responses(
        (status = 200, description = "Marcações do mês, dia a dia", body = PontoMes),
        (status = 400, description = "Competência inválida", body = ApiErrorBody),
        (status = 404, description = "Funcionário não encontrado", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ("competencia" = String, Path, description = "Competência no formato AAAA-MM"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn get_ponto_mes(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path((funcionario_id, competencia)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let competencia = Competencia::parse(&competencia)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let mes = app_state
        .ponto_service
        .mes(tenant.0, funcionario_id, competencia)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(mes)))
}

// PUT /api/rh/ponto/{funcionario_id}/{competencia}
#[utoipa::path(
    put,
    path = "/api/rh/ponto/{funcionario_id}/{competencia}",
    tag = "Ponto",
    request_body = SubstituirPontoPayload,
    responses(
        (status = 200, description = "Marcações do mês substituídas", body = GravacaoPontoResponse),
        (status = 400, description = "Horário ou data inválidos (nada é gravado)", body = ApiErrorBody),
        (status = 404, description = "Funcionário não encontrado", body = ApiErrorBody),
        (status = 409, description = "Competência fechada", body = ApiErrorBody)
    ),
    params(
        ("funcionario_id" = Uuid, Path, description = "ID do funcionário"),
        ("competencia" = String, Path, description = "Competência no formato AAAA-MM"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn replace_ponto_mes(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Path((funcionario_id, competencia)): Path<(Uuid, String)>,
    Json(payload): Json<SubstituirPontoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let competencia = Competencia::parse(&competencia)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let gravados = app_state
        .ponto_service
        .substituir_mes(tenant.0, funcionario_id, competencia, payload.dias, &actor.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(GravacaoPontoResponse {
            competencia: competencia.to_string(),
            gravados,
        }),
    ))
}
