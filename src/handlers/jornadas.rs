// src/handlers/jornadas.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, ApiErrorBody, AppError},
    config::AppState,
    db::cadastro_repo::NovaJornada,
    middleware::{actor::Actor, i18n::Locale, tenancy::TenantContext},
    models::ponto::Jornada,
};

// ---
// Payload: CreateJornada
// Jornadas não são alteradas depois de criadas; trocar o horário de alguém
// é apontar o funcionário para uma jornada nova.
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJornadaPayload {
    #[schema(example = "Comercial 44h")]
    #[validate(length(min = 1, max = 120, message = "O nome é obrigatório (até 120 caracteres)."))]
    pub nome: String,

    #[schema(example = "08:00")]
    pub entrada_manha: Option<String>,
    #[schema(example = "12:00")]
    pub saida_manha: Option<String>,
    #[schema(example = "13:00")]
    pub entrada_tarde: Option<String>,
    #[schema(example = "17:00")]
    pub saida_tarde: Option<String>,
    pub intervalo_inicio: Option<String>,
    pub intervalo_fim: Option<String>,

    #[schema(example = 10)]
    #[validate(range(min = 0, max = 120, message = "A tolerância deve estar entre 0 e 120 minutos."))]
    #[serde(default)]
    pub tolerancia_minutos: i32,
}

fn campo(valor: &Option<String>) -> Option<&str> {
    valor.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// GET /api/rh/jornadas
#[utoipa::path(
    get,
    path = "/api/rh/jornadas",
    tag = "Jornadas",
    responses(
        (status = 200, description = "Jornadas cadastradas", body = Vec<Jornada>)
    ),
    params(
        ("x-tenant-id" = uuid::Uuid, Header, description = "ID da Empresa")
    )
)]
pub async fn list_jornadas(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let jornadas = app_state
        .cadastro_service
        .list_jornadas(tenant.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(jornadas)))
}

// POST /api/rh/jornadas
#[utoipa::path(
    post,
    path = "/api/rh/jornadas",
    tag = "Jornadas",
    request_body = CreateJornadaPayload,
    responses(
        (status = 201, description = "Jornada criada", body = Jornada),
        (status = 400, description = "Horário fora do formato HH:MM", body = ApiErrorBody)
    ),
    params(
        ("x-tenant-id" = uuid::Uuid, Header, description = "ID da Empresa"),
        ("x-user-login" = String, Header, description = "Usuário que executa a operação")
    )
)]
pub async fn create_jornada(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    actor: Actor,
    Json(payload): Json<CreateJornadaPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let nova = NovaJornada {
        nome: payload.nome.trim(),
        entrada_manha: campo(&payload.entrada_manha),
        saida_manha: campo(&payload.saida_manha),
        entrada_tarde: campo(&payload.entrada_tarde),
        saida_tarde: campo(&payload.saida_tarde),
        intervalo_inicio: campo(&payload.intervalo_inicio),
        intervalo_fim: campo(&payload.intervalo_fim),
        tolerancia_minutos: payload.tolerancia_minutos,
    };

    let jornada = app_state
        .cadastro_service
        .create_jornada(tenant.0, &nova, &actor.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(jornada)))
}
