// src/middleware/actor.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::common::error::AppError;

// Preenchido pelo gateway de autenticação que fica na frente do serviço.
const USER_LOGIN_HEADER: &str = "x-user-login";

const MAX_LOGIN_LEN: usize = 120;

/// Usuário que executa a operação (gravado em fechamentos, ajustes e auditoria).
#[derive(Debug, Clone)]
pub struct Actor(pub String);

impl Actor {
    pub fn from_header(value: Option<&str>) -> Result<Self, AppError> {
        let login = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::UsuarioNaoInformado)?;

        if login.chars().count() > MAX_LOGIN_LEN {
            return Err(AppError::ValorInvalido {
                campo: "x-user-login",
                motivo: format!("máximo de {} caracteres", MAX_LOGIN_LEN),
            });
        }

        Ok(Actor(login.to_string()))
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(USER_LOGIN_HEADER)
            .and_then(|value| value.to_str().ok());

        Actor::from_header(header_value)
    }
}
