// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
const TENANT_ID_HEADER: &str = "x-tenant-id";

// Empresa (tenant) selecionada pelo cliente. Todas as consultas filtram por ela.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl TenantContext {
    /// Resolve o tenant a partir do valor bruto do cabeçalho.
    pub fn from_header(value: Option<&str>) -> Result<Self, AppError> {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::TenantNaoSelecionado)?;

        Uuid::parse_str(value)
            .map(TenantContext)
            .map_err(|_| AppError::TenantInvalido)
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = match parts.headers.get(TENANT_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| AppError::TenantInvalido)?),
            None => None,
        };

        TenantContext::from_header(header_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cabecalho_ausente_ou_vazio_e_nao_selecionado() {
        assert!(matches!(
            TenantContext::from_header(None),
            Err(AppError::TenantNaoSelecionado)
        ));
        assert!(matches!(
            TenantContext::from_header(Some("  ")),
            Err(AppError::TenantNaoSelecionado)
        ));
    }

    #[test]
    fn cabecalho_precisa_ser_uuid() {
        assert!(matches!(
            TenantContext::from_header(Some("loja-1")),
            Err(AppError::TenantInvalido)
        ));

        let id = Uuid::new_v4();
        let ctx = TenantContext::from_header(Some(&id.to_string())).unwrap();
        assert_eq!(ctx.0, id);
    }
}
