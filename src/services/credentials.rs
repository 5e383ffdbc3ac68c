// src/services/credentials.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{common::error::AppError, db::MasterUserRepository};

/// Confere usuário e senha master exigidos na reabertura de período.
#[async_trait]
pub trait MasterCredentialVerifier: Send + Sync {
    async fn verify(&self, tenant_id: Uuid, login: &str, senha: &str) -> Result<bool, AppError>;
}

pub struct PgMasterCredentialVerifier {
    repo: MasterUserRepository,
}

impl PgMasterCredentialVerifier {
    pub fn new(repo: MasterUserRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl MasterCredentialVerifier for PgMasterCredentialVerifier {
    async fn verify(&self, tenant_id: Uuid, login: &str, senha: &str) -> Result<bool, AppError> {
        let hash = match self
            .repo
            .find_password_hash(self.repo.pool(), tenant_id, login)
            .await?
        {
            Some(hash) => hash,
            None => return Ok(false),
        };

        conferir_senha(senha, hash).await
    }
}

/// bcrypt é caro: roda fora do executor assíncrono.
pub async fn conferir_senha(senha: &str, hash: String) -> Result<bool, AppError> {
    let senha = senha.to_owned();
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(&senha, &hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

    Ok(ok)
}
