// src/services/audit_service.rs

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::{common::error::AppError, db::AuditRepository, models::audit::AuditEntry};

/// Destino dos registros de auditoria.
#[async_trait]
pub trait AuditWriter: Send + Sync {
    async fn write(&self, entry: &AuditEntry) -> Result<(), AppError>;
}

pub struct PgAuditWriter {
    repo: AuditRepository,
}

impl PgAuditWriter {
    pub fn new(repo: AuditRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AuditWriter for PgAuditWriter {
    async fn write(&self, entry: &AuditEntry) -> Result<(), AppError> {
        self.repo.insert_entry(self.repo.pool(), entry).await
    }
}

/// Grava auditoria em segundo plano. Falhas só vão para o log:
/// a operação principal nunca espera nem falha por causa dela.
#[derive(Clone)]
pub struct AuditLogger {
    writer: Arc<dyn AuditWriter>,
}

impl AuditLogger {
    pub fn new(writer: Arc<dyn AuditWriter>) -> Self {
        Self { writer }
    }

    pub fn record(&self, entry: AuditEntry) -> JoinHandle<()> {
        let writer = Arc::clone(&self.writer);
        tokio::spawn(async move {
            if let Err(e) = writer.write(&entry).await {
                tracing::error!(
                    tenant_id = %entry.tenant_id,
                    tabela = entry.tabela,
                    registro_id = %entry.registro_id,
                    "Falha ao gravar auditoria: {}",
                    e
                );
            }
        })
    }
}
