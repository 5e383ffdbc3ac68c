// src/models/audit.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "operacao_auditoria", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperacaoAuditoria {
    Insert,
    Update,
    Delete,
}

/// Um registro a ser gravado em `audit_log`.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub tenant_id: Uuid,
    pub tabela: &'static str,
    pub registro_id: String,
    pub operacao: OperacaoAuditoria,
    pub antes: Option<Value>,
    pub depois: Option<Value>,
    pub descricao: String,
    pub usuario: Option<String>,
}

impl AuditEntry {
    pub fn new(
        tenant_id: Uuid,
        tabela: &'static str,
        registro_id: impl Into<String>,
        operacao: OperacaoAuditoria,
        descricao: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            tabela,
            registro_id: registro_id.into(),
            operacao,
            antes: None,
            depois: None,
            descricao: descricao.into(),
            usuario: None,
        }
    }

    pub fn antes<T: Serialize>(mut self, valor: &T) -> Self {
        self.antes = serde_json::to_value(valor).ok();
        self
    }

    pub fn depois<T: Serialize>(mut self, valor: &T) -> Self {
        self.depois = serde_json::to_value(valor).ok();
        self
    }

    pub fn por(mut self, usuario: &str) -> Self {
        self.usuario = Some(usuario.to_string());
        self
    }
}
