// src/services/cadastro_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CadastroRepository, cadastro_repo::NovaJornada},
    models::{
        audit::{AuditEntry, OperacaoAuditoria},
        ponto::{Feriado, Funcionario, Jornada},
    },
    services::{
        audit_service::AuditLogger,
        ponto_calculo::{CalendarioFeriados, parse_time},
        reference_cache::ReferenceCache,
    },
};

/// Dia/mês de um feriado recorrente. 29/02 é aceito (existe em anos bissextos).
pub fn validar_dia_mes(dia: i16, mes: i16) -> Result<(), AppError> {
    let valido = u32::try_from(mes)
        .ok()
        .zip(u32::try_from(dia).ok())
        .and_then(|(m, d)| NaiveDate::from_ymd_opt(2024, m, d))
        .is_some();

    if !valido {
        return Err(AppError::ValorInvalido {
            campo: "dia",
            motivo: format!("{:02}/{:02} não existe no calendário", dia, mes),
        });
    }
    Ok(())
}

/// Todo horário informado na jornada precisa estar em "HH:MM".
pub fn validar_jornada(nova: &NovaJornada<'_>) -> Result<(), AppError> {
    let campos = [
        ("entradaManha", nova.entrada_manha),
        ("saidaManha", nova.saida_manha),
        ("entradaTarde", nova.entrada_tarde),
        ("saidaTarde", nova.saida_tarde),
        ("intervaloInicio", nova.intervalo_inicio),
        ("intervaloFim", nova.intervalo_fim),
    ];

    for (campo, valor) in campos {
        if let Some(v) = valor {
            if parse_time(v).is_none() {
                return Err(AppError::ValorInvalido {
                    campo,
                    motivo: format!("'{}' não está no formato HH:MM", v),
                });
            }
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct CadastroService {
    repo: CadastroRepository,
    cache: ReferenceCache,
    audit: AuditLogger,
}

impl CadastroService {
    pub fn new(repo: CadastroRepository, cache: ReferenceCache, audit: AuditLogger) -> Self {
        Self { repo, cache, audit }
    }

    pub async fn funcionario(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
    ) -> Result<Funcionario, AppError> {
        self.repo
            .find_funcionario(self.repo.pool(), tenant_id, funcionario_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("funcionário {}", funcionario_id)))
    }

    // =========================================================================
    //  JORNADAS
    // =========================================================================

    pub async fn jornada(
        &self,
        tenant_id: Uuid,
        jornada_id: Uuid,
    ) -> Result<Option<Arc<Jornada>>, AppError> {
        if let Some(jornada) = self.cache.jornada(tenant_id, jornada_id).await {
            return Ok(Some(jornada));
        }

        match self
            .repo
            .find_jornada(self.repo.pool(), tenant_id, jornada_id)
            .await?
        {
            Some(jornada) => Ok(Some(self.cache.put_jornada(tenant_id, jornada).await)),
            None => Ok(None),
        }
    }

    pub async fn list_jornadas(&self, tenant_id: Uuid) -> Result<Vec<Jornada>, AppError> {
        self.repo.list_jornadas(self.repo.pool(), tenant_id).await
    }

    pub async fn create_jornada(
        &self,
        tenant_id: Uuid,
        nova: &NovaJornada<'_>,
        usuario: &str,
    ) -> Result<Jornada, AppError> {
        validar_jornada(nova)?;

        let jornada = self
            .repo
            .create_jornada(self.repo.pool(), tenant_id, nova)
            .await?;

        tracing::info!(tenant_id = %tenant_id, jornada_id = %jornada.id, "Jornada criada");
        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "jornadas",
                jornada.id.to_string(),
                OperacaoAuditoria::Insert,
                format!("Jornada '{}' criada", jornada.nome),
            )
            .depois(&jornada)
            .por(usuario),
        );

        Ok(jornada)
    }

    // =========================================================================
    //  FERIADOS
    // =========================================================================

    /// Calendário do tenant, servido pelo cache quando possível.
    pub async fn calendario(&self, tenant_id: Uuid) -> Result<CalendarioFeriados, AppError> {
        let feriados = match self.cache.feriados(tenant_id).await {
            Some(feriados) => feriados,
            None => {
                let feriados = self.repo.list_feriados(self.repo.pool(), tenant_id).await?;
                self.cache.put_feriados(tenant_id, feriados).await
            }
        };
        Ok(CalendarioFeriados::new(&feriados))
    }

    pub async fn list_feriados(&self, tenant_id: Uuid) -> Result<Vec<Feriado>, AppError> {
        self.repo.list_feriados(self.repo.pool(), tenant_id).await
    }

    pub async fn create_feriado(
        &self,
        tenant_id: Uuid,
        dia: i16,
        mes: i16,
        descricao: &str,
        ativo: bool,
        usuario: &str,
    ) -> Result<Feriado, AppError> {
        validar_dia_mes(dia, mes)?;

        let feriado = self
            .repo
            .create_feriado(self.repo.pool(), tenant_id, dia, mes, descricao, ativo)
            .await?;
        self.cache.invalidate_feriados(tenant_id).await;

        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "feriados",
                feriado.id.to_string(),
                OperacaoAuditoria::Insert,
                format!("Feriado {:02}/{:02} criado", dia, mes),
            )
            .depois(&feriado)
            .por(usuario),
        );

        Ok(feriado)
    }

    pub async fn update_feriado(
        &self,
        tenant_id: Uuid,
        feriado_id: Uuid,
        dia: i16,
        mes: i16,
        descricao: &str,
        ativo: bool,
        usuario: &str,
    ) -> Result<Feriado, AppError> {
        validar_dia_mes(dia, mes)?;

        let antes = self
            .repo
            .find_feriado(self.repo.pool(), tenant_id, feriado_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("feriado {}", feriado_id)))?;

        let feriado = self
            .repo
            .update_feriado(self.repo.pool(), tenant_id, feriado_id, dia, mes, descricao, ativo)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("feriado {}", feriado_id)))?;
        self.cache.invalidate_feriados(tenant_id).await;

        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "feriados",
                feriado.id.to_string(),
                OperacaoAuditoria::Update,
                "Feriado alterado",
            )
            .antes(&antes)
            .depois(&feriado)
            .por(usuario),
        );

        Ok(feriado)
    }

    pub async fn delete_feriado(
        &self,
        tenant_id: Uuid,
        feriado_id: Uuid,
        usuario: &str,
    ) -> Result<(), AppError> {
        let antes = self
            .repo
            .find_feriado(self.repo.pool(), tenant_id, feriado_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("feriado {}", feriado_id)))?;

        if !self
            .repo
            .delete_feriado(self.repo.pool(), tenant_id, feriado_id)
            .await?
        {
            return Err(AppError::ResourceNotFound(format!("feriado {}", feriado_id)));
        }
        self.cache.invalidate_feriados(tenant_id).await;

        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "feriados",
                feriado_id.to_string(),
                OperacaoAuditoria::Delete,
                "Feriado excluído",
            )
            .antes(&antes)
            .por(usuario),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dia_e_mes_de_feriado() {
        assert!(validar_dia_mes(25, 12).is_ok());
        assert!(validar_dia_mes(29, 2).is_ok());
        assert!(validar_dia_mes(30, 2).is_err());
        assert!(validar_dia_mes(31, 4).is_err());
        assert!(validar_dia_mes(0, 1).is_err());
        assert!(validar_dia_mes(1, 13).is_err());
        assert!(validar_dia_mes(-1, 5).is_err());
    }

    #[test]
    fn jornada_com_horario_malformado() {
        let mut nova = NovaJornada {
            nome: "Comercial",
            entrada_manha: Some("08:00"),
            saida_manha: Some("12:00"),
            entrada_tarde: Some("13:00"),
            saida_tarde: Some("17:00"),
            intervalo_inicio: None,
            intervalo_fim: None,
            tolerancia_minutos: 10,
        };
        assert!(validar_jornada(&nova).is_ok());

        nova.saida_tarde = Some("17h");
        let err = validar_jornada(&nova).unwrap_err();
        assert_eq!(err.code(), "VALOR_INVALIDO");
    }
}
