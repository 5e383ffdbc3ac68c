// src/services/banco_horas_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::{db_utils::finish_tx, error::AppError},
    db::{BancoHorasRepository, PeriodoRepository},
    models::{
        audit::{AuditEntry, OperacaoAuditoria},
        banco_horas::{AjusteBancoHoras, PoliticaFaltas, ResumoBancoHoras, TipoAjuste},
    },
    services::{
        audit_service::AuditLogger,
        cadastro_service::CadastroService,
        competencia::Competencia,
        periodo_service::{PeriodoService, garantir_periodo_aberto},
        ponto_service::PontoService,
        resumo::{EntradaResumo, montar_resumo},
    },
};

pub const AJUSTE_MAX_MINUTOS: i32 = 100_000;
pub const OBSERVACAO_MAX_CHARS: usize = 500;

pub fn validar_ajuste(minutos: i32, observacao: Option<&str>) -> Result<(), AppError> {
    if minutos == 0 {
        return Err(AppError::ValorInvalido {
            campo: "minutos",
            motivo: "o ajuste não pode ser zero".into(),
        });
    }
    if minutos.unsigned_abs() > AJUSTE_MAX_MINUTOS as u32 {
        return Err(AppError::ValorInvalido {
            campo: "minutos",
            motivo: format!("limite de {} minutos", AJUSTE_MAX_MINUTOS),
        });
    }
    if observacao.is_some_and(|o| o.chars().count() > OBSERVACAO_MAX_CHARS) {
        return Err(AppError::ValorInvalido {
            campo: "observacao",
            motivo: format!("máximo de {} caracteres", OBSERVACAO_MAX_CHARS),
        });
    }
    Ok(())
}

/// Soma dos ajustes que entram no saldo do mês.
pub fn soma_ajustes(ajustes: &[AjusteBancoHoras]) -> i64 {
    ajustes
        .iter()
        .filter(|a| a.tipo.entra_no_saldo())
        .map(|a| i64::from(a.minutos))
        .sum()
}

#[derive(Clone)]
pub struct BancoHorasService {
    repo: BancoHorasRepository,
    periodo_repo: PeriodoRepository,
    cadastro: CadastroService,
    ponto: PontoService,
    periodos: PeriodoService,
    audit: AuditLogger,
}

impl BancoHorasService {
    pub fn new(
        repo: BancoHorasRepository,
        periodo_repo: PeriodoRepository,
        cadastro: CadastroService,
        ponto: PontoService,
        periodos: PeriodoService,
        audit: AuditLogger,
    ) -> Self {
        Self {
            repo,
            periodo_repo,
            cadastro,
            ponto,
            periodos,
            audit,
        }
    }

    // =========================================================================
    //  RESUMO
    // =========================================================================

    /// Leitura sem transação: um fechamento concorrente do mês anterior
    /// pode mudar o saldo de abertura entre duas consultas.
    pub async fn resumo(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
        politica: PoliticaFaltas,
        zerar_banco_no_mes: bool,
    ) -> Result<ResumoBancoHoras, AppError> {
        let funcionario = self.cadastro.funcionario(tenant_id, funcionario_id).await?;

        let jornada = match funcionario.jornada_id {
            Some(jornada_id) => self.cadastro.jornada(tenant_id, jornada_id).await?,
            None => None,
        };
        let calendario = self.cadastro.calendario(tenant_id).await?;

        let registros: HashMap<_, _> = self
            .ponto
            .registros(tenant_id, funcionario_id, competencia)
            .await?
            .into_iter()
            .map(|r| (r.data, r))
            .collect();

        let ajustes = self
            .list_ajustes(tenant_id, funcionario_id, competencia)
            .await?;
        let saldo_anterior = self
            .periodos
            .saldo_anterior(tenant_id, funcionario_id, competencia)
            .await?;

        Ok(montar_resumo(&EntradaResumo {
            competencia,
            funcionario: &funcionario,
            jornada: jornada.as_deref(),
            calendario: &calendario,
            registros: &registros,
            saldo_anterior_minutos: saldo_anterior,
            ajustes_minutos: soma_ajustes(&ajustes),
            politica,
            zerar_banco_no_mes,
        }))
    }

    // =========================================================================
    //  AJUSTES
    // =========================================================================

    pub async fn list_ajustes(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
    ) -> Result<Vec<AjusteBancoHoras>, AppError> {
        self.repo
            .list_ajustes(
                self.repo.pool(),
                tenant_id,
                funcionario_id,
                competencia.ano,
                competencia.mes as i32,
            )
            .await
    }

    /// Lança AJUSTE_MANUAL ou CARREGAR_SALDO numa competência aberta.
    pub async fn lancar_ajuste(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
        tipo: TipoAjuste,
        minutos: i32,
        observacao: Option<&str>,
        usuario: &str,
    ) -> Result<AjusteBancoHoras, AppError> {
        if !tipo.entra_no_saldo() {
            return Err(AppError::ValorInvalido {
                campo: "tipo",
                motivo: "lançamentos de fechamento são gerados pelo sistema".into(),
            });
        }
        let observacao = observacao.map(str::trim).filter(|o| !o.is_empty());
        validar_ajuste(minutos, observacao)?;
        self.cadastro.funcionario(tenant_id, funcionario_id).await?;

        let mut tx = self.repo.pool().begin().await?;

        let result = async {
            garantir_periodo_aberto(
                &self.periodo_repo,
                &mut *tx,
                tenant_id,
                funcionario_id,
                competencia,
            )
            .await?;

            self.repo
                .create_ajuste(
                    &mut *tx,
                    tenant_id,
                    funcionario_id,
                    competencia.ano,
                    competencia.mes as i32,
                    tipo,
                    minutos,
                    observacao,
                    usuario,
                )
                .await
        }
        .await;

        let ajuste = finish_tx(tx, result).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            funcionario_id = %funcionario_id,
            competencia = %competencia,
            tipo = ?tipo,
            minutos,
            "Ajuste de banco de horas lançado"
        );
        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "ajustes_banco_horas",
                ajuste.id.to_string(),
                OperacaoAuditoria::Insert,
                format!("Ajuste de {} minutos em {}", minutos, competencia),
            )
            .depois(&ajuste)
            .por(usuario),
        );

        Ok(ajuste)
    }

    /// Exclui um AJUSTE_MANUAL. Outros tipos são do sistema.
    pub async fn excluir_ajuste(
        &self,
        tenant_id: Uuid,
        ajuste_id: Uuid,
        usuario: &str,
    ) -> Result<(), AppError> {
        let ajuste = self
            .repo
            .find_ajuste(self.repo.pool(), tenant_id, ajuste_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("ajuste {}", ajuste_id)))?;

        if ajuste.tipo != TipoAjuste::AjusteManual {
            return Err(AppError::AjusteNaoEditavel(ajuste_id));
        }

        let competencia = Competencia::new(ajuste.ano, ajuste.mes as u32)?;
        let mut tx = self.repo.pool().begin().await?;

        let result = async {
            garantir_periodo_aberto(
                &self.periodo_repo,
                &mut *tx,
                tenant_id,
                ajuste.funcionario_id,
                competencia,
            )
            .await?;

            if !self
                .repo
                .delete_ajuste_manual(&mut *tx, tenant_id, ajuste_id)
                .await?
            {
                return Err(AppError::ResourceNotFound(format!("ajuste {}", ajuste_id)));
            }
            Ok::<_, AppError>(())
        }
        .await;

        finish_tx(tx, result).await?;

        tracing::info!(tenant_id = %tenant_id, ajuste_id = %ajuste_id, "Ajuste manual excluído");
        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "ajustes_banco_horas",
                ajuste_id.to_string(),
                OperacaoAuditoria::Delete,
                "Ajuste manual excluído",
            )
            .antes(&ajuste)
            .por(usuario),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn ajuste(tipo: TipoAjuste, minutos: i32) -> AjusteBancoHoras {
        AjusteBancoHoras {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            funcionario_id: Uuid::new_v4(),
            ano: 2024,
            mes: 3,
            tipo,
            minutos,
            observacao: None,
            usuario: "rh".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lancamentos_de_fechamento_ficam_fora_da_soma() {
        let ajustes = vec![
            ajuste(TipoAjuste::AjusteManual, 30),
            ajuste(TipoAjuste::AjusteManual, -45),
            ajuste(TipoAjuste::CarregarSaldo, 600),
            ajuste(TipoAjuste::FechamentoPagar, -585),
            ajuste(TipoAjuste::FechamentoDescontar, 10),
        ];
        assert_eq!(soma_ajustes(&ajustes), 585);
        assert_eq!(soma_ajustes(&[]), 0);
    }

    #[test]
    fn limites_do_ajuste() {
        assert!(validar_ajuste(-45, Some("atraso")).is_ok());
        assert!(validar_ajuste(100_000, None).is_ok());
        assert!(validar_ajuste(0, None).is_err());
        assert!(validar_ajuste(-100_001, None).is_err());
        assert!(validar_ajuste(10, Some(&"x".repeat(501))).is_err());
        assert!(validar_ajuste(10, Some(&"x".repeat(500))).is_ok());
    }
}
