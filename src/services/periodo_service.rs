// src/services/periodo_service.rs
//
// Máquina de estados do período: NAO_INICIADO -> FECHADO -> REABERTO -> FECHADO ...

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{finish_tx, minutos_coluna},
        error::AppError,
    },
    db::{BancoHorasRepository, PeriodoRepository},
    models::{
        audit::{AuditEntry, OperacaoAuditoria},
        banco_horas::{ResumoBancoHoras, TipoAjuste},
        periodo::{PeriodoBancoHoras, PeriodoDetalhe, SituacaoMes, SituacaoPeriodo, TotaisFechamento},
    },
    services::{
        audit_service::AuditLogger, competencia::Competencia,
        credentials::MasterCredentialVerifier, resumo::valor_em_dinheiro,
    },
};

const MOTIVO_MAX_CHARS: usize = 255;

/// Reabrir só vale a partir de FECHADO. Sem linha: nunca foi fechado.
pub fn decidir_reabertura(
    competencia: Competencia,
    situacao: Option<SituacaoPeriodo>,
) -> Result<(), AppError> {
    match situacao {
        Some(SituacaoPeriodo::Fechado) => Ok(()),
        None => Err(AppError::PeriodoNaoEncontrado {
            ano: competencia.ano,
            mes: competencia.mes,
        }),
        Some(situacao) => Err(AppError::PeriodoNaoFechado {
            ano: competencia.ano,
            mes: competencia.mes,
            situacao,
        }),
    }
}

/// Saldo liquidado -> (valor a pagar, valor a descontar). O sinal decide o lado.
pub fn valores_fechamento(saldo_para_pagar_minutos: i64, valor_hora: Decimal) -> (Decimal, Decimal) {
    let valor = valor_em_dinheiro(saldo_para_pagar_minutos.abs(), valor_hora, Decimal::ONE);
    if saldo_para_pagar_minutos >= 0 {
        (valor, Decimal::ZERO)
    } else {
        (Decimal::ZERO, valor)
    }
}

pub fn truncar_motivo(motivo: Option<&str>) -> Option<String> {
    motivo
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(|m| m.chars().take(MOTIVO_MAX_CHARS).collect())
}

/// Totais do resumo no formato que o fechamento grava.
pub fn totais_do_resumo(resumo: &ResumoBancoHoras) -> TotaisFechamento {
    let t = &resumo.totais;
    TotaisFechamento {
        saldo_anterior_minutos: t.saldo_anterior_minutos,
        extras_50_minutos: t.extras_uteis_minutos,
        extras_100_minutos: t.extras_100_minutos,
        devidas_minutos: t.devidas_minutos,
        ajustes_minutos: t.ajustes_manuais_minutos,
        saldo_final_minutos: t.saldo_final_banco_minutos,
        saldo_final_para_pagar_minutos: t.saldo_final_para_pagar_minutos,
        politica_faltas: resumo.politica_faltas,
        zerou_banco: resumo.zerar_banco_no_mes,
        valor_hora: resumo.valor_hora,
    }
}

/// Lançamento de sistema que registra a liquidação do banco no fechamento.
/// O movimento tem o sinal oposto ao saldo liquidado.
pub fn ajuste_de_liquidacao(saldo_para_pagar_minutos: i64) -> Option<(TipoAjuste, i64)> {
    match saldo_para_pagar_minutos {
        0 => None,
        s if s > 0 => Some((TipoAjuste::FechamentoPagar, -s)),
        s => Some((TipoAjuste::FechamentoDescontar, -s)),
    }
}

/// Os doze meses do ano, com NAO_INICIADO onde não há linha.
pub fn situacoes_do_ano(periodos: &[PeriodoBancoHoras]) -> Vec<SituacaoMes> {
    (1..=12u32)
        .map(|mes| match periodos.iter().find(|p| p.mes == mes as i32) {
            Some(p) => SituacaoMes {
                mes,
                situacao: p.situacao,
                atualizado_por: Some(p.atualizado_por.clone()),
                atualizado_em: Some(p.atualizado_em),
            },
            None => SituacaoMes {
                mes,
                situacao: SituacaoPeriodo::NaoIniciado,
                atualizado_por: None,
                atualizado_em: None,
            },
        })
        .collect()
}

/// Trava a competência e recusa escrita em período FECHADO.
/// Deve rodar dentro da transação da escrita.
pub(crate) async fn garantir_periodo_aberto(
    repo: &PeriodoRepository,
    conn: &mut PgConnection,
    tenant_id: Uuid,
    funcionario_id: Uuid,
    competencia: Competencia,
) -> Result<(), AppError> {
    repo.lock_competencia(
        &mut *conn,
        tenant_id,
        funcionario_id,
        competencia.ano,
        competencia.mes as i32,
    )
    .await?;

    let periodo = repo
        .find_periodo_for_update(
            &mut *conn,
            tenant_id,
            funcionario_id,
            competencia.ano,
            competencia.mes as i32,
        )
        .await?;

    if periodo.is_some_and(|p| p.situacao == SituacaoPeriodo::Fechado) {
        return Err(AppError::PeriodoFechado {
            ano: competencia.ano,
            mes: competencia.mes,
        });
    }
    Ok(())
}

#[derive(Clone)]
pub struct PeriodoService {
    repo: PeriodoRepository,
    banco_repo: BancoHorasRepository,
    credenciais: Arc<dyn MasterCredentialVerifier>,
    audit: AuditLogger,
}

impl PeriodoService {
    pub fn new(
        repo: PeriodoRepository,
        banco_repo: BancoHorasRepository,
        credenciais: Arc<dyn MasterCredentialVerifier>,
        audit: AuditLogger,
    ) -> Self {
        Self {
            repo,
            banco_repo,
            credenciais,
            audit,
        }
    }

    pub async fn consultar(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
    ) -> Result<PeriodoDetalhe, AppError> {
        let (ano, mes) = (competencia.ano, competencia.mes as i32);
        let periodo = self
            .repo
            .find_periodo(self.repo.pool(), tenant_id, funcionario_id, ano, mes)
            .await?;
        let fechamento = self
            .repo
            .find_fechamento(self.repo.pool(), tenant_id, funcionario_id, ano, mes)
            .await?;

        Ok(PeriodoDetalhe {
            funcionario_id,
            ano: competencia.ano,
            mes: competencia.mes,
            situacao: periodo
                .as_ref()
                .map_or(SituacaoPeriodo::NaoIniciado, |p| p.situacao),
            atualizado_por: periodo.as_ref().map(|p| p.atualizado_por.clone()),
            atualizado_em: periodo.as_ref().map(|p| p.atualizado_em),
            fechamento,
        })
    }

    pub async fn situacao(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
    ) -> Result<SituacaoPeriodo, AppError> {
        let periodo = self
            .repo
            .find_periodo(
                self.repo.pool(),
                tenant_id,
                funcionario_id,
                competencia.ano,
                competencia.mes as i32,
            )
            .await?;
        Ok(periodo.map_or(SituacaoPeriodo::NaoIniciado, |p| p.situacao))
    }

    pub async fn listar_ano(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        ano: i32,
    ) -> Result<Vec<SituacaoMes>, AppError> {
        let periodos = self
            .repo
            .list_periodos_ano(self.repo.pool(), tenant_id, funcionario_id, ano)
            .await?;
        Ok(situacoes_do_ano(&periodos))
    }

    /// Saldo final do mês anterior, ou 0 se ele nunca foi fechado.
    pub async fn saldo_anterior(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
    ) -> Result<i64, AppError> {
        let anterior = competencia.anterior();
        let saldo = self
            .repo
            .saldo_final(
                self.repo.pool(),
                tenant_id,
                funcionario_id,
                anterior.ano,
                anterior.mes as i32,
            )
            .await?;
        Ok(saldo.map_or(0, i64::from))
    }

    /// Fecha (ou refecha) a competência com os totais já calculados.
    pub async fn fechar(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
        totais: TotaisFechamento,
        usuario: &str,
    ) -> Result<PeriodoDetalhe, AppError> {
        let (ano, mes) = (competencia.ano, competencia.mes as i32);
        let (valor_pagar, valor_descontar) =
            valores_fechamento(totais.saldo_final_para_pagar_minutos, totais.valor_hora);

        let mut tx = self.repo.pool().begin().await?;

        let result = async {
            self.repo
                .lock_competencia(&mut *tx, tenant_id, funcionario_id, ano, mes)
                .await?;

            let periodo = self
                .repo
                .upsert_situacao(
                    &mut *tx,
                    tenant_id,
                    funcionario_id,
                    ano,
                    mes,
                    SituacaoPeriodo::Fechado,
                    usuario,
                )
                .await?;

            let fechamento = self
                .repo
                .upsert_fechamento(
                    &mut *tx,
                    tenant_id,
                    funcionario_id,
                    ano,
                    mes,
                    &totais,
                    valor_pagar,
                    valor_descontar,
                    usuario,
                    Utc::now(),
                )
                .await?;

            // Lançamentos de um fechamento anterior são substituídos
            self.banco_repo
                .delete_ajustes_fechamento(&mut *tx, tenant_id, funcionario_id, ano, mes)
                .await?;

            if totais.zerou_banco {
                if let Some((tipo, minutos)) =
                    ajuste_de_liquidacao(totais.saldo_final_para_pagar_minutos)
                {
                    self.banco_repo
                        .create_ajuste(
                            &mut *tx,
                            tenant_id,
                            funcionario_id,
                            ano,
                            mes,
                            tipo,
                            minutos_coluna("minutos", minutos)?,
                            Some("Liquidação do banco no fechamento"),
                            usuario,
                        )
                        .await?;
                }
            }

            Ok::<_, AppError>((periodo, fechamento))
        }
        .await;

        let (periodo, fechamento) = finish_tx(tx, result).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            funcionario_id = %funcionario_id,
            competencia = %competencia,
            saldo_final = fechamento.saldo_final_minutos,
            "Período fechado"
        );
        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "fechamentos_banco_horas",
                fechamento.id.to_string(),
                OperacaoAuditoria::Update,
                format!("Fechamento da competência {}", competencia),
            )
            .depois(&fechamento)
            .por(usuario),
        );

        Ok(PeriodoDetalhe {
            funcionario_id,
            ano: competencia.ano,
            mes: competencia.mes,
            situacao: periodo.situacao,
            atualizado_por: Some(periodo.atualizado_por),
            atualizado_em: Some(periodo.atualizado_em),
            fechamento: Some(fechamento),
        })
    }

    /// Reabre uma competência FECHADA mediante credencial master.
    pub async fn reabrir(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
        usuario_master: &str,
        senha_master: &str,
        motivo: Option<&str>,
        usuario: &str,
    ) -> Result<PeriodoDetalhe, AppError> {
        let usuario_master = usuario_master.trim();
        if usuario_master.is_empty() {
            return Err(AppError::CampoObrigatorio("usuarioMaster"));
        }
        if senha_master.is_empty() {
            return Err(AppError::CampoObrigatorio("senhaMaster"));
        }

        if !self
            .credenciais
            .verify(tenant_id, usuario_master, senha_master)
            .await?
        {
            tracing::warn!(
                tenant_id = %tenant_id,
                usuario_master,
                "Credencial master recusada na reabertura"
            );
            return Err(AppError::CredenciaisMasterInvalidas);
        }

        let (ano, mes) = (competencia.ano, competencia.mes as i32);
        let motivo = truncar_motivo(motivo);

        let mut tx = self.repo.pool().begin().await?;

        let result = async {
            self.repo
                .lock_competencia(&mut *tx, tenant_id, funcionario_id, ano, mes)
                .await?;

            let atual = self
                .repo
                .find_periodo_for_update(&mut *tx, tenant_id, funcionario_id, ano, mes)
                .await?;
            let situacao_atual = atual.as_ref().map(|p| p.situacao);
            decidir_reabertura(competencia, situacao_atual)?;

            let periodo = self
                .repo
                .reabrir_se_fechado(&mut *tx, tenant_id, funcionario_id, ano, mes, usuario)
                .await?
                .ok_or(AppError::PeriodoNaoFechado {
                    ano: competencia.ano,
                    mes: competencia.mes,
                    situacao: situacao_atual.unwrap_or(SituacaoPeriodo::NaoIniciado),
                })?;

            let fechamento = self
                .repo
                .marcar_reabertura(
                    &mut *tx,
                    tenant_id,
                    funcionario_id,
                    ano,
                    mes,
                    usuario_master,
                    motivo.as_deref(),
                    Utc::now(),
                )
                .await?;

            Ok::<_, AppError>((periodo, fechamento))
        }
        .await;

        let (periodo, fechamento) = finish_tx(tx, result).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            funcionario_id = %funcionario_id,
            competencia = %competencia,
            usuario_master,
            "Período reaberto"
        );
        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "periodos_banco_horas",
                format!("{}:{}", funcionario_id, competencia),
                OperacaoAuditoria::Update,
                format!(
                    "Reabertura da competência {}: {}",
                    competencia,
                    motivo.as_deref().unwrap_or("sem motivo")
                ),
            )
            .depois(&periodo)
            .por(usuario),
        );

        Ok(PeriodoDetalhe {
            funcionario_id,
            ano: competencia.ano,
            mes: competencia.mes,
            situacao: periodo.situacao,
            atualizado_por: Some(periodo.atualizado_por),
            atualizado_em: Some(periodo.atualizado_em),
            fechamento,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::banco_horas::PoliticaFaltas;

    fn marco() -> Competencia {
        Competencia::new(2024, 3).unwrap()
    }

    #[test]
    fn reabrir_exige_periodo_fechado() {
        assert!(decidir_reabertura(marco(), Some(SituacaoPeriodo::Fechado)).is_ok());

        let nunca_fechado = decidir_reabertura(marco(), None).unwrap_err();
        assert_eq!(nunca_fechado.code(), "PERIODO_NAO_ENCONTRADO");
        assert_eq!(nunca_fechado.kind(), crate::common::error::ErrorKind::NotFound);

        for situacao in [SituacaoPeriodo::Reaberto, SituacaoPeriodo::NaoIniciado] {
            let err = decidir_reabertura(marco(), Some(situacao)).unwrap_err();
            assert_eq!(err.code(), "PERIODO_NAO_FECHADO");
            assert_eq!(err.kind(), crate::common::error::ErrorKind::StateConflict);
        }
    }

    #[test]
    fn sinal_do_saldo_decide_pagar_ou_descontar() {
        let valor_hora = Decimal::new(3000, 2);

        assert_eq!(
            valores_fechamento(90, valor_hora),
            (Decimal::new(4500, 2), Decimal::ZERO)
        );
        assert_eq!(
            valores_fechamento(-30, valor_hora),
            (Decimal::ZERO, Decimal::new(1500, 2))
        );
        assert_eq!(
            valores_fechamento(0, valor_hora),
            (Decimal::ZERO, Decimal::ZERO)
        );
    }

    #[test]
    fn motivo_limitado_a_255_caracteres() {
        let longo = "é".repeat(300);
        assert_eq!(truncar_motivo(Some(&longo)).unwrap().chars().count(), 255);
        assert_eq!(truncar_motivo(Some("  ")), None);
        assert_eq!(truncar_motivo(None), None);
        assert_eq!(
            truncar_motivo(Some(" erro de lançamento ")).as_deref(),
            Some("erro de lançamento")
        );
    }

    #[test]
    fn liquidacao_com_sinal_oposto() {
        assert_eq!(ajuste_de_liquidacao(0), None);
        assert_eq!(
            ajuste_de_liquidacao(150),
            Some((TipoAjuste::FechamentoPagar, -150))
        );
        assert_eq!(
            ajuste_de_liquidacao(-40),
            Some((TipoAjuste::FechamentoDescontar, 40))
        );
    }

    #[test]
    fn ano_completo_com_meses_sem_linha() {
        let periodos = vec![
            PeriodoBancoHoras {
                funcionario_id: Uuid::new_v4(),
                ano: 2024,
                mes: 2,
                situacao: SituacaoPeriodo::Fechado,
                atualizado_por: "rh".into(),
                atualizado_em: Utc::now(),
            },
            PeriodoBancoHoras {
                funcionario_id: Uuid::new_v4(),
                ano: 2024,
                mes: 3,
                situacao: SituacaoPeriodo::Reaberto,
                atualizado_por: "master".into(),
                atualizado_em: Utc::now(),
            },
        ];

        let ano = situacoes_do_ano(&periodos);
        assert_eq!(ano.len(), 12);
        assert_eq!(ano[0].situacao, SituacaoPeriodo::NaoIniciado);
        assert_eq!(ano[0].atualizado_por, None);
        assert_eq!(ano[1].situacao, SituacaoPeriodo::Fechado);
        assert_eq!(ano[2].situacao, SituacaoPeriodo::Reaberto);
        assert_eq!(ano[11].mes, 12);
    }

    #[test]
    fn totais_saem_do_resumo() {
        use crate::models::banco_horas::TotaisBancoHoras;

        let resumo = ResumoBancoHoras {
            funcionario_id: Uuid::new_v4(),
            funcionario_nome: "Ana".into(),
            departamento: None,
            ano: 2024,
            mes: 3,
            politica_faltas: PoliticaFaltas::DescontarEmFolha,
            zerar_banco_no_mes: true,
            jornada_id: None,
            tolerancia_minutos: 10,
            valor_hora: Decimal::new(2000, 2),
            dias: vec![],
            totais: TotaisBancoHoras {
                saldo_anterior_minutos: 120,
                extras_uteis_minutos: 30,
                extras_100_minutos: 60,
                devidas_minutos: -20,
                ajustes_manuais_minutos: 10,
                saldo_final_banco_minutos: 0,
                saldo_final_para_pagar_minutos: 200,
                ..Default::default()
            },
        };

        let totais = totais_do_resumo(&resumo);
        assert_eq!(totais.extras_50_minutos, 30);
        assert_eq!(totais.ajustes_minutos, 10);
        assert_eq!(totais.saldo_final_minutos, 0);
        assert_eq!(totais.saldo_final_para_pagar_minutos, 200);
        assert_eq!(totais.politica_faltas, PoliticaFaltas::DescontarEmFolha);
        assert!(totais.zerou_banco);
    }

    mod com_banco {
        use async_trait::async_trait;
        use sqlx::PgPool;

        use super::*;
        use crate::{models::audit::AuditEntry, services::audit_service::AuditWriter};

        struct SenhaMaster;

        #[async_trait]
        impl MasterCredentialVerifier for SenhaMaster {
            async fn verify(&self, _: Uuid, login: &str, senha: &str) -> Result<bool, AppError> {
                Ok(login == "master" && senha == "segredo")
            }
        }

        struct SemAuditoria;

        #[async_trait]
        impl AuditWriter for SemAuditoria {
            async fn write(&self, _: &AuditEntry) -> Result<(), AppError> {
                Ok(())
            }
        }

        fn service(pool: &PgPool) -> PeriodoService {
            PeriodoService::new(
                PeriodoRepository::new(pool.clone()),
                BancoHorasRepository::new(pool.clone()),
                Arc::new(SenhaMaster),
                AuditLogger::new(Arc::new(SemAuditoria)),
            )
        }

        async fn novo_funcionario(pool: &PgPool, tenant_id: Uuid) -> Uuid {
            sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO funcionarios (tenant_id, nome) VALUES ($1, 'Ana') RETURNING id",
            )
            .bind(tenant_id)
            .fetch_one(pool)
            .await
            .unwrap()
        }

        fn totais(para_pagar: i64, zerou_banco: bool) -> TotaisFechamento {
            TotaisFechamento {
                saldo_anterior_minutos: 0,
                extras_50_minutos: para_pagar.max(0),
                extras_100_minutos: 0,
                devidas_minutos: para_pagar.min(0),
                ajustes_minutos: 0,
                saldo_final_minutos: if zerou_banco { 0 } else { para_pagar },
                saldo_final_para_pagar_minutos: para_pagar,
                politica_faltas: PoliticaFaltas::CompensarComHorasExtras,
                zerou_banco,
                valor_hora: Decimal::new(3000, 2),
            }
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn refechar_com_zerar_substitui_lancamentos_de_fechamento(pool: PgPool) {
            let service = service(&pool);
            let banco = BancoHorasRepository::new(pool.clone());
            let tenant_id = Uuid::new_v4();
            let func = novo_funcionario(&pool, tenant_id).await;

            banco
                .create_ajuste(&pool, tenant_id, func, 2024, 3, TipoAjuste::AjusteManual, 15, None, "rh")
                .await
                .unwrap();

            let detalhe = service
                .fechar(tenant_id, func, marco(), totais(150, true), "rh")
                .await
                .unwrap();
            assert_eq!(detalhe.situacao, SituacaoPeriodo::Fechado);
            let fechamento = detalhe.fechamento.unwrap();
            assert_eq!(fechamento.valor_pagar, Decimal::new(7500, 2));
            assert_eq!(fechamento.valor_descontar, Decimal::ZERO);

            service
                .fechar(tenant_id, func, marco(), totais(-40, true), "rh")
                .await
                .unwrap();

            let ajustes = banco.list_ajustes(&pool, tenant_id, func, 2024, 3).await.unwrap();
            let liquidacoes: Vec<_> = ajustes.iter().filter(|a| !a.tipo.entra_no_saldo()).collect();
            assert_eq!(liquidacoes.len(), 1);
            assert_eq!(liquidacoes[0].tipo, TipoAjuste::FechamentoDescontar);
            assert_eq!(liquidacoes[0].minutos, 40);
            assert_eq!(ajustes.len(), 2, "o ajuste manual continua");

            // Sem zerar, o fechamento não deixa lançamento
            service
                .fechar(tenant_id, func, marco(), totais(90, false), "rh")
                .await
                .unwrap();
            let ajustes = banco.list_ajustes(&pool, tenant_id, func, 2024, 3).await.unwrap();
            assert_eq!(ajustes.len(), 1);
            assert_eq!(ajustes[0].tipo, TipoAjuste::AjusteManual);
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn reabrir_respeita_a_situacao_atual(pool: PgPool) {
            let service = service(&pool);
            let tenant_id = Uuid::new_v4();
            let func = novo_funcionario(&pool, tenant_id).await;

            let nunca_fechado = service
                .reabrir(tenant_id, func, marco(), "master", "segredo", None, "rh")
                .await
                .unwrap_err();
            assert_eq!(nunca_fechado.code(), "PERIODO_NAO_ENCONTRADO");

            service
                .fechar(tenant_id, func, marco(), totais(30, false), "rh")
                .await
                .unwrap();

            let senha_errada = service
                .reabrir(tenant_id, func, marco(), "master", "errada", None, "rh")
                .await
                .unwrap_err();
            assert_eq!(senha_errada.code(), "CREDENCIAIS_MASTER_INVALIDAS");

            let reaberto = service
                .reabrir(tenant_id, func, marco(), " master ", "segredo", Some("correção"), "rh")
                .await
                .unwrap();
            assert_eq!(reaberto.situacao, SituacaoPeriodo::Reaberto);
            let fechamento = reaberto.fechamento.unwrap();
            assert_eq!(fechamento.reaberto_por.as_deref(), Some("master"));
            assert_eq!(fechamento.motivo_reabertura.as_deref(), Some("correção"));
            assert_eq!(fechamento.saldo_final_minutos, 30);

            let de_novo = service
                .reabrir(tenant_id, func, marco(), "master", "segredo", None, "rh")
                .await
                .unwrap_err();
            assert_eq!(de_novo.code(), "PERIODO_NAO_FECHADO");
            assert_eq!(
                service.situacao(tenant_id, func, marco()).await.unwrap(),
                SituacaoPeriodo::Reaberto
            );
        }

        #[sqlx::test(migrations = "./migrations")]
        async fn escrita_bloqueada_so_com_periodo_fechado(pool: PgPool) {
            let service = service(&pool);
            let repo = PeriodoRepository::new(pool.clone());
            let tenant_id = Uuid::new_v4();
            let func = novo_funcionario(&pool, tenant_id).await;

            let mut conn = pool.acquire().await.unwrap();
            garantir_periodo_aberto(&repo, &mut conn, tenant_id, func, marco())
                .await
                .unwrap();

            service
                .fechar(tenant_id, func, marco(), totais(0, false), "rh")
                .await
                .unwrap();
            let err = garantir_periodo_aberto(&repo, &mut conn, tenant_id, func, marco())
                .await
                .unwrap_err();
            assert_eq!(err.code(), "PERIODO_FECHADO");

            // Outra competência segue aberta
            let abril = Competencia::new(2024, 4).unwrap();
            garantir_periodo_aberto(&repo, &mut conn, tenant_id, func, abril)
                .await
                .unwrap();

            service
                .reabrir(tenant_id, func, marco(), "master", "segredo", None, "rh")
                .await
                .unwrap();
            garantir_periodo_aberto(&repo, &mut conn, tenant_id, func, marco())
                .await
                .unwrap();
        }
    }
}
