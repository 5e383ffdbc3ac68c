// src/services/ponto_service.rs

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    common::{db_utils::finish_tx, error::AppError},
    db::{PeriodoRepository, PontoRepository},
    models::{
        audit::{AuditEntry, OperacaoAuditoria},
        ponto::{PontoMes, RegistroPonto},
    },
    services::{
        audit_service::AuditLogger,
        cadastro_service::CadastroService,
        competencia::Competencia,
        periodo_service::{PeriodoService, garantir_periodo_aberto},
        ponto_calculo::parse_time,
    },
};

fn normalizar_horario(
    registro: &RegistroPonto,
    campo: &'static str,
    valor: &Option<String>,
) -> Result<Option<String>, AppError> {
    let v = match valor.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(v) => v,
    };

    match parse_time(v) {
        // grava sempre com dois dígitos na hora
        Some(minutos) => Ok(Some(format!("{:02}:{:02}", minutos / 60, minutos % 60))),
        None => Err(AppError::HorarioInvalido {
            data: registro.data,
            campo,
            valor: v.to_string(),
        }),
    }
}

/// Valida o lote inteiro antes de qualquer escrita e descarta dias vazios.
/// Um único horário malformado rejeita o lote.
pub fn validar_dias(
    competencia: Competencia,
    dias: Vec<RegistroPonto>,
) -> Result<Vec<RegistroPonto>, AppError> {
    let mut vistos = HashSet::new();
    let mut validos = Vec::with_capacity(dias.len());

    for dia in dias {
        if !competencia.contem(dia.data) {
            return Err(AppError::DataForaDaCompetencia {
                data: dia.data,
                competencia: competencia.to_string(),
            });
        }
        if !vistos.insert(dia.data) {
            return Err(AppError::DataDuplicada(dia.data));
        }

        let normalizado = RegistroPonto {
            data: dia.data,
            entrada_manha: normalizar_horario(&dia, "entradaManha", &dia.entrada_manha)?,
            saida_manha: normalizar_horario(&dia, "saidaManha", &dia.saida_manha)?,
            entrada_tarde: normalizar_horario(&dia, "entradaTarde", &dia.entrada_tarde)?,
            saida_tarde: normalizar_horario(&dia, "saidaTarde", &dia.saida_tarde)?,
            entrada_extra: normalizar_horario(&dia, "entradaExtra", &dia.entrada_extra)?,
            saida_extra: normalizar_horario(&dia, "saidaExtra", &dia.saida_extra)?,
            status: dia.status,
            observacao: dia
                .observacao
                .as_deref()
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string),
        };

        if !normalizado.is_vazio() {
            validos.push(normalizado);
        }
    }

    validos.sort_by_key(|r| r.data);
    Ok(validos)
}

/// Preenche o mês inteiro: dias sem linha recebem o registro padrão.
pub fn completar_mes(competencia: Competencia, registros: Vec<RegistroPonto>) -> Vec<RegistroPonto> {
    let mut por_data: std::collections::HashMap<_, _> =
        registros.into_iter().map(|r| (r.data, r)).collect();

    competencia
        .dias()
        .into_iter()
        .map(|data| {
            por_data.remove(&data).unwrap_or_else(|| RegistroPonto {
                data,
                ..Default::default()
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct PontoService {
    repo: PontoRepository,
    periodo_repo: PeriodoRepository,
    cadastro: CadastroService,
    periodos: PeriodoService,
    audit: AuditLogger,
}

impl PontoService {
    pub fn new(
        repo: PontoRepository,
        periodo_repo: PeriodoRepository,
        cadastro: CadastroService,
        periodos: PeriodoService,
        audit: AuditLogger,
    ) -> Self {
        Self {
            repo,
            periodo_repo,
            cadastro,
            periodos,
            audit,
        }
    }

    /// Só os dias persistidos.
    pub async fn registros(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
    ) -> Result<Vec<RegistroPonto>, AppError> {
        let dias = competencia.dias();
        let (inicio, fim) = match (dias.first(), dias.last()) {
            (Some(i), Some(f)) => (*i, *f),
            _ => return Ok(Vec::new()),
        };

        self.repo
            .list_registros_periodo(self.repo.pool(), tenant_id, funcionario_id, inicio, fim)
            .await
    }

    pub async fn mes(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
    ) -> Result<PontoMes, AppError> {
        self.cadastro.funcionario(tenant_id, funcionario_id).await?;

        let registros = self.registros(tenant_id, funcionario_id, competencia).await?;
        let situacao = self
            .periodos
            .situacao(tenant_id, funcionario_id, competencia)
            .await?;

        Ok(PontoMes {
            funcionario_id,
            competencia: competencia.to_string(),
            situacao,
            dias: completar_mes(competencia, registros),
        })
    }

    /// Substitui todas as marcações da competência de uma vez (tudo ou nada).
    pub async fn substituir_mes(
        &self,
        tenant_id: Uuid,
        funcionario_id: Uuid,
        competencia: Competencia,
        dias: Vec<RegistroPonto>,
        usuario: &str,
    ) -> Result<u64, AppError> {
        let registros = validar_dias(competencia, dias)?;
        self.cadastro.funcionario(tenant_id, funcionario_id).await?;

        let todos = competencia.dias();
        let (inicio, fim) = match (todos.first(), todos.last()) {
            (Some(i), Some(f)) => (*i, *f),
            _ => return Err(AppError::CompetenciaInvalida(competencia.to_string())),
        };

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

            let removidos = self
                .repo
                .delete_registros_periodo(&mut *tx, tenant_id, funcionario_id, inicio, fim)
                .await?;
            let inseridos = self
                .repo
                .insert_registros(&mut *tx, tenant_id, funcionario_id, &registros)
                .await?;

            Ok::<_, AppError>((removidos, inseridos))
        }
        .await;

        let (removidos, inseridos) = finish_tx(tx, result).await?;

        tracing::info!(
            tenant_id = %tenant_id,
            funcionario_id = %funcionario_id,
            competencia = %competencia,
            removidos,
            inseridos,
            "Ponto do mês substituído"
        );
        self.audit.record(
            AuditEntry::new(
                tenant_id,
                "registros_ponto",
                format!("{}:{}", funcionario_id, competencia),
                OperacaoAuditoria::Update,
                format!(
                    "Ponto de {} substituído: {} removidos, {} gravados",
                    competencia, removidos, inseridos
                ),
            )
            .depois(&registros)
            .por(usuario),
        );

        Ok(inseridos)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::ponto::StatusDia;

    fn marco() -> Competencia {
        Competencia::new(2024, 3).unwrap()
    }

    fn dia(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn normaliza_e_descarta_dias_vazios() {
        let dias = vec![
            RegistroPonto {
                data: dia(5),
                entrada_manha: Some("8:00".into()),
                saida_manha: Some(" 12:00 ".into()),
                ..Default::default()
            },
            RegistroPonto {
                data: dia(4),
                entrada_manha: Some("".into()),
                ..Default::default()
            },
            RegistroPonto {
                data: dia(6),
                status: StatusDia::Atestado,
                ..Default::default()
            },
        ];

        let validos = validar_dias(marco(), dias).unwrap();
        assert_eq!(validos.len(), 2);
        assert_eq!(validos[0].data, dia(5));
        assert_eq!(validos[0].entrada_manha.as_deref(), Some("08:00"));
        assert_eq!(validos[0].saida_manha.as_deref(), Some("12:00"));
        assert_eq!(validos[1].status, StatusDia::Atestado);
    }

    #[test]
    fn um_horario_invalido_rejeita_o_lote() {
        let dias = vec![
            RegistroPonto {
                data: dia(4),
                entrada_manha: Some("08:00".into()),
                ..Default::default()
            },
            RegistroPonto {
                data: dia(5),
                saida_tarde: Some("24:00".into()),
                ..Default::default()
            },
        ];

        match validar_dias(marco(), dias) {
            Err(AppError::HorarioInvalido { data, campo, valor }) => {
                assert_eq!(data, dia(5));
                assert_eq!(campo, "saidaTarde");
                assert_eq!(valor, "24:00");
            }
            outro => panic!("esperava HorarioInvalido, veio {:?}", outro),
        }
    }

    #[test]
    fn datas_fora_do_mes_ou_repetidas() {
        let fora = vec![RegistroPonto {
            data: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            status: StatusDia::Folga,
            ..Default::default()
        }];
        assert_eq!(
            validar_dias(marco(), fora).unwrap_err().code(),
            "DATA_FORA_DA_COMPETENCIA"
        );

        let repetida = vec![
            RegistroPonto {
                data: dia(4),
                ..Default::default()
            },
            RegistroPonto {
                data: dia(4),
                ..Default::default()
            },
        ];
        assert_eq!(
            validar_dias(marco(), repetida).unwrap_err().code(),
            "DATA_DUPLICADA"
        );
    }

    #[test]
    fn mes_completo_com_padrao() {
        let registros = vec![RegistroPonto {
            data: dia(10),
            status: StatusDia::Ferias,
            ..Default::default()
        }];

        let mes = completar_mes(marco(), registros);
        assert_eq!(mes.len(), 31);
        assert_eq!(mes[9].status, StatusDia::Ferias);
        assert_eq!(mes[0], RegistroPonto { data: dia(1), ..Default::default() });
    }
}
