// src/services/resumo.rs
//
// Motor do resumo mensal: percorre todos os dias da competência, aplica o
// saldo diário e dobra o resultado nos totais do banco de horas.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    models::{
        banco_horas::{
            ClassificacaoDia, LinhaResumo, PoliticaFaltas, ResumoBancoHoras, TotaisBancoHoras,
        },
        ponto::{Funcionario, Jornada, RegistroPonto, StatusDia},
    },
    services::{
        competencia::Competencia,
        ponto_calculo::{
            CalendarioFeriados, Marcacoes, SaldoDia, calc_saldo_dia, classify_day, dia_semana_pt,
            format_minutes, scheduled_minutes, worked_minutes,
        },
    },
};

/// Tudo que o resumo precisa, já carregado.
pub struct EntradaResumo<'a> {
    pub competencia: Competencia,
    pub funcionario: &'a Funcionario,
    pub jornada: Option<&'a Jornada>,
    pub calendario: &'a CalendarioFeriados,
    /// Só os dias persistidos; o resto assume o registro padrão.
    pub registros: &'a HashMap<NaiveDate, RegistroPonto>,
    pub saldo_anterior_minutos: i64,
    pub ajustes_minutos: i64,
    pub politica: PoliticaFaltas,
    pub zerar_banco_no_mes: bool,
}

/// minutos / 60 × valor/hora × multiplicador, arredondado em centavos.
pub fn valor_em_dinheiro(minutos: i64, valor_hora: Decimal, multiplicador: Decimal) -> Decimal {
    (Decimal::from(minutos) * valor_hora * multiplicador / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn classificar(tipo_dia_util: bool, saldo: &SaldoDia) -> ClassificacaoDia {
    if !tipo_dia_util {
        if saldo.minutos_pagos_feriado_fds > 0 {
            return ClassificacaoDia::Extra100;
        }
        return ClassificacaoDia::Normal;
    }
    match saldo.saldo_banco_minutos {
        s if s > 0 => ClassificacaoDia::ExtraUtil,
        s if s < 0 => ClassificacaoDia::Devedor,
        _ => ClassificacaoDia::Normal,
    }
}

/// Uma linha do extrato.
pub fn calcular_dia(
    registro: &RegistroPonto,
    jornada: Option<&Jornada>,
    calendario: &CalendarioFeriados,
) -> LinhaResumo {
    let data = registro.data;
    let feriado = calendario.descricao(data);
    let tipo_dia = classify_day(data, feriado.is_some());
    let trabalhado = worked_minutes(&Marcacoes::from_registro(registro));
    let previsto = if tipo_dia.is_dia_util() {
        scheduled_minutes(jornada)
    } else {
        None
    };
    let tolerancia = jornada.map_or(0, |j| i64::from(j.tolerancia_minutos));

    let (saldo, classificacao) = match registro.status {
        status if status.is_abonado() => {
            let classificacao = if status == StatusDia::FaltaJustificada {
                ClassificacaoDia::FaltaJustificada
            } else {
                ClassificacaoDia::Normal
            };
            (SaldoDia::default(), classificacao)
        }
        StatusDia::FaltaNaoJustificada => (
            calc_saldo_dia(tipo_dia, trabalhado, previsto, tolerancia),
            ClassificacaoDia::FaltaNaoJustificada,
        ),
        // dia útil sem registro algum
        _ if tipo_dia.is_dia_util() && !registro.tem_marcacao() => {
            (SaldoDia::default(), ClassificacaoDia::Normal)
        }
        _ => {
            let saldo = calc_saldo_dia(tipo_dia, trabalhado, previsto, tolerancia);
            let classificacao = classificar(tipo_dia.is_dia_util(), &saldo);
            (saldo, classificacao)
        }
    };

    LinhaResumo {
        data,
        dia_semana: dia_semana_pt(data).to_string(),
        tipo_dia,
        status: registro.status,
        previsto_minutos: previsto,
        trabalhado_minutos: trabalhado,
        diff_minutos: saldo.saldo_banco_minutos,
        pagos_feriado_fds_minutos: saldo.minutos_pagos_feriado_fds,
        extras_exibicao_minutos: saldo.minutos_extras_exibicao,
        classificacao,
        observacao: registro
            .observacao
            .clone()
            .or_else(|| feriado.map(str::to_string)),
    }
}

pub fn montar_resumo(entrada: &EntradaResumo<'_>) -> ResumoBancoHoras {
    let dias: Vec<LinhaResumo> = entrada
        .competencia
        .dias()
        .into_iter()
        .map(|data| {
            let padrao;
            let registro = match entrada.registros.get(&data) {
                Some(r) => r,
                None => {
                    padrao = RegistroPonto {
                        data,
                        ..Default::default()
                    };
                    &padrao
                }
            };
            calcular_dia(registro, entrada.jornada, entrada.calendario)
        })
        .collect();

    let mut extras_uteis = 0i64;
    let mut extras_100 = 0i64;
    let mut debito_devedor = 0i64;
    let mut debito_faltas = 0i64;

    for dia in &dias {
        extras_100 += dia.pagos_feriado_fds_minutos;
        match dia.classificacao {
            ClassificacaoDia::FaltaNaoJustificada => {
                debito_faltas += dia.diff_minutos.min(0);
                extras_uteis += dia.diff_minutos.max(0);
            }
            _ if dia.diff_minutos > 0 => extras_uteis += dia.diff_minutos,
            _ => debito_devedor += dia.diff_minutos.min(0),
        }
    }

    let (devidas, horas_descontar) = match entrada.politica {
        PoliticaFaltas::CompensarComHorasExtras => (debito_devedor + debito_faltas, 0),
        PoliticaFaltas::DescontarEmFolha => {
            (debito_devedor, debito_devedor.abs() + debito_faltas.abs())
        }
    };

    let saldo_calculado = entrada.saldo_anterior_minutos
        + extras_uteis
        + extras_100
        + devidas
        + entrada.ajustes_minutos;

    let (saldo_final_banco, saldo_para_pagar) = if entrada.zerar_banco_no_mes {
        (0, saldo_calculado)
    } else {
        (saldo_calculado, 0)
    };

    let valor_hora = entrada.funcionario.valor_hora;
    let totais = TotaisBancoHoras {
        saldo_anterior_minutos: entrada.saldo_anterior_minutos,
        extras_uteis_minutos: extras_uteis,
        extras_100_minutos: extras_100,
        devidas_minutos: devidas,
        faltas_minutos: debito_faltas,
        ajustes_manuais_minutos: entrada.ajustes_minutos,
        saldo_final_banco_minutos: saldo_final_banco,
        saldo_final_para_pagar_minutos: saldo_para_pagar,
        horas_pagar_50_minutos: extras_uteis,
        horas_pagar_100_minutos: extras_100,
        horas_descontar_minutos: horas_descontar,
        saldo_final_banco_formatado: format_minutes(saldo_final_banco),
        valor_pagar_50: valor_em_dinheiro(extras_uteis, valor_hora, Decimal::new(15, 1)),
        valor_pagar_100: valor_em_dinheiro(extras_100, valor_hora, Decimal::TWO),
        valor_descontar: valor_em_dinheiro(horas_descontar, valor_hora, Decimal::ONE),
    };

    ResumoBancoHoras {
        funcionario_id: entrada.funcionario.id,
        funcionario_nome: entrada.funcionario.nome.clone(),
        departamento: entrada.funcionario.departamento.clone(),
        ano: entrada.competencia.ano,
        mes: entrada.competencia.mes,
        politica_faltas: entrada.politica,
        zerar_banco_no_mes: entrada.zerar_banco_no_mes,
        jornada_id: entrada.jornada.map(|j| j.id),
        tolerancia_minutos: entrada.jornada.map_or(0, |j| i64::from(j.tolerancia_minutos)),
        valor_hora,
        dias,
        totais,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ponto::Feriado, ponto::TipoDia};
    use uuid::Uuid;

    // Março/2024: dia 1 é sexta, 2 sábado, 4 segunda.
    fn dia(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn marco() -> Competencia {
        Competencia::new(2024, 3).unwrap()
    }

    fn funcionario() -> Funcionario {
        Funcionario {
            id: Uuid::new_v4(),
            nome: "Ana Souza".into(),
            jornada_id: None,
            departamento: Some("Financeiro".into()),
            valor_hora: Decimal::new(2000, 2),
        }
    }

    fn jornada() -> Jornada {
        Jornada {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            nome: "Comercial".into(),
            entrada_manha: Some("08:00".into()),
            saida_manha: Some("12:00".into()),
            entrada_tarde: Some("13:00".into()),
            saida_tarde: Some("17:00".into()),
            intervalo_inicio: None,
            intervalo_fim: None,
            tolerancia_minutos: 10,
            created_at: None,
        }
    }

    fn batida(data: NaiveDate, saida_tarde: &str) -> RegistroPonto {
        RegistroPonto {
            data,
            entrada_manha: Some("08:00".into()),
            saida_manha: Some("12:00".into()),
            entrada_tarde: Some("13:00".into()),
            saida_tarde: Some(saida_tarde.into()),
            ..Default::default()
        }
    }

    fn mapa(registros: Vec<RegistroPonto>) -> HashMap<NaiveDate, RegistroPonto> {
        registros.into_iter().map(|r| (r.data, r)).collect()
    }

    fn resumo(
        registros: &HashMap<NaiveDate, RegistroPonto>,
        calendario: &CalendarioFeriados,
        saldo_anterior: i64,
        ajustes: i64,
        politica: PoliticaFaltas,
        zerar: bool,
    ) -> ResumoBancoHoras {
        let funcionario = funcionario();
        let jornada = jornada();
        montar_resumo(&EntradaResumo {
            competencia: marco(),
            funcionario: &funcionario,
            jornada: Some(&jornada),
            calendario,
            registros,
            saldo_anterior_minutos: saldo_anterior,
            ajustes_minutos: ajustes,
            politica,
            zerar_banco_no_mes: zerar,
        })
    }

    fn linha(resumo: &ResumoBancoHoras, data: NaiveDate) -> &LinhaResumo {
        resumo.dias.iter().find(|l| l.data == data).unwrap()
    }

    #[test]
    fn extrato_cobre_todos_os_dias_do_mes() {
        let r = resumo(
            &HashMap::new(),
            &CalendarioFeriados::default(),
            0,
            0,
            PoliticaFaltas::default(),
            false,
        );
        assert_eq!(r.dias.len(), 31);
        assert_eq!(r.dias[0].data, dia(1));
        assert_eq!(r.dias[0].dia_semana, "Sexta-feira");
        assert_eq!(linha(&r, dia(2)).tipo_dia, TipoDia::FimDeSemana);
        assert!(r.dias.iter().all(|l| l.classificacao == ClassificacaoDia::Normal));
    }

    #[test]
    fn cenarios_de_um_dia() {
        let registros = mapa(vec![
            batida(dia(4), "17:15"),
            batida(dia(5), "16:30"),
            RegistroPonto {
                data: dia(9),
                entrada_manha: Some("09:00".into()),
                saida_manha: Some("12:00".into()),
                ..Default::default()
            },
        ]);
        let r = resumo(
            &registros,
            &CalendarioFeriados::default(),
            0,
            0,
            PoliticaFaltas::default(),
            false,
        );

        let segunda = linha(&r, dia(4));
        assert_eq!(segunda.trabalhado_minutos, 495);
        assert_eq!(segunda.previsto_minutos, Some(480));
        assert_eq!(segunda.diff_minutos, 5);
        assert_eq!(segunda.classificacao, ClassificacaoDia::ExtraUtil);

        let terca = linha(&r, dia(5));
        assert_eq!(terca.diff_minutos, -20);
        assert_eq!(terca.classificacao, ClassificacaoDia::Devedor);

        let sabado = linha(&r, dia(9));
        assert_eq!(sabado.pagos_feriado_fds_minutos, 180);
        assert_eq!(sabado.diff_minutos, 0);
        assert_eq!(sabado.previsto_minutos, None);
        assert_eq!(sabado.classificacao, ClassificacaoDia::Extra100);

        assert_eq!(r.totais.extras_uteis_minutos, 5);
        assert_eq!(r.totais.extras_100_minutos, 180);
        assert_eq!(r.totais.devidas_minutos, -20);
        assert_eq!(r.totais.saldo_final_banco_minutos, 165);
        assert_eq!(r.totais.saldo_final_banco_formatado, "02:45");
    }

    #[test]
    fn saldo_anterior_passa_adiante_sem_atividade() {
        let r = resumo(
            &HashMap::new(),
            &CalendarioFeriados::default(),
            120,
            0,
            PoliticaFaltas::default(),
            false,
        );
        assert_eq!(r.totais.saldo_anterior_minutos, 120);
        assert_eq!(r.totais.saldo_final_banco_minutos, 120);
        assert_eq!(r.totais.saldo_final_para_pagar_minutos, 0);
    }

    #[test]
    fn feriado_em_dia_util_paga_a_100() {
        let feriados = vec![
            Feriado {
                id: Uuid::new_v4(),
                tenant_id: Uuid::new_v4(),
                dia: 4,
                mes: 3,
                descricao: "Feriado municipal".into(),
                ativo: true,
            },
            Feriado {
                id: Uuid::new_v4(),
                tenant_id: Uuid::new_v4(),
                dia: 5,
                mes: 3,
                descricao: "Desativado".into(),
                ativo: false,
            },
        ];
        let calendario = CalendarioFeriados::new(&feriados);
        let registros = mapa(vec![batida(dia(4), "17:00"), batida(dia(5), "17:00")]);

        let r = resumo(&registros, &calendario, 0, 0, PoliticaFaltas::default(), false);

        let feriado = linha(&r, dia(4));
        assert_eq!(feriado.tipo_dia, TipoDia::Feriado);
        assert_eq!(feriado.pagos_feriado_fds_minutos, 480);
        assert_eq!(feriado.classificacao, ClassificacaoDia::Extra100);
        assert_eq!(feriado.observacao.as_deref(), Some("Feriado municipal"));

        let comum = linha(&r, dia(5));
        assert_eq!(comum.tipo_dia, TipoDia::DiaUtil);
        assert_eq!(comum.classificacao, ClassificacaoDia::Normal);
    }

    #[test]
    fn ausencias_abonadas_nao_mexem_no_banco() {
        let registros = mapa(vec![
            RegistroPonto {
                data: dia(4),
                status: StatusDia::Ferias,
                ..Default::default()
            },
            RegistroPonto {
                data: dia(5),
                status: StatusDia::FaltaJustificada,
                ..Default::default()
            },
        ]);
        let r = resumo(
            &registros,
            &CalendarioFeriados::default(),
            0,
            0,
            PoliticaFaltas::default(),
            false,
        );

        assert_eq!(linha(&r, dia(4)).diff_minutos, 0);
        assert_eq!(linha(&r, dia(4)).classificacao, ClassificacaoDia::Normal);
        assert_eq!(
            linha(&r, dia(5)).classificacao,
            ClassificacaoDia::FaltaJustificada
        );
        assert_eq!(r.totais.saldo_final_banco_minutos, 0);
    }

    #[test]
    fn politica_de_faltas_decide_onde_fica_o_debito() {
        let registros = mapa(vec![
            RegistroPonto {
                data: dia(4),
                status: StatusDia::FaltaNaoJustificada,
                ..Default::default()
            },
            batida(dia(5), "16:30"),
        ]);
        let calendario = CalendarioFeriados::default();

        let compensar = resumo(
            &registros,
            &calendario,
            0,
            0,
            PoliticaFaltas::CompensarComHorasExtras,
            false,
        );
        assert_eq!(
            linha(&compensar, dia(4)).classificacao,
            ClassificacaoDia::FaltaNaoJustificada
        );
        // 0 trabalhado contra 480 previstos, tolerância 10 consumida
        assert_eq!(compensar.totais.faltas_minutos, -470);
        assert_eq!(compensar.totais.devidas_minutos, -490);
        assert_eq!(compensar.totais.saldo_final_banco_minutos, -490);
        assert_eq!(compensar.totais.horas_descontar_minutos, 0);

        let descontar = resumo(
            &registros,
            &calendario,
            0,
            0,
            PoliticaFaltas::DescontarEmFolha,
            false,
        );
        assert_eq!(descontar.totais.faltas_minutos, -470);
        assert_eq!(descontar.totais.devidas_minutos, -20);
        assert_eq!(descontar.totais.saldo_final_banco_minutos, -20);
        assert_eq!(descontar.totais.horas_descontar_minutos, 490);
        // 490 / 60 × 20,00
        assert_eq!(descontar.totais.valor_descontar, Decimal::new(16333, 2));
    }

    #[test]
    fn identidade_do_saldo_final() {
        let registros = mapa(vec![
            batida(dia(4), "17:15"),
            batida(dia(5), "16:30"),
            batida(dia(6), "18:00"),
            RegistroPonto {
                data: dia(7),
                status: StatusDia::FaltaNaoJustificada,
                ..Default::default()
            },
            RegistroPonto {
                data: dia(10),
                entrada_manha: Some("08:00".into()),
                saida_manha: Some("11:00".into()),
                ..Default::default()
            },
        ]);
        let calendario = CalendarioFeriados::default();

        for politica in [
            PoliticaFaltas::CompensarComHorasExtras,
            PoliticaFaltas::DescontarEmFolha,
        ] {
            for (anterior, ajustes) in [(0, 0), (120, -45), (-300, 600)] {
                for zerar in [false, true] {
                    let t = resumo(&registros, &calendario, anterior, ajustes, politica, zerar)
                        .totais;
                    let esperado = t.saldo_anterior_minutos
                        + t.extras_uteis_minutos
                        + t.extras_100_minutos
                        + t.devidas_minutos
                        + t.ajustes_manuais_minutos;

                    if zerar {
                        assert_eq!(t.saldo_final_banco_minutos, 0);
                        assert_eq!(t.saldo_final_para_pagar_minutos, esperado);
                    } else {
                        assert_eq!(t.saldo_final_banco_minutos, esperado);
                        assert_eq!(t.saldo_final_para_pagar_minutos, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn valores_monetarios() {
        let valor_hora = Decimal::new(2550, 2);
        assert_eq!(
            valor_em_dinheiro(90, valor_hora, Decimal::new(15, 1)),
            Decimal::new(5738, 2)
        );
        assert_eq!(
            valor_em_dinheiro(60, valor_hora, Decimal::TWO),
            Decimal::new(5100, 2)
        );
        assert_eq!(valor_em_dinheiro(0, valor_hora, Decimal::ONE), Decimal::ZERO);

        let registros = mapa(vec![batida(dia(4), "18:10")]);
        let r = resumo(
            &registros,
            &CalendarioFeriados::default(),
            0,
            0,
            PoliticaFaltas::default(),
            false,
        );
        // 70 - 10 de tolerância = 60 min a 50%
        assert_eq!(r.totais.horas_pagar_50_minutos, 60);
        assert_eq!(r.totais.valor_pagar_50, Decimal::new(3000, 2));
    }
}
