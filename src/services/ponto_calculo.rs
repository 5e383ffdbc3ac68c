// src/services/ponto_calculo.rs
//
// Aritmética de horários, classificação do dia e saldo diário do banco de horas.
// Funções puras: nada aqui toca o banco.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::ponto::{Feriado, Jornada, RegistroPonto, TipoDia};

// =========================================================================
//  HORÁRIOS
// =========================================================================

/// "HH:MM" -> minutos desde a meia-noite. Entrada malformada devolve `None`, nunca erro.
pub fn parse_time(valor: &str) -> Option<i64> {
    let (h, m) = valor.trim().split_once(':')?;

    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let horas: i64 = h.parse().ok()?;
    let minutos: i64 = m.parse().ok()?;
    if horas > 23 || minutos > 59 {
        return None;
    }

    Some(horas * 60 + minutos)
}

pub fn parse_time_opt(valor: Option<&str>) -> Option<i64> {
    valor.and_then(parse_time)
}

/// Minutos -> "HH:MM" (ou "-HH:MM"). Horas passam de 24 quando o total passa de um dia.
pub fn format_minutes(minutos: i64) -> String {
    let sinal = if minutos < 0 { "-" } else { "" };
    let abs = minutos.unsigned_abs();
    format!("{}{:02}:{:02}", sinal, abs / 60, abs % 60)
}

fn diferenca_par(entrada: Option<i64>, saida: Option<i64>) -> i64 {
    match (entrada, saida) {
        (Some(e), Some(s)) => (s - e).max(0),
        _ => 0,
    }
}

/// Marcações de um dia já convertidas para minutos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marcacoes {
    pub entrada_manha: Option<i64>,
    pub saida_manha: Option<i64>,
    pub entrada_tarde: Option<i64>,
    pub saida_tarde: Option<i64>,
    pub entrada_extra: Option<i64>,
    pub saida_extra: Option<i64>,
}

impl Marcacoes {
    pub fn from_registro(registro: &RegistroPonto) -> Self {
        Self {
            entrada_manha: parse_time_opt(registro.entrada_manha.as_deref()),
            saida_manha: parse_time_opt(registro.saida_manha.as_deref()),
            entrada_tarde: parse_time_opt(registro.entrada_tarde.as_deref()),
            saida_tarde: parse_time_opt(registro.saida_tarde.as_deref()),
            entrada_extra: parse_time_opt(registro.entrada_extra.as_deref()),
            saida_extra: parse_time_opt(registro.saida_extra.as_deref()),
        }
    }
}

/// Manhã + tarde, menos o par "extra". O par extra é uma janela descontada
/// (segunda pausa), não um terceiro turno.
pub fn worked_minutes(m: &Marcacoes) -> i64 {
    diferenca_par(m.entrada_manha, m.saida_manha)
        + diferenca_par(m.entrada_tarde, m.saida_tarde)
        - diferenca_par(m.entrada_extra, m.saida_extra)
}

/// Carga prevista da jornada (manhã + tarde - intervalo). `None` sem jornada.
pub fn scheduled_minutes(jornada: Option<&Jornada>) -> Option<i64> {
    let j = jornada?;
    let p = |v: &Option<String>| parse_time_opt(v.as_deref());

    Some(
        diferenca_par(p(&j.entrada_manha), p(&j.saida_manha))
            + diferenca_par(p(&j.entrada_tarde), p(&j.saida_tarde))
            - diferenca_par(p(&j.intervalo_inicio), p(&j.intervalo_fim)),
    )
}

// =========================================================================
//  CLASSIFICAÇÃO DO DIA
// =========================================================================

/// Feriados ativos do tenant, casados por dia+mês (valem para qualquer ano).
#[derive(Debug, Clone, Default)]
pub struct CalendarioFeriados {
    por_dia_mes: HashMap<(u32, u32), String>,
}

impl CalendarioFeriados {
    pub fn new(feriados: &[Feriado]) -> Self {
        let por_dia_mes = feriados
            .iter()
            .filter(|f| f.ativo)
            .map(|f| ((f.dia as u32, f.mes as u32), f.descricao.clone()))
            .collect();
        Self { por_dia_mes }
    }

    pub fn descricao(&self, data: NaiveDate) -> Option<&str> {
        self.por_dia_mes
            .get(&(data.day(), data.month()))
            .map(String::as_str)
    }
}

/// Feriado explícito vence; depois sábado/domingo; o resto é dia útil.
pub fn classify_day(data: NaiveDate, feriado: bool) -> TipoDia {
    if feriado {
        return TipoDia::Feriado;
    }
    match data.weekday() {
        Weekday::Sat | Weekday::Sun => TipoDia::FimDeSemana,
        _ => TipoDia::DiaUtil,
    }
}

pub fn dia_semana_pt(data: NaiveDate) -> &'static str {
    match data.weekday() {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

// =========================================================================
//  SALDO DIÁRIO
// =========================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaldoDia {
    /// Contribuição para o banco (com sinal).
    pub saldo_banco_minutos: i64,
    /// Trabalho em fim de semana/feriado, pago direto e fora do banco.
    pub minutos_pagos_feriado_fds: i64,
    pub minutos_extras_exibicao: i64,
}

/// Saldo de um dia. A tolerância é uma zona morta simétrica e, fora dela,
/// é consumida (a diferença é aproximada de zero pela tolerância).
pub fn calc_saldo_dia(
    tipo_dia: TipoDia,
    trabalhado: i64,
    previsto: Option<i64>,
    tolerancia: i64,
) -> SaldoDia {
    if !tipo_dia.is_dia_util() {
        let pagos = trabalhado.max(0);
        return SaldoDia {
            saldo_banco_minutos: 0,
            minutos_pagos_feriado_fds: pagos,
            minutos_extras_exibicao: pagos,
        };
    }

    let previsto = match previsto {
        Some(p) if p > 0 => p,
        _ => return SaldoDia::default(),
    };

    let tolerancia = tolerancia.max(0);
    let diff = trabalhado - previsto;

    let saldo = if diff.abs() <= tolerancia {
        0
    } else if diff > 0 {
        diff - tolerancia
    } else {
        diff + tolerancia
    };

    SaldoDia {
        saldo_banco_minutos: saldo,
        minutos_pagos_feriado_fds: 0,
        minutos_extras_exibicao: saldo.max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn jornada_comercial(tolerancia: i32) -> Jornada {
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
            tolerancia_minutos: tolerancia,
            created_at: None,
        }
    }

    fn marcacoes(pares: [(&str, &str); 2]) -> Marcacoes {
        Marcacoes {
            entrada_manha: parse_time(pares[0].0),
            saida_manha: parse_time(pares[0].1),
            entrada_tarde: parse_time(pares[1].0),
            saida_tarde: parse_time(pares[1].1),
            ..Default::default()
        }
    }

    #[test]
    fn parse_time_aceita_somente_hh_mm_validos() {
        assert_eq!(parse_time("08:00"), Some(480));
        assert_eq!(parse_time("8:05"), Some(485));
        assert_eq!(parse_time(" 23:59 "), Some(1439));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("12:60"), None);
        assert_eq!(parse_time("12:5"), None);
        assert_eq!(parse_time("1200"), None);
        assert_eq!(parse_time("ab:cd"), None);
        assert_eq!(parse_time("-1:00"), None);
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time_opt(None), None);
    }

    #[test]
    fn format_minutes_com_sinal() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(5), "00:05");
        assert_eq!(format_minutes(-20), "-00:20");
        assert_eq!(format_minutes(-125), "-02:05");
        assert_eq!(format_minutes(1500), "25:00");
    }

    #[test]
    fn format_inverte_parse_em_todo_o_dia() {
        for h in 0..24 {
            for m in 0..60 {
                let s = format!("{:02}:{:02}", h, m);
                assert_eq!(format_minutes(parse_time(&s).unwrap()), s);
            }
        }
    }

    #[test]
    fn par_extra_e_descontado() {
        let mut m = marcacoes([("08:00", "12:00"), ("13:00", "17:00")]);
        assert_eq!(worked_minutes(&m), 480);

        m.entrada_extra = parse_time("15:00");
        m.saida_extra = parse_time("15:30");
        assert_eq!(worked_minutes(&m), 450);
    }

    #[test]
    fn par_incompleto_ou_invertido_nao_conta() {
        let m = Marcacoes {
            entrada_manha: parse_time("08:00"),
            saida_manha: None,
            entrada_tarde: parse_time("17:00"),
            saida_tarde: parse_time("13:00"),
            ..Default::default()
        };
        assert_eq!(worked_minutes(&m), 0);
    }

    #[test]
    fn carga_prevista_desconta_intervalo() {
        assert_eq!(scheduled_minutes(None), None);
        assert_eq!(scheduled_minutes(Some(&jornada_comercial(10))), Some(480));

        let mut corrida = jornada_comercial(0);
        corrida.entrada_tarde = None;
        corrida.saida_tarde = None;
        corrida.entrada_manha = Some("07:00".into());
        corrida.saida_manha = Some("16:00".into());
        corrida.intervalo_inicio = Some("11:00".into());
        corrida.intervalo_fim = Some("12:00".into());
        assert_eq!(scheduled_minutes(Some(&corrida)), Some(480));
    }

    #[test]
    fn classificacao_do_dia() {
        // 2024-03-04 segunda, 2024-03-09 sábado, 2024-03-10 domingo
        let segunda = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let sabado = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let domingo = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        assert_eq!(classify_day(segunda, false), TipoDia::DiaUtil);
        assert_eq!(classify_day(sabado, false), TipoDia::FimDeSemana);
        assert_eq!(classify_day(domingo, false), TipoDia::FimDeSemana);
        assert_eq!(classify_day(segunda, true), TipoDia::Feriado);
        assert_eq!(classify_day(sabado, true), TipoDia::Feriado);
        assert_eq!(dia_semana_pt(sabado), "Sábado");
    }

    #[test]
    fn feriado_casa_por_dia_e_mes_em_qualquer_ano() {
        let tenant = Uuid::new_v4();
        let calendario = CalendarioFeriados::new(&[
            Feriado {
                id: Uuid::new_v4(),
                tenant_id: tenant,
                dia: 21,
                mes: 4,
                descricao: "Tiradentes".into(),
                ativo: true,
            },
            Feriado {
                id: Uuid::new_v4(),
                tenant_id: tenant,
                dia: 1,
                mes: 5,
                descricao: "Dia do Trabalho".into(),
                ativo: false,
            },
        ]);

        assert!(calendario.descricao(NaiveDate::from_ymd_opt(2023, 4, 21).unwrap()).is_some());
        assert_eq!(
            calendario.descricao(NaiveDate::from_ymd_opt(2031, 4, 21).unwrap()),
            Some("Tiradentes")
        );
        assert!(calendario.descricao(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).is_none());
    }

    #[test]
    fn zona_morta_da_tolerancia() {
        for trabalhado in 470..=490 {
            let saldo = calc_saldo_dia(TipoDia::DiaUtil, trabalhado, Some(480), 10);
            assert_eq!(saldo.saldo_banco_minutos, 0, "trabalhado={}", trabalhado);
        }
    }

    #[test]
    fn tolerancia_e_consumida_fora_da_zona_morta() {
        for diff in 11..300 {
            let acima = calc_saldo_dia(TipoDia::DiaUtil, 480 + diff, Some(480), 10);
            assert_eq!(acima.saldo_banco_minutos, diff - 10);

            let abaixo = calc_saldo_dia(TipoDia::DiaUtil, 480 - diff, Some(480), 10);
            assert_eq!(abaixo.saldo_banco_minutos, -(diff - 10));
        }
    }

    #[test]
    fn cenario_extra_em_dia_util() {
        let jornada = jornada_comercial(10);
        let m = marcacoes([("08:00", "12:00"), ("13:00", "17:15")]);
        let trabalhado = worked_minutes(&m);
        assert_eq!(trabalhado, 495);

        let saldo = calc_saldo_dia(TipoDia::DiaUtil, trabalhado, scheduled_minutes(Some(&jornada)), 10);
        assert_eq!(saldo.saldo_banco_minutos, 5);
        assert_eq!(saldo.minutos_extras_exibicao, 5);
        assert_eq!(saldo.minutos_pagos_feriado_fds, 0);
    }

    #[test]
    fn cenario_debito_em_dia_util() {
        let m = marcacoes([("08:00", "12:00"), ("13:00", "16:30")]);
        let trabalhado = worked_minutes(&m);
        assert_eq!(trabalhado, 450);

        let saldo = calc_saldo_dia(TipoDia::DiaUtil, trabalhado, Some(480), 10);
        assert_eq!(saldo.saldo_banco_minutos, -20);
        assert_eq!(saldo.minutos_extras_exibicao, 0);
    }

    #[test]
    fn fim_de_semana_e_feriado_pagam_direto() {
        for tipo in [TipoDia::FimDeSemana, TipoDia::Feriado] {
            for trabalhado in [-30, 0, 180, 600] {
                let saldo = calc_saldo_dia(tipo, trabalhado, Some(480), 10);
                assert_eq!(saldo.saldo_banco_minutos, 0);
                assert_eq!(saldo.minutos_pagos_feriado_fds, trabalhado.max(0));
            }
        }
    }

    #[test]
    fn dia_util_sem_jornada_nao_gera_saldo() {
        assert_eq!(
            calc_saldo_dia(TipoDia::DiaUtil, 600, None, 10),
            SaldoDia::default()
        );
        assert_eq!(
            calc_saldo_dia(TipoDia::DiaUtil, 600, Some(0), 10),
            SaldoDia::default()
        );
    }
}
