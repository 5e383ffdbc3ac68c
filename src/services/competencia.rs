// src/services/competencia.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

/// Um mês contábil (ano + mês 1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Competencia {
    pub ano: i32,
    pub mes: u32,
}

impl Competencia {
    pub fn new(ano: i32, mes: u32) -> Result<Self, AppError> {
        if !(1..=12).contains(&mes) || !(1900..=9999).contains(&ano) {
            return Err(AppError::CompetenciaInvalida(format!("{:04}-{:02}", ano, mes)));
        }
        Ok(Self { ano, mes })
    }

    /// Aceita o formato "AAAA-MM".
    pub fn parse(valor: &str) -> Result<Self, AppError> {
        let invalida = || AppError::CompetenciaInvalida(valor.to_string());

        let (a, m) = valor.trim().split_once('-').ok_or_else(invalida)?;
        if a.len() != 4 || m.len() != 2 {
            return Err(invalida());
        }
        let ano: i32 = a.parse().map_err(|_| invalida())?;
        let mes: u32 = m.parse().map_err(|_| invalida())?;

        Self::new(ano, mes).map_err(|_| invalida())
    }

    pub fn primeiro_dia(&self) -> NaiveDate {
        // ano/mês já validados no construtor
        NaiveDate::from_ymd_opt(self.ano, self.mes, 1).unwrap_or_default()
    }

    pub fn anterior(&self) -> Self {
        if self.mes == 1 {
            Self { ano: self.ano - 1, mes: 12 }
        } else {
            Self { ano: self.ano, mes: self.mes - 1 }
        }
    }

    pub fn contem(&self, data: NaiveDate) -> bool {
        data.year() == self.ano && data.month() == self.mes
    }

    /// Todos os dias corridos do mês, em ordem.
    pub fn dias(&self) -> Vec<NaiveDate> {
        self.primeiro_dia()
            .iter_days()
            .take_while(|d| self.contem(*d))
            .collect()
    }
}

impl std::fmt::Display for Competencia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.ano, self.mes)
    }
}
