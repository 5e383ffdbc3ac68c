use sqlx::{Postgres, Transaction};

use crate::common::error::AppError;

// ---
// Helper de Transação: commit no sucesso, ROLLBACK explícito no erro
// ---
/// Encerra a transação de acordo com o resultado da operação.
/// Se o rollback falhar, o erro original é o que volta para o chamador.
pub(crate) async fn finish_tx<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("🔥 Falha no ROLLBACK após erro '{}': {}", err, rollback_err);
            } else {
                tracing::warn!("Transação desfeita: {}", err);
            }
            Err(err)
        }
    }
}

/// Minutos calculados em i64 -> coluna INTEGER. Fora da faixa é erro, nunca truncamento.
pub(crate) fn minutos_coluna(campo: &'static str, minutos: i64) -> Result<i32, AppError> {
    i32::try_from(minutos).map_err(|_| AppError::ValorInvalido {
        campo,
        motivo: format!("{} minutos excede o limite da coluna", minutos),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutos_fora_da_faixa_nao_truncam() {
        assert_eq!(minutos_coluna("saldoFinal", -4_320).unwrap(), -4_320);
        assert_eq!(minutos_coluna("saldoFinal", i32::MAX as i64).unwrap(), i32::MAX);

        let err = minutos_coluna("saldoFinal", i32::MAX as i64 + 1).unwrap_err();
        assert_eq!(err.code(), "VALOR_INVALIDO");
        assert!(matches!(err, AppError::ValorInvalido { campo: "saldoFinal", .. }));

        assert!(minutos_coluna("devidas", i64::MIN).is_err());
    }
}
