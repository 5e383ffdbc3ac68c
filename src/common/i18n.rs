// src/common/i18n.rs

use std::collections::HashMap;

// (código, pt, en)
const MENSAGENS: &[(&str, &str, &str)] = &[
    ("CAMPOS_INVALIDOS", "Um ou mais campos são inválidos.", "One or more fields are invalid."),
    ("HORARIO_INVALIDO", "Horário inválido. Use o formato HH:MM.", "Invalid time. Use the HH:MM format."),
    ("COMPETENCIA_INVALIDA", "Competência inválida. Use o formato AAAA-MM.", "Invalid period. Use the YYYY-MM format."),
    ("DATA_FORA_DA_COMPETENCIA", "A data informada não pertence à competência.", "The date does not belong to the period."),
    ("DATA_DUPLICADA", "A mesma data foi informada mais de uma vez.", "The same date was sent more than once."),
    ("CAMPO_OBRIGATORIO", "Campo obrigatório não informado.", "A required field is missing."),
    ("VALOR_INVALIDO", "Valor inválido.", "Invalid value."),
    ("TENANT_NAO_SELECIONADO", "O cabeçalho X-Tenant-ID é obrigatório.", "The X-Tenant-ID header is required."),
    ("TENANT_INVALIDO", "Cabeçalho X-Tenant-ID inválido (não é um UUID).", "Invalid X-Tenant-ID header (not a UUID)."),
    ("USUARIO_NAO_INFORMADO", "O cabeçalho X-User-Login é obrigatório.", "The X-User-Login header is required."),
    ("AJUSTE_NAO_EDITAVEL", "Somente ajustes manuais podem ser removidos.", "Only manual adjustments can be removed."),
    ("NAO_ENCONTRADO", "Registro não encontrado.", "Record not found."),
    ("PERIODO_NAO_ENCONTRADO", "Este período nunca foi fechado.", "This period was never closed."),
    ("PERIODO_FECHADO", "O período está fechado para edição.", "The period is closed for editing."),
    ("PERIODO_NAO_FECHADO", "Somente períodos fechados podem ser reabertos.", "Only closed periods can be reopened."),
    ("CREDENCIAIS_MASTER_INVALIDAS", "Usuário ou senha master inválidos.", "Invalid master user or password."),
    ("ERRO_ARMAZENAMENTO", "Falha ao acessar o banco de dados.", "Failed to access the database."),
    ("ERRO_INTERNO", "Ocorreu um erro inesperado.", "An unexpected error occurred."),
];

/// Catálogo de mensagens de erro por idioma.
#[derive(Debug, Clone)]
pub struct I18nStore {
    // código -> (pt, en)
    mensagens: HashMap<&'static str, (&'static str, &'static str)>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mensagens = MENSAGENS
            .iter()
            .map(|(code, pt, en)| (*code, (*pt, *en)))
            .collect();
        Self { mensagens }
    }

    /// Mensagem para o código; cai para português e, em último caso, devolve o próprio código.
    pub fn message<'a>(&'a self, lang: &str, code: &'a str) -> &'a str {
        match self.mensagens.get(code) {
            Some(&(_, en)) if lang == "en" => en,
            Some(&(pt, _)) => pt,
            None => code,
        }
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
