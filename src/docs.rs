// src/docs.rs

use utoipa::OpenApi;
use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Ponto ---
        handlers::ponto::get_ponto_mes,
        handlers::ponto::replace_ponto_mes,

        // --- Banco de Horas ---
        handlers::banco_horas::get_resumo,
        handlers::banco_horas::list_ajustes,
        handlers::banco_horas::create_ajuste,
        handlers::banco_horas::create_saldo_inicial,
        handlers::banco_horas::delete_ajuste,

        // --- Períodos ---
        handlers::periodo::list_periodos,
        handlers::periodo::get_periodo,
        handlers::periodo::change_periodo,

        // --- Cadastros ---
        handlers::feriados::list_feriados,
        handlers::feriados::create_feriado,
        handlers::feriados::update_feriado,
        handlers::feriados::delete_feriado,
        handlers::jornadas::list_jornadas,
        handlers::jornadas::create_jornada,
    ),
    components(
        schemas(
            // --- Erros ---
            common::error::ErrorKind,
            common::error::ApiErrorBody,

            // --- Ponto ---
            models::ponto::StatusDia,
            models::ponto::TipoDia,
            models::ponto::Jornada,
            models::ponto::Feriado,
            models::ponto::Funcionario,
            models::ponto::RegistroPonto,
            models::ponto::PontoMes,

            // --- Banco de Horas ---
            models::banco_horas::TipoAjuste,
            models::banco_horas::PoliticaFaltas,
            models::banco_horas::AjusteBancoHoras,
            models::banco_horas::ClassificacaoDia,
            models::banco_horas::LinhaResumo,
            models::banco_horas::TotaisBancoHoras,
            models::banco_horas::ResumoBancoHoras,

            // --- Períodos ---
            models::periodo::SituacaoPeriodo,
            models::periodo::FechamentoBancoHoras,
            models::periodo::SituacaoMes,
            models::periodo::PeriodoDetalhe,

            // --- Payloads ---
            handlers::ponto::SubstituirPontoPayload,
            handlers::ponto::GravacaoPontoResponse,
            handlers::banco_horas::LancarAjustePayload,
            handlers::periodo::FecharPayload,
            handlers::periodo::ReabrirPayload,
            handlers::periodo::AcaoPeriodoPayload,
            handlers::feriados::FeriadoPayload,
            handlers::jornadas::CreateJornadaPayload,
        )
    ),
    tags(
        (name = "Ponto", description = "Marcações diárias por competência"),
        (name = "Banco de Horas", description = "Resumo mensal e ajustes do banco de horas"),
        (name = "Períodos", description = "Fechamento e reabertura de competências"),
        (name = "Feriados", description = "Calendário de feriados da empresa"),
        (name = "Jornadas", description = "Jornadas de trabalho")
    )
)]
pub struct ApiDoc;
