pub mod audit_service;
pub mod banco_horas_service;
pub mod cadastro_service;
pub mod competencia;
pub mod credentials;
pub mod periodo_service;
pub mod ponto_calculo;
pub mod ponto_service;
pub mod reference_cache;
pub mod resumo;
