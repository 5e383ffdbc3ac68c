
pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod banco_horas_repo;
pub use banco_horas_repo::BancoHorasRepository;
pub mod cadastro_repo;
pub use cadastro_repo::CadastroRepository;
pub mod master_user_repo;
pub use master_user_repo::MasterUserRepository;
pub mod periodo_repo;
pub use periodo_repo::PeriodoRepository;
pub mod ponto_repo;
pub use ponto_repo::PontoRepository;
