pub mod audit;
pub mod banco_horas;
pub mod periodo;
pub mod ponto;
