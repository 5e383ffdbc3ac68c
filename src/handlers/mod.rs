pub mod banco_horas;
pub mod feriados;
pub mod jornadas;
pub mod periodo;
pub mod ponto;
