//! # Network Drivers
//!
//! Drivers de placas de rede. Operação por polling: nenhum driver aqui
//! registra interrupções.

pub mod e1000;
