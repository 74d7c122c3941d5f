//! Testes do driver E1000 contra um dispositivo simulado em memória.

mod attach_test;
mod fake;
