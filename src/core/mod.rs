//! Core Module
//!
//! Infraestrutura comum aos dois subsistemas. Hoje contém apenas o
//! sistema de logging zero-overhead.

pub mod logging;
