//! Anvil - Rede e Fork do Redstone OS.
//!
//! Ponto central de exportação dos módulos.
//!
//! Dois subsistemas independentes com o mesmo formato: um anel fixo de
//! descritores compartilhados e um único bit de posse.
//!
//! - `drivers::net::e1000` - anéis TX/RX do Intel 82540EM (bit DD).
//! - `ulib` - fork copy-on-write em userspace sobre o upcall de page fault.

#![cfg_attr(not(test), no_std)]

// --- Infraestrutura (Logs, Erros) ---
pub mod core; // Logging zero-overhead
pub mod sys; // Tipos de sistema (EnvId, EnvStatus)

// --- Hardware ---
pub mod drivers; // Serial (logs), PCI (attach), E1000

// --- Memória e Interface com o Kernel ---
pub mod mm; // Endereços, PTEs, layout, visão das page tables
pub mod syscall; // Erros, números, ABI, cliente de syscalls

// --- Runtime de Userspace ---
pub mod ulib; // Upcall de page fault, reparo COW, fork

pub use crate::drivers::net::e1000::{E1000Config, E1000Error, E1000};
pub use crate::sys::{EnvId, ForkResult};
pub use crate::ulib::UserEnv;
