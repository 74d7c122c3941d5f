//! # Runtime de Userspace
//!
//! Fork copy-on-write implementado inteiramente fora do kernel.
//!
//! O kernel oferece apenas primitivas de mapeamento (`page_alloc`,
//! `page_map`, `page_unmap`), criação de environment (`exofork`) e o
//! upcall de page fault. Todo o resto vive aqui:
//!
//! | Módulo    | Responsabilidade |
//! |-----------|------------------|
//! | `env`     | Estado do processo: id atual, handler de falta instalado |
//! | `pgfault` | Registro entregue pelo upcall (`UTrapframe`, `FaultErr`) |
//! | `cow`     | Validação e reparo de uma falta COW |
//! | `fork`    | Duplicação do espaço de endereçamento (`duppage`, `fork`) |
//! | `native`  | Colaboradores reais: trap de syscall, uvpt, cópia direta |
//!
//! ## Fluxo de uma Escrita em Página COW
//!
//! ```text
//! escrita ─► #PF (W em página P|U|COW) ─► kernel empilha UTrapframe
//!        ─► trampolim ─► UserEnv::dispatch_fault ─► cow::pgfault
//!        ─► página privada P|U|W ─► instrução reexecutada
//! ```

pub mod cow;
pub mod env;
pub mod fork;
pub mod native;
pub mod pgfault;

#[cfg(test)]
mod test;

pub use env::{PgFaultHandler, UserEnv};
pub use crate::sys::ForkResult;
pub use pgfault::{FaultErr, UTrapframe};

use crate::mm::{PageTableView, VirtAddr};
use crate::syscall::Syscalls;

/// Acesso à memória do próprio processo
pub trait UserMemory {
    /// Copia uma página inteira de `src` para `dst` (ambas mapeadas)
    fn copy_page(&mut self, dst: VirtAddr, src: VirtAddr);

    /// Valor atual do stack pointer
    fn stack_pointer(&self) -> VirtAddr;
}

/// Tudo que o runtime precisa do kernel e do próprio espaço de endereçamento
pub trait UserKernel: Syscalls + PageTableView + UserMemory {}

impl<T: Syscalls + PageTableView + UserMemory> UserKernel for T {}
