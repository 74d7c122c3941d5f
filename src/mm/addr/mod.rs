//! # Addr - Wrappers Type-Safe para Endereços
//!
//! Tipos distintos para PhysAddr e VirtAddr evitando confusão entre o
//! endereço que o DMA enxerga e o endereço que o software desreferencia.

mod phys;
mod virt;

pub use phys::PhysAddr;
pub use virt::VirtAddr;
