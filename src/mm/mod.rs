//! # Memory Management (MM)
//!
//! Tipos de memória compartilhados pelo driver e pelo runtime de fork.
//!
//! ## 🏗️ Arquitetura dos Módulos
//!
//! | Módulo   | Responsabilidade |
//! |----------|------------------|
//! | `addr`   | `PhysAddr`/`VirtAddr` type-safe, aritmética de página. |
//! | `config` | Layout do espaço de usuário (UTOP, USTACKTOP, PFTEMP...). |
//! | `flags`  | `PteFlags` (inclui o marcador COW) e `Pte` bruta. |
//! | `vpt`    | Visão somente leitura das page tables (uvpd/uvpt). |
//! | `dma`    | Interfaces do alocador DMA e do mapeador MMIO. |
//! | `debug`  | Dump de mapeamentos de um intervalo. |
//! | `error`  | `MmError`. |
//!
//! Este módulo NÃO implementa alocador físico nem page tables: ambos são
//! colaboradores externos, vistos apenas pelas traits acima.

pub mod addr;
pub mod config;
pub mod debug;
pub mod dma;
pub mod error;
pub mod flags;
pub mod vpt;

pub use addr::{PhysAddr, VirtAddr};
pub use config::{PAGE_SIZE, PFTEMP, USTACKTOP, UTOP, UXSTACKTOP};
pub use dma::{DmaAllocator, DmaRegion, MmioMapper};
pub use error::{MmError, MmResult};
pub use flags::{Pte, PteFlags};
pub use vpt::{PageTableView, RecursiveVpt};
