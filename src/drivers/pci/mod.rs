//! # Barramento PCI
//!
//! Descrição do que a camada de barramento entrega a um driver no attach.
//!
//! A enumeração em si (espaço de configuração, scan dos barramentos) fica
//! fora deste crate; aqui vivem apenas os tipos que a atravessam e a tabela
//! de drivers que ela consulta.
//!
//! ## Uso
//!
//! ```ignore
//! // Chamado pela enumeração ao encontrar uma função
//! if let Some(driver) = pci::find_driver(&func, &DRIVERS) {
//!     // ... invocar o attach do driver
//! }
//! ```

pub mod pci;

pub use pci::{find_driver, PciDriver, PciFunction, VENDOR_INTEL};
