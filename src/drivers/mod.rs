//! # Driver Layer
//!
//! O módulo `drivers` contém os drivers de hardware deste crate.
//!
//! ## Drivers Implementados
//!
//! | Driver   | Arquivo        | Status |
//! |----------|----------------|--------|
//! | Serial   | `serial.rs`    | Destino dos logs (COM1 ou sink instalado) |
//! | PCI      | `pci/`         | Descrição do attach (BARs, tabela de drivers) |
//! | E1000    | `net/e1000/`   | Anéis TX/RX por bit DD, sem interrupções |
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Barramento (enumeração PCI - colaborador)   │
//! └──────────────────────────────────────────────┘
//!                      │ PciFunction (BAR0 base/size)
//!                      ▼
//! ┌──────────────────────────────────────────────┐
//! │  e1000::attach_fn                            │
//! │   └─ RegisterWindow (MMIO)                   │
//! │       ├─ TxRing  (transmit, não bloqueante)  │
//! │       └─ RxRing  (receive, não bloqueante)   │
//! └──────────────────────────────────────────────┘
//! ```

pub mod net; // Placas de rede
pub mod pci; // Descrição do attach PCI
pub mod serial; // Destino dos logs
