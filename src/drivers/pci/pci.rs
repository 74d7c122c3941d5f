//! # Função PCI
//!
//! O que a enumeração entrega ao driver no attach.
//!
//! ## BARs de Memória
//!
//! | Bits  | Descrição                          |
//! |-------|------------------------------------|
//! | 0     | 0 = Memory BAR, 1 = I/O BAR        |
//! | 2:1   | Tipo (0 = 32-bit, 2 = 64-bit)      |
//! | 3     | Prefetchable                       |
//! | 31:4  | Endereço base (alinhado a 16)      |

use crate::mm::PhysAddr;

/// Vendor ID da Intel
pub const VENDOR_INTEL: u16 = 0x8086;

/// Informações de uma função PCI já habilitada pela enumeração
#[derive(Debug, Clone)]
pub struct PciFunction {
    /// Número do barramento
    pub bus: u8,
    /// Número do dispositivo
    pub device: u8,
    /// Número da função
    pub function: u8,
    /// Vendor ID
    pub vendor_id: u16,
    /// Device ID
    pub device_id: u16,
    /// Base Address Registers (valor bruto)
    pub bars: [u32; 6],
    /// Tamanho de cada BAR, medido pela enumeração
    pub bar_sizes: [u32; 6],
}

impl PciFunction {
    /// Obtém o endereço base de um BAR (Memory-mapped)
    pub fn bar_address(&self, bar: usize) -> Option<PhysAddr> {
        if bar >= 6 {
            return None;
        }

        let value = self.bars[bar];

        // Bit 0 = 0 indica Memory BAR
        if value & 1 != 0 {
            return None; // É I/O BAR
        }

        // Bits 2:1 indicam tipo
        match (value >> 1) & 0x3 {
            0 => Some(PhysAddr::new((value & 0xFFFF_FFF0) as u64)),
            2 => {
                if bar + 1 >= 6 {
                    return None;
                }
                let high = self.bars[bar + 1] as u64;
                Some(PhysAddr::new((high << 32) | (value & 0xFFFF_FFF0) as u64))
            }
            _ => None,
        }
    }

    /// Endereço e tamanho de um BAR de memória, se válido e não vazio
    pub fn memory_bar(&self, bar: usize) -> Option<(PhysAddr, usize)> {
        let base = self.bar_address(bar)?;
        let size = self.bar_sizes[bar] as usize;
        if size == 0 {
            return None;
        }
        Some((base, size))
    }
}

/// Entrada da tabela de drivers consultada pela enumeração
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PciDriver {
    pub vendor_id: u16,
    pub device_id: u16,
    pub name: &'static str,
}

/// Procura o driver que atende uma função
pub fn find_driver<'a>(func: &PciFunction, table: &'a [PciDriver]) -> Option<&'a PciDriver> {
    table
        .iter()
        .find(|d| d.vendor_id == func.vendor_id && d.device_id == func.device_id)
}
