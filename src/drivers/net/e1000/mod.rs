//! # Intel 82540EM (E1000)
//!
//! Driver por polling com dois anéis de descritores em memória DMA.
//!
//! ## Protocolo de Posse
//!
//! O bit DD (Descriptor Done) de cada descritor diz quem é o dono do slot:
//!
//! | Anel | DD=1                               | DD=0                          |
//! |------|------------------------------------|-------------------------------|
//! | TX   | slot livre para o software         | aguardando transmissão        |
//! | RX   | frame pronto para o software       | armado, aguardando o hardware |
//!
//! Nenhuma interrupção é usada. `transmit` e `receive` nunca bloqueiam:
//! anel cheio ou vazio vira `TxRetry`/`RxRetry` e o chamador decide o backoff.
//!
//! ## Attach
//!
//! 1. Mapeia BAR0 e valida a janela MMIO.
//! 2. Confere o registrador STATUS contra o valor esperado.
//! 3. Aloca e programa o anel TX (TDBAL..TDT, TCTL, TIPG).
//! 4. Aloca e programa o anel RX (RAL/RAH, MTA, RDBAL..RDT, RCTL).

pub mod desc;
pub mod error;
pub mod mmio;
pub mod regs;
pub mod ring;
pub mod rx;
pub mod tx;

#[cfg(test)]
mod test;

pub use error::E1000Error;
pub use mmio::RegisterWindow;
pub use regs::{RX_DESC_COUNT, TX_DESC_COUNT};

use crate::drivers::pci::{PciDriver, PciFunction, VENDOR_INTEL};
use crate::mm::{DmaAllocator, MmioMapper};
use error::Result;
use rx::RxRing;
use tx::TxRing;

/// Device ID do 82540EM
pub const DEVICE_82540EM: u16 = 0x100E;

/// Dispositivos atendidos por este driver
pub const PCI_DRIVERS: &[PciDriver] = &[PciDriver {
    vendor_id: VENDOR_INTEL,
    device_id: DEVICE_82540EM,
    name: "e1000",
}];

/// O que fazer com um frame recebido com erro (campo ERRORS != 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RxErrorPolicy {
    /// Rearma o slot e segue para o próximo
    #[default]
    RecycleAndDrop,
    /// Mantém o slot; `receive` retorna `RxRetry` até alguém intervir
    Stall,
}

/// Parâmetros do attach
#[derive(Debug, Clone, Copy)]
pub struct E1000Config {
    /// MAC programado no filtro RAL0/RAH0
    pub mac: [u8; 6],
    /// STATUS esperado logo após o reset (`None` desliga a verificação)
    pub expected_status: Option<u32>,
    pub rx_error_policy: RxErrorPolicy,
}

impl Default for E1000Config {
    fn default() -> Self {
        Self {
            mac: regs::QEMU_MAC,
            expected_status: Some(regs::EXPECTED_STATUS),
            rx_error_policy: RxErrorPolicy::RecycleAndDrop,
        }
    }
}

/// Dispositivo inicializado: janela de registradores e os dois anéis.
pub struct E1000 {
    regs: RegisterWindow,
    tx: TxRing<TX_DESC_COUNT>,
    rx: RxRing<RX_DESC_COUNT>,
    mac: [u8; 6],
}

impl E1000 {
    /// Inicializa o dispositivo descrito por `pci`.
    pub fn attach<M, A>(
        pci: &PciFunction,
        mmio: &mut M,
        dma: &mut A,
        config: &E1000Config,
    ) -> Result<Self>
    where
        M: MmioMapper + ?Sized,
        A: DmaAllocator + ?Sized,
    {
        let (bar_base, bar_size) = pci.memory_bar(0).ok_or(E1000Error::InvalidBar)?;
        crate::kinfo!("(E1000) BAR0 base=", bar_base.as_u64());
        crate::kinfo!("(E1000) BAR0 size=", bar_size);

        let base = mmio
            .map_mmio(bar_base, bar_size)
            .map_err(E1000Error::MmioMapFailed)?;
        // SAFETY: o mapeador devolveu bar_size bytes mapeados para BAR0
        let regs = unsafe { RegisterWindow::new(base, bar_size)? };

        let status = regs.read(regs::STATUS);
        crate::kdebug!("(E1000) STATUS=", status);
        if let Some(expected) = config.expected_status {
            if status != expected {
                crate::kerror!("(E1000) STATUS inesperado=", status);
                return Err(E1000Error::IdentityMismatch(status));
            }
        }

        let tx = TxRing::new(dma)?;
        tx.program(&regs);
        crate::kinfo!("(E1000) Anel TX pronto, slots=", TX_DESC_COUNT);

        let rx = RxRing::new(dma, config.rx_error_policy)?;
        rx.program(&regs, config.mac);
        crate::kinfo!("(E1000) Anel RX pronto, slots=", RX_DESC_COUNT);

        Ok(Self {
            regs,
            tx,
            rx,
            mac: config.mac,
        })
    }

    /// Enfileira um frame. `TxRetry` se o anel estiver cheio.
    pub fn transmit(&mut self, data: &[u8]) -> Result<()> {
        self.tx.transmit(&self.regs, data)
    }

    /// Copia o próximo frame recebido para `buf`. `RxRetry` se não houver.
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.rx.receive(&self.regs, buf)
    }

    pub fn mac_address(&self) -> [u8; 6] {
        self.mac
    }

    pub fn registers(&self) -> &RegisterWindow {
        &self.regs
    }
}

/// Ponto de entrada da tabela PCI.
///
/// Falhas de attach são fatais: um dispositivo que não responde como o
/// 82540EM esperado não pode ser usado com segurança.
pub fn attach_fn<M, A>(pci: &PciFunction, mmio: &mut M, dma: &mut A, config: &E1000Config) -> E1000
where
    M: MmioMapper + ?Sized,
    A: DmaAllocator + ?Sized,
{
    match E1000::attach(pci, mmio, dma, config) {
        Ok(dev) => dev,
        Err(e) => {
            crate::kerror!("(E1000) Attach falhou");
            panic!("e1000: attach falhou: {}", e);
        }
    }
}
