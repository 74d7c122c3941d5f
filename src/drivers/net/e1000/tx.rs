//! Anel de transmissão.
//!
//! O software só escreve no slot em `tail`, e só se o hardware já tiver
//! devolvido esse slot (DD=1). O registrador TDT é escrito por último,
//! depois que o descritor inteiro estiver visível para o dispositivo.

use super::desc::{TxCmd, TxDesc};
use super::error::{E1000Error, Result};
use super::mmio::RegisterWindow;
use super::regs::{self, BUFFER_STRIDE, TX_MAX_FRAME};
use super::ring::{DescRing, RingIndex};
use crate::mm::DmaAllocator;
use core::sync::atomic::{fence, Ordering};

pub struct TxRing<const N: usize> {
    ring: DescRing<TxDesc, N>,
    tail: RingIndex<N>,
}

impl<const N: usize> TxRing<N> {
    /// Aloca o anel com todos os slots livres (DD=1).
    pub fn new<A: DmaAllocator + ?Sized>(dma: &mut A) -> Result<Self> {
        let mut ring = DescRing::<TxDesc, N>::new(dma, BUFFER_STRIDE)?;
        for i in 0..N {
            let slot = RingIndex::new(i);
            let buffer = ring.buffer_phys(slot).as_u64();
            ring.write(slot, TxDesc::free(buffer));
        }
        Ok(Self {
            ring,
            tail: RingIndex::ZERO,
        })
    }

    /// Programa TDBAL/TDBAH/TDLEN/TDH/TDT, TCTL e TIPG.
    pub fn program(&self, regs: &RegisterWindow) {
        let base = self.ring.base();
        regs.write(regs::TDBAL, base.low_u32());
        regs.write(regs::TDBAH, base.high_u32());
        regs.write(regs::TDLEN, DescRing::<TxDesc, N>::len_bytes());
        regs.write(regs::TDH, 0);
        regs.write(regs::TDT, 0);
        regs.write(regs::TCTL, regs::TCTL_INIT);
        regs.write(regs::TIPG, regs::TIPG_INIT);

        crate::kdebug!("(E1000) TDBAL=", base.as_u64());
        crate::kdebug!("(E1000) TDLEN=", DescRing::<TxDesc, N>::len_bytes());
    }

    /// Enfileira um frame para transmissão.
    ///
    /// Retorna `TxRetry` se o anel estiver cheio; nada é alterado nesse caso.
    pub fn transmit(&mut self, regs: &RegisterWindow, data: &[u8]) -> Result<()> {
        if data.len() > TX_MAX_FRAME {
            return Err(E1000Error::PacketTooLarge);
        }

        let slot = self.tail;
        let desc = self.ring.read(slot);
        if !desc.is_done() {
            return Err(E1000Error::TxRetry);
        }

        self.ring.fill_buffer(slot, data);
        self.ring.write(
            slot,
            TxDesc {
                addr: desc.addr,
                length: data.len() as u16,
                cmd: (TxCmd::EOP | TxCmd::RS).bits(),
                status: 0,
                ..TxDesc::default()
            },
        );

        // Buffer e descritor visíveis antes do doorbell
        fence(Ordering::SeqCst);

        self.tail = slot.next();
        regs.write(regs::TDT, self.tail.get() as u32);

        crate::ktrace!("(E1000) TX slot=", slot.get());
        Ok(())
    }

    /// Posição do próximo slot a ser usado
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail.get()
    }
}
