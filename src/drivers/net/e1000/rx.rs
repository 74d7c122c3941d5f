//! Anel de recepção.
//!
//! O software consome o slot em `next` quando o hardware marca DD=1. Depois
//! de copiar o frame, o slot é rearmado (status zerado) e devolvido ao
//! hardware avançando RDT em uma posição.

use super::desc::RxDesc;
use super::error::{E1000Error, Result};
use super::mmio::RegisterWindow;
use super::regs::{self, BUFFER_STRIDE, MTA_ENTRIES, RX_BUFFER_SIZE};
use super::ring::{DescRing, RingIndex};
use super::RxErrorPolicy;
use crate::mm::DmaAllocator;
use core::sync::atomic::{fence, Ordering};

pub struct RxRing<const N: usize> {
    ring: DescRing<RxDesc, N>,
    next: RingIndex<N>,
    policy: RxErrorPolicy,
}

impl<const N: usize> RxRing<N> {
    /// Aloca o anel com todos os slots armados para o hardware (DD=0).
    pub fn new<A: DmaAllocator + ?Sized>(dma: &mut A, policy: RxErrorPolicy) -> Result<Self> {
        let mut ring = DescRing::<RxDesc, N>::new(dma, BUFFER_STRIDE)?;
        for i in 0..N {
            let slot = RingIndex::new(i);
            let buffer = ring.buffer_phys(slot).as_u64();
            ring.write(slot, RxDesc::armed(buffer));
        }
        Ok(Self {
            ring,
            next: RingIndex::ZERO,
            policy,
        })
    }

    /// Programa o filtro de endereço, a MTA, o anel e habilita a recepção.
    ///
    /// RDT fica em `N - 1`: o hardware pode preencher todos os slots menos um.
    pub fn program(&self, regs: &RegisterWindow, mac: [u8; 6]) {
        let (ral, rah) = regs::receive_address(mac);
        regs.write(regs::RAL0, ral);
        regs.write(regs::RAH0, rah);
        for i in 0..MTA_ENTRIES {
            regs.write(regs::Reg::mta(i), 0);
        }

        let base = self.ring.base();
        regs.write(regs::RDBAL, base.low_u32());
        regs.write(regs::RDBAH, base.high_u32());
        regs.write(regs::RDLEN, DescRing::<RxDesc, N>::len_bytes());
        regs.write(regs::RDH, 0);
        regs.write(regs::RDT, (N - 1) as u32);
        regs.write(regs::RCTL, regs::RCTL_INIT);

        crate::kdebug!("(E1000) RDBAL=", base.as_u64());
        crate::kdebug!("(E1000) RAL0=", ral);
        crate::kdebug!("(E1000) RAH0=", rah);
    }

    /// Copia o próximo frame recebido para `buf` e retorna seu tamanho.
    ///
    /// - `RxRetry`: nenhum frame pronto (ou frame com erro descartado).
    /// - `BufferTooSmall`: `buf` não comporta o frame; o slot fica intacto
    ///   e a próxima chamada com um buffer maior o entrega.
    pub fn receive(&mut self, regs: &RegisterWindow, buf: &mut [u8]) -> Result<usize> {
        let slot = self.next;
        let desc = self.ring.read(slot);
        if !desc.is_done() {
            return Err(E1000Error::RxRetry);
        }

        let len = desc.length as usize;
        if desc.errors != 0 || len > RX_BUFFER_SIZE {
            crate::kwarn!("(E1000) Frame RX com erro, errors=", desc.errors);
            return match self.policy {
                RxErrorPolicy::RecycleAndDrop => {
                    self.recycle(regs, slot, desc.addr);
                    Err(E1000Error::RxRetry)
                }
                RxErrorPolicy::Stall => Err(E1000Error::RxRetry),
            };
        }

        if len > buf.len() {
            return Err(E1000Error::BufferTooSmall);
        }

        // Conteúdo do buffer só é lido depois de observar DD
        fence(Ordering::SeqCst);
        self.ring.drain_buffer(slot, &mut buf[..len]);
        self.recycle(regs, slot, desc.addr);

        crate::ktrace!("(E1000) RX slot=", slot.get());
        Ok(len)
    }

    /// Rearma `slot` e o devolve ao hardware.
    fn recycle(&mut self, regs: &RegisterWindow, slot: RingIndex<N>, buffer: u64) {
        self.ring.write(slot, RxDesc::armed(buffer));
        fence(Ordering::SeqCst);

        let tail = RingIndex::<N>::new(regs.read(regs::RDT) as usize).next();
        regs.write(regs::RDT, tail.get() as u32);
        self.next = slot.next();
    }

    /// Posição do próximo slot a ser consumido
    #[inline]
    pub fn next(&self) -> usize {
        self.next.get()
    }
}
