//! # DMA e MMIO
//!
//! Interfaces com o alocador físico/virtual, que fica fora deste crate.
//!
//! - `DmaAllocator`: memória fisicamente contígua que o hardware acessa por
//!   DMA (descritores e buffers de pacote).
//! - `MmioMapper`: mapeia a janela de registradores de um BAR.
//!
//! Nenhuma região é devolvida: anéis vivem enquanto o driver viver.

use crate::mm::{MmResult, PhysAddr};
use core::ptr::NonNull;

/// Região DMA: mesmo bloco visto pelo hardware (`phys`) e pelo software (`virt`)
#[derive(Debug)]
pub struct DmaRegion {
    phys: PhysAddr,
    virt: NonNull<u8>,
    len: usize,
}

impl DmaRegion {
    /// Descreve uma região já alocada.
    ///
    /// # Safety
    /// `virt` deve apontar para `len` bytes válidos, zerados, fisicamente
    /// contíguos a partir de `phys`, e que nunca serão liberados.
    pub unsafe fn new(phys: PhysAddr, virt: NonNull<u8>, len: usize) -> Self {
        Self { phys, virt, len }
    }

    #[inline]
    pub fn phys(&self) -> PhysAddr {
        self.phys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Endereço físico de `offset` dentro da região
    #[inline]
    pub fn phys_at(&self, offset: usize) -> PhysAddr {
        debug_assert!(offset < self.len);
        self.phys.add(offset as u64)
    }

    /// Ponteiro para `offset` dentro da região
    #[inline]
    pub fn ptr_at(&self, offset: usize) -> NonNull<u8> {
        debug_assert!(offset < self.len);
        // SAFETY: offset dentro da região, que não é nula
        unsafe { NonNull::new_unchecked(self.virt.as_ptr().add(offset)) }
    }
}

/// Alocador de memória DMA
pub trait DmaAllocator {
    /// Aloca `bytes` (arredondado para páginas), zerado e alinhado a página.
    fn alloc_dma(&mut self, bytes: usize) -> MmResult<DmaRegion>;
}

/// Mapeador da janela MMIO de um dispositivo
pub trait MmioMapper {
    /// Mapeia `size` bytes a partir de `phys` como memória não cacheável.
    fn map_mmio(&mut self, phys: PhysAddr, size: usize) -> MmResult<NonNull<u8>>;
}
