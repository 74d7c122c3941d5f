//! Anel de descritores sobre memória DMA.
//!
//! Cada anel tem duas regiões: o array de `N` descritores e `N` buffers de
//! pacote com passo fixo. O descritor `i` aponta para sempre ao buffer `i`.

use super::error::{E1000Error, Result};
use crate::mm::{DmaAllocator, DmaRegion, MmError, PhysAddr};
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr::NonNull;
use volatile::VolatilePtr;

/// Índice dentro de um anel de `N` posições (sempre `< N`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingIndex<const N: usize>(usize);

impl<const N: usize> RingIndex<N> {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn new(i: usize) -> Self {
        Self(i % N)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Próxima posição, com volta ao início
    #[inline]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % N)
    }
}

pub struct DescRing<D: Copy, const N: usize> {
    descs: DmaRegion,
    bufs: DmaRegion,
    stride: usize,
    _desc: PhantomData<D>,
}

impl<D: Copy, const N: usize> DescRing<D, N> {
    // RDLEN/TDLEN precisam ser múltiplos de 128 bytes
    const GEOMETRY_OK: () = assert!(N >= 8 && (N * size_of::<D>()) % 128 == 0);

    pub fn new<A: DmaAllocator + ?Sized>(dma: &mut A, stride: usize) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::GEOMETRY_OK;

        let descs = dma
            .alloc_dma(N * size_of::<D>())
            .map_err(E1000Error::DmaAllocationFailed)?;
        let bufs = dma
            .alloc_dma(N * stride)
            .map_err(E1000Error::DmaAllocationFailed)?;

        // O hardware exige base alinhada a 16 bytes
        if !descs.phys().is_aligned(16)
            || descs.len() < N * size_of::<D>()
            || bufs.len() < N * stride
        {
            return Err(E1000Error::DmaAllocationFailed(MmError::InvalidSize));
        }

        Ok(Self {
            descs,
            bufs,
            stride,
            _desc: PhantomData,
        })
    }

    /// Endereço físico do array de descritores (TDBAL/RDBAL)
    #[inline]
    pub fn base(&self) -> PhysAddr {
        self.descs.phys()
    }

    /// Tamanho em bytes do array de descritores (TDLEN/RDLEN)
    #[inline]
    pub const fn len_bytes() -> u32 {
        (N * size_of::<D>()) as u32
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn desc_ptr(&self, i: RingIndex<N>) -> NonNull<D> {
        self.descs.ptr_at(i.get() * size_of::<D>()).cast::<D>()
    }

    /// Lê o descritor `i` (o hardware pode escrevê-lo a qualquer momento)
    #[inline]
    pub fn read(&self, i: RingIndex<N>) -> D {
        // SAFETY: índice < N, região alinhada a página
        unsafe { VolatilePtr::new(self.desc_ptr(i)).read() }
    }

    #[inline]
    pub fn write(&mut self, i: RingIndex<N>, desc: D) {
        // SAFETY: índice < N, região alinhada a página
        unsafe { VolatilePtr::new(self.desc_ptr(i)).write(desc) }
    }

    /// Endereço físico do buffer do slot `i`
    #[inline]
    pub fn buffer_phys(&self, i: RingIndex<N>) -> PhysAddr {
        self.bufs.phys_at(i.get() * self.stride)
    }

    /// Copia `data` para o buffer do slot `i`
    pub fn fill_buffer(&mut self, i: RingIndex<N>, data: &[u8]) {
        debug_assert!(data.len() <= self.stride);
        let dst = self.bufs.ptr_at(i.get() * self.stride);
        // SAFETY: o slot pertence ao software (DD=1) e data cabe no passo
        unsafe { core::ptr::copy_nonoverlapping(data.as_ptr(), dst.as_ptr(), data.len()) }
    }

    /// Copia os primeiros `out.len()` bytes do buffer do slot `i`
    pub fn drain_buffer(&self, i: RingIndex<N>, out: &mut [u8]) {
        debug_assert!(out.len() <= self.stride);
        let src = self.bufs.ptr_at(i.get() * self.stride);
        // SAFETY: o slot pertence ao software (DD=1) e out cabe no passo
        unsafe { core::ptr::copy_nonoverlapping(src.as_ptr(), out.as_mut_ptr(), out.len()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_wraps_at_ring_size() {
        let last = RingIndex::<32>::new(31);
        assert_eq!(last.next(), RingIndex::ZERO);
        assert_eq!(RingIndex::<32>::new(33).get(), 1);
    }

    #[test]
    fn ring_length_is_in_bytes() {
        use crate::drivers::net::e1000::desc::{RxDesc, TxDesc};
        assert_eq!(DescRing::<TxDesc, 32>::len_bytes(), 512);
        assert_eq!(DescRing::<RxDesc, 128>::len_bytes(), 2048);
    }
}
