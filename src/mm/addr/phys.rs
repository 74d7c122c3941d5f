use crate::mm::config::{align_down, is_aligned, PAGE_SIZE};
use core::fmt;

/// Endereço físico (wrapper type-safe)
///
/// É o que vai para os registradores e descritores do DMA.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PhysAddr(u64);

impl PhysAddr {
    /// Cria novo endereço físico
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Retorna o valor interno como u64
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Retorna o valor interno como usize
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Metade baixa (registradores *BAL)
    #[inline]
    pub const fn low_u32(self) -> u32 {
        self.0 as u32
    }

    /// Metade alta (registradores *BAH)
    #[inline]
    pub const fn high_u32(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Alinha para baixo (múltiplo de align)
    #[inline]
    pub fn align_down(self, align: u64) -> Self {
        Self(align_down(self.0 as usize, align as usize) as u64)
    }

    /// Verifica alinhamento
    #[inline]
    pub fn is_aligned(self, align: u64) -> bool {
        is_aligned(self.0 as usize, align as usize)
    }

    /// Verifica alinhamento a página
    #[inline]
    pub fn is_page_aligned(self) -> bool {
        self.is_aligned(PAGE_SIZE as u64)
    }

    /// Verifica se é nulo
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Adiciona offset
    #[inline]
    pub const fn add(self, offset: u64) -> Self {
        Self(self.0 + offset)
    }
}

impl fmt::Debug for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysAddr({:#x})", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
