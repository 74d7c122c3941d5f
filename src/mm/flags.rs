//! # Flags de Page Table
//!
//! Bits de permissão de uma PTE de usuário e o marcador COW.
//!
//! O bit COW é um dos bits AVAIL (9-11), que o hardware ignora e o
//! kernel deixa livres para o software de usuário.

use crate::mm::PhysAddr;
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Flags de mapeamento de página
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PteFlags: u64 {
        /// Presente
        const PRESENT = 1 << 0;
        /// Escrita permitida
        const WRITABLE = 1 << 1;
        /// Acessível em user mode
        const USER = 1 << 2;
        /// Write-through
        const WRITE_THROUGH = 1 << 3;
        /// Cache desabilitado
        const NO_CACHE = 1 << 4;
        /// Acessada
        const ACCESSED = 1 << 5;
        /// Dirty
        const DIRTY = 1 << 6;
        /// Copy-on-write (bit AVAIL 11, ignorado pelo hardware)
        const COW = 1 << 11;
        /// Todos os bits AVAIL
        const AVAIL = 0b111 << 9;
    }
}

impl PteFlags {
    /// Bits que uma syscall de mapeamento aceita
    pub const SYSCALL: PteFlags = PteFlags::PRESENT
        .union(PteFlags::WRITABLE)
        .union(PteFlags::USER)
        .union(PteFlags::AVAIL);

    /// Mapeamento compartilhado copy-on-write: {P, U, COW}, nunca W
    pub const COW_SHARED: PteFlags = PteFlags::PRESENT
        .union(PteFlags::USER)
        .union(PteFlags::COW);

    /// Página privada de usuário: {P, U, W}
    pub const USER_RW: PteFlags = PteFlags::PRESENT
        .union(PteFlags::USER)
        .union(PteFlags::WRITABLE);

    /// Página de usuário somente leitura: {P, U}
    pub const USER_RO: PteFlags = PteFlags::PRESENT.union(PteFlags::USER);

    /// Flags aceitáveis por `page_map`/`page_alloc`
    ///
    /// P e U são obrigatórios; nada fora de `SYSCALL`.
    #[inline]
    pub fn is_valid_user_perm(self) -> bool {
        self.contains(PteFlags::USER_RO) && PteFlags::SYSCALL.contains(self)
    }
}

/// Máscara para extrair endereço físico de PTE
pub const PTE_ADDR_MASK: u64 = 0x000F_FFFF_FFFF_F000;

/// Máscara das flags dentro de uma PTE
pub const PTE_FLAGS_MASK: u64 = 0xFFF;

/// Entrada bruta de page table (ou page directory)
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Pte(u64);

impl Pte {
    /// Entrada vazia (não presente)
    pub const EMPTY: Pte = Pte(0);

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn new(frame: PhysAddr, flags: PteFlags) -> Self {
        Self((frame.as_u64() & PTE_ADDR_MASK) | (flags.bits() & PTE_FLAGS_MASK))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Frame físico apontado pela entrada
    #[inline]
    pub const fn addr(self) -> PhysAddr {
        PhysAddr::new(self.0 & PTE_ADDR_MASK)
    }

    #[inline]
    pub fn flags(self) -> PteFlags {
        PteFlags::from_bits_truncate(self.0 & PTE_FLAGS_MASK)
    }

    #[inline]
    pub fn is_present(self) -> bool {
        self.flags().contains(PteFlags::PRESENT)
    }

    #[inline]
    pub fn is_user(self) -> bool {
        self.flags().contains(PteFlags::USER)
    }

    #[inline]
    pub fn is_writable(self) -> bool {
        self.flags().contains(PteFlags::WRITABLE)
    }

    #[inline]
    pub fn is_cow(self) -> bool {
        self.flags().contains(PteFlags::COW)
    }
}

impl fmt::Debug for Pte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pte")
            .field("addr", &self.addr())
            .field("flags", &self.flags())
            .finish()
    }
}
