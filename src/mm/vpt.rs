//! # Visão das Page Tables
//!
//! Leitura (somente) das page tables do próprio processo.
//!
//! O kernel mapeia o page directory recursivamente em `UVPT`, de modo que
//! todas as PTEs do processo aparecem como um array linear (`uvpt[pn]`) e
//! todas as PDEs como outro (`uvpd[pdx]`). O fork e o handler COW usam esta
//! visão para decidir o que duplicar e para validar a falta.

use crate::mm::{Pte, VirtAddr};
use core::ptr::NonNull;
use volatile::VolatilePtr;

/// Janela recursiva das PTEs
pub const UVPT: u64 = 0xEF40_0000;

/// Janela recursiva das PDEs (a page table que mapeia a própria UVPT)
pub const UVPD: u64 = UVPT + (UVPT >> 12) * 4;

/// Visão somente leitura das page tables do processo atual
pub trait PageTableView {
    /// Entrada do page directory que cobre `va`
    fn pde(&self, va: VirtAddr) -> Pte;

    /// Entrada da page table para `va`
    ///
    /// Só tem significado se `pde(va)` estiver presente.
    fn pte(&self, va: VirtAddr) -> Pte;

    /// PTE de `va` se o diretório e a página estiverem presentes
    fn present_pte(&self, va: VirtAddr) -> Option<Pte> {
        if !self.pde(va).is_present() {
            return None;
        }
        let pte = self.pte(va);
        pte.is_present().then_some(pte)
    }
}

/// Visão através do mapeamento recursivo (PTEs de 32 bits)
pub struct RecursiveVpt {
    uvpt: NonNull<u32>,
    uvpd: NonNull<u32>,
}

impl RecursiveVpt {
    /// Usa as janelas padrão `UVPT`/`UVPD`.
    ///
    /// # Safety
    /// O kernel deve ter mapeado o page directory recursivamente em `UVPT`
    /// com permissão de leitura para o usuário.
    pub unsafe fn new() -> Self {
        Self::at(UVPT, UVPD)
    }

    /// Usa janelas em endereços arbitrários.
    ///
    /// # Safety
    /// Mesmas condições de `new`, para os endereços dados.
    pub unsafe fn at(uvpt: u64, uvpd: u64) -> Self {
        Self {
            uvpt: NonNull::new_unchecked(uvpt as usize as *mut u32),
            uvpd: NonNull::new_unchecked(uvpd as usize as *mut u32),
        }
    }

    #[inline]
    fn read(base: NonNull<u32>, index: u64) -> Pte {
        // SAFETY: a janela recursiva cobre todo o espaço de usuário
        let entry = unsafe {
            let ptr = NonNull::new_unchecked(base.as_ptr().add(index as usize));
            VolatilePtr::new(ptr).read()
        };
        Pte::from_raw(entry as u64)
    }
}

impl PageTableView for RecursiveVpt {
    fn pde(&self, va: VirtAddr) -> Pte {
        Self::read(self.uvpd, va.pd_index())
    }

    fn pte(&self, va: VirtAddr) -> Pte {
        Self::read(self.uvpt, va.page_number())
    }
}
