//! Janela de registradores MMIO.
//!
//! Todo acesso é volatile e de 32 bits. O tamanho da janela é validado uma
//! única vez na construção contra `WINDOW_MIN`; depois disso nenhum
//! `Reg` do mapa pode cair fora dela.

use super::error::{E1000Error, Result};
use super::regs::{Reg, WINDOW_MIN};
use core::ptr::NonNull;
use volatile::VolatilePtr;

pub struct RegisterWindow {
    base: NonNull<u8>,
    len: usize,
}

impl RegisterWindow {
    /// Cria a janela sobre `len` bytes mapeados em `base`.
    ///
    /// # Safety
    /// `base` deve apontar para a janela MMIO do dispositivo (ou memória
    /// equivalente), mapeada e válida por toda a vida do driver.
    pub unsafe fn new(base: NonNull<u8>, len: usize) -> Result<Self> {
        if len < WINDOW_MIN {
            return Err(E1000Error::WindowTooSmall);
        }
        if (base.as_ptr() as usize) & 0x3 != 0 {
            return Err(E1000Error::MisalignedWindow);
        }
        Ok(Self { base, len })
    }

    #[inline]
    fn reg_ptr(&self, reg: Reg) -> NonNull<u32> {
        debug_assert!(reg.offset() + 4 <= self.len);
        // SAFETY: offset validado contra a janela na construção
        unsafe { NonNull::new_unchecked(self.base.as_ptr().add(reg.offset()).cast::<u32>()) }
    }

    #[inline]
    pub fn read(&self, reg: Reg) -> u32 {
        // SAFETY: ponteiro alinhado dentro da janela
        unsafe { VolatilePtr::new(self.reg_ptr(reg)).read() }
    }

    #[inline]
    pub fn write(&self, reg: Reg, value: u32) {
        // SAFETY: ponteiro alinhado dentro da janela
        unsafe { VolatilePtr::new(self.reg_ptr(reg)).write(value) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
