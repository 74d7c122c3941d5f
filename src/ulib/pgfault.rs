//! Registro de page fault entregue ao upcall de usuário.

use crate::mm::VirtAddr;

bitflags::bitflags! {
    /// Error code empilhado pelo processador em um #PF
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FaultErr: u32 {
        /// Violação de proteção (página presente)
        const PRESENT = 1 << 0;
        /// Acesso de escrita
        const WRITE = 1 << 1;
        /// Acesso a partir de user mode
        const USER = 1 << 2;
    }
}

/// Registradores de uso geral na ordem do `pushal`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushRegs {
    pub edi: u32,
    pub esi: u32,
    pub ebp: u32,
    pub esp_unused: u32,
    pub ebx: u32,
    pub edx: u32,
    pub ecx: u32,
    pub eax: u32,
}

/// Frame que o kernel empilha na exception stack antes do upcall
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UTrapframe {
    pub fault_va: u32,
    pub err: u32,
    pub regs: PushRegs,
    pub eip: u32,
    pub eflags: u32,
    pub esp: u32,
}

impl UTrapframe {
    /// Frame mínimo: só endereço e error code
    pub fn new(fault_va: VirtAddr, err: FaultErr) -> Self {
        Self {
            fault_va: fault_va.as_u64() as u32,
            err: err.bits(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn fault_addr(&self) -> VirtAddr {
        VirtAddr::new(self.fault_va as u64)
    }

    #[inline]
    pub fn error(&self) -> FaultErr {
        FaultErr::from_bits_truncate(self.err)
    }

    #[inline]
    pub fn is_write(&self) -> bool {
        self.error().contains(FaultErr::WRITE)
    }
}

const _: () = assert!(core::mem::size_of::<UTrapframe>() == 52);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_decodes_write() {
        let utf = UTrapframe::new(VirtAddr::new(0x0080_2004), FaultErr::WRITE | FaultErr::USER);
        assert!(utf.is_write());
        assert_eq!(utf.err, 0x6);
        assert_eq!(utf.fault_addr().page_base(), VirtAddr::new(0x0080_2000));
    }

    #[test]
    fn unknown_bits_are_ignored() {
        let mut utf = UTrapframe::default();
        utf.err = 0x8 | 0x1;
        assert_eq!(utf.error(), FaultErr::PRESENT);
        assert!(!utf.is_write());
    }
}
