//! Colaboradores reais de um processo rodando sobre o kernel.
//!
//! - syscalls via `TrapSyscalls` sobre o transporte dado (instrução de trap)
//! - page tables lidas pela janela recursiva `uvpt`/`uvpd`
//! - cópia de página por acesso direto à memória

use super::UserMemory;
use crate::mm::{PageTableView, Pte, PteFlags, RecursiveVpt, VirtAddr, PAGE_SIZE};
use crate::sys::{EnvId, EnvStatus, ForkResult};
use crate::syscall::{RawTransport, SysResult, Syscalls, TrapSyscalls};

pub struct Native<T: RawTransport> {
    sys: TrapSyscalls<T>,
    vpt: RecursiveVpt,
}

impl<T: RawTransport> Native<T> {
    /// # Safety
    /// `vpt` deve refletir as page tables do processo atual e as páginas
    /// passadas a `copy_page` devem estar mapeadas com as permissões certas.
    pub unsafe fn new(transport: T, vpt: RecursiveVpt) -> Self {
        Self {
            sys: TrapSyscalls::new(transport),
            vpt,
        }
    }

    pub fn syscalls(&self) -> &TrapSyscalls<T> {
        &self.sys
    }
}

impl<T: RawTransport> Syscalls for Native<T> {
    fn getenvid(&mut self) -> EnvId {
        self.sys.getenvid()
    }

    fn page_alloc(&mut self, env: EnvId, va: VirtAddr, perm: PteFlags) -> SysResult<()> {
        self.sys.page_alloc(env, va, perm)
    }

    fn page_map(
        &mut self,
        src_env: EnvId,
        src_va: VirtAddr,
        dst_env: EnvId,
        dst_va: VirtAddr,
        perm: PteFlags,
    ) -> SysResult<()> {
        self.sys.page_map(src_env, src_va, dst_env, dst_va, perm)
    }

    fn page_unmap(&mut self, env: EnvId, va: VirtAddr) -> SysResult<()> {
        self.sys.page_unmap(env, va)
    }

    fn exofork(&mut self) -> SysResult<ForkResult> {
        self.sys.exofork()
    }

    fn env_set_status(&mut self, env: EnvId, status: EnvStatus) -> SysResult<()> {
        self.sys.env_set_status(env, status)
    }

    fn env_set_pgfault_upcall(&mut self, env: EnvId, entry: VirtAddr) -> SysResult<()> {
        self.sys.env_set_pgfault_upcall(env, entry)
    }
}

impl<T: RawTransport> PageTableView for Native<T> {
    fn pde(&self, va: VirtAddr) -> Pte {
        self.vpt.pde(va)
    }

    fn pte(&self, va: VirtAddr) -> Pte {
        self.vpt.pte(va)
    }
}

impl<T: RawTransport> UserMemory for Native<T> {
    fn copy_page(&mut self, dst: VirtAddr, src: VirtAddr) {
        // SAFETY: contrato de `Native::new`; PFTEMP e a página da falta
        // nunca se sobrepõem
        unsafe {
            core::ptr::copy_nonoverlapping(
                src.as_ptr::<u8>(),
                dst.as_mut_ptr::<u8>(),
                PAGE_SIZE,
            );
        }
    }

    #[inline(never)]
    fn stack_pointer(&self) -> VirtAddr {
        // Endereço de uma local: está na página de pilha em uso
        let marker = 0u8;
        VirtAddr::new(core::ptr::addr_of!(marker) as usize as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syscall::abi::SyscallArgs;
    use crate::syscall::numbers::SYS_PAGE_UNMAP;

    #[derive(Default)]
    struct Last(Option<SyscallArgs>);

    impl RawTransport for Last {
        fn invoke(&mut self, args: SyscallArgs) -> isize {
            self.0 = Some(args);
            0
        }
    }

    fn native(ptes: &mut [u32], pdes: &mut [u32]) -> Native<Last> {
        unsafe {
            let vpt = RecursiveVpt::at(ptes.as_mut_ptr() as u64, pdes.as_mut_ptr() as u64);
            Native::new(Last::default(), vpt)
        }
    }

    #[test]
    fn syscalls_go_through_the_transport() {
        let (mut ptes, mut pdes) = (vec![0u32; 16], vec![0u32; 1]);
        let mut n = native(&mut ptes, &mut pdes);
        n.page_unmap(EnvId::CURRENT, VirtAddr::new(0x7F_F000)).unwrap();

        let args = n.syscalls().transport().0.unwrap();
        assert_eq!(args.num, SYS_PAGE_UNMAP);
        assert_eq!(args.arg2, 0x7F_F000);
    }

    #[test]
    fn copy_page_copies_a_whole_page() {
        let (mut ptes, mut pdes) = (vec![0u32; 16], vec![0u32; 1]);
        let mut n = native(&mut ptes, &mut pdes);

        let src: Vec<u8> = (0..PAGE_SIZE).map(|i| i as u8).collect();
        let mut dst = vec![0u8; PAGE_SIZE];
        n.copy_page(
            VirtAddr::new(dst.as_mut_ptr() as u64),
            VirtAddr::new(src.as_ptr() as u64),
        );
        assert_eq!(src, dst);
    }

    #[test]
    fn stack_pointer_is_on_the_current_stack() {
        let (mut ptes, mut pdes) = (vec![0u32; 16], vec![0u32; 1]);
        let n = native(&mut ptes, &mut pdes);
        let local = 0u64;
        let here = core::ptr::addr_of!(local) as u64;
        let sp = n.stack_pointer().as_u64();
        // Mesmo stack, poucos frames de distância
        assert!(sp.abs_diff(here) < 64 * 1024);
    }
}
