//! Estado de userspace do processo.
//!
//! Substitui as variáveis globais clássicas (`thisenv`, handler de falta)
//! por um valor explícito, criado no início do programa e passado a quem
//! precisa dele.

use super::pgfault::UTrapframe;
use super::UserKernel;
use crate::mm::{PteFlags, VirtAddr, PAGE_SIZE, UXSTACKTOP};
use crate::sys::{EnvId, ForkResult};
use crate::syscall::{SysResult, Syscalls};

/// Handler de page fault de usuário
pub type PgFaultHandler<K> = fn(&mut K, &UTrapframe);

pub struct UserEnv<K: UserKernel> {
    kernel: K,
    this_env: EnvId,
    handler: Option<PgFaultHandler<K>>,
    upcall_entry: VirtAddr,
}

impl<K: UserKernel> UserEnv<K> {
    /// `upcall_entry` é o trampolim em assembly que o kernel chama na falta;
    /// ele salva o contexto e chama `dispatch_fault`.
    pub fn new(mut kernel: K, upcall_entry: VirtAddr) -> Self {
        let this_env = kernel.getenvid();
        Self {
            kernel,
            this_env,
            handler: None,
            upcall_entry,
        }
    }

    /// Id do environment em que este código está rodando
    #[inline]
    pub fn this_env(&self) -> EnvId {
        self.this_env
    }

    #[inline]
    pub fn upcall_entry(&self) -> VirtAddr {
        self.upcall_entry
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    pub fn has_pgfault_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Instala `handler` como tratador de page faults deste processo.
    ///
    /// Na primeira instalação aloca a exception stack
    /// (`UXSTACKTOP - PAGE_SIZE`) e registra o trampolim no kernel. Depois
    /// disso só troca o handler.
    pub fn set_pgfault_handler(&mut self, handler: PgFaultHandler<K>) -> SysResult<()> {
        if self.handler.is_none() {
            let xstack = VirtAddr::new(UXSTACKTOP - PAGE_SIZE as u64);
            self.kernel
                .page_alloc(EnvId::CURRENT, xstack, PteFlags::USER_RW)?;
            self.kernel
                .env_set_pgfault_upcall(EnvId::CURRENT, self.upcall_entry)?;
            crate::kdebug!("(PgFault) Exception stack em ", xstack.as_u64());
        }
        self.handler = Some(handler);
        Ok(())
    }

    /// Chamado pelo trampolim com o frame empilhado pelo kernel.
    pub fn dispatch_fault(&mut self, utf: &UTrapframe) {
        match self.handler {
            Some(handler) => handler(&mut self.kernel, utf),
            None => {
                crate::kerror!("(PgFault) Falta sem handler em ", utf.fault_va);
                panic!("pgfault: nenhum handler instalado (va={:#x})", utf.fault_va);
            }
        }
    }

    /// Fork copy-on-write. Ver `ulib::fork::fork`.
    pub fn fork(&mut self) -> ForkResult {
        super::fork::fork(self)
    }

    pub(super) fn set_this_env(&mut self, id: EnvId) {
        self.this_env = id;
    }
}
