//! # Cliente de Syscalls (lado do usuário)
//!
//! `Syscalls` é a interface que o fork e o handler COW consomem do kernel.
//! `TrapSyscalls` é a implementação real: codifica cada chamada no
//! `SyscallArgs`, entrega ao transporte (instrução de trap) e decodifica o
//! retorno negativo em `SysError`.

use crate::mm::{PteFlags, VirtAddr};
use crate::sys::{EnvId, EnvStatus, ForkResult};
use crate::syscall::abi::SyscallArgs;
use crate::syscall::error::{SysError, SysResult};
use crate::syscall::numbers::*;

/// Operações de espaço de endereçamento e de processo oferecidas pelo kernel.
///
/// Em todas as chamadas `EnvId::CURRENT` designa o próprio chamador.
pub trait Syscalls {
    /// Id do environment atual
    fn getenvid(&mut self) -> EnvId;

    /// Aloca uma página zerada e mapeia em `va` de `env` com `perm`.
    ///
    /// Substitui silenciosamente um mapeamento existente.
    fn page_alloc(&mut self, env: EnvId, va: VirtAddr, perm: PteFlags) -> SysResult<()>;

    /// Mapeia o frame de `src_va` em `src_env` para `dst_va` em `dst_env`.
    ///
    /// Falha se a origem não estiver mapeada ou se `perm` pedir escrita
    /// sobre uma origem somente leitura.
    fn page_map(
        &mut self,
        src_env: EnvId,
        src_va: VirtAddr,
        dst_env: EnvId,
        dst_va: VirtAddr,
        perm: PteFlags,
    ) -> SysResult<()>;

    /// Remove o mapeamento de `va` em `env` (silencioso se não houver)
    fn page_unmap(&mut self, env: EnvId, va: VirtAddr) -> SysResult<()>;

    /// Cria um environment filho vazio e NOT_RUNNABLE
    fn exofork(&mut self) -> SysResult<ForkResult>;

    fn env_set_status(&mut self, env: EnvId, status: EnvStatus) -> SysResult<()>;

    /// Registra `entry` como upcall de page fault de `env`
    fn env_set_pgfault_upcall(&mut self, env: EnvId, entry: VirtAddr) -> SysResult<()>;
}

/// Transporte bruto: executa a instrução de trap com os argumentos dados.
pub trait RawTransport {
    fn invoke(&mut self, args: SyscallArgs) -> isize;
}

/// Implementação de `Syscalls` sobre um transporte bruto
pub struct TrapSyscalls<T: RawTransport> {
    transport: T,
}

impl<T: RawTransport> TrapSyscalls<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call(&mut self, num: usize, args: &[usize]) -> SysResult<usize> {
        let ret = self.transport.invoke(SyscallArgs::new(num, args));
        if ret < 0 {
            return Err(SysError::from_code(ret).unwrap_or(SysError::Unspecified));
        }
        Ok(ret as usize)
    }
}

#[inline]
fn env(e: EnvId) -> usize {
    e.as_u32() as usize
}

#[inline]
fn va(v: VirtAddr) -> usize {
    v.as_usize()
}

#[inline]
fn perm(p: PteFlags) -> usize {
    p.bits() as usize
}

impl<T: RawTransport> Syscalls for TrapSyscalls<T> {
    fn getenvid(&mut self) -> EnvId {
        // getenvid não falha
        let ret = self.transport.invoke(SyscallArgs::new(SYS_GETENVID, &[]));
        EnvId::new(ret as u32)
    }

    fn page_alloc(&mut self, e: EnvId, v: VirtAddr, p: PteFlags) -> SysResult<()> {
        self.call(SYS_PAGE_ALLOC, &[env(e), va(v), perm(p)]).map(|_| ())
    }

    fn page_map(
        &mut self,
        src_env: EnvId,
        src_va: VirtAddr,
        dst_env: EnvId,
        dst_va: VirtAddr,
        p: PteFlags,
    ) -> SysResult<()> {
        self.call(
            SYS_PAGE_MAP,
            &[env(src_env), va(src_va), env(dst_env), va(dst_va), perm(p)],
        )
        .map(|_| ())
    }

    fn page_unmap(&mut self, e: EnvId, v: VirtAddr) -> SysResult<()> {
        self.call(SYS_PAGE_UNMAP, &[env(e), va(v)]).map(|_| ())
    }

    fn exofork(&mut self) -> SysResult<ForkResult> {
        match self.call(SYS_EXOFORK, &[])? {
            0 => Ok(ForkResult::Child),
            id => Ok(ForkResult::Parent(EnvId::new(id as u32))),
        }
    }

    fn env_set_status(&mut self, e: EnvId, status: EnvStatus) -> SysResult<()> {
        self.call(SYS_ENV_SET_STATUS, &[env(e), status.as_u32() as usize])
            .map(|_| ())
    }

    fn env_set_pgfault_upcall(&mut self, e: EnvId, entry: VirtAddr) -> SysResult<()> {
        self.call(SYS_ENV_SET_PGFAULT_UPCALL, &[env(e), va(entry)])
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transporte que grava cada chamada e devolve respostas roteirizadas
    struct Recording {
        calls: Vec<SyscallArgs>,
        replies: Vec<isize>,
    }

    impl RawTransport for Recording {
        fn invoke(&mut self, args: SyscallArgs) -> isize {
            self.calls.push(args);
            if self.replies.is_empty() {
                0
            } else {
                self.replies.remove(0)
            }
        }
    }

    fn client(replies: &[isize]) -> TrapSyscalls<Recording> {
        TrapSyscalls::new(Recording {
            calls: Vec::new(),
            replies: replies.to_vec(),
        })
    }

    #[test]
    fn page_map_encodes_five_arguments() {
        let mut sys = client(&[0]);
        sys.page_map(
            EnvId::CURRENT,
            VirtAddr::new(0x80_0000),
            EnvId::new(0x1001),
            VirtAddr::new(0x80_0000),
            PteFlags::COW_SHARED,
        )
        .unwrap();

        let call = sys.transport().calls[0];
        assert_eq!(call.num, SYS_PAGE_MAP);
        assert_eq!(
            [call.arg1, call.arg2, call.arg3, call.arg4, call.arg5],
            [0, 0x80_0000, 0x1001, 0x80_0000, 0x805]
        );
    }

    #[test]
    fn negative_return_becomes_error() {
        let mut sys = client(&[SysError::NoMemory.as_isize(), -77]);
        assert_eq!(
            sys.page_alloc(EnvId::CURRENT, VirtAddr::new(0x1000), PteFlags::USER_RW),
            Err(SysError::NoMemory)
        );
        // Código desconhecido
        assert_eq!(
            sys.page_unmap(EnvId::CURRENT, VirtAddr::new(0x1000)),
            Err(SysError::Unspecified)
        );
    }

    #[test]
    fn exofork_zero_is_child_continuation() {
        let mut sys = client(&[0x1002, 0, SysError::NoFreeEnv.as_isize()]);
        assert_eq!(sys.exofork(), Ok(ForkResult::Parent(EnvId::new(0x1002))));
        assert_eq!(sys.exofork(), Ok(ForkResult::Child));
        assert_eq!(sys.exofork(), Err(SysError::NoFreeEnv));
    }

    #[test]
    fn set_status_and_upcall_encode_raw_values() {
        let mut sys = client(&[]);
        sys.env_set_status(EnvId::new(0x1001), EnvStatus::Runnable).unwrap();
        sys.env_set_pgfault_upcall(EnvId::new(0x1001), VirtAddr::new(0x0080_0040))
            .unwrap();

        let calls = &sys.transport().calls;
        assert_eq!(calls[0].num, SYS_ENV_SET_STATUS);
        assert_eq!(calls[0].arg2, 2);
        assert_eq!(calls[1].num, SYS_ENV_SET_PGFAULT_UPCALL);
        assert_eq!(calls[1].arg2, 0x0080_0040);
    }
}
