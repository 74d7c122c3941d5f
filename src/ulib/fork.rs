//! # Fork Copy-on-Write
//!
//! ## Algoritmo
//!
//! 1. Instala `cow::pgfault` como handler de falta (idempotente).
//! 2. `exofork`: no filho, atualiza `this_env` e retorna `Child`.
//! 3. No pai, percorre `[0, USTACKTOP)` e aplica `duppage` a
//!    toda página presente e de usuário. Page tables ausentes são puladas
//!    de uma vez (4 MiB).
//! 4. Aplica `duppage` de novo à página que contém o stack pointer atual.
//! 5. Aloca uma exception stack nova e privada para o filho.
//! 6. Registra o trampolim de falta no filho e o marca RUNNABLE.
//!
//! Qualquer falha é fatal. O filho só fica RUNNABLE no último passo, então
//! um filho pela metade nunca executa.
//!
//! ## Política por Página (`duppage`)
//!
//! | Página no pai    | Filho       | Pai (remapeado) |
//! |------------------|-------------|-----------------|
//! | W ou COW         | P\|U\|COW   | P\|U\|COW       |
//! | somente leitura  | P\|U        | inalterado      |

use super::env::UserEnv;
use super::{cow, UserKernel, UserMemory};
use crate::mm::config::PT_SPAN;
use crate::mm::{PageTableView, PteFlags, VirtAddr, PAGE_SIZE, USTACKTOP, UXSTACKTOP};
use crate::sys::{EnvId, EnvStatus};
use crate::syscall::{SysError, SysResult, Syscalls};

pub use crate::sys::ForkResult;

/// Estabelece `va` como COW compartilhado entre o processo atual e `child`.
///
/// O filho é mapeado primeiro. O remapeamento do próprio processo é feito
/// sempre, mesmo se a página já era COW: entre as duas chamadas este
/// processo pode ter privatizado a página por outra falta, e o remapeamento
/// mantém os dois lados consistentes.
pub fn share_cow<S: Syscalls + ?Sized>(k: &mut S, va: VirtAddr, child: EnvId) -> SysResult<()> {
    k.page_map(EnvId::CURRENT, va, child, va, PteFlags::COW_SHARED)?;
    k.page_map(EnvId::CURRENT, va, EnvId::CURRENT, va, PteFlags::COW_SHARED)
}

/// Duplica a página `va` no filho conforme a política COW.
pub fn duppage<K: UserKernel + ?Sized>(k: &mut K, child: EnvId, va: VirtAddr) -> SysResult<()> {
    let flags = k.pte(va).flags();

    if flags.intersects(PteFlags::WRITABLE | PteFlags::COW) {
        share_cow(k, va, child)
    } else {
        k.page_map(EnvId::CURRENT, va, child, va, PteFlags::USER_RO)
    }
}

/// Percorre o espaço de usuário até o topo da pilha e duplica cada página.
///
/// Retorna quantas páginas o laço duplicou.
fn dup_address_space<K: UserKernel + ?Sized>(k: &mut K, child: EnvId) -> SysResult<usize> {
    let limit = USTACKTOP;
    let mut va = VirtAddr::new(0);
    let mut copied = 0;

    while va.as_u64() < limit {
        if !k.pde(va).is_present() {
            va = va.add(1).align_up(PT_SPAN as u64);
            continue;
        }
        let pte = k.pte(va);
        if pte.is_present() && pte.is_user() {
            duppage(k, child, va)?;
            copied += 1;
        }
        va = va.add(PAGE_SIZE as u64);
    }

    // O pai escreve na pilha durante o laço e pode ter privatizado essa página
    let sp_page = k.stack_pointer().page_base();
    duppage(k, child, sp_page)?;

    Ok(copied)
}

/// Fork sem abortar: devolve o erro da primeira primitiva que falhar.
///
/// Em caso de erro no pai, o filho já criado fica NOT_RUNNABLE.
pub fn try_fork<K: UserKernel>(env: &mut UserEnv<K>) -> SysResult<ForkResult> {
    env.set_pgfault_handler(cow::pgfault::<K>)?;

    let child = match env.kernel_mut().exofork()? {
        ForkResult::Child => {
            let me = env.kernel_mut().getenvid();
            env.set_this_env(me);
            return Ok(ForkResult::Child);
        }
        ForkResult::Parent(child) => child,
    };
    crate::kdebug!("(Fork) Filho criado ", child.as_u32());

    let upcall = env.upcall_entry();
    let k = env.kernel_mut();

    let pages = dup_address_space(k, child)?;
    crate::kdebug!("(Fork) Páginas duplicadas ", pages);

    let xstack = VirtAddr::new(UXSTACKTOP - PAGE_SIZE as u64);
    k.page_alloc(child, xstack, PteFlags::USER_RW)?;
    k.env_set_pgfault_upcall(child, upcall)?;
    k.env_set_status(child, EnvStatus::Runnable)?;

    crate::kinfo!("(Fork) Filho pronto ", child.as_u32());
    Ok(ForkResult::Parent(child))
}

/// Fork copy-on-write.
///
/// Retorna `Parent(id_do_filho)` no pai e `Child` no filho. Falta de
/// recursos é fatal.
pub fn fork<K: UserKernel>(env: &mut UserEnv<K>) -> ForkResult {
    match try_fork(env) {
        Ok(res) => res,
        Err(e) => {
            crate::kerror!("(Fork) Falhou, erro=", e.as_isize());
            fatal(e)
        }
    }
}

fn fatal(e: SysError) -> ! {
    panic!("fork: {}", e)
}
