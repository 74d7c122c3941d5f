//! fork/duppage: política por página, exception stack, continuação do filho.

use super::sim::{layout::*, populated, store, SimKernel, PARENT, UPCALL};
use crate::mm::{PteFlags, VirtAddr, PFTEMP};
use crate::sys::{EnvId, EnvStatus, ForkResult};
use crate::syscall::{SysError, Syscalls};
use crate::ulib::fork::{duppage, try_fork};
use crate::ulib::UserEnv;

fn child_of(res: ForkResult) -> EnvId {
    match res {
        ForkResult::Parent(id) => id,
        ForkResult::Child => panic!("esperava a continuação do pai"),
    }
}

#[test]
fn writable_and_cow_pages_become_shared_cow() {
    let mut env = populated();
    let child = child_of(env.fork());
    let k = env.kernel();

    for va in [DATA, SHARED_COW, HEAP, STACK] {
        assert_eq!(k.flags(PARENT, va), Some(PteFlags::COW_SHARED), "pai {:#x}", va);
        assert_eq!(k.flags(child, va), Some(PteFlags::COW_SHARED), "filho {:#x}", va);
        assert_eq!(k.frame(PARENT, va), k.frame(child, va));
    }
}

#[test]
fn read_only_pages_are_shared_read_only() {
    let mut env = populated();
    let child = child_of(env.fork());
    let k = env.kernel();

    assert_eq!(k.flags(PARENT, TEXT), Some(PteFlags::USER_RO));
    assert_eq!(k.flags(child, TEXT), Some(PteFlags::USER_RO));
    assert_eq!(k.frame(PARENT, TEXT), k.frame(child, TEXT));
}

#[test]
fn no_writable_mapping_survives_fork_except_exception_stacks() {
    let mut env = populated();
    let child = child_of(env.fork());
    let k = env.kernel();

    assert_eq!(k.writable_in(PARENT), vec![XSTACK]);
    assert_eq!(k.writable_in(child), vec![XSTACK]);
}

#[test]
fn child_gets_private_exception_stack_and_upcall() {
    let mut env = populated();
    let child = child_of(env.fork());
    let k = env.kernel();

    assert_eq!(k.flags(child, XSTACK), Some(PteFlags::USER_RW));
    assert_ne!(k.frame(child, XSTACK), k.frame(PARENT, XSTACK));
    assert_eq!(k.upcall(child), Some(UPCALL));
    assert_eq!(k.upcall(PARENT), Some(UPCALL));
    assert_eq!(k.status(child), EnvStatus::Runnable);
    // Scratch do COW nunca vaza para o filho
    assert_eq!(k.mapping(child, PFTEMP), None);
}

#[test]
fn duppage_twice_is_idempotent() {
    let mut env = populated();
    let child = child_of(env.kernel_mut().exofork().unwrap());
    let k = env.kernel_mut();

    duppage(k, child, VirtAddr::new(DATA)).unwrap();
    let first = (k.mapping(PARENT, DATA), k.mapping(child, DATA));
    duppage(k, child, VirtAddr::new(DATA)).unwrap();
    let second = (k.mapping(PARENT, DATA), k.mapping(child, DATA));

    assert_eq!(first, second);
    assert_eq!(second.0.unwrap().flags, PteFlags::COW_SHARED);
}

#[test]
fn multi_page_stack_is_fully_shared() {
    let mut env = populated();
    let lower = STACK - 0x1000;
    env.kernel_mut().map_fresh(lower, PteFlags::USER_RW, 0x66);
    env.kernel_mut().sp = VirtAddr::new(lower + 0x800);

    let child = child_of(env.fork());
    let k = env.kernel();
    assert_eq!(k.flags(child, lower), Some(PteFlags::COW_SHARED));
    assert_eq!(k.flags(child, STACK), Some(PteFlags::COW_SHARED));
    assert_eq!(k.flags(PARENT, STACK), Some(PteFlags::COW_SHARED));
    assert_eq!(k.frame(child, STACK), k.frame(PARENT, STACK));
    assert_eq!(k.writable_in(PARENT), vec![XSTACK]);
}

#[test]
fn child_continuation_updates_this_env() {
    let mut env = populated();
    let me = EnvId::new(0x1009);
    env.kernel_mut().resume_as_child = Some(me);

    assert_eq!(env.fork(), ForkResult::Child);
    assert_eq!(env.this_env(), me);
    // Nada é duplicado pela continuação do filho
    assert!(env.kernel().envs[&me].pages.is_empty());
}

#[test]
fn parent_keeps_its_own_id() {
    let mut env = populated();
    env.fork();
    assert_eq!(env.this_env(), PARENT);
}

#[test]
fn exhausted_memory_leaves_child_not_runnable() {
    let mut env = populated();
    // Exception stack do pai ok, falta memória para a do filho
    env.kernel_mut().alloc_budget = Some(1);

    assert_eq!(try_fork(&mut env), Err(SysError::NoMemory));
    let k = env.kernel();
    let child = *k.envs.keys().find(|id| **id != PARENT).unwrap();
    assert_eq!(k.status(child), EnvStatus::NotRunnable);
}

#[test]
#[should_panic(expected = "fork: sem memória")]
fn fork_panics_on_exhausted_memory() {
    let mut env = populated();
    env.kernel_mut().alloc_budget = Some(1);
    env.fork();
}

#[test]
#[should_panic(expected = "fork: sem environments livres")]
fn fork_panics_when_no_env_is_free() {
    let mut env = populated();
    env.kernel_mut().env_limit = 1;
    env.fork();
}

#[test]
fn repeated_fork_keeps_sharing_cow() {
    let mut env = populated();
    let a = child_of(env.fork());
    let b = child_of(env.fork());
    let k = env.kernel();

    assert_eq!(k.frame(a, DATA), k.frame(b, DATA));
    assert_eq!(k.flags(b, DATA), Some(PteFlags::COW_SHARED));
    // Cada filho tem a própria exception stack
    assert_ne!(k.frame(a, XSTACK), k.frame(b, XSTACK));
}

#[test]
fn writes_after_fork_are_private_to_each_side() {
    let mut env = populated();
    let child = child_of(env.fork());

    store(&mut env, DATA + 8, 0xAB);
    assert_eq!(env.kernel().load(PARENT, DATA + 8), 0xAB);
    assert_eq!(env.kernel().load(child, DATA + 8), 0x22);

    env.kernel_mut().switch_to(child);
    let mut child_env = UserEnv::new(std::mem::replace(env.kernel_mut(), SimKernel::new()), UPCALL);
    child_env
        .set_pgfault_handler(crate::ulib::cow::pgfault::<SimKernel>)
        .unwrap();
    store(&mut child_env, DATA + 8, 0xCD);

    let k = child_env.kernel();
    assert_eq!(k.load(child, DATA + 8), 0xCD);
    assert_eq!(k.load(PARENT, DATA + 8), 0xAB);
    assert_ne!(k.frame(PARENT, DATA), k.frame(child, DATA));
}
