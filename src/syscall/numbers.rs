//! # Syscall Numbers Registry
//!
//! Números das syscalls usadas por este crate.
//!
//! | Número | Syscall                    | Lado      |
//! |--------|----------------------------|-----------|
//! | 2      | getenvid                   | usuário   |
//! | 4-6    | page_alloc/map/unmap       | usuário   |
//! | 7      | exofork                    | usuário   |
//! | 8      | env_set_status             | usuário   |
//! | 10     | env_set_pgfault_upcall     | usuário   |
//! | 15-16  | net_transmit / net_recv    | kernel    |

/// Retorna o id do environment atual.
/// Args: nenhum
pub const SYS_GETENVID: usize = 2;

/// Aloca uma página zerada e mapeia em (env, va).
/// Args: (envid, va, perm)
pub const SYS_PAGE_ALLOC: usize = 4;

/// Mapeia o frame de (srcenv, srcva) em (dstenv, dstva).
/// Args: (srcenv, srcva, dstenv, dstva, perm)
pub const SYS_PAGE_MAP: usize = 5;

/// Remove o mapeamento de (env, va). Silencioso se não houver.
/// Args: (envid, va)
pub const SYS_PAGE_UNMAP: usize = 6;

/// Cria um environment filho vazio, NOT_RUNNABLE, com os registradores do pai.
/// Retorno: id do filho no pai, 0 no filho
pub const SYS_EXOFORK: usize = 7;

/// Altera o estado de escalonamento.
/// Args: (envid, status)
pub const SYS_ENV_SET_STATUS: usize = 8;

/// Registra o ponto de entrada do upcall de page fault.
/// Args: (envid, entry)
pub const SYS_ENV_SET_PGFAULT_UPCALL: usize = 10;

/// Enfileira um pacote na NIC.
/// Args: (va, len)
pub const SYS_NET_TRANSMIT: usize = 15;

/// Retira um pacote da NIC.
/// Args: (va, cap) / Retorno: bytes recebidos
pub const SYS_NET_RECV: usize = 16;
