//! ABI de Syscalls
//!
//! Bloco de argumentos que atravessa a fronteira usuário/kernel.
//!
//! # Convenção de Registradores (x86)
//!
//! | Registrador | Uso                       |
//! |-------------|---------------------------|
//! | EAX         | Número da syscall         |
//! | EDX         | Argumento 1               |
//! | ECX         | Argumento 2               |
//! | EBX         | Argumento 3               |
//! | EDI         | Argumento 4               |
//! | ESI         | Argumento 5               |
//! | EAX         | Retorno (valor ou -errno) |

/// Máximo de argumentos suportados por syscall
pub const MAX_SYSCALL_ARGS: usize = 5;

/// Estrutura com argumentos de syscall
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyscallArgs {
    /// Número da syscall
    pub num: usize,
    pub arg1: usize,
    pub arg2: usize,
    pub arg3: usize,
    pub arg4: usize,
    pub arg5: usize,
}

impl SyscallArgs {
    /// Monta o bloco a partir do número e de até cinco argumentos
    pub fn new(num: usize, args: &[usize]) -> Self {
        debug_assert!(args.len() <= MAX_SYSCALL_ARGS);
        let arg = |i: usize| args.get(i).copied().unwrap_or(0);
        Self {
            num,
            arg1: arg(0),
            arg2: arg(1),
            arg3: arg(2),
            arg4: arg(3),
            arg5: arg(4),
        }
    }
}
