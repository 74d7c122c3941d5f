//! Interface de Syscalls
//!
//! Numeração e ABI compartilhadas pelos dois lados da fronteira.
//!
//! # Módulos
//!
//! - `abi`: Convenção de chamada (SyscallArgs)
//! - `error`: Códigos de erro (SysError)
//! - `numbers`: Constantes das syscalls
//! - `user`: Cliente usado pelo runtime de fork (Syscalls, TrapSyscalls)
//! - `net`: Handlers de transmit/recv sobre o E1000

pub mod abi;
pub mod error;
pub mod net;
pub mod numbers;
pub mod user;

// Re-exports principais
pub use error::{SysError, SysResult};
pub use user::{RawTransport, Syscalls, TrapSyscalls};
