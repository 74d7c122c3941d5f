//! System Definitions.
//!
//! Tipos que atravessam a fronteira usuário/kernel.

pub mod types;

pub use types::{EnvId, EnvStatus, ForkResult};
