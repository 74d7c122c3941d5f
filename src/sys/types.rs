//! Tipos fundamentais do sistema

/// Número máximo de environments (processos)
pub const NENV: u32 = 1 << LOG2NENV;

/// log2(NENV)
pub const LOG2NENV: u32 = 10;

/// Identificador de environment (processo)
///
/// O valor `0` é reservado: em syscalls significa "o próprio chamador".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EnvId(pub u32);

impl EnvId {
    /// O environment que faz a chamada
    pub const CURRENT: EnvId = EnvId(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Índice na tabela de environments (ENVX)
    pub const fn index(self) -> usize {
        (self.0 & (NENV - 1)) as usize
    }

    pub const fn is_current(self) -> bool {
        self.0 == 0
    }
}

/// Estado de escalonamento de um environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EnvStatus {
    Free = 0,
    Dying = 1,
    Runnable = 2,
    Running = 3,
    NotRunnable = 4,
}

impl EnvStatus {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Resultado de uma duplicação de environment (exofork/fork)
///
/// As duas continuações são retornos diferentes da mesma chamada: o pai
/// recebe o id do filho, o filho recebe o sentinela `Child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkResult {
    /// Continuação do pai
    Parent(EnvId),
    /// Continuação do filho
    Child,
}

impl ForkResult {
    /// Codificação clássica: id do filho no pai, `0` no filho
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::Parent(child) => child.as_u32(),
            Self::Child => 0,
        }
    }

    pub const fn is_child(self) -> bool {
        matches!(self, Self::Child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_index_wraps_generation_bits() {
        assert_eq!(EnvId(0x1001).index(), 1);
        assert_eq!(EnvId(0x1400).index(), 0x3FF & 0x1400);
        assert!(EnvId::CURRENT.is_current());
    }

    #[test]
    fn fork_result_raw_encoding() {
        assert_eq!(ForkResult::Parent(EnvId(0x1001)).as_raw(), 0x1001);
        assert_eq!(ForkResult::Child.as_raw(), 0);
        assert!(ForkResult::Child.is_child());
    }
}
