//! Códigos de Erro das Syscalls
//!
//! Sistema de erros unificado entre kernel e userspace.
//! Erros são retornados como valores negativos no registrador de retorno.

/// Enum de erros do sistema.
///
/// Valores são i32 para permitir representação negativa em isize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SysError {
    /// Erro sem categoria
    Unspecified = 1,
    /// Environment inexistente ou sem permissão sobre ele
    BadEnv = 2,
    /// Argumento inválido (endereço fora de UTOP, permissão ilegal...)
    InvalidArgument = 3,
    /// Sem memória disponível
    NoMemory = 4,
    /// Tabela de environments cheia
    NoFreeEnv = 5,
    /// Endereço inválido ou não mapeado
    Fault = 6,
    /// Operação bloquearia (anel cheio ou vazio) - tentar de novo
    WouldBlock = 7,
    /// Syscall não implementada
    NotImplemented = 254,
}

impl SysError {
    /// Converte para isize negativo (formato de retorno da syscall)
    #[inline]
    pub fn as_isize(self) -> isize {
        -(self as i32 as isize)
    }

    /// Cria erro a partir de código negativo
    pub fn from_code(code: isize) -> Option<Self> {
        if code >= 0 {
            return None;
        }
        match -code {
            1 => Some(Self::Unspecified),
            2 => Some(Self::BadEnv),
            3 => Some(Self::InvalidArgument),
            4 => Some(Self::NoMemory),
            5 => Some(Self::NoFreeEnv),
            6 => Some(Self::Fault),
            7 => Some(Self::WouldBlock),
            254 => Some(Self::NotImplemented),
            _ => None,
        }
    }

    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "erro não especificado",
            Self::BadEnv => "environment inválido",
            Self::InvalidArgument => "argumento inválido",
            Self::NoMemory => "sem memória",
            Self::NoFreeEnv => "sem environments livres",
            Self::Fault => "endereço inválido",
            Self::WouldBlock => "tentar novamente",
            Self::NotImplemented => "syscall não implementada",
        }
    }
}

impl core::fmt::Display for SysError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result para syscalls
pub type SysResult<T> = Result<T, SysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_return_register() {
        for e in [
            SysError::BadEnv,
            SysError::NoMemory,
            SysError::NoFreeEnv,
            SysError::WouldBlock,
        ] {
            assert_eq!(SysError::from_code(e.as_isize()), Some(e));
        }
    }

    #[test]
    fn non_negative_and_unknown_codes_are_not_errors() {
        assert_eq!(SysError::from_code(0), None);
        assert_eq!(SysError::from_code(0x1001), None);
        assert_eq!(SysError::from_code(-99), None);
    }
}
