//! Tipos de Erro do Subsistema de Memória
//!
//! Falhas dos colaboradores de memória usados pelo driver: alocação de
//! DMA e mapeamento da janela MMIO.

/// Erros do subsistema de memória
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmError {
    /// Sem memória física disponível (OOM)
    OutOfMemory,
    /// Endereço não alinhado corretamente
    InvalidAlignment,
    /// Região não mapeada
    NotMapped,
    /// Tamanho inválido (zero ou muito grande)
    InvalidSize,
    /// Mapeamento falhou
    MappingFailed,
}

impl MmError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfMemory => "OOM: sem frames físicos disponíveis",
            Self::InvalidAlignment => "Endereço não alinhado",
            Self::NotMapped => "Região não mapeada",
            Self::InvalidSize => "Tamanho inválido",
            Self::MappingFailed => "Mapeamento falhou",
        }
    }
}

impl core::fmt::Display for MmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result específico para operações de memória
pub type MmResult<T> = Result<T, MmError>;
