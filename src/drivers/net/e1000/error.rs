//! Erros do driver E1000.
//!
//! `TxRetry` e `RxRetry` não são falhas: são o sinal normal de anel cheio
//! ou vazio, devolvido ao chamador para que ele faça backoff.

use crate::mm::MmError;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum E1000Error {
    /// Anel TX cheio (descritor em `tail` ainda é do hardware)
    TxRetry,
    /// Nenhum frame utilizável no anel RX
    RxRetry,
    /// Frame maior que o buffer de um slot TX
    PacketTooLarge,
    /// Buffer do chamador menor que o frame recebido
    BufferTooSmall,
    /// STATUS lido não corresponde ao dispositivo esperado
    IdentityMismatch(u32),
    /// Janela MMIO menor que o último registrador usado
    WindowTooSmall,
    /// Base da janela MMIO não alinhada a 4 bytes
    MisalignedWindow,
    /// BAR0 ausente ou não é de memória
    InvalidBar,
    /// Falha ao alocar descritores ou buffers
    DmaAllocationFailed(MmError),
    /// Falha ao mapear a janela de registradores
    MmioMapFailed(MmError),
}

impl E1000Error {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TxRetry => "Anel de transmissão cheio",
            Self::RxRetry => "Nenhum pacote disponível",
            Self::PacketTooLarge => "Pacote maior que o buffer de transmissão",
            Self::BufferTooSmall => "Buffer menor que o pacote recebido",
            Self::IdentityMismatch(_) => "Registrador STATUS inesperado",
            Self::WindowTooSmall => "Janela MMIO pequena demais",
            Self::MisalignedWindow => "Janela MMIO desalinhada",
            Self::InvalidBar => "BAR0 inválido",
            Self::DmaAllocationFailed(_) => "Falha ao alocar memória DMA",
            Self::MmioMapFailed(_) => "Falha ao mapear registradores",
        }
    }

    /// Condição de retry (não é erro): anel cheio ou vazio
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::TxRetry | Self::RxRetry)
    }
}

impl fmt::Display for E1000Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdentityMismatch(found) => write!(f, "{} ({:#010x})", self.as_str(), found),
            Self::DmaAllocationFailed(e) | Self::MmioMapFailed(e) => {
                write!(f, "{}: {}", self.as_str(), e)
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

pub type Result<T> = core::result::Result<T, E1000Error>;
