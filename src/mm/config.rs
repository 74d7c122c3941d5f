//! # Configuração do Módulo de Memória
//!
//! Constantes de tamanho e layout do espaço de endereçamento de usuário.
//!
//! ```text
//!  UTOP, UXSTACKTOP ─► +--------------------------+ 0xEEC0_0000
//!                      |  Exception stack (1 pg)  |  P|U|W, nunca COW
//!                      +--------------------------+
//!                      |  Guard (vazio)           |
//!  USTACKTOP ────────► +--------------------------+ 0xEEBF_E000
//!                      |  Stack normal (cresce ↓) |
//!                      :                          :
//!                      |  Programa, heap, dados   |
//!  UTEXT ────────────► +--------------------------+ 0x0080_0000
//!                      |  PFTEMP (scratch do COW) | 0x007F_F000
//!  UTEMP ────────────► +--------------------------+ 0x0040_0000
//! ```

// =============================================================================
// CONSTANTES DE TAMANHO
// =============================================================================

/// Tamanho de uma página (4 KiB)
pub const PAGE_SIZE: usize = 4096;

/// Bytes cobertos por uma entrada do page directory (4 MiB)
pub const PT_SPAN: usize = 1024 * PAGE_SIZE;

/// Máscara para alinhar endereços a página
pub const PAGE_MASK: usize = !(PAGE_SIZE - 1);

// =============================================================================
// LAYOUT DE MEMÓRIA VIRTUAL (USUÁRIO)
// =============================================================================

/// Topo da memória de usuário
pub const UTOP: u64 = 0xEEC0_0000;

/// Topo da pilha de exceção (uma página, onde roda o handler de page fault)
pub const UXSTACKTOP: u64 = UTOP;

/// Topo da pilha normal (uma página de guarda abaixo da pilha de exceção)
pub const USTACKTOP: u64 = UTOP - 2 * PAGE_SIZE as u64;

/// Início do texto dos programas
pub const UTEXT: u64 = 2 * PT_SPAN as u64;

/// Região temporária para mapeamentos
pub const UTEMP: u64 = PT_SPAN as u64;

/// Scratch slot do handler COW (nunca usado para outra coisa)
pub const PFTEMP: u64 = UTEMP + PT_SPAN as u64 - PAGE_SIZE as u64;

// =============================================================================
// FUNÇÕES UTILITÁRIAS
// =============================================================================

/// Alinha valor para cima ao múltiplo de align
#[inline(always)]
pub const fn align_up(val: usize, align: usize) -> usize {
    (val + align - 1) & !(align - 1)
}

/// Alinha valor para baixo ao múltiplo de align
#[inline(always)]
pub const fn align_down(val: usize, align: usize) -> usize {
    val & !(align - 1)
}

/// Verifica se valor está alinhado
#[inline(always)]
pub const fn is_aligned(val: usize, align: usize) -> bool {
    val & (align - 1) == 0
}

/// Número de páginas necessárias para `bytes`
#[inline(always)]
pub const fn pages_for(bytes: usize) -> usize {
    align_up(bytes, PAGE_SIZE) / PAGE_SIZE
}

const _: () = {
    assert!(PFTEMP == 0x007F_F000);
    assert!(USTACKTOP == 0xEEBF_E000);
    assert!(PFTEMP < UTEXT);
};
