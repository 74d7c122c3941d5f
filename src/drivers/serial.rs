// =============================================================================
// SERIAL LOG SINK - ZERO OVERHEAD
// =============================================================================
//
// Destino dos macros de log (`kinfo!`, `kerror!`, ...).
//
// ARQUITETURA:
// - SEM Mutex no caminho quente - o sink é instalado uma vez (spin::Once)
// - SEM core::fmt - Hex e decimal formatados à mão, byte a byte
// - SEM alocação
//
// DESTINOS (em ordem de prioridade):
// 1. Sink instalado via `set_sink` (ex: processo de userspace que escreve
//    via syscall de console)
// 2. COM1 (0x3F8) quando compilado para x86_64 bare-metal (kernel)
// 3. Descartado (ex: testes no host)
//
// NOTA IMPORTANTE:
// Não há exclusão mútua entre CPUs. Em SMP os logs podem se intercalar.
// Isso é aceitável para debugging.
//
// =============================================================================

use spin::Once;

/// Função que recebe cada byte de log.
pub type ByteSink = fn(u8);

static SINK: Once<ByteSink> = Once::new();

/// Instala o destino dos logs. Apenas a primeira chamada tem efeito.
///
/// Retorna `false` se outro sink já estava instalado.
pub fn set_sink(sink: ByteSink) -> bool {
    let mut installed = false;
    SINK.call_once(|| {
        installed = true;
        sink
    });
    installed
}

// =============================================================================
// FUNÇÕES DE ESCRITA - CORE
// =============================================================================

/// Envia um único byte para o destino de log.
///
/// Todas as outras funções de escrita usam esta internamente.
#[inline]
pub fn emit(byte: u8) {
    if let Some(sink) = SINK.get() {
        sink(byte);
        return;
    }
    com1::emit(byte);
}

/// Envia uma string.
#[inline(never)]
pub fn emit_str(s: &str) {
    for &b in s.as_bytes() {
        emit(b);
    }
}

/// Envia uma nova linha (CRLF).
#[inline(never)]
pub fn emit_nl() {
    emit(b'\r');
    emit(b'\n');
}

// =============================================================================
// FUNÇÕES DE ESCRITA - FORMATAÇÃO NUMÉRICA
// =============================================================================

/// Envia um valor u64 em formato hexadecimal.
///
/// Formato de saída: 0x0123456789ABCDEF (sempre 18 caracteres)
#[inline(never)]
pub fn emit_hex(value: u64) {
    emit(b'0');
    emit(b'x');
    let mut shift = 60i32;
    while shift >= 0 {
        emit(nibble_to_ascii(((value >> shift) & 0xF) as u8));
        shift -= 4;
    }
}

/// Envia um valor u32 em formato hexadecimal (versão compacta).
///
/// Formato de saída: 0x12345678 (sempre 10 caracteres)
#[inline(never)]
pub fn emit_hex32(value: u32) {
    emit(b'0');
    emit(b'x');
    let mut shift = 28i32;
    while shift >= 0 {
        emit(nibble_to_ascii(((value >> shift) & 0xF) as u8));
        shift -= 4;
    }
}

/// Envia um valor usize em formato decimal.
///
/// Útil para contadores e índices de anel.
#[inline(never)]
pub fn emit_dec(mut value: usize) {
    // Buffer para dígitos (max 20 para u64)
    let mut buf: [u8; 20] = [0; 20];
    let mut pos = 20;

    if value == 0 {
        emit(b'0');
        return;
    }

    while value > 0 {
        pos -= 1;
        buf[pos] = b'0' + (value % 10) as u8;
        value /= 10;
    }

    while pos < 20 {
        emit(buf[pos]);
        pos += 1;
    }
}

// =============================================================================
// FUNÇÕES AUXILIARES
// =============================================================================

/// Converte nibble (0-15) para caractere ASCII ('0'-'9', 'A'-'F').
#[inline(always)]
const fn nibble_to_ascii(n: u8) -> u8 {
    if n < 10 {
        b'0' + n
    } else {
        b'A' + (n - 10)
    }
}

// =============================================================================
// BACKEND COM1 (UART 16550)
// =============================================================================

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod com1 {
    // Porta de dados da COM1
    const COM1_DATA: u16 = 0x3F8;

    // Porta de status da COM1 (Line Status Register)
    const COM1_STATUS: u16 = 0x3FD;

    #[inline(always)]
    pub fn emit(byte: u8) {
        unsafe {
            // Espera o buffer de transmissão estar vazio (bit 5 do LSR)
            loop {
                let status: u8;
                core::arch::asm!(
                    "in al, dx",
                    out("al") status,
                    in("dx") COM1_STATUS,
                    options(nostack, nomem, preserves_flags)
                );
                if (status & 0x20) != 0 {
                    break;
                }
            }

            core::arch::asm!(
                "out dx, al",
                in("al") byte,
                in("dx") COM1_DATA,
                options(nostack, nomem, preserves_flags)
            );
        }
    }
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
mod com1 {
    #[inline(always)]
    pub fn emit(_byte: u8) {}
}
