// =============================================================================
// LOGGING SYSTEM - ZERO OVERHEAD
// =============================================================================
//
// Sistema de logging do driver E1000 e do runtime de userspace (fork/COW).
//
// ARQUITETURA:
// - Usa features do Cargo para compile-time filtering
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - SEM core::fmt - Apenas strings literais + um valor em hexadecimal
// - SEM alocação
// - Escreve via `drivers::serial` (COM1 no kernel, sink próprio em userspace)
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros fatais (fork sem memória, violação de COW, NIC errada)
// - WARN:  Situações suspeitas mas recuperáveis (frame RX com erro)
// - INFO:  Fluxo normal (attach, anéis inicializados, fork concluído)
// - DEBUG: Informações de debugging (registradores programados)
// - TRACE: Detalhes extremos (cada descritor, cada página duplicada)
//
// FEATURES:
// - no_logs:   Remove 100% dos logs
// - log_error: ERROR e WARN
// - log_info:  + INFO
// - log_debug: + DEBUG
// - log_trace: Todos os níveis (padrão)
//
// USO:
//   kinfo!("(E1000) Anel TX pronto");          // Apenas string
//   kinfo!("(E1000) TDBAL=", 0x1000);          // String + hex
//   klog!("va=", va, " pa=", pa);              // Múltiplos valores
//
// =============================================================================

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

/// Emite uma linha completa: prefixo + mensagem + valor opcional + newline.
///
/// Usado pelos macros; não chamar diretamente.
#[doc(hidden)]
#[inline(never)]
pub fn emit_line(prefix: &str, msg: &str, val: Option<u64>) {
    crate::drivers::serial::emit_str(prefix);
    crate::drivers::serial::emit_str(msg);
    if let Some(v) = val {
        crate::drivers::serial::emit_hex(v);
    }
    crate::drivers::serial::emit_nl();
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_ERROR, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_ERROR, $msg, Some($val as u64));
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_WARN, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_WARN, $msg, Some($val as u64));
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kinfo {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_INFO, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_INFO, $msg, Some($val as u64));
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kdebug {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_DEBUG, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_DEBUG, $msg, Some($val as u64));
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($msg:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_TRACE, $msg, None);
    }};
    ($msg:expr, $val:expr) => {{
        $crate::core::logging::emit_line($crate::core::logging::P_TRACE, $msg, Some($val as u64));
    }};
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS AUXILIARES
// =============================================================================

/// klog! - Log genérico sem prefixo de nível.
///
/// Útil para construir logs com múltiplos valores (ex: dump de mapeamentos).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! klog {
    // Apenas string
    ($msg:expr) => {{
        $crate::drivers::serial::emit_str($msg);
    }};
    // String + hex
    ($msg:expr, $val:expr) => {{
        $crate::drivers::serial::emit_str($msg);
        $crate::drivers::serial::emit_hex($val as u64);
    }};
    // String + hex + string
    ($msg1:expr, $val:expr, $msg2:expr) => {{
        $crate::drivers::serial::emit_str($msg1);
        $crate::drivers::serial::emit_hex($val as u64);
        $crate::drivers::serial::emit_str($msg2);
    }};
    // String + hex + string + hex
    ($msg1:expr, $val1:expr, $msg2:expr, $val2:expr) => {{
        $crate::drivers::serial::emit_str($msg1);
        $crate::drivers::serial::emit_hex($val1 as u64);
        $crate::drivers::serial::emit_str($msg2);
        $crate::drivers::serial::emit_hex($val2 as u64);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! klog {
    ($($t:tt)*) => {{}};
}

/// knl! - Emite apenas newline.
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! knl {
    () => {{
        $crate::drivers::serial::emit_nl();
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! knl {
    () => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK/FAIL)
// =============================================================================

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($msg:expr) => {{
        $crate::core::logging::emit_line("\x1b[32m[OK]\x1b[0m ", $msg, None);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha (prefixo vermelho [FAIL]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($msg:expr) => {{
        $crate::core::logging::emit_line("\x1b[1;31m[FAIL]\x1b[0m ", $msg, None);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
