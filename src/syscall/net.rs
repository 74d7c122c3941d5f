//! Syscalls de Rede (lado do kernel).
//!
//! Ponte fina entre o despacho de syscalls e o driver E1000. O buffer do
//! usuário chega aqui já validado pela camada de trap (contido abaixo de
//! UTOP e com a permissão certa).
//!
//! Anel cheio ou vazio vira `WouldBlock`: o processo faz `yield` e tenta de
//! novo, nunca fica bloqueado dentro do kernel.

use super::abi::SyscallArgs;
use super::error::{SysError, SysResult};
use super::numbers::{SYS_NET_RECV, SYS_NET_TRANSMIT};
use crate::drivers::net::e1000::{E1000Error, E1000};

/// Converte erros do driver para o código devolvido ao usuário
fn to_sys(err: E1000Error) -> SysError {
    match err {
        E1000Error::TxRetry | E1000Error::RxRetry => SysError::WouldBlock,
        E1000Error::PacketTooLarge | E1000Error::BufferTooSmall => SysError::InvalidArgument,
        _ => SysError::Unspecified,
    }
}

/// Enfileira `data` para transmissão.
///
/// # Returns
/// Bytes aceitos (sempre `data.len()`)
pub fn sys_net_transmit(dev: &mut E1000, data: &[u8]) -> SysResult<usize> {
    dev.transmit(data).map_err(to_sys)?;
    Ok(data.len())
}

/// Copia o próximo pacote recebido para `buf`.
///
/// # Returns
/// Tamanho do pacote
pub fn sys_net_recv(dev: &mut E1000, buf: &mut [u8]) -> SysResult<usize> {
    dev.receive(buf).map_err(to_sys)
}

/// Despacha uma syscall de rede e devolve o valor de retorno bruto.
///
/// Retorna `None` se `args.num` não for uma syscall de rede, para que o
/// despachante geral tente outra tabela.
///
/// # Safety
/// `[arg1, arg1 + arg2)` deve ser memória do processo já validada pela
/// camada de trap, sem outro alias vivo durante a chamada.
pub unsafe fn dispatch(dev: &mut E1000, args: &SyscallArgs) -> Option<isize> {
    let (ptr, len) = (args.arg1, args.arg2);

    let result = match args.num {
        SYS_NET_TRANSMIT => {
            let data: &[u8] = if len == 0 {
                &[]
            } else {
                core::slice::from_raw_parts(ptr as *const u8, len)
            };
            sys_net_transmit(dev, data)
        }
        SYS_NET_RECV => {
            let buf: &mut [u8] = if len == 0 {
                &mut []
            } else {
                core::slice::from_raw_parts_mut(ptr as *mut u8, len)
            };
            sys_net_recv(dev, buf)
        }
        _ => return None,
    };

    Some(match result {
        Ok(n) => n as isize,
        Err(e) => {
            crate::ktrace!("(Syscall) Erro na syscall de rede num=", args.num);
            e.as_isize()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_conditions_map_to_would_block() {
        assert_eq!(to_sys(E1000Error::TxRetry), SysError::WouldBlock);
        assert_eq!(to_sys(E1000Error::RxRetry), SysError::WouldBlock);
    }

    #[test]
    fn size_errors_map_to_invalid_argument() {
        assert_eq!(to_sys(E1000Error::PacketTooLarge), SysError::InvalidArgument);
        assert_eq!(to_sys(E1000Error::BufferTooSmall), SysError::InvalidArgument);
        assert_eq!(to_sys(E1000Error::WindowTooSmall), SysError::Unspecified);
        assert_eq!(to_sys(E1000Error::MisalignedWindow), SysError::Unspecified);
    }
}
