//! # Dump de Mapeamentos
//!
//! Inspeção de um intervalo do espaço de usuário, página a página.
//!
//! Formato de cada linha:
//!
//! ```text
//! va=0x00000000EEBFD000 pa=0x0000000000123000 perm=PWU-
//! va=0x00000000EEBFE000 nao mapeado
//! ```

use crate::mm::config::PAGE_SIZE;
use crate::mm::{PageTableView, PteFlags, VirtAddr};

/// Representação curta das permissões: `P`, `W`, `U`, `C` (COW) ou `-`
pub fn perm_string(flags: PteFlags) -> [u8; 4] {
    let bit = |f: PteFlags, c: u8| if flags.contains(f) { c } else { b'-' };
    [
        bit(PteFlags::PRESENT, b'P'),
        bit(PteFlags::WRITABLE, b'W'),
        bit(PteFlags::USER, b'U'),
        bit(PteFlags::COW, b'C'),
    ]
}

/// Loga cada página de `[begin, end]`.
///
/// Retorna quantas páginas estavam mapeadas.
pub fn dump_mappings<V: PageTableView + ?Sized>(view: &V, begin: VirtAddr, end: VirtAddr) -> usize {
    let mut va = begin.page_base();
    let mut mapped = 0;

    while va <= end {
        match view.present_pte(va) {
            Some(pte) => {
                let perm = perm_string(pte.flags());
                crate::klog!("va=", va.as_u64(), " pa=", pte.addr().as_u64());
                crate::klog!(" perm=");
                crate::klog!(::core::str::from_utf8(&perm).unwrap_or("????"));
                crate::knl!();
                mapped += 1;
            }
            None => {
                crate::klog!("va=", va.as_u64(), " nao mapeado");
                crate::knl!();
            }
        }
        va = va.add(PAGE_SIZE as u64);
    }

    mapped
}
