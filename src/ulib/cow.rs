//! # Reparo de Falta Copy-on-Write
//!
//! Só roda para uma violação COW legítima: escrita, page table presente,
//! PTE presente e marcada COW. Qualquer outra combinação é um bug em outro
//! lugar e aborta o processo.
//!
//! O reparo usa o slot fixo `PFTEMP`:
//!
//! 1. aloca uma página nova em `PFTEMP` (P|U|W)
//! 2. copia a página da falta para `PFTEMP`
//! 3. mapeia o frame de `PFTEMP` sobre a página da falta (P|U|W)
//! 4. desmapeia `PFTEMP`
//!
//! O mapeamento do outro processo continua COW apontando para o frame
//! antigo.

use super::pgfault::{FaultErr, UTrapframe};
use super::{UserKernel, UserMemory};
use crate::mm::{PageTableView, PteFlags, VirtAddr, PFTEMP};
use crate::sys::EnvId;
use crate::syscall::{SysResult, Syscalls};

/// Motivo pelo qual uma falta não é COW
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CowViolation {
    /// Falta de leitura
    NotWrite,
    /// Page directory sem entrada para o endereço
    NoPageTable,
    /// PTE ausente
    NotMapped,
    /// PTE presente mas sem o marcador COW
    NotCow,
}

impl CowViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotWrite => "falta de leitura",
            Self::NoPageTable => "page table ausente",
            Self::NotMapped => "página não mapeada",
            Self::NotCow => "página não é COW",
        }
    }
}

/// Valida a precondição de uma falta COW
pub fn check_cow_fault<V: PageTableView + ?Sized>(
    view: &V,
    va: VirtAddr,
    err: FaultErr,
) -> Result<(), CowViolation> {
    if !err.contains(FaultErr::WRITE) {
        return Err(CowViolation::NotWrite);
    }
    if !view.pde(va).is_present() {
        return Err(CowViolation::NoPageTable);
    }
    let pte = view.pte(va);
    if !pte.is_present() {
        return Err(CowViolation::NotMapped);
    }
    if !pte.is_cow() {
        return Err(CowViolation::NotCow);
    }
    Ok(())
}

/// Substitui o mapeamento COW de `va` por uma cópia privada e gravável.
pub fn repair_cow_fault<K: UserKernel + ?Sized>(k: &mut K, va: VirtAddr) -> SysResult<()> {
    let page = va.page_base();
    let scratch = VirtAddr::new(PFTEMP);

    k.page_alloc(EnvId::CURRENT, scratch, PteFlags::USER_RW)?;
    k.copy_page(scratch, page);
    k.page_map(EnvId::CURRENT, scratch, EnvId::CURRENT, page, PteFlags::USER_RW)?;
    k.page_unmap(EnvId::CURRENT, scratch)?;

    crate::ktrace!("(COW) Página privatizada ", page.as_u64());
    Ok(())
}

/// Handler instalado pelo `fork`.
///
/// Falhas aqui são fatais: não há como reexecutar a instrução sem reparo.
pub fn pgfault<K: UserKernel + ?Sized>(k: &mut K, utf: &UTrapframe) {
    let va = utf.fault_addr();

    if let Err(why) = check_cow_fault(k, va, utf.error()) {
        crate::kerror!("(COW) Falta inválida em ", va.as_u64());
        panic!(
            "pgfault: page cow check failed: {} (va={:#x}, err={:#x})",
            why.as_str(),
            utf.fault_va,
            utf.err
        );
    }

    if let Err(e) = repair_cow_fault(k, va) {
        crate::kerror!("(COW) Reparo falhou em ", va.as_u64());
        panic!("pgfault: reparo COW falhou: {} (va={:#x})", e, utf.fault_va);
    }
}
