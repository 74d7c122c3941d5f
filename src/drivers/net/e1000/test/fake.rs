//! Dispositivo simulado.
//!
//! A janela MMIO é um array comum e a memória DMA vem do heap do host com
//! endereços físicos sintéticos. `Harness` faz o papel do hardware: lê os
//! registradores que o driver programou e consome/produz descritores.

use crate::drivers::net::e1000::desc::{RxDesc, RxStatus, TxDesc, TxStatus};
use crate::drivers::net::e1000::regs::{self, Reg};
use crate::drivers::net::e1000::{E1000Config, E1000Error, E1000};
use crate::drivers::pci::{PciFunction, VENDOR_INTEL};
use crate::mm::{DmaAllocator, DmaRegion, MmError, MmResult, MmioMapper, PhysAddr, PAGE_SIZE};
use std::alloc::{alloc_zeroed, Layout};
use std::ptr::NonNull;

pub const BAR0_BASE: u32 = 0xFEBC_0000;
pub const BAR0_SIZE: u32 = 0x2_0000;

/// Função PCI do 82540EM como o QEMU a apresenta
pub fn pci_function(bar0_size: u32) -> PciFunction {
    PciFunction {
        bus: 0,
        device: 3,
        function: 0,
        vendor_id: VENDOR_INTEL,
        device_id: 0x100E,
        bars: [BAR0_BASE, 0xC041, 0, 0, 0, 0],
        bar_sizes: [bar0_size, 0x40, 0, 0, 0, 0],
    }
}

/// Janela MMIO em memória, com STATUS inicial configurável
pub struct FakeBar {
    mem: Box<[u32]>,
}

impl FakeBar {
    pub fn new(status: u32) -> Self {
        let mut mem = vec![0u32; BAR0_SIZE as usize / 4].into_boxed_slice();
        mem[regs::STATUS.offset() / 4] = status;
        Self { mem }
    }
}

impl MmioMapper for FakeBar {
    fn map_mmio(&mut self, phys: PhysAddr, size: usize) -> MmResult<NonNull<u8>> {
        if phys.as_u64() != BAR0_BASE as u64 || size > self.mem.len() * 4 {
            return Err(MmError::MappingFailed);
        }
        Ok(NonNull::new(self.mem.as_mut_ptr().cast::<u8>()).ok_or(MmError::MappingFailed)?)
    }
}

/// Alocador DMA sobre o heap do host
pub struct FakeDma {
    regions: Vec<(u64, usize, usize)>,
    next_phys: u64,
    /// Número de alocações que ainda podem ter sucesso
    pub budget: Option<usize>,
}

impl FakeDma {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            next_phys: 0x0010_0000,
            budget: None,
        }
    }

    /// Ponteiro do host para um endereço físico alocado aqui
    pub fn translate(&self, phys: u64) -> *mut u8 {
        for &(base, ptr, len) in &self.regions {
            if phys >= base && phys < base + len as u64 {
                return (ptr + (phys - base) as usize) as *mut u8;
            }
        }
        panic!("endereço físico fora das regiões DMA: {:#x}", phys);
    }
}

impl DmaAllocator for FakeDma {
    fn alloc_dma(&mut self, bytes: usize) -> MmResult<DmaRegion> {
        if let Some(budget) = self.budget.as_mut() {
            if *budget == 0 {
                return Err(MmError::OutOfMemory);
            }
            *budget -= 1;
        }

        let len = crate::mm::config::align_up(bytes, PAGE_SIZE);
        let layout = Layout::from_size_align(len, PAGE_SIZE).map_err(|_| MmError::InvalidSize)?;
        // Nunca liberado: anéis vivem enquanto o driver viver
        let ptr = NonNull::new(unsafe { alloc_zeroed(layout) }).ok_or(MmError::OutOfMemory)?;

        let phys = self.next_phys;
        self.next_phys += len as u64 + PAGE_SIZE as u64;
        self.regions.push((phys, ptr.as_ptr() as usize, len));
        Ok(unsafe { DmaRegion::new(PhysAddr::new(phys), ptr, len) })
    }
}

/// Driver inicializado mais o "hardware" que o observa
pub struct Harness {
    pub dev: E1000,
    pub dma: FakeDma,
    _bar: FakeBar,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&E1000Config::default())
    }

    pub fn with_config(config: &E1000Config) -> Self {
        Self::try_with(config).expect("attach")
    }

    pub fn try_with(config: &E1000Config) -> Result<Self, E1000Error> {
        let mut bar = FakeBar::new(regs::EXPECTED_STATUS);
        let mut dma = FakeDma::new();
        let dev = E1000::attach(&pci_function(BAR0_SIZE), &mut bar, &mut dma, config)?;
        Ok(Self { dev, dma, _bar: bar })
    }

    pub fn reg(&self, r: Reg) -> u32 {
        self.dev.registers().read(r)
    }

    fn set_reg(&self, r: Reg, v: u32) {
        self.dev.registers().write(r, v)
    }

    // -------------------------------------------------------------------------
    // TX
    // -------------------------------------------------------------------------

    fn tx_slots(&self) -> usize {
        self.reg(regs::TDLEN) as usize / 16
    }

    fn tx_desc_ptr(&self, i: usize) -> *mut TxDesc {
        let base = self.reg(regs::TDBAL) as u64 | ((self.reg(regs::TDBAH) as u64) << 32);
        self.dma.translate(base + (i * 16) as u64).cast::<TxDesc>()
    }

    pub fn tx_desc(&self, i: usize) -> TxDesc {
        unsafe { self.tx_desc_ptr(i).read_volatile() }
    }

    /// Transmite tudo entre TDH e TDT, marca DD e devolve os frames em ordem
    pub fn complete_tx(&mut self) -> Vec<Vec<u8>> {
        let n = self.tx_slots();
        let mut head = self.reg(regs::TDH) as usize;
        let tail = self.reg(regs::TDT) as usize;
        let mut frames = Vec::new();

        while head != tail {
            let mut d = self.tx_desc(head);
            let buf = self.dma.translate(d.addr);
            frames.push(unsafe { std::slice::from_raw_parts(buf, d.length as usize) }.to_vec());
            d.status |= TxStatus::DD.bits();
            unsafe { self.tx_desc_ptr(head).write_volatile(d) };
            head = (head + 1) % n;
        }
        self.set_reg(regs::TDH, head as u32);
        frames
    }

    // -------------------------------------------------------------------------
    // RX
    // -------------------------------------------------------------------------

    pub fn rx_slots(&self) -> usize {
        self.reg(regs::RDLEN) as usize / 16
    }

    fn rx_desc_ptr(&self, i: usize) -> *mut RxDesc {
        let base = self.reg(regs::RDBAL) as u64 | ((self.reg(regs::RDBAH) as u64) << 32);
        self.dma.translate(base + (i * 16) as u64).cast::<RxDesc>()
    }

    pub fn rx_desc(&self, i: usize) -> RxDesc {
        unsafe { self.rx_desc_ptr(i).read_volatile() }
    }

    /// Escreve `frame` no slot `i` e marca DD, ignorando RDH/RDT
    pub fn arm_rx_slot(&mut self, i: usize, frame: &[u8], errors: u8) {
        let mut d = self.rx_desc(i);
        let buf = self.dma.translate(d.addr);
        unsafe { std::ptr::copy_nonoverlapping(frame.as_ptr(), buf, frame.len()) };
        d.length = frame.len() as u16;
        d.status = (RxStatus::DD | RxStatus::EOP).bits();
        d.errors = errors;
        unsafe { self.rx_desc_ptr(i).write_volatile(d) };
    }

    /// Entrega um frame respeitando RDH/RDT. `false` se o anel estiver cheio.
    pub fn deliver(&mut self, frame: &[u8], errors: u8) -> bool {
        let n = self.rx_slots();
        let head = self.reg(regs::RDH) as usize;
        let tail = self.reg(regs::RDT) as usize;
        if head == tail {
            return false;
        }
        self.arm_rx_slot(head, frame, errors);
        self.set_reg(regs::RDH, ((head + 1) % n) as u32);
        true
    }
}

/// Frame de teste com conteúdo derivado de `seed`
pub fn frame(seed: u8, len: usize) -> Vec<u8> {
    (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
}
