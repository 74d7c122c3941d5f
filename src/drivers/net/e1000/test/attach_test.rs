//! Attach: identidade, BAR0, janela MMIO e falhas de alocação.

use super::fake::{pci_function, FakeBar, FakeDma, BAR0_SIZE};
use crate::drivers::net::e1000::regs::{self, EXPECTED_STATUS};
use crate::drivers::net::e1000::{attach_fn, E1000Config, E1000Error, E1000, PCI_DRIVERS};
use crate::drivers::pci::find_driver;
use crate::mm::MmError;

#[test]
fn pci_table_matches_82540em() {
    let f = pci_function(BAR0_SIZE);
    assert_eq!(find_driver(&f, PCI_DRIVERS).map(|d| d.name), Some("e1000"));
}

#[test]
fn unexpected_status_is_rejected() {
    let mut bar = FakeBar::new(0x8008_0703);
    let mut dma = FakeDma::new();
    let res = E1000::attach(&pci_function(BAR0_SIZE), &mut bar, &mut dma, &E1000Config::default());
    assert_eq!(res.err(), Some(E1000Error::IdentityMismatch(0x8008_0703)));
}

#[test]
#[should_panic(expected = "e1000: attach falhou")]
fn attach_fn_panics_on_wrong_device() {
    let mut bar = FakeBar::new(0);
    let mut dma = FakeDma::new();
    attach_fn(&pci_function(BAR0_SIZE), &mut bar, &mut dma, &E1000Config::default());
}

#[test]
fn identity_check_can_be_disabled() {
    let mut bar = FakeBar::new(0x1234);
    let mut dma = FakeDma::new();
    let config = E1000Config {
        expected_status: None,
        ..E1000Config::default()
    };
    let dev = E1000::attach(&pci_function(BAR0_SIZE), &mut bar, &mut dma, &config).unwrap();
    assert_eq!(dev.registers().read(regs::STATUS), 0x1234);
}

#[test]
fn small_window_is_rejected() {
    let mut bar = FakeBar::new(EXPECTED_STATUS);
    let mut dma = FakeDma::new();
    let res = E1000::attach(&pci_function(0x1000), &mut bar, &mut dma, &E1000Config::default());
    assert_eq!(res.err(), Some(E1000Error::WindowTooSmall));
}

#[test]
fn io_bar_is_rejected() {
    let mut bar = FakeBar::new(EXPECTED_STATUS);
    let mut dma = FakeDma::new();
    let mut f = pci_function(BAR0_SIZE);
    f.bars[0] = 0xC001;
    let res = E1000::attach(&f, &mut bar, &mut dma, &E1000Config::default());
    assert_eq!(res.err(), Some(E1000Error::InvalidBar));
}

#[test]
fn dma_exhaustion_is_reported() {
    let mut bar = FakeBar::new(EXPECTED_STATUS);
    let mut dma = FakeDma::new();
    // Anel TX inteiro, descritores RX, falta o buffer RX
    dma.budget = Some(3);
    let res = E1000::attach(&pci_function(BAR0_SIZE), &mut bar, &mut dma, &E1000Config::default());
    assert_eq!(
        res.err(),
        Some(E1000Error::DmaAllocationFailed(MmError::OutOfMemory))
    );
}

#[test]
fn mac_is_kept_for_callers() {
    let mut bar = FakeBar::new(EXPECTED_STATUS);
    let mut dma = FakeDma::new();
    let config = E1000Config {
        mac: [0x02, 0, 0, 0, 0, 0x01],
        ..E1000Config::default()
    };
    let dev = E1000::attach(&pci_function(BAR0_SIZE), &mut bar, &mut dma, &config).unwrap();
    assert_eq!(dev.mac_address(), [0x02, 0, 0, 0, 0, 0x01]);
    assert_eq!(dev.registers().read(regs::RAL0), 0x0000_0002);
    assert_eq!(dev.registers().read(regs::RAH0), 0x8000_0100);
}
