//! Descritores legados de TX e RX (16 bytes, layout fixo do hardware).
//!
//! O bit DD é o único sinal de posse: com DD=1 o slot é do software, com
//! DD=0 pertence ao hardware.

bitflags::bitflags! {
    /// Campo CMD do descritor de transmissão
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TxCmd: u8 {
        /// End Of Packet
        const EOP = 1 << 0;
        /// Insert FCS
        const IFCS = 1 << 1;
        /// Report Status (hardware escreve DD ao concluir)
        const RS = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Campo STATUS do descritor de transmissão
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TxStatus: u8 {
        /// Descriptor Done
        const DD = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Campo STATUS do descritor de recepção
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RxStatus: u8 {
        /// Descriptor Done
        const DD = 1 << 0;
        /// End Of Packet
        const EOP = 1 << 1;
    }
}

/// Descritor de transmissão legado
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxDesc {
    pub addr: u64,
    pub length: u16,
    pub cso: u8,
    pub cmd: u8,
    pub status: u8,
    pub css: u8,
    pub special: u16,
}

impl TxDesc {
    /// Slot livre apontando para `buffer`: DD=1, nada a transmitir
    pub const fn free(buffer: u64) -> Self {
        Self {
            addr: buffer,
            length: 0,
            cso: 0,
            cmd: 0,
            status: TxStatus::DD.bits(),
            css: 0,
            special: 0,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        TxStatus::from_bits_truncate(self.status).contains(TxStatus::DD)
    }
}

/// Descritor de recepção legado
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RxDesc {
    pub addr: u64,
    pub length: u16,
    pub checksum: u16,
    pub status: u8,
    pub errors: u8,
    pub special: u16,
}

impl RxDesc {
    /// Slot armado para o hardware: DD=0
    pub const fn armed(buffer: u64) -> Self {
        Self {
            addr: buffer,
            length: 0,
            checksum: 0,
            status: 0,
            errors: 0,
            special: 0,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        RxStatus::from_bits_truncate(self.status).contains(RxStatus::DD)
    }
}

const _: () = assert!(core::mem::size_of::<TxDesc>() == 16);
const _: () = assert!(core::mem::size_of::<RxDesc>() == 16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tx_slot_is_software_owned() {
        let d = TxDesc::free(0x1000);
        assert!(d.is_done());
        assert_eq!(d.cmd, 0);
    }

    #[test]
    fn armed_rx_slot_is_hardware_owned() {
        let d = RxDesc::armed(0x2000);
        assert!(!d.is_done());
        assert_eq!(d.addr, 0x2000);
    }
}
