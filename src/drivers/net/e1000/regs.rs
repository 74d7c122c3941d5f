//! Mapa de registradores do Intel 82540EM (seções 13 e 14 do manual).

/// Offset de um registrador de 32 bits dentro da janela MMIO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(u32);

impl Reg {
    #[inline]
    pub const fn offset(self) -> usize {
        self.0 as usize
    }

    /// Entrada `i` da Multicast Table Array
    #[inline]
    pub const fn mta(i: usize) -> Reg {
        Reg(MTA.0 + (i as u32) * 4)
    }
}

pub const CTRL: Reg = Reg(0x0000);
pub const STATUS: Reg = Reg(0x0008);
pub const RCTL: Reg = Reg(0x0100);
pub const TCTL: Reg = Reg(0x0400);
pub const TIPG: Reg = Reg(0x0410);
pub const RDBAL: Reg = Reg(0x2800);
pub const RDBAH: Reg = Reg(0x2804);
pub const RDLEN: Reg = Reg(0x2808);
pub const RDH: Reg = Reg(0x2810);
pub const RDT: Reg = Reg(0x2818);
pub const TDBAL: Reg = Reg(0x3800);
pub const TDBAH: Reg = Reg(0x3804);
pub const TDLEN: Reg = Reg(0x3808);
pub const TDH: Reg = Reg(0x3810);
pub const TDT: Reg = Reg(0x3818);
pub const MTA: Reg = Reg(0x5200);
pub const RAL0: Reg = Reg(0x5400);
pub const RAH0: Reg = Reg(0x5404);

/// Entradas da Multicast Table Array
pub const MTA_ENTRIES: usize = 128;

/// Menor janela que cobre todos os registradores acima
pub const WINDOW_MIN: usize = RAH0.offset() + 4;

/// STATUS do 82540EM emulado pelo QEMU após reset (FD, LU, 1000Mb/s...)
pub const EXPECTED_STATUS: u32 = 0x8008_0783;

bitflags::bitflags! {
    /// Receive Control (RCTL)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rctl: u32 {
        /// Receiver Enable
        const EN = 1 << 1;
        /// Store Bad Packets
        const SBP = 1 << 2;
        /// Unicast Promiscuous
        const UPE = 1 << 3;
        /// Multicast Promiscuous
        const MPE = 1 << 4;
        /// Long Packet Enable
        const LPE = 1 << 5;
        /// Broadcast Accept Mode
        const BAM = 1 << 15;
        /// Strip Ethernet CRC
        const SECRC = 1 << 26;
    }
}

bitflags::bitflags! {
    /// Transmit Control (TCTL), sem os campos CT/COLD
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Tctl: u32 {
        /// Transmit Enable
        const EN = 1 << 1;
        /// Pad Short Packets
        const PSP = 1 << 3;
    }
}

/// Collision Threshold (TCTL.CT, bits 11:4)
pub const TCTL_CT_SHIFT: u32 = 4;
pub const TCTL_CT: u32 = 0x10;

/// Collision Distance (TCTL.COLD, bits 21:12), full-duplex
pub const TCTL_COLD_SHIFT: u32 = 12;
pub const TCTL_COLD: u32 = 0x40;

/// Valor completo do TCTL programado no init
pub const TCTL_INIT: u32 = Tctl::EN.bits()
    | Tctl::PSP.bits()
    | (TCTL_CT << TCTL_CT_SHIFT)
    | (TCTL_COLD << TCTL_COLD_SHIFT);

/// Inter Packet Gap (tabela 13-77): IPGT=10, IPGR1=4, IPGR2=6
pub const TIPG_IPGT: u32 = 10;
pub const TIPG_IPGR1: u32 = 4;
pub const TIPG_IPGR2: u32 = 6;
pub const TIPG_INIT: u32 = TIPG_IPGT | (TIPG_IPGR1 << 10) | (TIPG_IPGR2 << 20);

/// Valor do RCTL programado no init (BSIZE = 2048 é o valor 0)
pub const RCTL_INIT: u32 = Rctl::EN.bits() | Rctl::BAM.bits() | Rctl::SECRC.bits();

/// Address Valid no RAH
pub const RAH_AV: u32 = 1 << 31;

// =============================================================================
// GEOMETRIA DOS ANÉIS
// =============================================================================

/// Descritores no anel de transmissão
pub const TX_DESC_COUNT: usize = 32;

/// Descritores no anel de recepção
pub const RX_DESC_COUNT: usize = 128;

/// Distância entre buffers de pacote consecutivos
pub const BUFFER_STRIDE: usize = 2048;

/// Maior frame Ethernet aceito para transmissão (sem CRC)
pub const TX_MAX_FRAME: usize = 1518;

/// Tamanho do buffer de recepção (RCTL.BSIZE)
pub const RX_BUFFER_SIZE: usize = 2048;

/// MAC padrão do QEMU
pub const QEMU_MAC: [u8; 6] = [0x52, 0x54, 0x00, 0x12, 0x34, 0x56];

/// Empacota um MAC no par RAL/RAH.
///
/// RAL recebe os bytes 0-3 (little-endian), RAH os bytes 4-5 com o bit AV.
pub const fn receive_address(mac: [u8; 6]) -> (u32, u32) {
    let low = (mac[0] as u32)
        | ((mac[1] as u32) << 8)
        | ((mac[2] as u32) << 16)
        | ((mac[3] as u32) << 24);
    let high = (mac[4] as u32) | ((mac[5] as u32) << 8) | RAH_AV;
    (low, high)
}
