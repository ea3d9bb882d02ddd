//! Data Search Information decoding.
//!
//! The DSI packet is the second private stream 2 packet of a navigation
//! pack. Only the fields needed to walk a cell are decoded:
//!
//! | field         | offset in DSI | size |
//! |---------------|---------------|------|
//! | `nv_pck_lbn`  | 4             | 4    |
//! | `vobu_ea`     | 8             | 4    |
//! | `next_vobu`   | 314           | 4    |
//!
//! `next_vobu` lives in the VOBU search information (`vobu_sri`) that
//! follows 32 bytes of general information, 148 bytes of seamless playback
//! information, 54 bytes of angle information, `next_video` and 19 forward
//! pointers.

use crate::util::read_u32_be;

/// Offset of the DSI payload within a navigation pack sector.
pub const DSI_START_BYTE: usize = 1031;

/// Offsets of the decoded fields within the DSI payload.
pub const NV_PCK_LBN_OFFSET: usize = 4;
pub const VOBU_EA_OFFSET: usize = 8;
pub const NEXT_VOBU_OFFSET: usize = 314;

/// `next_vobu` value marking the last VOBU of a cell.
pub const SRI_END_OF_CELL: u32 = 0x3fff_ffff;

/// Link from one VOBU to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextVobu {
    /// The next VOBU starts this many sectors after the current one.
    Offset(u32),
    /// This is the last VOBU of the cell.
    EndOfCell,
}

impl NextVobu {
    /// Decode a raw `next_vobu` word.
    ///
    /// Bit 31 flags whether the target VOBU holds video; it is not part of
    /// the offset.
    pub fn from_raw(raw: u32) -> Self {
        if raw == SRI_END_OF_CELL {
            NextVobu::EndOfCell
        } else {
            NextVobu::Offset(raw & 0x7fff_ffff)
        }
    }

    pub fn is_end_of_cell(self) -> bool {
        matches!(self, NextVobu::EndOfCell)
    }
}

/// Loop-control fields of a DSI packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsiInfo {
    /// Logical block number of the navigation pack itself.
    pub nav_pack_lbn: u32,
    /// Number of sectors following the navigation pack in this VOBU.
    pub vobu_ea: u32,
    /// Where the next VOBU starts.
    pub next_vobu: NextVobu,
}

/// Decode the DSI of a navigation pack sector.
///
/// The sector must already have passed [`crate::is_nav_pack`].
pub fn parse_dsi(sector: &[u8]) -> DsiInfo {
    let dsi = &sector[DSI_START_BYTE..];
    DsiInfo {
        nav_pack_lbn: read_u32_be(dsi, NV_PCK_LBN_OFFSET),
        vobu_ea: read_u32_be(dsi, VOBU_EA_OFFSET),
        next_vobu: NextVobu::from_raw(read_u32_be(dsi, NEXT_VOBU_OFFSET)),
    }
}

/// Author the DSI loop-control fields of a test navigation pack.
#[cfg(test)]
pub(crate) fn write_dsi(sector: &mut [u8], info: &DsiInfo) {
    let dsi = &mut sector[DSI_START_BYTE..];
    dsi[NV_PCK_LBN_OFFSET..NV_PCK_LBN_OFFSET + 4].copy_from_slice(&info.nav_pack_lbn.to_be_bytes());
    dsi[VOBU_EA_OFFSET..VOBU_EA_OFFSET + 4].copy_from_slice(&info.vobu_ea.to_be_bytes());
    let next = match info.next_vobu {
        NextVobu::Offset(offset) => offset | 0x8000_0000,
        NextVobu::EndOfCell => SRI_END_OF_CELL,
    };
    dsi[NEXT_VOBU_OFFSET..NEXT_VOBU_OFFSET + 4].copy_from_slice(&next.to_be_bytes());
}
