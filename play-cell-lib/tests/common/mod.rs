//! Sector authoring shared by the integration tests.

use play_cell_core::dsi::{
    DSI_START_BYTE, NEXT_VOBU_OFFSET, NV_PCK_LBN_OFFSET, SRI_END_OF_CELL, VOBU_EA_OFFSET,
};
use play_cell_core::{DsiInfo, NextVobu};

/// Write the DSI loop-control fields of an authored navigation pack.
pub fn write_dsi(sector: &mut [u8], info: &DsiInfo) {
    let dsi = &mut sector[DSI_START_BYTE..];
    dsi[NV_PCK_LBN_OFFSET..NV_PCK_LBN_OFFSET + 4].copy_from_slice(&info.nav_pack_lbn.to_be_bytes());
    dsi[VOBU_EA_OFFSET..VOBU_EA_OFFSET + 4].copy_from_slice(&info.vobu_ea.to_be_bytes());
    let next = match info.next_vobu {
        NextVobu::Offset(offset) => offset | 0x8000_0000,
        NextVobu::EndOfCell => SRI_END_OF_CELL,
    };
    dsi[NEXT_VOBU_OFFSET..NEXT_VOBU_OFFSET + 4].copy_from_slice(&next.to_be_bytes());
}
