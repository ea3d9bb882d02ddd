//! Navigation pack validation.
//!
//! A navigation pack is recognized by four start codes at fixed offsets:
//!
//! | offset | start code | packet |
//! |--------|------------|--------|
//! | 0      | `000001BA` | pack header (MPEG-2 marker `01` in byte 4) |
//! | 14     | `000001BB` | system header |
//! | 38     | `000001BF` | PCI (private stream 2) |
//! | 1024   | `000001BF` | DSI (private stream 2) |

use crate::dsi::{DsiInfo, parse_dsi};
use crate::error::NavPackError;
use crate::stream::{PACK_START_CODE, PRIVATE_STREAM_2_START_CODE, SYSTEM_HEADER_START_CODE};
use crate::util::read_u32_be;
use crate::{SECTOR_SIZE, SYSTEM_HEADER_LEN, SystemHeader};

/// Offset of the system header packet.
pub const SYSTEM_HEADER_OFFSET: usize = 14;

/// Offset of the system header payload (after start code and length).
pub const SYSTEM_HEADER_DATA_OFFSET: usize = 20;

/// Offset of the PCI packet.
pub const PCI_OFFSET: usize = 38;

/// Offset of the DSI packet.
pub const DSI_OFFSET: usize = SECTOR_SIZE / 2;

/// Check whether a sector is structurally a navigation pack.
pub fn is_nav_pack(sector: &[u8]) -> bool {
    if sector.len() < SECTOR_SIZE {
        return false;
    }

    read_u32_be(sector, 0) == PACK_START_CODE
        && sector[4] & 0xc0 == 0x40
        && read_u32_be(sector, SYSTEM_HEADER_OFFSET) == SYSTEM_HEADER_START_CODE
        && read_u32_be(sector, PCI_OFFSET) == PRIVATE_STREAM_2_START_CODE
        && read_u32_be(sector, DSI_OFFSET) == PRIVATE_STREAM_2_START_CODE
}

/// Validate the navigation pack read from `sector` and decode its DSI.
///
/// Fails if the start codes are wrong or if the DSI claims to live at a
/// different logical block than the one that was read.
pub fn check_nav_pack(buf: &[u8], sector: u32) -> Result<DsiInfo, NavPackError> {
    if !is_nav_pack(buf) {
        return Err(NavPackError::NotNavPack { sector });
    }

    let dsi = parse_dsi(buf);
    if dsi.nav_pack_lbn != sector {
        return Err(NavPackError::LbnMismatch {
            sector,
            found: dsi.nav_pack_lbn,
        });
    }

    Ok(dsi)
}

/// Copy the 18 system header payload bytes out of a navigation pack.
pub fn system_header(sector: &[u8]) -> SystemHeader {
    let mut header = [0u8; SYSTEM_HEADER_LEN];
    header.copy_from_slice(
        &sector[SYSTEM_HEADER_DATA_OFFSET..SYSTEM_HEADER_DATA_OFFSET + SYSTEM_HEADER_LEN],
    );
    header
}

#[cfg(test)]
#[path = "tests/nav_tests.rs"]
mod tests;
