//! Synthetic pack builders.
//!
//! Three fixed templates stand in for data that could not be read:
//!
//! - a replacement navigation pack when a VOBU's first sector is lost,
//! - a dummy video pack (stuffing only) for a lost payload sector,
//! - a private stream 2 pack announcing a cell gap to the consumer.
//!
//! Every template starts with the same 14-byte pack header (SCR 0,
//! mux rate 10.08 Mbit/s, no stuffing); the caller's SCR is merged in.

use crate::nav::DSI_OFFSET;
use crate::scr::Scr;
use crate::{SECTOR_SIZE, SystemHeader};

/// Pack header with SCR 0.
pub const PACK_HEADER: [u8; 14] = [
    0x00, 0x00, 0x01, 0xba, 0x44, 0x00, 0x04, 0x00, 0x04, 0x01, 0x01, 0x89, 0xc3, 0xf8,
];

/// System header start code and length (18 payload bytes follow).
const SYSTEM_HEADER_PREFIX: [u8; 6] = [0x00, 0x00, 0x01, 0xbb, 0x00, 0x12];

/// PES header of the PCI packet (980 bytes).
const PCI_PES_HEADER: [u8; 6] = [0x00, 0x00, 0x01, 0xbf, 0x03, 0xd4];

/// PES header of the DSI packet (1018 bytes).
const DSI_PES_HEADER: [u8; 6] = [0x00, 0x00, 0x01, 0xbf, 0x03, 0xfa];

/// PES header of a video packet that carries only stuffing.
pub const DUMMY_VIDEO_PES_HEADER: [u8; 9] = [0x00, 0x00, 0x01, 0xe0, 0x07, 0xec, 0x81, 0x00, 0x00];

/// PES header of a private stream 2 packet filling the sector.
const PRIVATE_2_PES_HEADER: [u8; 6] = [0x00, 0x00, 0x01, 0xbf, 0x07, 0xec];

/// Identifier the downstream consumer looks for, followed by a NUL and
/// record type 1 (cell gap).
pub const GAP_REPORT_TAG: [u8; 12] = *b"Vamps-data\x00\x01";

/// Offset of the big-endian gap length in a gap report pack.
pub const GAP_LENGTH_OFFSET: usize = PACK_HEADER.len() + PRIVATE_2_PES_HEADER.len() + GAP_REPORT_TAG.len();

fn start_pack(buf: &mut [u8], scr: Scr, fill: u8) {
    debug_assert_eq!(buf.len(), SECTOR_SIZE, "synthetic packs fill exactly one sector");
    buf.fill(fill);
    buf[..PACK_HEADER.len()].copy_from_slice(&PACK_HEADER);
    scr.write_to_pack(buf);
}

/// Build a navigation pack carrying `system_header` and empty PCI/DSI.
pub fn build_nav_pack(buf: &mut [u8], scr: Scr, system_header: &SystemHeader) {
    start_pack(buf, scr, 0x00);
    let mut pos = PACK_HEADER.len();
    for part in [&SYSTEM_HEADER_PREFIX[..], &system_header[..], &PCI_PES_HEADER[..]] {
        buf[pos..pos + part.len()].copy_from_slice(part);
        pos += part.len();
    }
    buf[DSI_OFFSET..DSI_OFFSET + DSI_PES_HEADER.len()].copy_from_slice(&DSI_PES_HEADER);
}

/// Build a video pack of pure stuffing.
pub fn build_dummy_pack(buf: &mut [u8], scr: Scr) {
    start_pack(buf, scr, 0xff);
    let pos = PACK_HEADER.len();
    buf[pos..pos + DUMMY_VIDEO_PES_HEADER.len()].copy_from_slice(&DUMMY_VIDEO_PES_HEADER);
}

/// Build a private stream 2 pack reporting a cell gap of `gap` sectors.
///
/// The wire field is 16 bits wide; longer gaps saturate.
pub fn build_gap_pack(buf: &mut [u8], scr: Scr, gap: u32) {
    start_pack(buf, scr, 0x00);
    let mut pos = PACK_HEADER.len();
    buf[pos..pos + PRIVATE_2_PES_HEADER.len()].copy_from_slice(&PRIVATE_2_PES_HEADER);
    pos += PRIVATE_2_PES_HEADER.len();
    buf[pos..pos + GAP_REPORT_TAG.len()].copy_from_slice(&GAP_REPORT_TAG);

    let gap = u16::try_from(gap).unwrap_or(u16::MAX);
    buf[GAP_LENGTH_OFFSET..GAP_LENGTH_OFFSET + 2].copy_from_slice(&gap.to_be_bytes());
}

#[cfg(test)]
#[path = "tests/pack_tests.rs"]
mod tests;
