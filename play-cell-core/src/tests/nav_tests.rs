use super::*;
use crate::dsi::{NextVobu, write_dsi};
use crate::pack::build_nav_pack;
use crate::scr::Scr;

/// A navigation pack at `lbn` as an authoring tool would write it.
fn make_nav_pack(lbn: u32) -> [u8; SECTOR_SIZE] {
    let mut sector = [0u8; SECTOR_SIZE];
    let sys: SystemHeader = core::array::from_fn(|i| 0x80 + i as u8);
    build_nav_pack(&mut sector, Scr::from_parts(3600, 0), &sys);
    write_dsi(
        &mut sector,
        &DsiInfo {
            nav_pack_lbn: lbn,
            vobu_ea: 10,
            next_vobu: NextVobu::Offset(11),
        },
    );
    sector
}

#[test]
fn test_accepts_valid_nav_pack() {
    assert!(is_nav_pack(&make_nav_pack(0)));
}

#[test]
fn test_rejects_short_buffer() {
    let sector = make_nav_pack(0);
    assert!(!is_nav_pack(&sector[..1024]));
}

#[test]
fn test_rejects_single_byte_corruption_at_each_check_point() {
    let check_points = [0usize, 1, 2, 3, 14, 15, 16, 17, 38, 39, 40, 41, 1024, 1025, 1026, 1027];
    for offset in check_points {
        let mut sector = make_nav_pack(0);
        sector[offset] ^= 0x01;
        assert!(!is_nav_pack(&sector), "corruption at offset {offset} accepted");
    }
}

#[test]
fn test_rejects_mpeg1_pack_header() {
    let mut sector = make_nav_pack(0);
    // MPEG-1 packs have '0010' in the top nibble of byte 4.
    sector[4] = (sector[4] & 0x0f) | 0x20;
    assert!(!is_nav_pack(&sector));
}

#[test]
fn test_rejects_video_sector() {
    let mut sector = [0xffu8; SECTOR_SIZE];
    crate::pack::build_dummy_pack(&mut sector, Scr::default());
    assert!(!is_nav_pack(&sector));
}

#[test]
fn test_check_nav_pack_returns_dsi() {
    let sector = make_nav_pack(4711);
    let dsi = check_nav_pack(&sector, 4711).unwrap();
    assert_eq!(dsi.vobu_ea, 10);
    assert_eq!(dsi.next_vobu, NextVobu::Offset(11));
}

#[test]
fn test_check_nav_pack_lbn_mismatch() {
    let sector = make_nav_pack(4711);
    assert_eq!(
        check_nav_pack(&sector, 4712),
        Err(NavPackError::LbnMismatch {
            sector: 4712,
            found: 4711
        })
    );
}

#[test]
fn test_check_nav_pack_not_nav_pack() {
    let sector = [0u8; SECTOR_SIZE];
    assert_eq!(
        check_nav_pack(&sector, 9),
        Err(NavPackError::NotNavPack { sector: 9 })
    );
}

#[test]
fn test_system_header_copy() {
    let sector = make_nav_pack(0);
    let sys = system_header(&sector);
    assert_eq!(sys[0], 0x80);
    assert_eq!(sys[17], 0x91);
}
