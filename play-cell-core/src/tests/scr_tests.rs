use super::*;

/// SCR bytes of the synthetic pack template: SCR 0 with all marker bits set.
const ZERO_SCR_FIELD: [u8; SCR_LEN] = [0x44, 0x00, 0x04, 0x00, 0x04, 0x01];

#[test]
fn test_extract_template_is_zero() {
    assert_eq!(Scr::extract(&ZERO_SCR_FIELD), Scr::default());
}

#[test]
fn test_merge_then_extract_round_trips() {
    let values = [
        Scr::from_parts(0, 0),
        Scr::from_parts(1, 0),
        Scr::from_parts(0, 299),
        Scr::from_parts(146, 86),
        Scr::from_parts(0x1_2345_6789 & ((1 << 33) - 1), 123),
        Scr::from_parts((1 << 33) - 1, 299),
    ];
    for value in values {
        let mut field = ZERO_SCR_FIELD;
        value.merge(&mut field);
        assert_eq!(Scr::extract(&field), value, "round trip of {value}");
    }
}

#[test]
fn test_merge_preserves_marker_bits() {
    // Start from all ones: every non-SCR bit must stay set.
    let mut field = [0xffu8; SCR_LEN];
    Scr::default().merge(&mut field);
    assert_eq!(field, [0xc4, 0x00, 0x04, 0x00, 0x04, 0x01]);

    // And from all zeros: no marker bit may appear.
    let mut field = [0u8; SCR_LEN];
    Scr::from_parts((1 << 33) - 1, 0x1ff % 300).merge(&mut field);
    assert_eq!(field[0] & 0xc4, 0);
    assert_eq!(field[2] & 0x04, 0);
    assert_eq!(field[4] & 0x04, 0);
    assert_eq!(field[5] & 0x01, 0);
}

#[test]
fn test_write_to_pack_leaves_rest_of_sector_alone() {
    let mut sector = [0xa5u8; 2048];
    sector[SCR_OFFSET..SCR_OFFSET + SCR_LEN].copy_from_slice(&ZERO_SCR_FIELD);
    let before = sector;

    let scr = Scr::from_parts(90_000, 150);
    scr.write_to_pack(&mut sector);

    assert_eq!(Scr::from_pack(&sector), scr);
    assert_eq!(sector[..SCR_OFFSET], before[..SCR_OFFSET]);
    assert_eq!(sector[SCR_OFFSET + SCR_LEN..], before[SCR_OFFSET + SCR_LEN..]);
}

#[test]
fn test_extract_known_bytes() {
    // base = 0x1_0000_0001, ext = 1
    let scr = Scr::from_parts(0x1_0000_0001, 1);
    let mut field = ZERO_SCR_FIELD;
    scr.merge(&mut field);
    // base bit 32 lands in byte 0 bit 5; base bit 0 in byte 4 bit 3;
    // ext bit 0 in byte 5 bit 1.
    assert_eq!(field[0], 0x44 | 0x20);
    assert_eq!(field[4], 0x04 | 0x08);
    assert_eq!(field[5], 0x01 | 0x02);
    assert_eq!(Scr::extract(&field).base(), 0x1_0000_0001);
    assert_eq!(Scr::extract(&field).extension(), 1);
}

#[test]
fn test_add_without_carry() {
    let sum = Scr::from_parts(100, 10) + Scr::from_parts(46, 20);
    assert_eq!(sum.base(), 146);
    assert_eq!(sum.extension(), 30);
}

#[test]
fn test_add_carry_at_exactly_300() {
    let sum = Scr::from_parts(1, 150) + Scr::from_parts(2, 150);
    assert_eq!(sum.base(), 4);
    assert_eq!(sum.extension(), 0);
}

#[test]
fn test_add_carry_above_300() {
    let sum = Scr::from_parts(10, 299) + Scr::from_parts(0, 299);
    assert_eq!(sum.base(), 11);
    assert_eq!(sum.extension(), 298);
}

#[test]
fn test_add_matches_manual_modulo_arithmetic() {
    for ext_a in (0..300).step_by(7) {
        for ext_b in (0..300).step_by(11) {
            let a = Scr::from_parts(1000, ext_a);
            let b = Scr::from_parts(2000, ext_b);
            let sum = a + b;
            let carry = (ext_a + ext_b) / 300;
            assert!(sum.extension() < 300);
            assert_eq!(sum.extension(), (ext_a + ext_b) % 300);
            assert_eq!(sum.base(), 3000 + carry);
        }
    }
}

#[test]
fn test_min_feed_accumulates() {
    let mut scr = Scr::default();
    for _ in 0..300 {
        scr = scr + SCR_MIN_FEED;
    }
    // 300 * (146 + 86/300) = 43800 + 86
    assert_eq!(scr.base(), 43_886);
    assert_eq!(scr.extension(), 0);
}

#[test]
fn test_from_parts_normalizes_extension() {
    let scr = Scr::from_parts(5, 610);
    assert_eq!(scr.base(), 7);
    assert_eq!(scr.extension(), 10);
}

#[test]
fn test_display() {
    assert_eq!(SCR_MIN_FEED.to_string(), "146+86/300");
}
