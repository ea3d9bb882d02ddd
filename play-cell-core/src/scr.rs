//! System Clock Reference codec.
//!
//! An MPEG-2 pack header carries a 42-bit SCR: a 33-bit base counting
//! 90 kHz ticks and a 9-bit extension counting 27 MHz ticks (0..300).
//! The value is scattered over six bytes, interleaved with marker bits:
//!
//! | value bits | byte | byte bits |
//! |------------|------|-----------|
//! | 41..39     | 0    | 5..3      |
//! | 38..37     | 0    | 1..0      |
//! | 36..29     | 1    | 7..0      |
//! | 28..24     | 2    | 7..3      |
//! | 23..22     | 2    | 1..0      |
//! | 21..14     | 3    | 7..0      |
//! | 13..9      | 4    | 7..3      |
//! | 8..7       | 4    | 1..0      |
//! | 6..0       | 5    | 7..1      |
//!
//! The packed value handled here is `base << 9 | extension`.

use std::fmt;
use std::ops::Add;

/// Offset of the SCR field within a pack sector.
pub const SCR_OFFSET: usize = 4;

/// Length of the SCR field in bytes.
pub const SCR_LEN: usize = 6;

/// Number of extension ticks per base tick.
pub const SCR_EXT_MODULO: u64 = 300;

const BASE_MASK: u64 = (1 << 33) - 1;
const EXT_MASK: u64 = 0x1ff;

/// Minimum clock advance for one sector.
///
/// 2048 bytes at the DVD mux rate of 10.08 Mbit/s take 1.6254 ms, i.e.
/// 146.2857 base ticks, rounded to 146 base + 86/300 extension.
pub const SCR_MIN_FEED: Scr = Scr::from_parts(146, 86);

/// A 42-bit System Clock Reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Scr(u64);

impl Scr {
    /// Build an SCR from base and extension.
    ///
    /// Extensions of 300 or more are folded into the base.
    pub const fn from_parts(base: u64, extension: u64) -> Self {
        let base = (base + extension / SCR_EXT_MODULO) & BASE_MASK;
        let extension = extension % SCR_EXT_MODULO;
        Scr(base << 9 | extension)
    }

    /// 90 kHz part.
    pub const fn base(self) -> u64 {
        self.0 >> 9
    }

    /// 27 MHz part, always below 300 for values built through this type.
    pub const fn extension(self) -> u64 {
        self.0 & EXT_MASK
    }

    /// Decode the SCR from the six SCR bytes of a pack header.
    pub fn extract(bytes: &[u8; SCR_LEN]) -> Self {
        let b = bytes.map(u64::from);
        let mut scr = b[5] >> 1;
        scr |= (b[4] & 0x03) << 7;
        scr |= (b[4] & 0xf8) << 6;
        scr |= b[3] << 14;
        scr |= (b[2] & 0x03) << 22;
        scr |= (b[2] & 0xf8) << 21;
        scr |= b[1] << 29;
        scr |= (b[0] & 0x03) << 37;
        scr |= (b[0] & 0x38) << 36;
        Scr(scr)
    }

    /// Encode this SCR into the six SCR bytes of a pack header.
    ///
    /// Only the SCR bits are touched; marker bits keep their values.
    pub fn merge(self, bytes: &mut [u8; SCR_LEN]) {
        let scr = self.0;
        bytes[0] &= 0xc4;
        bytes[2] &= 0x04;
        bytes[4] &= 0x04;
        bytes[5] &= 0x01;

        bytes[5] |= (scr << 1) as u8;
        bytes[4] |= (scr >> 7) as u8 & 0x03;
        bytes[4] |= (scr >> 6) as u8 & 0xf8;
        bytes[3] = (scr >> 14) as u8;
        bytes[2] |= (scr >> 22) as u8 & 0x03;
        bytes[2] |= (scr >> 21) as u8 & 0xf8;
        bytes[1] = (scr >> 29) as u8;
        bytes[0] |= (scr >> 37) as u8 & 0x03;
        bytes[0] |= (scr >> 36) as u8 & 0x38;
    }

    /// Decode the SCR of the pack header starting at `sector[0]`.
    pub fn from_pack(sector: &[u8]) -> Self {
        let mut field = [0u8; SCR_LEN];
        field.copy_from_slice(&sector[SCR_OFFSET..SCR_OFFSET + SCR_LEN]);
        Self::extract(&field)
    }

    /// Merge this SCR into the pack header starting at `sector[0]`.
    pub fn write_to_pack(self, sector: &mut [u8]) {
        let mut field = [0u8; SCR_LEN];
        field.copy_from_slice(&sector[SCR_OFFSET..SCR_OFFSET + SCR_LEN]);
        self.merge(&mut field);
        sector[SCR_OFFSET..SCR_OFFSET + SCR_LEN].copy_from_slice(&field);
    }
}

impl Add for Scr {
    type Output = Scr;

    fn add(self, rhs: Scr) -> Scr {
        let mut base = self.base() + rhs.base();
        let mut ext = self.extension() + rhs.extension();
        if ext >= SCR_EXT_MODULO {
            ext -= SCR_EXT_MODULO;
            base += 1;
        }
        Scr((base & BASE_MASK) << 9 | ext)
    }
}

impl fmt::Display for Scr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}/300", self.base(), self.extension())
    }
}

#[cfg(test)]
#[path = "tests/scr_tests.rs"]
mod tests;
