//! Resynchronization after an unreadable navigation pack.
//!
//! The sectors following the lost pack are probed one by one. Payload
//! packets extend the VOBU, and the next system header marks the next
//! navigation pack. A replacement navigation pack is then synthesized so
//! the output stays a valid program stream.

use play_cell_core::stream::StreamClass;
use play_cell_core::{SCR_MIN_FEED, SECTOR_SIZE, Scr, SectorStream, SystemHeader};
use play_cell_core::{build_nav_pack, probe_pes};

use crate::reader::read_nav_sector;

/// Result of scanning past a lost navigation pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The next navigation pack was found `next_vobu` sectors after the
    /// lost one, and a replacement pack is in the buffer.
    Resync { vobu_ea: u32, next_vobu: u32 },
    /// No navigation pack remains in the cell.
    EndOfCell,
}

/// Scan `failed + 1 ..= last_sector` for the next navigation pack.
///
/// On [`ScanOutcome::Resync`], `buf[..SECTOR_SIZE]` holds a navigation
/// pack stamped `last_scr + SCR_MIN_FEED` and carrying `system_header`.
/// `vobu_ea` is the offset of the last payload sector seen before the
/// resync point, or 0 if there was none. Sectors that stay unreadable are
/// skipped.
pub fn scan_for_nav_pack<S: SectorStream + ?Sized>(
    stream: &mut S,
    failed: u32,
    last_sector: u32,
    buf: &mut [u8],
    max_read_retries: u32,
    last_scr: Scr,
    system_header: &SystemHeader,
) -> ScanOutcome {
    let Some(first) = failed.checked_add(1) else {
        return ScanOutcome::EndOfCell;
    };
    let mut vobu_ea = 0;

    for sector in first..=last_sector {
        if !read_nav_sector(stream, sector, buf, max_read_retries) {
            log::debug!("skipping unreadable sector {sector} while scanning");
            continue;
        }

        let offset = sector - failed;
        match probe_pes(&buf[..SECTOR_SIZE]) {
            Some(StreamClass::Payload) => vobu_ea = offset,
            Some(StreamClass::SystemHeader) => {
                log::debug!(
                    "resynchronized at sector {sector} ({offset} after lost navigation pack at {failed})"
                );
                build_nav_pack(&mut buf[..SECTOR_SIZE], last_scr + SCR_MIN_FEED, system_header);
                return ScanOutcome::Resync {
                    vobu_ea,
                    next_vobu: offset,
                };
            }
            Some(StreamClass::Other) | None => {}
        }
    }

    ScanOutcome::EndOfCell
}

#[cfg(test)]
#[path = "tests/recovery_tests.rs"]
mod tests;
