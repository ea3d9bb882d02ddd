//! Sector reads with bounded retries.
//!
//! Both readers only report whether the read succeeded; what happens
//! after the retry budget runs out (abort or substitute) is up to the
//! player.

use std::io;

use play_cell_core::{SECTOR_SIZE, SectorStream};

/// Capacity of the playback buffer, in sectors.
pub const BUF_SECTORS: usize = 512;

/// Read exactly `buf.len() / SECTOR_SIZE` sectors starting at `sector`.
fn read_exact_sectors<S: SectorStream + ?Sized>(
    stream: &mut S,
    sector: u32,
    buf: &mut [u8],
) -> io::Result<()> {
    let wanted = buf.len() / SECTOR_SIZE;
    let got = stream.read_sectors(sector, buf)?;
    if got == wanted {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("short read: {got} of {wanted} sectors"),
        ))
    }
}

/// Read the single sector `sector` into `buf[..SECTOR_SIZE]`, making
/// `max_read_retries + 1` attempts.
pub fn read_nav_sector<S: SectorStream + ?Sized>(
    stream: &mut S,
    sector: u32,
    buf: &mut [u8],
    max_read_retries: u32,
) -> bool {
    let buf = &mut buf[..SECTOR_SIZE];
    for attempt in 0..=max_read_retries {
        match read_exact_sectors(stream, sector, buf) {
            Ok(()) => return true,
            Err(e) => log::debug!("read of sector {sector} failed (attempt {}): {e}", attempt + 1),
        }
    }
    false
}

/// Read up to `count` sectors starting at `sector` into `buf`.
///
/// `count` is clamped to the buffer capacity. The first attempt reads the
/// whole run; if it fails, the remaining `max_read_retries + 1` attempts
/// read only the first sector so a single bad sector does not cost the
/// whole run. Returns the number of sectors now in `buf`.
pub fn read_payload<S: SectorStream + ?Sized>(
    stream: &mut S,
    sector: u32,
    count: u32,
    buf: &mut [u8],
    max_read_retries: u32,
) -> Option<usize> {
    let capacity = (buf.len() / SECTOR_SIZE).min(BUF_SECTORS);
    let mut count = (count as usize).min(capacity);

    for attempt in 0..max_read_retries as u64 + 2 {
        match read_exact_sectors(stream, sector, &mut buf[..count * SECTOR_SIZE]) {
            Ok(()) => return Some(count),
            Err(e) => log::debug!(
                "read of {count} sector(s) at {sector} failed (attempt {}): {e}",
                attempt + 1
            ),
        }
        count = 1;
    }
    None
}

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod tests;
