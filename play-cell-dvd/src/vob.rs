//! Title VOB sector stream.
//!
//! A title set's video is split over up to nine `VTS_nn_m.VOB` files
//! (m = 1..=9), each at most 1 GiB. Cell sector numbers address the
//! concatenation of these files, so reads are mapped onto the segment
//! holding each sector and may span two files.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use play_cell_core::{SECTOR_SIZE, SectorStream};

/// Highest VOB part number of a title set.
pub const MAX_VOB_PARTS: u32 = 9;

/// One VOB file: where its bytes live and which sectors it holds.
#[derive(Debug)]
pub struct VobSegment {
    file: File,
    /// Byte offset of the segment's first sector within `file`.
    base_offset: u64,
    /// Title-relative number of the segment's first sector.
    first_sector: u32,
    sectors: u32,
}

impl VobSegment {
    /// A segment backed by `file` starting at `base_offset`, `length` bytes long.
    ///
    /// A trailing partial sector is ignored.
    pub fn new(file: File, base_offset: u64, length: u64) -> Self {
        Self {
            file,
            base_offset,
            first_sector: 0,
            sectors: (length / SECTOR_SIZE as u64) as u32,
        }
    }

    fn end_sector(&self) -> u32 {
        self.first_sector + self.sectors
    }
}

/// The concatenated title VOBs of one title set.
#[derive(Debug)]
pub struct TitleVobs {
    segments: Vec<VobSegment>,
}

impl TitleVobs {
    /// Lay the given segments end to end, in order.
    pub fn new(segments: Vec<VobSegment>) -> Self {
        let mut next = 0u32;
        let segments = segments
            .into_iter()
            .map(|mut segment| {
                segment.first_sector = next;
                next += segment.sectors;
                segment
            })
            .collect();
        Self { segments }
    }

    /// Total number of sectors across all parts.
    pub fn sector_count(&self) -> u32 {
        self.segments.last().map_or(0, VobSegment::end_sector)
    }

    fn segment_for(&mut self, sector: u32) -> Option<&mut VobSegment> {
        self.segments
            .iter_mut()
            .find(|s| sector >= s.first_sector && sector < s.end_sector())
    }
}

impl SectorStream for TitleVobs {
    fn read_sectors(&mut self, first: u32, buf: &mut [u8]) -> io::Result<usize> {
        let wanted = buf.len() / SECTOR_SIZE;
        let mut done = 0usize;

        while done < wanted {
            let sector = first + done as u32;
            let Some(segment) = self.segment_for(sector) else {
                if done == 0 {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("sector {sector} is beyond the end of the title VOBs"),
                    ));
                }
                break;
            };

            let in_segment = ((segment.end_sector() - sector) as usize).min(wanted - done);
            let offset = segment.base_offset + (sector - segment.first_sector) as u64 * SECTOR_SIZE as u64;
            let chunk = &mut buf[done * SECTOR_SIZE..(done + in_segment) * SECTOR_SIZE];

            let result = segment
                .file
                .seek(SeekFrom::Start(offset))
                .and_then(|_| segment.file.read_exact(chunk));
            match result {
                Ok(()) => done += in_segment,
                Err(e) if done == 0 => return Err(e),
                Err(e) => {
                    log::debug!("short read at sector {sector}: {e}");
                    break;
                }
            }
        }

        Ok(done)
    }
}

#[cfg(test)]
#[path = "tests/vob_tests.rs"]
mod tests;
