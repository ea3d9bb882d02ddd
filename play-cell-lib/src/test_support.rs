//! In-memory sector streams and cell authoring for unit tests.

use std::collections::HashMap;
use std::io;

use play_cell_core::dsi::{
    DSI_START_BYTE, NEXT_VOBU_OFFSET, NV_PCK_LBN_OFFSET, SRI_END_OF_CELL, VOBU_EA_OFFSET,
};
use play_cell_core::pack::PACK_HEADER;
use play_cell_core::{
    CellRange, DsiInfo, NextVobu, SECTOR_SIZE, Scr, SectorStream, SystemHeader, build_nav_pack,
};

pub(crate) const TEST_SYSTEM_HEADER: SystemHeader = [
    0x80, 0x4e, 0xc5, 0x04, 0xe1, 0xff, 0xb9, 0xe0, 0xe8, 0xb8, 0xc0, 0x20, 0xbd, 0xe0, 0x3a,
    0xbf, 0xe0, 0x02,
];

/// SCR of a sector `n` sectors into a stream muxed at the DVD rate.
pub(crate) fn scr_at(n: u32) -> Scr {
    Scr::from_parts(146 * n as u64, 86 * n as u64)
}

/// Write the DSI loop-control fields of an authored navigation pack.
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

pub(crate) fn nav_sector(lbn: u32, vobu_ea: u32, next_vobu: NextVobu) -> Vec<u8> {
    let mut sector = vec![0u8; SECTOR_SIZE];
    build_nav_pack(&mut sector, scr_at(lbn), &TEST_SYSTEM_HEADER);
    write_dsi(
        &mut sector,
        &DsiInfo {
            nav_pack_lbn: lbn,
            vobu_ea,
            next_vobu,
        },
    );
    sector
}

/// A data pack whose first packet has `stream_id`, tagged with `n`.
pub(crate) fn data_sector(n: u32, stream_id: u8) -> Vec<u8> {
    let mut sector = vec![0x5au8; SECTOR_SIZE];
    sector[..PACK_HEADER.len()].copy_from_slice(&PACK_HEADER);
    scr_at(n).write_to_pack(&mut sector);
    sector[14..18].copy_from_slice(&[0x00, 0x00, 0x01, stream_id]);
    sector[18..22].copy_from_slice(&n.to_be_bytes());
    sector
}

/// Author a cell starting at sector 0.
///
/// Each VOBU is `(vobu_ea, gap)`: a navigation pack, `vobu_ea` video
/// packs, then `gap` private stream 2 packs the VOBU chain skips over.
pub(crate) fn build_cell(vobus: &[(u32, u32)]) -> (Vec<Vec<u8>>, CellRange) {
    let mut sectors = Vec::new();
    for (i, &(vobu_ea, gap)) in vobus.iter().enumerate() {
        let lbn = sectors.len() as u32;
        let next_vobu = if i + 1 == vobus.len() {
            NextVobu::EndOfCell
        } else {
            NextVobu::Offset(1 + vobu_ea + gap)
        };
        sectors.push(nav_sector(lbn, vobu_ea, next_vobu));
        for n in lbn + 1..=lbn + vobu_ea {
            sectors.push(data_sector(n, 0xe0));
        }
        for n in lbn + 1 + vobu_ea..lbn + 1 + vobu_ea + gap {
            sectors.push(data_sector(n, 0xbf));
        }
    }
    let range = CellRange::new(0, sectors.len() as u32 - 1);
    (sectors, range)
}

/// Sector stream over a vector of sectors with injectable read failures.
pub(crate) struct MockStream {
    sectors: Vec<Vec<u8>>,
    failures: HashMap<u32, u32>,
    /// Every `(first, count)` request seen.
    pub(crate) reads: Vec<(u32, usize)>,
}

impl MockStream {
    pub(crate) fn new(sectors: Vec<Vec<u8>>) -> Self {
        Self {
            sectors,
            failures: HashMap::new(),
            reads: Vec::new(),
        }
    }

    /// Make the next `times` reads touching `sector` fail there.
    pub(crate) fn fail(mut self, sector: u32, times: u32) -> Self {
        self.failures.insert(sector, times);
        self
    }

    pub(crate) fn fail_always(self, sector: u32) -> Self {
        self.fail(sector, u32::MAX)
    }

    /// Number of requests whose first sector was `sector`.
    pub(crate) fn reads_at(&self, sector: u32) -> usize {
        self.reads.iter().filter(|(first, _)| *first == sector).count()
    }
}

impl SectorStream for MockStream {
    fn read_sectors(&mut self, first: u32, buf: &mut [u8]) -> io::Result<usize> {
        let count = buf.len() / SECTOR_SIZE;
        self.reads.push((first, count));

        for i in 0..count {
            let sector = first + i as u32;
            let failing = match self.failures.get_mut(&sector) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            };
            let Some(data) = self.sectors.get(sector as usize).filter(|_| !failing) else {
                if i == 0 {
                    return Err(io::Error::other(format!("bad sector {sector}")));
                }
                return Ok(i);
            };
            buf[i * SECTOR_SIZE..(i + 1) * SECTOR_SIZE].copy_from_slice(data);
        }
        Ok(count)
    }
}
