//! Video Title Set IFO parsing.
//!
//! Only the tables needed to resolve a cell to its sector range are read:
//!
//! - VTSI header: `"DVDVIDEO-VTS"` at 0, sector pointer to VTS_PGCIT at 0xCC
//! - VTS_PGCIT: program chain count at 0, 8-byte search pointers from 8
//!   (PGC start byte, relative to the table, at +4)
//! - PGC: cell count at 3, cell playback table offset at 0xE8
//! - cell playback entries: 24 bytes, first sector at +8, last sector at +20

use play_cell_core::CellRange;
use play_cell_core::util::{read_u16_be, read_u32_be};

use crate::error::StructureError;

const VTS_MAGIC: &[u8; 12] = b"DVDVIDEO-VTS";
const VTS_PGCIT_PTR_OFFSET: usize = 0xCC;
const PGCIT_HEADER_LEN: usize = 8;
const PGCI_SRP_LEN: usize = 8;
const PGC_CELL_COUNT_OFFSET: usize = 3;
const PGC_CELL_PLAYBACK_PTR_OFFSET: usize = 0xE8;
const CELL_PLAYBACK_LEN: usize = 24;
const IFO_SECTOR_SIZE: usize = 2048;

/// One program chain: the ordered cells it plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramChain {
    pub cells: Vec<CellRange>,
}

/// Parsed navigation data of a video title set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VtsIfo {
    pub program_chains: Vec<ProgramChain>,
}

fn require(data: &[u8], what: &'static str, end: usize) -> Result<(), StructureError> {
    if end > data.len() {
        Err(StructureError::truncated(what, end, data.len()))
    } else {
        Ok(())
    }
}

/// Parse the contents of a `VTS_nn_0.IFO` (or its `.BUP` backup).
pub fn parse_vts_ifo(data: &[u8]) -> Result<VtsIfo, StructureError> {
    require(data, "VTSI header", VTS_PGCIT_PTR_OFFSET + 4)?;
    if &data[..VTS_MAGIC.len()] != VTS_MAGIC {
        return Err(StructureError::BadSignature {
            expected: "DVDVIDEO-VTS",
        });
    }

    let pgcit_sector = read_u32_be(data, VTS_PGCIT_PTR_OFFSET) as usize;
    if pgcit_sector == 0 {
        return Err(StructureError::invalid("title set has no program chain table"));
    }
    let pgcit = pgcit_sector * IFO_SECTOR_SIZE;
    require(data, "VTS_PGCIT", pgcit + PGCIT_HEADER_LEN)?;

    let pgc_count = read_u16_be(data, pgcit) as usize;
    let mut program_chains = Vec::with_capacity(pgc_count);

    for i in 0..pgc_count {
        let srp = pgcit + PGCIT_HEADER_LEN + i * PGCI_SRP_LEN;
        require(data, "PGCI search pointer", srp + PGCI_SRP_LEN)?;
        let pgc = pgcit + read_u32_be(data, srp + 4) as usize;
        program_chains.push(parse_program_chain(data, pgc)?);
    }

    log::debug!("VTS IFO: {} program chain(s)", program_chains.len());
    Ok(VtsIfo { program_chains })
}

fn parse_program_chain(data: &[u8], pgc: usize) -> Result<ProgramChain, StructureError> {
    require(data, "PGC", pgc + PGC_CELL_PLAYBACK_PTR_OFFSET + 2)?;

    let cell_count = data[pgc + PGC_CELL_COUNT_OFFSET] as usize;
    if cell_count == 0 {
        return Ok(ProgramChain { cells: Vec::new() });
    }

    let table_offset = read_u16_be(data, pgc + PGC_CELL_PLAYBACK_PTR_OFFSET) as usize;
    if table_offset == 0 {
        return Err(StructureError::invalid(format!(
            "PGC with {cell_count} cells has no cell playback table"
        )));
    }

    let table = pgc + table_offset;
    require(data, "cell playback table", table + cell_count * CELL_PLAYBACK_LEN)?;

    let cells = (0..cell_count)
        .map(|i| {
            let entry = table + i * CELL_PLAYBACK_LEN;
            CellRange::new(read_u32_be(data, entry + 8), read_u32_be(data, entry + 20))
        })
        .collect();

    Ok(ProgramChain { cells })
}

#[cfg(test)]
#[path = "tests/ifo_tests.rs"]
mod tests;
