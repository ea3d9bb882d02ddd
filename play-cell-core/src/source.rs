//! Interfaces to the DVD structure backend.
//!
//! The reconstructor only needs three things from a disc: a title set's
//! program chain table, the sector range of a cell, and raw sector reads
//! from the title VOBs. Backends implement these traits; tests implement
//! them over in-memory sectors.

use std::io;

use crate::error::DvdError;

/// Inclusive range of title-VOB-relative sectors occupied by a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_sector: u32,
    pub last_sector: u32,
}

impl CellRange {
    pub fn new(first_sector: u32, last_sector: u32) -> Self {
        Self {
            first_sector,
            last_sector,
        }
    }

    /// Number of sectors in the cell.
    pub fn len(&self) -> u32 {
        self.last_sector.saturating_add(1).saturating_sub(self.first_sector)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, sector: u32) -> bool {
        (self.first_sector..=self.last_sector).contains(&sector)
    }
}

/// Raw sector access to the title VOBs of one title set.
pub trait SectorStream {
    /// Read consecutive sectors starting at `first` into `buf`.
    ///
    /// `buf.len()` is a multiple of the sector size. Returns the number of
    /// whole sectors read; a short count means the read failed part way.
    fn read_sectors(&mut self, first: u32, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: SectorStream + ?Sized> SectorStream for Box<S> {
    fn read_sectors(&mut self, first: u32, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_sectors(first, buf)
    }
}

/// Navigation data of one video title set.
pub trait TitleSet {
    /// Number of program chains in the title set.
    fn program_chain_count(&self) -> u32;

    /// Number of cells in program chain `pgc` (1-based).
    fn cell_count(&self, pgc: u32) -> Result<u32, DvdError>;

    /// Sector range of `cell` (1-based) in program chain `pgc` (1-based).
    fn cell_range(&self, pgc: u32, cell: u32) -> Result<CellRange, DvdError>;

    /// Open the title VOBs for sector reads.
    fn open_data_stream(&self) -> Result<Box<dyn SectorStream>, DvdError>;
}

/// An opened disc.
pub trait DvdSource {
    /// Load the navigation data of video title set `vts` (1-based).
    fn open_title_set(&self, vts: u32) -> Result<Box<dyn TitleSet>, DvdError>;
}
