//! Cell playback.
//!
//! A cell is a chain of VOBUs. Each VOBU is a navigation pack followed by
//! `vobu_ea` data sectors; its DSI gives the distance to the next
//! navigation pack. [`CellPlayer`] walks that chain and writes every
//! sector to the output, substituting synthetic packs for sectors that
//! cannot be read so the SCR keeps advancing.

use std::io::Write;

use play_cell_core::util::format_bytes_approx;
use play_cell_core::{
    CellRange, DvdSource, NextVobu, SCR_MIN_FEED, SECTOR_SIZE, Scr, SectorStream, SystemHeader,
    TitleSet, build_dummy_pack, build_gap_pack, check_nav_pack, system_header,
};

use crate::error::PlayError;
use crate::options::PlaybackOptions;
use crate::reader::{BUF_SECTORS, read_nav_sector, read_payload};
use crate::recovery::{ScanOutcome, scan_for_nav_pack};

/// Summary of one played cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellReport {
    /// Sectors written to the output, synthetic packs included.
    pub sectors_written: u64,
    /// Gap report packs among them.
    pub gaps_reported: u32,
    /// Unreadable sectors replaced under `ignore_read_errors`.
    pub recovered_sectors: u32,
    /// The VOBU chain was lost before its end-of-cell marker.
    pub ended_early: bool,
}

impl CellReport {
    pub fn bytes_written(&self) -> u64 {
        self.sectors_written * SECTOR_SIZE as u64
    }
}

/// Where the next VOBU's navigation pack came from.
enum VobuStart {
    /// Read from disc, or synthesized after a resync.
    Nav { vobu_ea: u32, next_vobu: NextVobu },
    /// Scanning for a lost navigation pack hit the end of the cell.
    Lost,
}

/// Plays cells to an output stream, one after another.
///
/// The read error tally and the last seen system header carry over from
/// one cell to the next.
pub struct CellPlayer {
    options: PlaybackOptions,
    buf: Vec<u8>,
    system_header: SystemHeader,
    read_error_count: u32,
    total_sectors_written: u64,
}

impl CellPlayer {
    pub fn new(options: PlaybackOptions) -> Self {
        Self {
            options,
            buf: vec![0u8; BUF_SECTORS * SECTOR_SIZE],
            system_header: SystemHeader::default(),
            read_error_count: 0,
            total_sectors_written: 0,
        }
    }

    /// Unreadable sectors tolerated so far, across all cells.
    pub fn read_error_count(&self) -> u32 {
        self.read_error_count
    }

    /// Resolve `cell` of program chain `pgc` and play it.
    pub fn play_title_cell<W: Write + ?Sized>(
        &mut self,
        title_set: &dyn TitleSet,
        pgc: u32,
        cell: u32,
        out: &mut W,
    ) -> Result<CellReport, PlayError> {
        let resolved = title_set
            .cell_range(pgc, cell)
            .and_then(|range| Ok((range, title_set.open_data_stream()?)));
        let (range, mut stream) = match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                if self.total_sectors_written > 0 {
                    write_poison_sector(out);
                }
                return Err(e.into());
            }
        };
        log::debug!(
            "PGC {pgc} cell {cell}: sectors {}..={}",
            range.first_sector,
            range.last_sector
        );

        let report = self.play_cell(&mut *stream, range, out)?;
        log::info!(
            "PGC {pgc} cell {cell}: wrote {} sectors ({})",
            report.sectors_written,
            format_bytes_approx(report.bytes_written())
        );
        Ok(report)
    }

    /// Play the cell occupying `range` of `stream` to `out`.
    pub fn play_cell<S, W>(
        &mut self,
        stream: &mut S,
        range: CellRange,
        out: &mut W,
    ) -> Result<CellReport, PlayError>
    where
        S: SectorStream + ?Sized,
        W: Write + ?Sized,
    {
        let mut report = CellReport::default();
        if range.is_empty() {
            log::warn!(
                "cell range {}..={} is empty, nothing to play",
                range.first_sector,
                range.last_sector
            );
            return Ok(report);
        }

        let mut sector = range.first_sector;
        let mut last_scr = Scr::default();

        loop {
            let (vobu_ea, next_vobu) =
                match self.start_vobu(stream, sector, range, last_scr, &mut report, out)? {
                    VobuStart::Nav { vobu_ea, next_vobu } => (vobu_ea, next_vobu),
                    VobuStart::Lost => {
                        log::warn!("no navigation pack found after sector {sector}, cell ends early");
                        report.ended_early = true;
                        break;
                    }
                };

            self.emit(out, 1, &mut report)?;
            last_scr = Scr::from_pack(&self.buf);

            let mut written = 0u32;
            while written < vobu_ea {
                let first = sector + 1 + written;
                let len = match read_payload(
                    stream,
                    first,
                    vobu_ea - written,
                    &mut self.buf,
                    self.options.max_read_retries,
                ) {
                    Some(len) => len,
                    None => {
                        self.tolerate_read_failure(first, &mut report, out)?;
                        build_dummy_pack(&mut self.buf[..SECTOR_SIZE], last_scr + SCR_MIN_FEED);
                        1
                    }
                };

                self.emit(out, len, &mut report)?;
                last_scr = Scr::from_pack(&self.buf[(len - 1) * SECTOR_SIZE..]);
                written += len as u32;
            }

            let span = match next_vobu {
                NextVobu::EndOfCell => range.last_sector - sector + 1,
                NextVobu::Offset(offset) => offset,
            };
            let gap = span.saturating_sub(1 + written);
            if gap > 0 {
                log::debug!("cell gap of {gap} sectors after VOBU at {sector}");
                if self.options.report_cell_gaps {
                    build_gap_pack(&mut self.buf[..SECTOR_SIZE], last_scr, gap);
                    self.emit(out, 1, &mut report)?;
                    report.gaps_reported += 1;
                }
            }

            match next_vobu {
                NextVobu::EndOfCell => break,
                NextVobu::Offset(0) => {
                    log::warn!("VOBU at sector {sector} links to itself, cell ends early");
                    report.ended_early = true;
                    break;
                }
                NextVobu::Offset(offset) => {
                    match sector.checked_add(offset).filter(|next| range.contains(*next)) {
                        Some(next) => sector = next,
                        None => {
                            log::warn!(
                                "VOBU at sector {sector} links {offset} sectors ahead, past the cell end {}; cell ends early",
                                range.last_sector
                            );
                            report.ended_early = true;
                            break;
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// Read and validate the navigation pack at `sector` into the buffer,
    /// or resynchronize if it is unreadable.
    fn start_vobu<S, W>(
        &mut self,
        stream: &mut S,
        sector: u32,
        range: CellRange,
        last_scr: Scr,
        report: &mut CellReport,
        out: &mut W,
    ) -> Result<VobuStart, PlayError>
    where
        S: SectorStream + ?Sized,
        W: Write + ?Sized,
    {
        let retries = self.options.max_read_retries;

        if read_nav_sector(stream, sector, &mut self.buf, retries) {
            let dsi = match check_nav_pack(&self.buf[..SECTOR_SIZE], sector) {
                Ok(dsi) => dsi,
                Err(e) => {
                    if self.total_sectors_written > 0 {
                        write_poison_sector(out);
                    }
                    return Err(e.into());
                }
            };
            self.system_header = system_header(&self.buf);
            return Ok(VobuStart::Nav {
                vobu_ea: dsi.vobu_ea,
                next_vobu: dsi.next_vobu,
            });
        }

        if !self.options.ignore_read_errors {
            write_poison_sector(out);
            return Err(PlayError::NavPackReadFailed { sector });
        }
        log::warn!("read failed for navigation pack at sector {sector} (ignored)");
        self.read_error_count += 1;
        report.recovered_sectors += 1;

        Ok(
            match scan_for_nav_pack(
                stream,
                sector,
                range.last_sector,
                &mut self.buf,
                retries,
                last_scr,
                &self.system_header,
            ) {
                ScanOutcome::Resync { vobu_ea, next_vobu } => VobuStart::Nav {
                    vobu_ea,
                    next_vobu: NextVobu::Offset(next_vobu),
                },
                ScanOutcome::EndOfCell => VobuStart::Lost,
            },
        )
    }

    /// Apply the read error policy to an unreadable data sector.
    fn tolerate_read_failure<W: Write + ?Sized>(
        &mut self,
        sector: u32,
        report: &mut CellReport,
        out: &mut W,
    ) -> Result<(), PlayError> {
        if !self.options.ignore_read_errors {
            write_poison_sector(out);
            return Err(PlayError::ReadFailed { sector });
        }
        log::warn!("read failed at sector {sector} (ignored)");
        self.read_error_count += 1;
        report.recovered_sectors += 1;
        Ok(())
    }

    /// Write the first `count` sectors of the buffer.
    fn emit<W: Write + ?Sized>(
        &mut self,
        out: &mut W,
        count: usize,
        report: &mut CellReport,
    ) -> Result<(), PlayError> {
        out.write_all(&self.buf[..count * SECTOR_SIZE])
            .map_err(PlayError::Write)?;
        report.sectors_written += count as u64;
        self.total_sectors_written += count as u64;
        Ok(())
    }
}

/// Write an all-zero sector so a downstream consumer rejects the stream
/// instead of accepting it truncated.
fn write_poison_sector<W: Write + ?Sized>(out: &mut W) {
    if let Err(e) = out.write_all(&[0u8; SECTOR_SIZE]) {
        log::debug!("could not write terminating zero sector: {e}");
    }
}

/// Play a single cell of `source` with the given options.
pub fn play_cell<W: Write + ?Sized>(
    source: &dyn DvdSource,
    vts: u32,
    pgc: u32,
    cell: u32,
    options: PlaybackOptions,
    out: &mut W,
) -> Result<CellReport, PlayError> {
    let title_set = source.open_title_set(vts)?;
    CellPlayer::new(options).play_title_cell(&*title_set, pgc, cell, out)
}

#[cfg(test)]
#[path = "tests/player_tests.rs"]
mod tests;
