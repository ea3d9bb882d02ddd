//! Opening a DVD-Video disc from a directory, an image or a device.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use play_cell_core::{CellRange, DvdError, DvdSource, SectorStream, TitleSet};

use crate::iso9660::{self, DirectoryRecord, VIDEO_TS_DIR};
use crate::ifo::{VtsIfo, parse_vts_ifo};
use crate::vob::{MAX_VOB_PARTS, TitleVobs, VobSegment};

/// Highest title set number a disc can carry.
pub const MAX_TITLE_SETS: u32 = 99;

/// Where the `VIDEO_TS` files live.
#[derive(Debug, Clone)]
enum Layout {
    /// A mounted disc or a copied `VIDEO_TS` directory.
    Directory(PathBuf),
    /// An ISO image or a raw block device.
    Image {
        path: PathBuf,
        entries: Vec<DirectoryRecord>,
    },
}

impl Layout {
    /// Read the whole of `name`, or `None` if there is no such file.
    fn read_file(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match self {
            Layout::Directory(dir) => match find_in_dir(dir, name)? {
                Some(path) => fs::read(path).map(Some),
                None => Ok(None),
            },
            Layout::Image { path, entries } => {
                let Some(record) = find_record(entries, name) else {
                    return Ok(None);
                };
                let mut file = File::open(path)?;
                file.seek(SeekFrom::Start(record.byte_offset()))?;
                let mut data = vec![0u8; record.data_length as usize];
                file.read_exact(&mut data)?;
                Ok(Some(data))
            }
        }
    }

    /// Open `name` as a VOB segment, or `None` if there is no such file.
    fn open_segment(&self, name: &str, image: Option<&File>) -> io::Result<Option<VobSegment>> {
        match self {
            Layout::Directory(dir) => {
                let Some(path) = find_in_dir(dir, name)? else {
                    return Ok(None);
                };
                let file = File::open(&path)?;
                let length = file.metadata()?.len();
                Ok(Some(VobSegment::new(file, 0, length)))
            }
            Layout::Image { path, entries } => {
                let Some(record) = find_record(entries, name) else {
                    return Ok(None);
                };
                let file = match image {
                    Some(image) => image.try_clone()?,
                    None => File::open(path)?,
                };
                Ok(Some(VobSegment::new(
                    file,
                    record.byte_offset(),
                    record.data_length as u64,
                )))
            }
        }
    }
}

fn find_record<'a>(entries: &'a [DirectoryRecord], name: &str) -> Option<&'a DirectoryRecord> {
    entries
        .iter()
        .find(|r| r.file_identifier.eq_ignore_ascii_case(name))
}

/// Case-insensitive lookup of `name` directly inside `dir`.
fn find_in_dir(dir: &Path, name: &str) -> io::Result<Option<PathBuf>> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().eq_ignore_ascii_case(name) {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

fn has_ifo_files(dir: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().to_ascii_uppercase();
        if name.ends_with(".IFO") || name.ends_with(".BUP") {
            return Ok(true);
        }
    }
    Ok(false)
}

fn open_error(path: &Path, e: impl std::fmt::Display) -> DvdError {
    DvdError::disc_open(format!("{}: {e}", path.display()))
}

fn ifo_name(vts: u32, ext: &str) -> String {
    format!("VTS_{vts:02}_0.{ext}")
}

fn vob_name(vts: u32, part: u32) -> String {
    format!("VTS_{vts:02}_{part}.VOB")
}

/// A DVD-Video disc.
///
/// `path` may be a directory containing `VIDEO_TS`, the `VIDEO_TS`
/// directory itself, or an ISO 9660 image or block device.
#[derive(Debug, Clone)]
pub struct VideoTsDisc {
    layout: Layout,
}

impl VideoTsDisc {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DvdError> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|e| open_error(path, e))?;
        let layout = if metadata.is_dir() {
            let video_ts = match find_in_dir(path, VIDEO_TS_DIR).map_err(|e| open_error(path, e))? {
                Some(dir) if dir.is_dir() => dir,
                _ => {
                    if !has_ifo_files(path).map_err(|e| open_error(path, e))? {
                        return Err(open_error(path, "no VIDEO_TS directory"));
                    }
                    path.to_path_buf()
                }
            };
            log::debug!("reading DVD files from {}", video_ts.display());
            Layout::Directory(video_ts)
        } else {
            let mut file = File::open(path).map_err(|e| open_error(path, e))?;
            let entries = iso9660::list_video_ts(&mut file).map_err(|e| open_error(path, e))?;
            log::debug!(
                "found {} file(s) in VIDEO_TS of image {}",
                entries.len(),
                path.display()
            );
            Layout::Image {
                path: path.to_path_buf(),
                entries,
            }
        };

        Ok(Self { layout })
    }

    /// Load and parse the IFO of `vts`, falling back to the `.BUP` copy.
    fn load_ifo(&self, vts: u32) -> Result<VtsIfo, DvdError> {
        let mut first_error = None;

        for ext in ["IFO", "BUP"] {
            let name = ifo_name(vts, ext);
            let reason = match self.layout.read_file(&name) {
                Ok(Some(data)) => match parse_vts_ifo(&data) {
                    Ok(ifo) => return Ok(ifo),
                    Err(e) => format!("{name}: {e}"),
                },
                Ok(None) => format!("{name} not found"),
                Err(e) => format!("{name}: {e}"),
            };
            log::debug!("VTS {vts}: {reason}");
            first_error.get_or_insert(reason);
        }

        Err(DvdError::title_set(vts, first_error.unwrap_or_default()))
    }
}

impl DvdSource for VideoTsDisc {
    fn open_title_set(&self, vts: u32) -> Result<Box<dyn TitleSet>, DvdError> {
        if vts == 0 || vts > MAX_TITLE_SETS {
            return Err(DvdError::title_set(
                vts,
                format!("title set number must be between 1 and {MAX_TITLE_SETS}"),
            ));
        }

        let ifo = self.load_ifo(vts)?;
        Ok(Box::new(VideoTitleSet {
            vts,
            ifo,
            layout: self.layout.clone(),
        }))
    }
}

/// One opened title set of a [`VideoTsDisc`].
#[derive(Debug)]
pub struct VideoTitleSet {
    vts: u32,
    ifo: VtsIfo,
    layout: Layout,
}

impl VideoTitleSet {
    fn chain_cells(&self, pgc: u32) -> Result<&[CellRange], DvdError> {
        let bad = || DvdError::BadProgramChain {
            pgc,
            available: self.program_chain_count(),
        };
        let index = pgc.checked_sub(1).ok_or_else(bad)? as usize;
        self.ifo
            .program_chains
            .get(index)
            .map(|chain| chain.cells.as_slice())
            .ok_or_else(bad)
    }
}

impl TitleSet for VideoTitleSet {
    fn program_chain_count(&self) -> u32 {
        self.ifo.program_chains.len() as u32
    }

    fn cell_count(&self, pgc: u32) -> Result<u32, DvdError> {
        Ok(self.chain_cells(pgc)?.len() as u32)
    }

    fn cell_range(&self, pgc: u32, cell: u32) -> Result<CellRange, DvdError> {
        let cells = self.chain_cells(pgc)?;
        cell.checked_sub(1)
            .and_then(|index| cells.get(index as usize))
            .copied()
            .ok_or(DvdError::BadCell {
                cell,
                available: cells.len() as u32,
            })
    }

    fn open_data_stream(&self) -> Result<Box<dyn SectorStream>, DvdError> {
        let stream_err = |e: io::Error| DvdError::stream_open(self.vts, e.to_string());

        let image = match &self.layout {
            Layout::Image { path, .. } => Some(File::open(path).map_err(stream_err)?),
            Layout::Directory(_) => None,
        };

        let mut segments = Vec::new();
        for part in 1..=MAX_VOB_PARTS {
            match self
                .layout
                .open_segment(&vob_name(self.vts, part), image.as_ref())
                .map_err(stream_err)?
            {
                Some(segment) => segments.push(segment),
                None => break,
            }
        }

        if segments.is_empty() {
            return Err(DvdError::stream_open(
                self.vts,
                format!("{} not found", vob_name(self.vts, 1)),
            ));
        }

        let vobs = TitleVobs::new(segments);
        log::debug!(
            "VTS {}: title VOBs hold {} sectors",
            self.vts,
            vobs.sector_count()
        );
        Ok(Box::new(vobs))
    }
}

#[cfg(test)]
#[path = "tests/disc_tests.rs"]
mod tests;
