//! ISO 9660 lookup of the `VIDEO_TS` directory.
//!
//! DVD-Video discs use the UDF/ISO 9660 bridge format, so the ISO 9660
//! side is enough to locate the IFO and VOB files on an image or a raw
//! device.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{IsoError, StructureError};

/// ISO 9660 logical block size.
const ISO_SECTOR_SIZE: u64 = 2048;

/// The Primary Volume Descriptor is always at sector 16.
const PVD_SECTOR: u64 = 16;

/// Name of the DVD-Video directory in the root.
pub const VIDEO_TS_DIR: &str = "VIDEO_TS";

/// Read one 2048-byte logical block.
fn read_sector_data<R: Read + Seek>(reader: &mut R, sector: u64) -> std::io::Result<[u8; 2048]> {
    reader.seek(SeekFrom::Start(sector * ISO_SECTOR_SIZE))?;
    let mut data = [0u8; 2048];
    reader.read_exact(&mut data)?;
    Ok(data)
}

/// Parsed ISO 9660 Primary Volume Descriptor.
#[derive(Debug, Clone)]
pub struct PrimaryVolumeDescriptor {
    /// Volume identifier (offset 40, 32 bytes).
    pub volume_identifier: String,
    /// Volume space size in sectors (offset 80, LE u32).
    pub volume_space_size: u32,
    /// LBA of root directory extent (from root dir record at offset 156).
    pub root_dir_extent_lba: u32,
    /// Size of root directory data in bytes.
    pub root_dir_data_length: u32,
}

/// Read and parse the Primary Volume Descriptor from sector 16.
pub fn read_pvd<R: Read + Seek>(reader: &mut R) -> Result<PrimaryVolumeDescriptor, IsoError> {
    let sector_data = read_sector_data(reader, PVD_SECTOR)?;

    if sector_data[0] != 0x01 || &sector_data[1..6] != b"CD001" {
        return Err(StructureError::BadSignature {
            expected: "CD001 primary volume descriptor",
        }
        .into());
    }

    let volume_identifier = String::from_utf8_lossy(&sector_data[40..72])
        .trim_end_matches([' ', '\0'])
        .to_string();
    let volume_space_size = u32::from_le_bytes([
        sector_data[80],
        sector_data[81],
        sector_data[82],
        sector_data[83],
    ]);

    let root = parse_directory_record(&sector_data[156..190])
        .ok_or_else(|| StructureError::invalid("malformed root directory record"))?;

    Ok(PrimaryVolumeDescriptor {
        volume_identifier,
        volume_space_size,
        root_dir_extent_lba: root.extent_lba,
        root_dir_data_length: root.data_length,
    })
}

/// A parsed ISO 9660 directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub extent_lba: u32,
    pub data_length: u32,
    pub file_flags: u8,
    /// Identifier with any `;1` version suffix removed.
    pub file_identifier: String,
}

impl DirectoryRecord {
    pub fn is_directory(&self) -> bool {
        self.file_flags & 0x02 != 0
    }

    /// Byte offset of the file's first block in the image.
    pub fn byte_offset(&self) -> u64 {
        self.extent_lba as u64 * ISO_SECTOR_SIZE
    }
}

/// Parse a single directory record.
fn parse_directory_record(data: &[u8]) -> Option<DirectoryRecord> {
    let record_len = *data.first()? as usize;
    if record_len < 33 || record_len > data.len() {
        return None;
    }

    let extent_lba = u32::from_le_bytes([data[2], data[3], data[4], data[5]]);
    let data_length = u32::from_le_bytes([data[10], data[11], data[12], data[13]]);
    let file_flags = data[25];
    let id_len = data[32] as usize;

    if 33 + id_len > record_len {
        return None;
    }

    let file_identifier = match &data[33..33 + id_len] {
        [0x00] => ".".to_string(),
        [0x01] => "..".to_string(),
        id => {
            let id = String::from_utf8_lossy(id);
            id.split(';').next().unwrap_or_default().to_string()
        }
    };

    Some(DirectoryRecord {
        extent_lba,
        data_length,
        file_flags,
        file_identifier,
    })
}

/// Read every record of the directory stored at `extent_lba`.
pub fn read_directory<R: Read + Seek>(
    reader: &mut R,
    extent_lba: u32,
    data_length: u32,
) -> Result<Vec<DirectoryRecord>, IsoError> {
    let mut records = Vec::new();
    let dir_sectors = (data_length as u64).div_ceil(ISO_SECTOR_SIZE);

    for sector_offset in 0..dir_sectors {
        let sector_data = read_sector_data(reader, extent_lba as u64 + sector_offset)?;

        let mut pos = 0;
        while pos < sector_data.len() {
            let record_len = sector_data[pos] as usize;
            // Records never straddle sectors; a zero length pads to the end.
            if record_len == 0 || pos + record_len > sector_data.len() {
                break;
            }
            if let Some(record) = parse_directory_record(&sector_data[pos..pos + record_len]) {
                records.push(record);
            }
            pos += record_len;
        }
    }

    Ok(records)
}

/// Locate `VIDEO_TS` in the root directory and list its entries.
pub fn list_video_ts<R: Read + Seek>(reader: &mut R) -> Result<Vec<DirectoryRecord>, IsoError> {
    let pvd = read_pvd(reader)?;
    log::debug!(
        "ISO 9660 volume '{}' ({} sectors)",
        pvd.volume_identifier,
        pvd.volume_space_size
    );

    let root = read_directory(reader, pvd.root_dir_extent_lba, pvd.root_dir_data_length)?;
    let video_ts = root
        .into_iter()
        .find(|r| r.is_directory() && r.file_identifier.eq_ignore_ascii_case(VIDEO_TS_DIR))
        .ok_or_else(|| StructureError::not_found(VIDEO_TS_DIR))?;

    let entries = read_directory(reader, video_ts.extent_lba, video_ts.data_length)?;
    Ok(entries.into_iter().filter(|r| !r.is_directory()).collect())
}

#[cfg(test)]
#[path = "tests/iso9660_tests.rs"]
mod tests;
