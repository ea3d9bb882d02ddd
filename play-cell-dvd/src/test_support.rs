//! Builders for synthetic DVD structures used across this crate's tests.

/// Build a minimal `VTS_nn_0.IFO`: one sector of VTSI header followed by
/// a VTS_PGCIT at sector 1 holding the given program chains.
pub(crate) fn make_vts_ifo(pgcs: &[&[(u32, u32)]]) -> Vec<u8> {
    let mut data = vec![0u8; 2048];
    data[..12].copy_from_slice(b"DVDVIDEO-VTS");
    data[0xCC..0xD0].copy_from_slice(&1u32.to_be_bytes());

    let mut pgcit = vec![0u8; 8 + 8 * pgcs.len()];
    pgcit[0..2].copy_from_slice(&(pgcs.len() as u16).to_be_bytes());

    let mut bodies = Vec::new();
    for (i, cells) in pgcs.iter().enumerate() {
        let pgc_start = pgcit.len() + bodies.len();
        let srp = 8 + 8 * i;
        pgcit[srp] = 0x80 | (i as u8 + 1);
        pgcit[srp + 4..srp + 8].copy_from_slice(&(pgc_start as u32).to_be_bytes());

        let mut pgc = vec![0u8; 0xEC];
        pgc[3] = cells.len() as u8;
        if !cells.is_empty() {
            pgc[0xE8..0xEA].copy_from_slice(&0xECu16.to_be_bytes());
        }
        for &(first, last) in cells.iter() {
            let mut entry = [0u8; 24];
            entry[8..12].copy_from_slice(&first.to_be_bytes());
            entry[20..24].copy_from_slice(&last.to_be_bytes());
            pgc.extend_from_slice(&entry);
        }
        bodies.extend_from_slice(&pgc);
    }

    let last_byte = (pgcit.len() + bodies.len() - 1) as u32;
    pgcit[4..8].copy_from_slice(&last_byte.to_be_bytes());
    data.extend_from_slice(&pgcit);
    data.extend_from_slice(&bodies);
    data.resize(data.len().div_ceil(2048) * 2048, 0);
    data
}

/// Sector `n` of a title VOB, tagged with its absolute number so reads can
/// be checked.
pub(crate) fn make_vob_sector(n: u32) -> [u8; 2048] {
    let mut sector = [0u8; 2048];
    sector[..4].copy_from_slice(&n.to_be_bytes());
    sector[2044..].copy_from_slice(&n.to_be_bytes());
    sector
}

pub(crate) fn make_vob(first: u32, count: u32) -> Vec<u8> {
    (first..first + count).flat_map(make_vob_sector).collect()
}

/// Build an ISO 9660 directory record.
pub(crate) fn make_dir_record(name: &[u8], extent_lba: u32, data_length: u32, is_dir: bool) -> Vec<u8> {
    let id_len = name.len();
    let record_len = 33 + id_len + (id_len + 1) % 2;
    let mut record = vec![0u8; record_len];
    record[0] = record_len as u8;
    record[2..6].copy_from_slice(&extent_lba.to_le_bytes());
    record[6..10].copy_from_slice(&extent_lba.to_be_bytes());
    record[10..14].copy_from_slice(&data_length.to_le_bytes());
    record[14..18].copy_from_slice(&data_length.to_be_bytes());
    record[25] = if is_dir { 0x02 } else { 0x00 };
    record[32] = id_len as u8;
    record[33..33 + id_len].copy_from_slice(name);
    record
}

/// Build an ISO image holding `VIDEO_TS/` with the given files.
///
/// Layout: PVD at 16, root directory at 18, VIDEO_TS directory at 19,
/// file data from sector 20 on, each file sector-aligned.
pub(crate) fn make_iso_image(files: &[(&str, Vec<u8>)]) -> Vec<u8> {
    const ROOT: u32 = 18;
    const VIDEO_TS: u32 = 19;

    let mut image = vec![0u8; 20 * 2048];

    let pvd = &mut image[16 * 2048..17 * 2048];
    pvd[0] = 0x01;
    pvd[1..6].copy_from_slice(b"CD001");
    pvd[6] = 0x01;
    pvd[40..48].copy_from_slice(b"TESTDISC");
    let root_record = make_dir_record(&[0x00], ROOT, 2048, true);
    pvd[156..156 + root_record.len()].copy_from_slice(&root_record);

    let mut root = Vec::new();
    root.extend(make_dir_record(&[0x00], ROOT, 2048, true));
    root.extend(make_dir_record(&[0x01], ROOT, 2048, true));
    root.extend(make_dir_record(b"VIDEO_TS", VIDEO_TS, 2048, true));
    image[ROOT as usize * 2048..ROOT as usize * 2048 + root.len()].copy_from_slice(&root);

    let mut dir = Vec::new();
    dir.extend(make_dir_record(&[0x00], VIDEO_TS, 2048, true));
    dir.extend(make_dir_record(&[0x01], ROOT, 2048, true));
    let mut next_lba = 20u32;
    for (name, content) in files {
        let id = format!("{name};1");
        dir.extend(make_dir_record(id.as_bytes(), next_lba, content.len() as u32, false));
        let sectors = content.len().div_ceil(2048);
        image.extend_from_slice(content);
        image.resize((next_lba as usize + sectors) * 2048, 0);
        next_lba += sectors as u32;
    }
    image[VIDEO_TS as usize * 2048..VIDEO_TS as usize * 2048 + dir.len()].copy_from_slice(&dir);

    let total = (image.len() / 2048) as u32;
    image[16 * 2048 + 80..16 * 2048 + 84].copy_from_slice(&total.to_le_bytes());
    image[16 * 2048 + 84..16 * 2048 + 88].copy_from_slice(&total.to_be_bytes());
    image
}
