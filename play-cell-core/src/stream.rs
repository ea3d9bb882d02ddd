//! MPEG-2 start codes and stream-id classification.

/// Pack header start code.
pub const PACK_START_CODE: u32 = 0x0000_01BA;

/// System header start code.
pub const SYSTEM_HEADER_START_CODE: u32 = 0x0000_01BB;

/// Private stream 2 start code (PCI/DSI packets, gap reports).
pub const PRIVATE_STREAM_2_START_CODE: u32 = 0x0000_01BF;

/// Offset of the first packet after a 14-byte pack header.
pub const FIRST_PACKET_OFFSET: usize = 14;

/// How the first packet of a sector relates to VOBU structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamClass {
    /// Video, audio or private stream 1: data belonging to a VOBU.
    Payload,
    /// A system header, only found in navigation packs.
    SystemHeader,
    /// Anything else (padding, unknown ids).
    Other,
}

/// Classify a PES/system stream id.
pub fn classify(stream_id: u8) -> StreamClass {
    match stream_id {
        0xE0 | 0xBD | 0xBE | 0xC0..=0xC7 => StreamClass::Payload,
        0xBB => StreamClass::SystemHeader,
        _ => StreamClass::Other,
    }
}

/// Look for a `00 00 01 <id>` prefix right after the pack header.
///
/// Returns `None` when no start code prefix is present.
pub fn probe_pes(sector: &[u8]) -> Option<StreamClass> {
    let prefix = sector.get(FIRST_PACKET_OFFSET..FIRST_PACKET_OFFSET + 4)?;
    match prefix {
        [0x00, 0x00, 0x01, id] => Some(classify(*id)),
        _ => None,
    }
}
