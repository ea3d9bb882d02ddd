//! Core building blocks for reconstructing DVD-Video cells as MPEG-2
//! program streams.
//!
//! Everything in this crate is pure byte manipulation over 2048-byte
//! sectors: the SCR codec, navigation pack validation, DSI decoding,
//! stream-id classification and the synthetic pack templates. Disc access
//! is abstracted behind the traits in [`source`].

pub mod dsi;
pub mod error;
pub mod nav;
pub mod pack;
pub mod scr;
pub mod source;
pub mod stream;
pub mod util;

pub use dsi::{DsiInfo, NextVobu, parse_dsi};
pub use error::{DvdError, NavPackError};
pub use nav::{check_nav_pack, is_nav_pack, system_header};
pub use pack::{build_dummy_pack, build_gap_pack, build_nav_pack};
pub use scr::{SCR_MIN_FEED, Scr};
pub use source::{CellRange, DvdSource, SectorStream, TitleSet};
pub use stream::{StreamClass, probe_pes};

/// Size of one DVD logical block in bytes.
pub const SECTOR_SIZE: usize = 2048;

/// Number of bytes in a saved system header payload.
pub const SYSTEM_HEADER_LEN: usize = 18;

/// Payload bytes of a navigation pack's system header.
pub type SystemHeader = [u8; SYSTEM_HEADER_LEN];
