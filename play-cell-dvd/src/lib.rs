//! DVD-Video structure backend.
//!
//! Resolves title sets, program chains and cells from the `VIDEO_TS`
//! files of a disc and exposes the title VOBs as a sector stream:
//!
//! - [`ifo`]: `VTS_nn_0.IFO` program chain and cell tables
//! - [`iso9660`]: `VIDEO_TS` lookup on images and raw devices
//! - [`vob`]: the segmented `VTS_nn_m.VOB` title stream
//! - [`disc`]: the [`DvdSource`](play_cell_core::DvdSource) implementation

pub mod disc;
pub mod error;
pub mod ifo;
pub mod iso9660;
pub mod vob;

#[cfg(test)]
mod test_support;

pub use disc::{VideoTitleSet, VideoTsDisc};
pub use error::{IsoError, StructureError};
pub use vob::{TitleVobs, VobSegment};
