//! DVD-Video cell playback.
//!
//! Reads one cell of a title set sector by sector and writes it out as an
//! MPEG-2 program stream. Unreadable sectors can be retried, replaced by
//! synthetic packs, or treated as fatal, and cell gaps can be annotated
//! for downstream tools.

pub mod error;
pub mod options;
pub mod player;
pub mod reader;
pub mod recovery;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use error::{PlayError, SettingsError};
pub use options::PlaybackOptions;
pub use player::{CellPlayer, CellReport, play_cell};
pub use recovery::ScanOutcome;
pub use settings::{Settings, load_settings, settings_path};
