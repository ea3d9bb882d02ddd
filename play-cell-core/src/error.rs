use thiserror::Error;

/// Errors raised by a DVD structure backend.
///
/// Every variant is fatal for the cell being played: the disc or the
/// requested title/program chain/cell cannot be resolved, and no amount of
/// retrying will change that.
#[derive(Debug, Error)]
pub enum DvdError {
    /// The disc (device, image or directory) could not be opened
    #[error("can't open DVD: {0}")]
    DiscOpen(String),

    /// The IFO of a title set is missing or malformed
    #[error("can't open info file for VTS {vts}: {reason}")]
    TitleSet { vts: u32, reason: String },

    /// The title VOBs of a title set are missing
    #[error("can't open VOB for VTS {vts}: {reason}")]
    StreamOpen { vts: u32, reason: String },

    /// Program chain number outside the title set's chain table
    #[error("bad program chain: {pgc}, VTS only has {available} chains")]
    BadProgramChain { pgc: u32, available: u32 },

    /// Cell number outside the program chain's cell table
    #[error("bad cell: {cell}, PGC only has {available} cells")]
    BadCell { cell: u32, available: u32 },

    /// I/O error while reading disc structures
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DvdError {
    pub fn disc_open(msg: impl Into<String>) -> Self {
        Self::DiscOpen(msg.into())
    }

    pub fn title_set(vts: u32, reason: impl Into<String>) -> Self {
        Self::TitleSet {
            vts,
            reason: reason.into(),
        }
    }

    pub fn stream_open(vts: u32, reason: impl Into<String>) -> Self {
        Self::StreamOpen {
            vts,
            reason: reason.into(),
        }
    }
}

/// A sector was read successfully but is not the navigation pack the
/// VOBU chain says it should be.
///
/// This points at an inconsistent disc index rather than a flaky read, so
/// it is never tolerated, not even when read errors are being ignored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavPackError {
    /// Start codes of a navigation pack are missing
    #[error("not a navigation pack at sector {sector}")]
    NotNavPack { sector: u32 },

    /// The DSI packet names a different logical block
    #[error("bad DSI pack at sector {sector} (claims sector {found})")]
    LbnMismatch { sector: u32, found: u32 },
}
