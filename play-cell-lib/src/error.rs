use play_cell_core::{DvdError, NavPackError};
use thiserror::Error;

/// Errors that abort playback of a cell.
#[derive(Debug, Error)]
pub enum PlayError {
    /// The title set, program chain or cell could not be resolved
    #[error(transparent)]
    Dvd(#[from] DvdError),

    /// A navigation pack was read but is structurally wrong
    #[error(transparent)]
    NavPack(#[from] NavPackError),

    /// A navigation pack could not be read within the retry budget
    #[error("unrecoverable read error on navigation pack at sector {sector}")]
    NavPackReadFailed { sector: u32 },

    /// A data sector could not be read within the retry budget
    #[error("unrecoverable read error at sector {sector}")]
    ReadFailed { sector: u32 },

    /// The output sink rejected a write
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
}

/// Errors loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl SettingsError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
