use thiserror::Error;

use play_cell_core::DvdError;
use play_cell_lib::{PlayError, SettingsError};

/// Errors that end the program with a failure status.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Playback of a cell failed
    #[error(transparent)]
    Play(#[from] PlayError),

    /// The disc or title set could not be opened
    #[error(transparent)]
    Dvd(#[from] DvdError),

    /// The settings file could not be read
    #[error("config error: {0}")]
    Config(#[from] SettingsError),

    /// Writing to stdout failed
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
