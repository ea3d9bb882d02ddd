//! Playback options.

use serde::Deserialize;

/// How a cell is played back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Replace unreadable sectors with synthetic packs instead of aborting.
    pub ignore_read_errors: bool,

    /// Extra attempts made after a failed sector read.
    pub max_read_retries: u32,

    /// Emit a gap report pack where the VOBU chain skips sectors.
    pub report_cell_gaps: bool,
}

impl PlaybackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_read_errors(mut self, ignore: bool) -> Self {
        self.ignore_read_errors = ignore;
        self
    }

    pub fn max_read_retries(mut self, retries: u32) -> Self {
        self.max_read_retries = retries;
        self
    }

    pub fn report_cell_gaps(mut self, report: bool) -> Self {
        self.report_cell_gaps = report;
        self
    }
}
