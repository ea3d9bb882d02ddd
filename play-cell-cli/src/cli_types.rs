//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use play_cell_lib::PlaybackOptions;

/// Log target of the end-of-run read error summary, which stays visible
/// under `--quiet`.
pub(crate) const SUMMARY_TARGET: &str = "play_cell::summary";

#[derive(Debug, Parser)]
#[command(name = "play-cell", version)]
#[command(
    about = "Write DVD-Video cells to stdout as an MPEG-2 program stream",
    long_about = None
)]
pub(crate) struct Cli {
    /// Replace unreadable sectors with filler packs instead of aborting
    #[arg(short, long = "ignore-errors")]
    pub ignore_errors: bool,

    /// Extra attempts for each failed sector read
    #[arg(short = 'r', long = "max-retries", value_name = "N")]
    pub max_retries: Option<u32>,

    /// Mark skipped regions of a cell with gap report packs
    #[arg(short = 'g', long = "report-gaps")]
    pub report_gaps: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors and the final read error count
    #[arg(short, long)]
    pub quiet: bool,

    /// Settings file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// DVD device, image file or VIDEO_TS directory
    pub device: PathBuf,

    /// Video title set number
    pub vts: u32,

    /// Program chain number within the title set
    pub pgc: u32,

    /// Cell numbers within the program chain, played in the order given
    #[arg(required = true)]
    pub cells: Vec<u32>,
}

impl Cli {
    /// Apply the command-line flags on top of the configured defaults.
    ///
    /// Switches can only turn behavior on; `--max-retries` replaces the
    /// configured count.
    pub(crate) fn playback_options(&self, defaults: PlaybackOptions) -> PlaybackOptions {
        PlaybackOptions {
            ignore_read_errors: defaults.ignore_read_errors || self.ignore_errors,
            max_read_retries: self.max_retries.unwrap_or(defaults.max_read_retries),
            report_cell_gaps: defaults.report_cell_gaps || self.report_gaps,
        }
    }

    pub(crate) fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Logger for stderr; stdout carries the program stream.
    pub(crate) fn log_builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(self.log_level())
            .filter_module(SUMMARY_TARGET, log::LevelFilter::Warn)
            .format_timestamp(None)
            .format_target(false)
            .target(env_logger::Target::Stderr);
        builder
    }
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
