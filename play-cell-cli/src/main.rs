//! play-cell CLI
//!
//! Writes one or more cells of a DVD-Video title set to stdout as an
//! MPEG-2 program stream, for piping into a requantizer or muxer.

mod cli_types;
mod error;

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use play_cell_core::DvdSource;
use play_cell_dvd::VideoTsDisc;
use play_cell_lib::{CellPlayer, load_settings};

use crate::cli_types::{Cli, SUMMARY_TARGET};
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    // RUST_LOG wins over the command-line level.
    cli.log_builder().parse_default_env().init();

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(read_errors) => {
            log::warn!(
                target: SUMMARY_TARGET,
                "encountered a total of {} read error(s)",
                read_errors.if_supports_color(Stderr, |t| t.yellow())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Play every requested cell and return the number of tolerated read errors.
fn run(cli: &Cli) -> Result<u32, CliError> {
    let settings = load_settings(cli.config.as_deref())?;
    let options = cli.playback_options(settings.playback);
    log::debug!("playback options: {options:?}");

    let disc = VideoTsDisc::open(&cli.device)?;
    let title_set = disc.open_title_set(cli.vts)?;
    // Reject bad cell numbers before anything reaches stdout.
    for &cell in &cli.cells {
        title_set.cell_range(cli.pgc, cell)?;
    }

    let mut player = CellPlayer::new(options);
    let mut out = BufWriter::new(io::stdout().lock());

    for &cell in &cli.cells {
        if let Err(e) = player.play_title_cell(&*title_set, cli.pgc, cell, &mut out) {
            // Deliver what was written, including any terminating zero sector.
            if let Err(flush_err) = out.flush() {
                log::debug!("flush after failure: {flush_err}");
            }
            return Err(e.into());
        }
    }

    out.flush()?;
    Ok(player.read_error_count())
}
