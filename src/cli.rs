//! Command-line interface definitions.
//!
//! Lives in the library so `xtask` can render the man page from the same
//! definitions the binary parses.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "replay-driver",
    version,
    about = "Frame-by-frame replay driver with pause/step control and measurement-range FPS",
    long_about = "Drives frame-by-frame replay of a recorded workload.\n\n\
        Interactive keys (terminal only): space/p pause, right/n step one frame while paused, q/Esc quit."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a synthetic capture and report measurement-range FPS
    Run(RunArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Number of frames in the synthetic capture
    #[arg(long, value_name = "N")]
    pub frames: Option<u32>,

    /// CPU decode cost per frame, in milliseconds
    #[arg(long, value_name = "MS")]
    pub decode_time_ms: Option<u64>,

    /// Queued GPU cost per frame, in milliseconds
    #[arg(long, value_name = "MS")]
    pub gpu_time_ms: Option<u64>,

    /// Simulate a decode failure when this frame is reached
    #[arg(long, value_name = "FRAME")]
    pub fail_at_frame: Option<u32>,

    /// Frame range to measure, as START-END (END is exclusive)
    #[arg(long, value_name = "START-END")]
    pub measurement_range: Option<FrameRange>,

    /// Stop replay once the end of the measurement range is reached
    #[arg(long)]
    pub quit_after_measurement_range: bool,

    /// Wait for queued work to finish at the measurement range boundaries
    #[arg(long)]
    pub flush_measurement_range: bool,

    /// Pause replay after this frame has been replayed
    #[arg(long, value_name = "FRAME")]
    pub pause_frame: Option<u32>,

    /// Never read keyboard input, even on a terminal
    #[arg(long)]
    pub headless: bool,

    /// Write the measurement outcome as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub measurement_file: Option<PathBuf>,
}

/// A `START-END` frame interval, END exclusive.
///
/// Parsing accepts inverted ranges; whether a range is usable is decided
/// when the measurement is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeParseError {
    #[error("expected START-END, got '{0}'")]
    MissingSeparator(String),

    #[error("invalid frame number '{0}'")]
    InvalidFrame(String),
}

impl FromStr for FrameRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| RangeParseError::MissingSeparator(s.to_string()))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| RangeParseError::InvalidFrame(part.trim().to_string()))
        };

        Ok(Self {
            start: parse(start)?,
            end: parse(end)?,
        })
    }
}
