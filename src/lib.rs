//! Playback driver for recorded graphics workloads.
//!
//! Paces frame-by-frame replay through an external [`replay::ReplayEngine`],
//! handles pause and single-step input from a [`platform::Platform`], and
//! measures FPS over a `[start, end)` frame range.

pub mod application;
pub mod cli;
pub mod config;
pub mod logging;
pub mod platform;
pub mod replay;

pub use application::{Application, MeasurementOutcome, MeasurementRange, PlaybackState};
pub use config::Config;
