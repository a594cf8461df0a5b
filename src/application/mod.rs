//! Run-loop controller and measurement-range timing.
//!
//! # Architecture
//!
//! - `controller`: [`Application`], which owns playback state and drives the
//!   pump-events → check-boundary → replay-frame cycle
//! - `measurement`: [`MeasurementTimer`] and the FPS report it produces
//! - `windows`: identity registry of host surfaces
//! - `state`: [`PlaybackState`] and the [`HostCommand`]s platforms emit
//! - `clock`: monotonic time source used for boundary timestamps
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//! use replay_driver::application::{Application, MeasurementRange};
//! use replay_driver::platform::{self, PlatformKind};
//! use replay_driver::replay::{SyntheticConfig, SyntheticEngine};
//!
//! let stop = Arc::new(AtomicBool::new(false));
//! let platform = platform::select(PlatformKind::Headless, stop).unwrap();
//! let mut app = Application::new("demo", platform);
//! app.initialize(Box::new(SyntheticEngine::new(SyntheticConfig::default())));
//!
//! let outcome = app.run(MeasurementRange::new(10, 110)).unwrap();
//! if let Some(report) = outcome.report() {
//!     println!("{}", report);
//! }
//! ```

mod clock;
mod controller;
mod error;
mod measurement;
mod state;
mod windows;

pub use clock::{Clock, MonotonicClock};
pub use controller::Application;
pub use error::ApplicationError;
pub use measurement::{
    BoundaryAction, MeasurementOutcome, MeasurementRange, MeasurementReport, MeasurementTimer,
};
pub use state::{HostCommand, PlaybackState};
pub use windows::WindowRegistry;
