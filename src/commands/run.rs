//! Run subcommand handler

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use replay_driver::application::{Application, MeasurementOutcome, MeasurementRange};
use replay_driver::cli::RunArgs;
use replay_driver::platform::{self, PlatformKind};
use replay_driver::replay::{SyntheticConfig, SyntheticEngine};
use replay_driver::Config;

/// Name shown in logs and used as the window title.
const APP_NAME: &str = "replay-driver";

/// Effective settings after merging config file and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub engine: SyntheticConfig,
    pub range: MeasurementRange,
    pub pause_frame: Option<u32>,
    pub headless: bool,
}

impl RunSettings {
    /// Flags win over the config file.
    pub fn resolve(args: &RunArgs, config: &Config) -> Self {
        let mut engine = config.synthetic.to_engine_config();
        if let Some(frames) = args.frames {
            engine.frames = frames;
        }
        if let Some(ms) = args.decode_time_ms {
            engine.decode_time = Duration::from_millis(ms);
        }
        if let Some(ms) = args.gpu_time_ms {
            engine.gpu_time = Duration::from_millis(ms);
        }
        engine.fail_at_frame = args.fail_at_frame;

        let mut range = match args.measurement_range {
            Some(r) => MeasurementRange::new(r.start, r.end),
            None => MeasurementRange::default(),
        };
        range.quit_after_range = args.quit_after_measurement_range || config.playback.quit_after_range;
        range.flush_boundaries =
            args.flush_measurement_range || config.playback.flush_measurement_range;

        Self {
            engine,
            range,
            pause_frame: args.pause_frame.or(config.playback.pause_frame),
            headless: args.headless || config.playback.headless,
        }
    }
}

/// Replay the synthetic capture and print the measurement report.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &RunArgs, config: &Config) -> Result<ExitCode> {
    let settings = RunSettings::resolve(args, config);
    tracing::debug!("Run settings: {:?}", settings);

    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = stop.clone();
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let mut platform = platform::select(PlatformKind::detect(settings.headless), stop)
        .context("Failed to initialize platform")?;
    let window = platform
        .create_window(APP_NAME)
        .context("Failed to create output window")?;

    let mut app = Application::new(APP_NAME, platform);
    app.set_pause_frame(settings.pause_frame);
    app.register_window(window.clone());
    app.initialize(Box::new(SyntheticEngine::new(settings.engine)));

    let outcome = app.run(settings.range)?;

    app.unregister_window(&window);
    window.release();
    // Dropping the application restores the terminal before printing.
    drop(app);

    if let Some(report) = outcome.report() {
        println!("{}", report);
    }
    if let Some(path) = &args.measurement_file {
        write_measurement_file(path, &outcome)?;
    }

    Ok(exit_code(&outcome))
}

/// Write the outcome as pretty-printed JSON.
pub fn write_measurement_file(path: &Path, outcome: &MeasurementOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write measurement file {}", path.display()))?;
    Ok(())
}

/// Replay failures exit non-zero; every other outcome is a successful run.
pub fn exit_code(outcome: &MeasurementOutcome) -> ExitCode {
    if is_failure(outcome) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn is_failure(outcome: &MeasurementOutcome) -> bool {
    matches!(outcome, MeasurementOutcome::ReplayFailed)
}
