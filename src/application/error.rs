//! Controller errors.

/// Errors returned by the run-loop controller.
///
/// Everything else the controller can run into (engine failures, bad
/// measurement ranges, window misuse) degrades to a log line instead.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Application '{name}' has no replay engine; call initialize() before run()")]
    NotInitialized { name: String },
}
