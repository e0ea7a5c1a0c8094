//! Synchronous progress reporting.

/// Receives `(fraction, message)` at fixed milestones of an extraction.
///
/// Fractions are the milestones themselves (0.5, 0.8, 0.9) and always lie
/// in `[0, 1]`; sinks get them unchanged. Any `FnMut(f32, &str)` closure
/// is a `Progress`.
pub trait Progress {
    /// Report completion in `[0, 1]` with a human-readable status.
    fn report(&mut self, fraction: f32, message: &str);
}

impl<F: FnMut(f32, &str)> Progress for F {
    fn report(&mut self, fraction: f32, message: &str) {
        self(fraction, message)
    }
}

/// A progress sink that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _fraction: f32, _message: &str) {}
}

/// A progress sink that forwards reports to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&mut self, fraction: f32, message: &str) {
        log::info!("[{:>3.0}%] {}", fraction * 100.0, message);
    }
}
