//! Runtime-toggled instrumentation
//!
//! Stage timing and debug records are always compiled in and switched by a
//! runtime flag, not a build flag. Output goes through the `log` facade;
//! routing it is the embedding binary's concern.

use std::time::Instant;

/// Instrumentation switch owned by a [`crate::Chunker`].
#[derive(Debug, Clone, Default)]
pub struct Instrument {
    enabled: bool,
}

/// In-flight stage timing; emits on [`StageTimer::finish`].
#[derive(Debug)]
pub struct StageTimer {
    stage: &'static str,
    started: Option<Instant>,
}

impl Instrument {
    /// Instrumentation with the given initial state.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether records are currently emitted.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle record emission at runtime.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Emit a debug record; the message closure only runs when enabled.
    pub fn record(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            log::debug!(target: "kizami::chunker", "{}", message());
        }
    }

    /// Start timing a named stage.
    pub fn timer(&self, stage: &'static str) -> StageTimer {
        StageTimer {
            stage,
            started: self.enabled.then(Instant::now),
        }
    }
}

impl StageTimer {
    /// Stop the timer and emit the elapsed time.
    pub fn finish(self) {
        if let Some(started) = self.started {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            log::debug!(target: "kizami::chunker", "{} took {elapsed_ms:.3}ms", self.stage);
        }
    }
}
