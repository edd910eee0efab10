use log::{log_enabled, warn, Level};
use std::time::{Duration, Instant};

/// Traces how long one phase of a simulation tick (integration, relaxation) took.
///
/// Emits nothing unless trace logging is enabled for the crate.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if log_enabled!(Level::Trace) {
            let elapsed = self.start.elapsed();
            log::trace!("end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}

/// Warns when the physics work of a tick ate the whole tick interval. Returns whether it did.
pub fn warn_if_tick_budget_exceeded(processing: Duration, budget: Duration) -> bool {
    if processing <= budget {
        return false;
    }
    warn!(
        "Tick exceeded budget: {:.2} ms > {:.2} ms",
        processing.as_secs_f32() * 1000.0,
        budget.as_secs_f32() * 1000.0
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_check_is_strict() {
        let budget = Duration::from_millis(16);
        assert!(!warn_if_tick_budget_exceeded(Duration::from_millis(16), budget));
        assert!(warn_if_tick_budget_exceeded(Duration::from_millis(17), budget));
    }
}
