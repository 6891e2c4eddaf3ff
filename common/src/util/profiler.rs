use std::time::Instant;

/// Logs how long a scope took when it is dropped.
pub struct ScopedTimer {
    label: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::info!(
            "{} took {:.6}s",
            self.label,
            self.start.elapsed().as_secs_f64()
        );
    }
}
