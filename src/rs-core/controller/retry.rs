/// Consecutive network-error recoveries performed for the current session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RetryState {
    count: u32,
}

impl RetryState {
    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    /// Register a new retry attempt if `max_retries` has not been reached yet and return the
    /// delay in milliseconds to wait before performing it.
    ///
    /// Returns `None` once retries are exhausted, in which case the count is left untouched.
    pub(crate) fn next_attempt(&mut self, max_retries: u32, base: f64, max: f64) -> Option<f64> {
        if self.count >= max_retries {
            return None;
        }
        let delay = backoff_delay(self.count, base, max);
        self.count += 1;
        Some(delay)
    }

    pub(crate) fn reset(&mut self) {
        self.count = 0;
    }
}

/// Exponential backoff: `base`, `2 * base`, `4 * base`... capped to `max`.
fn backoff_delay(retry_count: u32, base: f64, max: f64) -> f64 {
    let factor = 2f64.powi(retry_count.min(31) as i32);
    f64::min(base * factor, max)
}
